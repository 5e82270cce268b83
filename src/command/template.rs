//! Free-form command templates: placeholder substitution and tokenization.

use lazy_static::lazy_static;

use crate::params::{filled, RegistrationParams, MAX_INPUT_VOLUMES};

pub const OUTPUT_BASE_PLACEHOLDER: &str = "$outputBase";
pub const INPUT_TRANSFORM_PLACEHOLDER: &str = "$inputTransform";

lazy_static! {
    /// The bounded, fixed-size family of indexed input-volume placeholders.
    pub static ref INPUT_VOLUME_PLACEHOLDERS: Vec<String> = (1..=MAX_INPUT_VOLUMES)
        .map(|index| format!("$inputVolume{:02}", index))
        .collect();
}

/// Substitute recognized placeholders with their resolved path values.
///
/// Only placeholders whose corresponding parameter is non-empty are
/// substituted; absent ones are left untouched in the command string.
pub fn substitute_placeholders(
    template: &str,
    params: &RegistrationParams,
    output_base: &str,
) -> String {
    let mut command = template.to_string();
    if !output_base.is_empty() {
        command = command.replace(OUTPUT_BASE_PLACEHOLDER, output_base);
    }
    if let Some(transform) = filled(&params.input_transform) {
        command = command.replace(INPUT_TRANSFORM_PLACEHOLDER, transform);
    }
    for (index, placeholder) in INPUT_VOLUME_PLACEHOLDERS.iter().enumerate() {
        if let Some(volume) = params.input_volumes.get(index).filter(|v| !v.is_empty()) {
            command = command.replace(placeholder.as_str(), volume);
        }
    }
    command
}

/// Split a command string on whitespace, keeping bracketed multi-field
/// arguments intact even when they contain spaces.
pub fn tokenize(command: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut depth: usize = 0;
    for ch in command.chars() {
        match ch {
            '[' => {
                depth += 1;
                current.push(ch);
            }
            ']' => {
                depth = depth.saturating_sub(1);
                current.push(ch);
            }
            c if c.is_whitespace() && depth == 0 => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
            }
            c => current.push(c),
        }
    }
    if !current.is_empty() {
        tokens.push(current);
    }
    tokens
}

/// First bracket-delimited field of a metric settings token, i.e. the
/// substring between the first `[` and the first `,`.
pub fn metric_fixed_image(token: &str) -> Option<String> {
    let open = token.find('[')?;
    let comma = token.find(',')?;
    if comma > open + 1 {
        Some(token[open + 1..comma].to_string())
    } else {
        None
    }
}
