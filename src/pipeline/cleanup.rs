//! Best-effort removal of intermediate artifacts. Never affects the
//! reported pipeline status.

use std::fs;
use std::io::ErrorKind;

use crate::paths::DerivedPaths;

/// Remove the intermediate composite transform unless the caller requested
/// it as a kept output, and always attempt to remove the engine-generated
/// inverse composite.
pub fn clean_artifacts(paths: &DerivedPaths, keep_composite: bool) {
    if !keep_composite {
        remove_quietly(&paths.composite_transform);
    }
    remove_quietly(&paths.inverse_composite());
}

/// Deleting a file that does not exist is not an error.
fn remove_quietly(path: &str) {
    match fs::remove_file(path) {
        Ok(()) => log::debug!("removed {}", path),
        Err(err) if err.kind() == ErrorKind::NotFound => {}
        Err(err) => log::debug!("could not remove {}: {}", path, err),
    }
}
