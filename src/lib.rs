pub mod command;
pub mod config;
pub mod engine;
pub mod error;
pub mod params;
pub mod paths;
pub mod pipeline;

pub use command::{ArgumentSource, CommandInvocation, Engine};
pub use engine::{AntsToolchain, EngineRunner};
pub use error::{ParameterError, PipelineError};
pub use params::{ApplyTransformsParams, OutputSpec, RegistrationParams};
pub use paths::{DerivationStrategy, DerivedPaths};
pub use pipeline::{Orchestrator, PipelineResult, PipelineStatus};

pub type Result<T> = anyhow::Result<T>;
