//! Error types for u-allocate.

use thiserror::Error;

use crate::config::ConfigError;
use crate::validation::ValidationError;

/// Main error type for allocation runs.
///
/// Only precondition failures are errors. Forced overallocations are
/// recorded on the plan and never surface here.
#[derive(Debug, Error)]
pub enum AllocationError {
    /// The roster has no people.
    #[error("Roster is empty: at least one person is required")]
    EmptyRoster,

    /// There are no projects to allocate.
    #[error("Portfolio is empty: at least one project is required")]
    EmptyPortfolio,

    /// Input failed validation.
    #[error("Invalid input: {}", summarize(.0))]
    InvalidInput(Vec<ValidationError>),

    /// A deep-dive selection names a project that does not exist.
    #[error("Unknown project: {0}")]
    UnknownProject(String),

    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl AllocationError {
    /// Validation errors carried by this error, if any.
    pub fn validation_errors(&self) -> &[ValidationError] {
        match self {
            AllocationError::InvalidInput(errors) => errors,
            _ => &[],
        }
    }
}

fn summarize(errors: &[ValidationError]) -> String {
    match errors {
        [] => "no details".to_string(),
        [only] => only.message.clone(),
        [first, rest @ ..] => format!("{} (and {} more)", first.message, rest.len()),
    }
}

/// Result type alias for allocation operations.
pub type Result<T> = std::result::Result<T, AllocationError>;
