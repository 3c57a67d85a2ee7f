use thiserror::Error;

/// Failures surfaced to the user by a form action. None of them are fatal:
/// the application stays usable after any of them.
#[derive(Debug, Error)]
pub enum ActionError {
    /// A required field is missing or the completed count is not a number.
    #[error("{0}")]
    Validation(String),
    /// Update or Delete was requested while no row is selected.
    #[error("Please select a record to {action}.")]
    NoSelection { action: &'static str },
    /// Reading or writing the data file failed.
    #[error("Failed to save data: {}", surface(.0))]
    Storage(anyhow::Error),
}

/// How loudly an error should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl ActionError {
    pub fn severity(&self) -> Severity {
        match self {
            ActionError::Validation(_) | ActionError::Storage(_) => Severity::Error,
            ActionError::NoSelection { .. } => Severity::Warning,
        }
    }
}

/// Innermost cause of an error chain, which is usually the OS message.
fn surface(err: &anyhow::Error) -> String {
    err.chain()
        .last()
        .map(|cause| cause.to_string())
        .unwrap_or_else(|| err.to_string())
}
