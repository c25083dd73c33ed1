use thiserror::Error;

/// Why an analysis produced no advice.
///
/// Each variant displays the fixed message shown to the user. None of them is
/// retried and none is fatal to the application.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InsightError {
    #[error("API Key not configured...")]
    MissingCredential,
    #[error("Could not generate advice at this time.")]
    EmptyResponse,
    /// Network or provider failure. The payload is kept for logs only.
    #[error("An error occurred while analyzing your finances. Please try again later.")]
    Transport(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AdvisorError {
    #[error("an analysis is already running")]
    Busy,
}
