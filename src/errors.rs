use thiserror::Error;

/// Error type for run configuration and submission failures.
#[derive(Error, Debug)]
pub enum RunError {
    /// A user-supplied parameter failed validation. Raised before any
    /// external call, so no side effects have occurred.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// The external platform's store could not be reached.
    #[error("platform connection failed: {0}")]
    ConnectionFailure(String),
    /// The auxiliary dataset is missing, empty, or malformed.
    #[error("dataset error: {0}")]
    IOFailure(String),
    /// A platform call failed after validation succeeded.
    #[error("platform call {call} failed: {message}")]
    ExternalService { call: String, message: String },
}

impl From<std::io::Error> for RunError {
    fn from(error: std::io::Error) -> Self {
        RunError::IOFailure(error.to_string())
    }
}

/// Convenience type for `Result<T, RunError>`.
pub type RunResult<T> = Result<T, RunError>;
