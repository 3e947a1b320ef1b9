use thiserror::Error;

/// Convenient result alias for the mathapi library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Raised when the evaluator rejects an expression (syntax error, unknown
    /// identifier, bad function arity, ...). The message is the evaluator's own
    /// text and is surfaced to clients unchanged.
    #[error("{message}")]
    Evaluation { message: String },
}

impl Error {
    /// Build an evaluation error from any displayable evaluator failure.
    pub fn evaluation(message: impl std::fmt::Display) -> Self {
        Self::Evaluation {
            message: message.to_string(),
        }
    }
}

impl From<meval::Error> for Error {
    fn from(err: meval::Error) -> Self {
        Self::evaluation(err)
    }
}
