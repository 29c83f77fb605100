//! Domain error types.
//!
//! These are the recoverable outcomes the session reports back to the user
//! before returning to the calling menu. I/O failures travel as
//! `anyhow::Error` with file context instead.

use thiserror::Error;

/// Errors produced by quiz and admin operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuizError {
    /// The admin password did not match.
    #[error("access denied: incorrect password")]
    AccessDenied,

    /// New password and its confirmation differ.
    #[error("passwords don't match")]
    PasswordMismatch,

    /// The correct-answer number is outside 1..=option count.
    #[error("invalid answer number: {0}")]
    InvalidAnswer(String),

    /// A question must carry exactly the expected number of options.
    #[error("expected {expected} options, got {actual}")]
    OptionCount { expected: usize, actual: usize },

    /// A 1-based selection fell outside the listed range.
    #[error("selection {index} out of range 1..={len}")]
    OutOfRange { index: usize, len: usize },

    /// Standard input reached end of file.
    #[error("input stream closed")]
    InputClosed,
}

impl QuizError {
    /// Returns `true` if the session cannot continue after this error.
    pub fn is_fatal(&self) -> bool {
        matches!(self, QuizError::InputClosed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_closed_input_is_fatal() {
        assert!(QuizError::InputClosed.is_fatal());
        assert!(!QuizError::AccessDenied.is_fatal());
        assert!(!QuizError::OutOfRange { index: 3, len: 2 }.is_fatal());
    }

    #[test]
    fn messages_name_the_problem() {
        assert_eq!(
            QuizError::OutOfRange { index: 9, len: 4 }.to_string(),
            "selection 9 out of range 1..=4"
        );
        assert_eq!(QuizError::PasswordMismatch.to_string(), "passwords don't match");
    }
}
