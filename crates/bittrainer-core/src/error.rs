//! Engine error types.
//!
//! All failures originate at the input boundary: either the caller asked for
//! a question with an unusable configuration, or the answer text could not
//! be read as a number. The operation catalog itself never fails.

use thiserror::Error;

use crate::model::NumberBase;

/// Errors produced by the exercise engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// The generator cannot produce a question with this configuration.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The answer text is not a valid number for the question.
    #[error("could not parse '{input}' as {base}: {reason}")]
    Parse {
        input: String,
        base: NumberBase,
        reason: ParseFailure,
    },
}

/// Why an answer string was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParseFailure {
    #[error("no digits")]
    Empty,

    #[error("'{0}' is not a valid digit")]
    InvalidDigit(char),

    /// The value does not fit in the answer's width.
    #[error("value exceeds {width}-bit range")]
    OutOfRange { width: u32 },
}
