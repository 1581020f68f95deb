use std::fmt;
use thiserror::Error;

/// Which of the two linear heads a weight belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Head {
    Policy,
    Value,
}

impl fmt::Display for Head {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Head::Policy => f.write_str("policy"),
            Head::Value => f.write_str("value"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MlError {
    #[error("dimension mismatch: weights have {expected} entries, features have {found}")]
    DimensionMismatch { expected: usize, found: usize },
    #[error("degenerate probability {0}")]
    DegenerateProbability(f64),
    #[error("non-finite {head} weight at index {index}")]
    NonFiniteWeight { head: Head, index: usize },
}

impl MlError {
    /// `true` for conditions the trainer can recover from by resetting the
    /// agent instead of aborting the run.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(self, MlError::NonFiniteWeight { .. })
    }
}
