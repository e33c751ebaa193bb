//! Error types for parameter sweeps.

use thiserror::Error;

/// Errors raised by dimension cursors and parameter spaces.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SweepError {
    /// The dimension has no values at all.
    #[error("dimension [{name}] is empty")]
    EmptyDimension { name: String },

    /// `current` was requested before the first `next`.
    #[error("dimension [{name}] has not been started")]
    NotStarted { name: String },

    /// The cursor moved past the last value.
    #[error("dimension [{name}] is exhausted")]
    Exhausted { name: String },

    /// A parameter space already has a dimension with this name.
    #[error("dimension [{name}] is already part of the parameter space")]
    DuplicateDimension { name: String },
}

/// Result type alias for sweep operations.
pub type Result<T> = std::result::Result<T, SweepError>;

impl SweepError {
    pub fn empty(name: impl Into<String>) -> Self {
        Self::EmptyDimension { name: name.into() }
    }

    pub fn not_started(name: impl Into<String>) -> Self {
        Self::NotStarted { name: name.into() }
    }

    pub fn exhausted(name: impl Into<String>) -> Self {
        Self::Exhausted { name: name.into() }
    }

    pub fn duplicate(name: impl Into<String>) -> Self {
        Self::DuplicateDimension { name: name.into() }
    }
}
