//! Error types for strict extraction and configuration loading.

/// Errors produced by the opt-in strict surfaces of the crate.
///
/// The lenient [`Pager::extract`](crate::Pager::extract) path and the
/// envelope constructors never return these.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// `limit` was present but not a positive integer within bounds.
    #[error("invalid limit '{value}': {reason}")]
    InvalidLimit { value: String, reason: String },
    /// `offset` was present but not a non-negative integer.
    #[error("invalid offset '{value}': must be a non-negative integer")]
    InvalidOffset { value: String },
    /// Pager configuration could not be parsed or is inconsistent.
    #[error("invalid pager configuration: {0}")]
    InvalidConfig(String),
}
