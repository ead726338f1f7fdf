//! Framework error type.
//!
//! Sub-crates may define their own error enums and convert them into `NwError`
//! via `From` impls, or keep them separate and wrap `NwError` as one variant.
//! Both patterns are acceptable; prefer whichever keeps error sites clean.

use thiserror::Error;

use crate::TargetId;

/// The top-level error type for `nw-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum NwError {
    #[error("configuration error: {0}")]
    Config(String),

    /// `TargetId::INVALID` is a sentinel and never names a live target.
    #[error("{0} is reserved and cannot be registered")]
    ReservedTargetId(TargetId),

    #[error("target id space exhausted")]
    TargetIdsExhausted,
}

/// Shorthand result type for all `nw-*` crates.
pub type NwResult<T> = Result<T, NwError>;

/// Reject a non-finite configuration value.
///
/// Shared by every `validate()` implementation so error messages stay uniform.
pub fn ensure_finite(what: &str, value: f32) -> NwResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(NwError::Config(format!("{what} must be finite, got {value}")))
    }
}
