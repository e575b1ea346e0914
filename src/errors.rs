// src/errors.rs

//! Structured errors for configuration resolution.
//!
//! Everything outside the resolver seam uses `anyhow`; the resolver itself
//! returns a typed error so callers (and tests) can name exactly which
//! environment variable was malformed.

use thiserror::Error;

/// A present environment value failed validation.
///
/// Missing values are never errors; they take the documented default.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A `PM2_*` value that must be a non-negative base-10 integer is not one.
    #[error("environment variable {key} must be a non-negative integer, got {value:?}")]
    InvalidInteger { key: &'static str, value: String },

    /// `PM2_EXEC_MODE` is set to something other than "cluster" or "fork".
    #[error("PM2_EXEC_MODE must be \"cluster\" or \"fork\", got {value:?}")]
    InvalidExecMode { value: String },
}
