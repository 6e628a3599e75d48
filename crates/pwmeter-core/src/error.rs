//! Error types for record construction.
//!
//! Evaluation and generation never fail; the only fallible step in the core
//! is turning caller input into a well-formed [`PasswordRecord`].
//!
//! [`PasswordRecord`]: crate::record::PasswordRecord

use thiserror::Error;

/// Errors raised while building a password record.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecordError {
    /// Saving requires a non-empty password.
    #[error("password must not be empty")]
    EmptyPassword,

    /// The timestamp does not match `YYYY-MM-DD HH:MM:SS`.
    #[error("invalid timestamp '{value}': expected YYYY-MM-DD HH:MM:SS")]
    InvalidTimestamp { value: String },
}
