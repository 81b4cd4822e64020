//! Core error model.

use thiserror::Error;

/// Result type used across the core helpers.
pub type CoreResult<T> = Result<T, CoreError>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A currency code outside the supported set.
    #[error("unsupported currency: {0}")]
    UnsupportedCurrency(String),

    /// Hashing failed, or a stored hash could not be parsed.
    #[error("cannot hash password: {0}")]
    PasswordHash(String),

    /// The password does not match the stored hash.
    #[error("password does not match")]
    PasswordMismatch,
}

impl CoreError {
    pub fn password_hash(msg: impl Into<String>) -> Self {
        Self::PasswordHash(msg.into())
    }
}
