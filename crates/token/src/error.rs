//! Token error model.

use thiserror::Error;

/// Error returned by token makers.
///
/// `verify_token` only ever returns [`TokenError::InvalidToken`] or
/// [`TokenError::ExpiredToken`]; the remaining variants belong to maker
/// construction and token issuing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// Secret key shorter than the scheme's minimum.
    #[error("invalid key size: must be at least {min} bytes, got {actual}")]
    KeyTooShort { min: usize, actual: usize },

    /// Symmetric key whose length differs from the cipher's key size.
    #[error("invalid key size: must be exactly {expected} bytes, got {actual}")]
    KeyLengthMismatch { expected: usize, actual: usize },

    #[error("token is invalid")]
    InvalidToken,

    #[error("token has expired")]
    ExpiredToken,

    /// `issued_at + duration` is not representable.
    #[error("token duration is out of range")]
    DurationOutOfRange,

    /// Serializing, signing or encrypting a new token failed.
    #[error("failed to issue token: {0}")]
    Issue(String),
}

/// Coarse classification of a [`TokenError`], for callers that map errors to
/// responses.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum TokenErrorKind {
    InvalidConfiguration,
    InvalidToken,
    ExpiredToken,
    Issue,
}

impl TokenError {
    pub fn issue(msg: impl Into<String>) -> Self {
        Self::Issue(msg.into())
    }

    pub fn kind(&self) -> TokenErrorKind {
        match self {
            Self::KeyTooShort { .. } | Self::KeyLengthMismatch { .. } => {
                TokenErrorKind::InvalidConfiguration
            }
            Self::InvalidToken => TokenErrorKind::InvalidToken,
            Self::ExpiredToken => TokenErrorKind::ExpiredToken,
            Self::DurationOutOfRange | Self::Issue(_) => TokenErrorKind::Issue,
        }
    }

    pub fn is_expired(&self) -> bool {
        self.kind() == TokenErrorKind::ExpiredToken
    }
}

impl core::fmt::Display for TokenErrorKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let s = match self {
            TokenErrorKind::InvalidConfiguration => "invalid_configuration",
            TokenErrorKind::InvalidToken => "invalid_token",
            TokenErrorKind::ExpiredToken => "expired_token",
            TokenErrorKind::Issue => "issue_failed",
        };
        f.write_str(s)
    }
}
