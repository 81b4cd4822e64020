//! Boundary between an inbound `Authorization` header and a [`Maker`].
//!
//! Framework-free: an HTTP layer hands over the raw header value and maps
//! the returned [`AuthError`] onto its own response type.

use thiserror::Error;
use uuid::Uuid;

use crate::{Maker, TokenError, TokenErrorKind};

const BEARER_PREFIX: &str = "Bearer ";

/// Identity recovered from a verified access token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthContext {
    username: String,
    token_id: Uuid,
}

impl AuthContext {
    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn token_id(&self) -> Uuid {
        self.token_id
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("authorization header is not provided")]
    MissingAuthorization,

    #[error("unsupported authorization type")]
    UnsupportedScheme,

    #[error(transparent)]
    Token(#[from] TokenError),
}

impl AuthError {
    /// HTTP status for this error. Every authentication failure is a 401.
    pub fn status_code(&self) -> u16 {
        401
    }

    /// Stable machine-readable code for API responses.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::MissingAuthorization => "MISSING_AUTHORIZATION",
            Self::UnsupportedScheme => "UNSUPPORTED_AUTHORIZATION",
            Self::Token(e) if e.kind() == TokenErrorKind::ExpiredToken => "TOKEN_EXPIRED",
            Self::Token(_) => "INVALID_TOKEN",
        }
    }
}

/// Extract the token from an `Authorization: Bearer <token>` header value.
pub fn extract_bearer(header: Option<&str>) -> Result<&str, AuthError> {
    let header = header.ok_or(AuthError::MissingAuthorization)?;

    let token = header
        .strip_prefix(BEARER_PREFIX)
        .ok_or(AuthError::UnsupportedScheme)?
        .trim();
    if token.is_empty() {
        return Err(AuthError::MissingAuthorization);
    }

    Ok(token)
}

/// Verify the bearer token in `header` and return the caller's identity.
pub fn authenticate(maker: &dyn Maker, header: Option<&str>) -> Result<AuthContext, AuthError> {
    let token = extract_bearer(header)?;

    let payload = maker.verify_token(token).map_err(|e| {
        tracing::debug!(kind = %e.kind(), "access token rejected");
        AuthError::Token(e)
    })?;

    Ok(AuthContext {
        username: payload.username,
        token_id: payload.id,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{JwtMaker, PasetoMaker};
    use chrono::Duration;

    fn makers() -> Vec<Box<dyn Maker>> {
        vec![
            Box::new(JwtMaker::new("0123456789abcdef0123456789abcdef-jwt").unwrap()),
            Box::new(PasetoMaker::new("0123456789abcdef0123456789abcdef").unwrap()),
        ]
    }

    #[test]
    fn extracts_token_after_prefix() {
        assert_eq!(extract_bearer(Some("Bearer abc.def")), Ok("abc.def"));
        assert_eq!(extract_bearer(Some("Bearer   padded  ")), Ok("padded"));
    }

    #[test]
    fn rejects_missing_or_foreign_headers() {
        assert_eq!(extract_bearer(None), Err(AuthError::MissingAuthorization));
        assert_eq!(
            extract_bearer(Some("Bearer    ")),
            Err(AuthError::MissingAuthorization)
        );
        assert_eq!(
            extract_bearer(Some("Basic dXNlcjpwYXNz")),
            Err(AuthError::UnsupportedScheme)
        );
        assert_eq!(
            extract_bearer(Some("bearer lower-case")),
            Err(AuthError::UnsupportedScheme)
        );
    }

    #[test]
    fn authenticates_valid_token() {
        for maker in makers() {
            let token = maker.create_token("alice", Duration::minutes(5)).unwrap();
            let header = format!("Bearer {token}");

            let ctx = authenticate(maker.as_ref(), Some(header.as_str())).unwrap();
            assert_eq!(ctx.username(), "alice");
        }
    }

    #[test]
    fn expired_and_invalid_map_to_distinct_codes() {
        for maker in makers() {
            let expired = maker.create_token("alice", Duration::seconds(-1)).unwrap();
            let header = format!("Bearer {expired}");
            let err = authenticate(maker.as_ref(), Some(header.as_str())).unwrap_err();
            assert_eq!(err, AuthError::Token(TokenError::ExpiredToken));
            assert_eq!(err.error_code(), "TOKEN_EXPIRED");
            assert_eq!(err.status_code(), 401);

            let err = authenticate(maker.as_ref(), Some("Bearer not-a-token")).unwrap_err();
            assert_eq!(err.error_code(), "INVALID_TOKEN");
            assert_eq!(err.status_code(), 401);
        }
    }
}
