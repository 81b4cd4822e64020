//! Signed-claims tokens: JWT signed with HMAC-SHA256.

use chrono::Duration;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::{Maker, Payload, TokenError};

/// Minimum accepted secret length, in bytes.
pub const MIN_SECRET_KEY_SIZE: usize = 32;

/// The only signing algorithm this maker issues or accepts.
const SIGNING_ALGORITHM: Algorithm = Algorithm::HS256;

/// Claim set written into the JWT body.
///
/// The payload travels as-is; `iat`/`exp` duplicate its window as whole
/// Unix seconds for the library's own claim validation. `exp` is floored, so
/// the payload's `expired_at` is the authoritative bound.
#[derive(Debug, Serialize, Deserialize)]
struct SignedClaims {
    #[serde(flatten)]
    payload: Payload,
    iat: i64,
    exp: i64,
}

impl SignedClaims {
    fn new(payload: Payload) -> Self {
        Self {
            iat: payload.issued_at.timestamp(),
            exp: payload.expired_at.timestamp(),
            payload,
        }
    }
}

/// JWT maker.
///
/// Verification pins the algorithm to HS256: a token whose header names any
/// other algorithm is rejected before its signature is considered.
#[derive(Clone)]
pub struct JwtMaker {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtMaker {
    /// Build a maker from a secret of at least [`MIN_SECRET_KEY_SIZE`] bytes.
    pub fn new(secret_key: &str) -> Result<Self, TokenError> {
        if secret_key.len() < MIN_SECRET_KEY_SIZE {
            return Err(TokenError::KeyTooShort {
                min: MIN_SECRET_KEY_SIZE,
                actual: secret_key.len(),
            });
        }

        let mut validation = Validation::new(SIGNING_ALGORITHM);
        validation.leeway = 0;
        validation.validate_aud = false;
        validation.set_required_spec_claims(&["exp"]);

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret_key.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret_key.as_bytes()),
            validation,
        })
    }
}

impl core::fmt::Debug for JwtMaker {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("JwtMaker")
            .field("algorithm", &SIGNING_ALGORITHM)
            .finish_non_exhaustive()
    }
}

impl Maker for JwtMaker {
    fn create_token(&self, username: &str, duration: Duration) -> Result<String, TokenError> {
        let claims = SignedClaims::new(Payload::new(username, duration)?);

        let token = encode(&Header::new(SIGNING_ALGORITHM), &claims, &self.encoding_key)
            .map_err(|e| TokenError::issue(e.to_string()))?;

        tracing::debug!(token_id = %claims.payload.id, scheme = "jwt", "issued access token");
        Ok(token)
    }

    fn verify_token(&self, token: &str) -> Result<Payload, TokenError> {
        let data = decode::<SignedClaims>(token, &self.decoding_key, &self.validation).map_err(
            |e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::ExpiredToken,
                _ => TokenError::InvalidToken,
            },
        )?;

        let payload = data.claims.payload;
        payload.valid()?;
        Ok(payload)
    }
}
