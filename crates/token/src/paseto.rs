//! Authenticated-encryption tokens: PASETO `v2.local`.
//!
//! The JSON payload is sealed whole by `rusty_paseto`'s core layer, which
//! performs no claim validation of its own. Nothing in the token names an
//! algorithm beyond the fixed header, and decryption reveals no structure
//! until the tag has been checked.

use chrono::Duration;
use rusty_paseto::core::{
    Footer, Key, Local, Paseto, PasetoNonce, PasetoSymmetricKey, Payload as Plaintext, V2,
};
use zeroize::Zeroizing;

use crate::{Maker, Payload, TokenError};

/// Required symmetric key length (XChaCha20-Poly1305 key size).
pub const SYMMETRIC_KEY_SIZE: usize = 32;

const HEADER: &str = "v2.local.";
const NONCE_KEY_SIZE: usize = 24;

/// PASETO `v2.local` maker.
///
/// Decryption is all-or-nothing: tampering, a foreign key and malformed
/// input all surface as [`TokenError::InvalidToken`]. Expiry is checked
/// explicitly on the decrypted payload.
#[derive(Clone)]
pub struct PasetoMaker {
    symmetric_key: Zeroizing<[u8; SYMMETRIC_KEY_SIZE]>,
}

impl PasetoMaker {
    /// Build a maker from a key of exactly [`SYMMETRIC_KEY_SIZE`] bytes.
    pub fn new(symmetric_key: &str) -> Result<Self, TokenError> {
        let bytes = <[u8; SYMMETRIC_KEY_SIZE]>::try_from(symmetric_key.as_bytes()).map_err(|_| {
            TokenError::KeyLengthMismatch {
                expected: SYMMETRIC_KEY_SIZE,
                actual: symmetric_key.len(),
            }
        })?;

        Ok(Self {
            symmetric_key: Zeroizing::new(bytes),
        })
    }

    fn key(&self) -> PasetoSymmetricKey<V2, Local> {
        PasetoSymmetricKey::<V2, Local>::from(Key::<SYMMETRIC_KEY_SIZE>::from(*self.symmetric_key))
    }

    fn encrypt(&self, message: &str) -> Result<String, TokenError> {
        let nonce_key: [u8; NONCE_KEY_SIZE] = rand::random();
        self.encrypt_with_nonce_key(message, nonce_key)
    }

    /// v2 derives the real nonce from `nonce_key` and the message.
    fn encrypt_with_nonce_key(
        &self,
        message: &str,
        nonce_key: [u8; NONCE_KEY_SIZE],
    ) -> Result<String, TokenError> {
        let nonce_key = Key::<NONCE_KEY_SIZE>::from(nonce_key);
        let nonce = PasetoNonce::<V2, Local>::from(&nonce_key);

        Paseto::<V2, Local>::builder()
            .set_payload(Plaintext::from(message))
            .try_encrypt(&self.key(), &nonce)
            .map_err(|e| TokenError::issue(e.to_string()))
    }

    fn decrypt(&self, token: &str) -> Result<Zeroizing<String>, TokenError> {
        // No footer is ever issued, so a fourth segment is malformed.
        if !token.starts_with(HEADER) || token.split('.').count() != 3 {
            return Err(TokenError::InvalidToken);
        }

        Paseto::<V2, Local>::try_decrypt(token, &self.key(), None::<Footer>)
            .map(Zeroizing::new)
            .map_err(|_| TokenError::InvalidToken)
    }
}

impl core::fmt::Debug for PasetoMaker {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PasetoMaker")
            .field("version", &"v2.local")
            .finish_non_exhaustive()
    }
}

impl Maker for PasetoMaker {
    fn create_token(&self, username: &str, duration: Duration) -> Result<String, TokenError> {
        let payload = Payload::new(username, duration)?;
        let message = serde_json::to_string(&payload)
            .map(Zeroizing::new)
            .map_err(|e| TokenError::issue(e.to_string()))?;

        let token = self.encrypt(&message)?;

        tracing::debug!(token_id = %payload.id, scheme = "paseto", "issued access token");
        Ok(token)
    }

    fn verify_token(&self, token: &str) -> Result<Payload, TokenError> {
        let message = self.decrypt(token)?;
        let payload: Payload =
            serde_json::from_str(&message).map_err(|_| TokenError::InvalidToken)?;

        payload.valid()?;
        Ok(payload)
    }
}
