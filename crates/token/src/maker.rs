use chrono::Duration;

use crate::{Payload, TokenError};

/// Issues and verifies access tokens for one scheme and one key.
///
/// Implementations hold no mutable state after construction, so a single
/// maker can be shared (e.g. behind `Arc<dyn Maker>`) by any number of
/// concurrent callers.
pub trait Maker: Send + Sync {
    /// Issue a token for `username` valid for `duration` from now.
    fn create_token(&self, username: &str, duration: Duration) -> Result<String, TokenError>;

    /// Authenticate `token` and return its payload.
    ///
    /// Fails with [`TokenError::InvalidToken`] or [`TokenError::ExpiredToken`]
    /// only.
    fn verify_token(&self, token: &str) -> Result<Payload, TokenError>;
}
