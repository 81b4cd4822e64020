use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::TokenError;

/// Data carried inside every access token.
///
/// A payload is created fresh for each issued token and reconstructed on
/// each successful verification; it is never persisted on its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payload {
    /// Per-token identifier.
    pub id: Uuid,

    /// Authenticated principal. Opaque at this layer.
    pub username: String,

    pub issued_at: DateTime<Utc>,

    /// Instant after which the token must be rejected.
    pub expired_at: DateTime<Utc>,
}

impl Payload {
    /// Create a payload issued now and valid for `duration`.
    pub fn new(username: impl Into<String>, duration: Duration) -> Result<Self, TokenError> {
        Self::new_at(username, duration, Utc::now())
    }

    /// Create a payload with an explicit issue time.
    ///
    /// A non-positive `duration` yields a payload that is already expired.
    pub fn new_at(
        username: impl Into<String>,
        duration: Duration,
        now: DateTime<Utc>,
    ) -> Result<Self, TokenError> {
        let expired_at = now
            .checked_add_signed(duration)
            .ok_or(TokenError::DurationOutOfRange)?;

        Ok(Self {
            id: Uuid::now_v7(),
            username: username.into(),
            issued_at: now,
            expired_at,
        })
    }

    /// Check the validity window against the current time.
    pub fn valid(&self) -> Result<(), TokenError> {
        self.valid_at(Utc::now())
    }

    /// Check the validity window against `now`.
    ///
    /// The token is still valid at exactly `expired_at`.
    pub fn valid_at(&self, now: DateTime<Utc>) -> Result<(), TokenError> {
        if now > self.expired_at {
            return Err(TokenError::ExpiredToken);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn expiry_is_issue_time_plus_duration() {
        let now = Utc::now();
        let payload = Payload::new_at("alice", Duration::minutes(15), now).unwrap();

        assert_eq!(payload.username, "alice");
        assert_eq!(payload.issued_at, now);
        assert_eq!(payload.expired_at, now + Duration::minutes(15));
    }

    #[test]
    fn each_payload_gets_a_fresh_id() {
        let now = Utc::now();
        let a = Payload::new_at("alice", Duration::minutes(1), now).unwrap();
        let b = Payload::new_at("alice", Duration::minutes(1), now).unwrap();

        assert_ne!(a.id, b.id);
    }

    #[test]
    fn valid_until_expiry_inclusive() {
        let now = Utc::now();
        let payload = Payload::new_at("bob", Duration::seconds(30), now).unwrap();

        assert_eq!(payload.valid_at(now), Ok(()));
        assert_eq!(payload.valid_at(payload.expired_at), Ok(()));
        assert_eq!(
            payload.valid_at(payload.expired_at + Duration::nanoseconds(1)),
            Err(TokenError::ExpiredToken)
        );
    }

    #[test]
    fn negative_duration_is_already_expired() {
        let payload = Payload::new("carol", Duration::seconds(-1)).unwrap();
        assert_eq!(payload.valid(), Err(TokenError::ExpiredToken));
    }

    #[test]
    fn unrepresentable_expiry_is_rejected() {
        let err = Payload::new_at("dave", Duration::days(400_000_000), Utc::now()).unwrap_err();
        assert_eq!(err, TokenError::DurationOutOfRange);
    }

    #[test]
    fn json_round_trip_keeps_sub_second_precision() {
        let payload = Payload::new("erin", Duration::milliseconds(1_500)).unwrap();
        let json = serde_json::to_string(&payload).unwrap();
        let back: Payload = serde_json::from_str(&json).unwrap();

        assert_eq!(back, payload);
        assert!(json.contains("\"expired_at\""));
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 128,
            ..ProptestConfig::default()
        })]

        /// Property: positive durations always produce a currently valid
        /// payload whose window is exactly `duration` long.
        #[test]
        fn positive_durations_are_valid_at_issue(secs in 1i64..10_000_000i64) {
            let now = Utc::now();
            let payload = Payload::new_at("prop", Duration::seconds(secs), now).unwrap();

            prop_assert!(payload.expired_at > payload.issued_at);
            prop_assert_eq!(payload.expired_at - payload.issued_at, Duration::seconds(secs));
            prop_assert!(payload.valid_at(now).is_ok());
        }
    }
}
