//! Token configuration: which scheme, which key, how long tokens live.
//!
//! Loaded once at process startup; the resulting maker is then passed to
//! whatever needs it.

use core::str::FromStr;
use std::sync::Arc;

use chrono::Duration;
use thiserror::Error;
use zeroize::Zeroizing;

use crate::{JwtMaker, Maker, PasetoMaker, TokenError};

pub const SCHEME_VAR: &str = "TOKEN_SCHEME";
pub const SYMMETRIC_KEY_VAR: &str = "TOKEN_SYMMETRIC_KEY";
pub const ACCESS_TOKEN_DURATION_VAR: &str = "ACCESS_TOKEN_DURATION";

const DEFAULT_ACCESS_TOKEN_DURATION: &str = "15m";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required setting {0}")]
    Missing(&'static str),

    #[error("invalid value for {var}: {reason}")]
    Invalid { var: &'static str, reason: String },
}

/// Token scheme selector.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub enum TokenScheme {
    /// HS256-signed JWT.
    Jwt,
    /// PASETO `v2.local`.
    #[default]
    Paseto,
}

impl TokenScheme {
    /// Construct the maker for this scheme.
    pub fn build_maker(self, key: &str) -> Result<Arc<dyn Maker>, TokenError> {
        Ok(match self {
            TokenScheme::Jwt => Arc::new(JwtMaker::new(key)?),
            TokenScheme::Paseto => Arc::new(PasetoMaker::new(key)?),
        })
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TokenScheme::Jwt => "jwt",
            TokenScheme::Paseto => "paseto",
        }
    }
}

impl core::fmt::Display for TokenScheme {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TokenScheme {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "jwt" => Ok(TokenScheme::Jwt),
            "paseto" => Ok(TokenScheme::Paseto),
            other => Err(ConfigError::Invalid {
                var: SCHEME_VAR,
                reason: format!("unknown scheme `{other}` (expected `jwt` or `paseto`)"),
            }),
        }
    }
}

/// Process-level token settings.
#[derive(Clone)]
pub struct TokenConfig {
    pub scheme: TokenScheme,
    pub symmetric_key: Zeroizing<String>,
    pub access_token_duration: Duration,
}

impl TokenConfig {
    /// Load settings from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load settings through an arbitrary lookup (environment, file, test map).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let scheme = match lookup(SCHEME_VAR) {
            Some(raw) => raw.parse()?,
            None => TokenScheme::default(),
        };

        let symmetric_key = lookup(SYMMETRIC_KEY_VAR)
            .filter(|k| !k.is_empty())
            .map(Zeroizing::new)
            .ok_or(ConfigError::Missing(SYMMETRIC_KEY_VAR))?;

        let raw_duration = lookup(ACCESS_TOKEN_DURATION_VAR)
            .unwrap_or_else(|| DEFAULT_ACCESS_TOKEN_DURATION.to_string());
        let access_token_duration =
            parse_duration(&raw_duration).map_err(|reason| ConfigError::Invalid {
                var: ACCESS_TOKEN_DURATION_VAR,
                reason,
            })?;

        Ok(Self {
            scheme,
            symmetric_key,
            access_token_duration,
        })
    }

    /// Build the configured maker.
    pub fn build_maker(&self) -> Result<Arc<dyn Maker>, TokenError> {
        let maker = self.scheme.build_maker(&self.symmetric_key)?;
        tracing::info!(
            scheme = %self.scheme,
            access_token_ttl_secs = self.access_token_duration.num_seconds(),
            "token maker initialized"
        );
        Ok(maker)
    }
}

impl core::fmt::Debug for TokenConfig {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TokenConfig")
            .field("scheme", &self.scheme)
            .field("symmetric_key", &"[redacted]")
            .field("access_token_duration", &self.access_token_duration)
            .finish()
    }
}

/// Parse a positive duration such as `15m`, `1h30m`, `45s` or `900`
/// (bare seconds).
pub fn parse_duration(raw: &str) -> Result<Duration, String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err("empty duration".to_string());
    }

    let total = if raw.bytes().all(|b| b.is_ascii_digit()) {
        let secs: i64 = raw.parse().map_err(|e| format!("{raw}: {e}"))?;
        Duration::try_seconds(secs).ok_or_else(|| format!("{raw}: out of range"))?
    } else {
        parse_unit_duration(raw)?
    };

    if total <= Duration::zero() {
        return Err(format!("{raw}: must be positive"));
    }
    Ok(total)
}

fn parse_unit_duration(raw: &str) -> Result<Duration, String> {
    let mut total = Duration::zero();
    let mut digits = String::new();

    for c in raw.chars() {
        if c.is_ascii_digit() {
            digits.push(c);
            continue;
        }

        let n: i64 = digits
            .parse()
            .map_err(|_| format!("{raw}: expected a number before `{c}`"))?;
        digits.clear();

        let part = match c {
            'h' => Duration::try_hours(n),
            'm' => Duration::try_minutes(n),
            's' => Duration::try_seconds(n),
            _ => return Err(format!("{raw}: unknown unit `{c}`")),
        }
        .ok_or_else(|| format!("{raw}: out of range"))?;

        total = total
            .checked_add(&part)
            .ok_or_else(|| format!("{raw}: out of range"))?;
    }

    if !digits.is_empty() {
        return Err(format!("{raw}: missing unit after `{digits}`"));
    }
    Ok(total)
}
