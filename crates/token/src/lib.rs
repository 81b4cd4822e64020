//! `simplebank-token` — pluggable access-token issuing and verification.
//!
//! This crate is intentionally decoupled from HTTP and storage. A caller
//! builds one [`Maker`] at startup and shares it across request handlers.

pub mod bearer;
pub mod config;
pub mod error;
pub mod jwt;
pub mod maker;
pub mod paseto;
pub mod payload;

pub use bearer::{AuthContext, AuthError, authenticate, extract_bearer};
pub use config::{ConfigError, TokenConfig, TokenScheme};
pub use error::{TokenError, TokenErrorKind};
pub use jwt::JwtMaker;
pub use maker::Maker;
pub use paseto::PasetoMaker;
pub use payload::Payload;
