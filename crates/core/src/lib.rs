//! `simplebank-core` — small domain helpers shared by the bank services.
//!
//! This crate contains **pure** primitives (no infrastructure concerns).

pub mod currency;
pub mod error;
pub mod password;

pub use currency::{Currency, is_supported_currency};
pub use error::{CoreError, CoreResult};
pub use password::{check_password, hash_password};
