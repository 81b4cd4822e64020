//! Password hashing (Argon2id, PHC string format).

use argon2::Argon2;
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{Error as HashError, PasswordHash, PasswordHasher, PasswordVerifier, SaltString};

use crate::{CoreError, CoreResult};

/// Hash `password` with a fresh random salt.
///
/// The returned PHC string embeds algorithm, parameters and salt, so it is
/// all [`check_password`] needs.
pub fn hash_password(password: &str) -> CoreResult<String> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| CoreError::password_hash(e.to_string()))
}

/// Check `password` against a hash produced by [`hash_password`].
pub fn check_password(password: &str, hashed_password: &str) -> CoreResult<()> {
    let parsed =
        PasswordHash::new(hashed_password).map_err(|e| CoreError::password_hash(e.to_string()))?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(()),
        Err(HashError::Password) => Err(CoreError::PasswordMismatch),
        Err(e) => Err(CoreError::password_hash(e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn correct_password_checks_out() {
        let hash = hash_password("secret").unwrap();

        assert!(hash.starts_with("$argon2id$"));
        assert_eq!(check_password("secret", &hash), Ok(()));
    }

    #[test]
    fn wrong_password_is_a_mismatch() {
        let hash = hash_password("secret").unwrap();
        assert_eq!(
            check_password("not-secret", &hash),
            Err(CoreError::PasswordMismatch)
        );
    }

    #[test]
    fn same_password_hashes_differently() {
        let a = hash_password("secret").unwrap();
        let b = hash_password("secret").unwrap();

        assert_ne!(a, b);
        assert_eq!(check_password("secret", &a), Ok(()));
        assert_eq!(check_password("secret", &b), Ok(()));
    }

    #[test]
    fn malformed_hash_is_reported() {
        let err = check_password("secret", "not-a-phc-string").unwrap_err();
        assert!(matches!(err, CoreError::PasswordHash(_)));
    }
}
