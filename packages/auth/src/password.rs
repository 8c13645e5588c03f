//! Argon2 password hashing.

use argon2::Argon2;
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};

use crate::AuthError;

/// Hashes a password with Argon2 and a fresh random salt.
///
/// # Errors
///
/// Returns [`AuthError::Hash`] if hashing fails.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AuthError::Hash(e.to_string()))?;

    Ok(hash.to_string())
}

/// Verifies a password against a stored Argon2 hash.
///
/// A malformed stored hash counts as a failed verification rather than an
/// error, so callers can treat the result as a plain yes/no.
#[must_use]
pub fn verify_password(hash: &str, password: &str) -> bool {
    PasswordHash::new(hash).is_ok_and(|parsed| {
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_verifies_original_password_only() {
        let hash = hash_password("Admin123!").unwrap();

        assert!(verify_password(&hash, "Admin123!"));
        assert!(!verify_password(&hash, "admin123!"));
        assert!(!verify_password(&hash, ""));
    }

    #[test]
    fn hashes_are_salted() {
        let first = hash_password("secret").unwrap();
        let second = hash_password("secret").unwrap();

        assert_ne!(first, second);
        assert!(verify_password(&first, "secret"));
        assert!(verify_password(&second, "secret"));
    }

    #[test]
    fn malformed_hash_fails_verification() {
        assert!(!verify_password("not-a-hash", "secret"));
    }
}
