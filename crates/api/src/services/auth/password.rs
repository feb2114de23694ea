//! Password hashing with Argon2id.
//!
//! Digests are PHC strings, so the salt and parameters travel with the hash
//! and verification needs nothing else.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

use super::AuthError;

/// Hash a password with a freshly generated salt.
///
/// # Errors
///
/// Returns `AuthError::PasswordHash` if the hasher fails.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Check a password against a stored digest.
///
/// A digest that cannot be parsed never verifies.
#[must_use]
pub fn verify_password(password: &str, digest: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(digest) else {
        tracing::warn!("stored password digest is not a valid PHC string");
        return false;
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_then_verify() {
        let digest = hash_password("pw1").unwrap();
        assert!(verify_password("pw1", &digest));
        assert!(!verify_password("pw2", &digest));
    }

    #[test]
    fn test_same_password_different_salt() {
        let a = hash_password("hunter2").unwrap();
        let b = hash_password("hunter2").unwrap();
        assert_ne!(a, b);
        assert!(verify_password("hunter2", &a));
        assert!(verify_password("hunter2", &b));
    }

    #[test]
    fn test_digest_is_phc_string() {
        let digest = hash_password("pw1").unwrap();
        assert!(digest.starts_with("$argon2id$"));
        assert!(PasswordHash::new(&digest).is_ok());
    }

    #[test]
    fn test_garbage_digest_never_verifies() {
        assert!(!verify_password("pw1", "pw1"));
        assert!(!verify_password("pw1", ""));
    }
}
