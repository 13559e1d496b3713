//! Password digest handling.
//!
//! Credentials are stored as Argon2id PHC strings and never as plaintext.
//! Verification always runs the full Argon2 comparison; callers that could
//! not find a user verify against [`PasswordDigest::fallback`] so the
//! unknown-email path performs the same work as a mismatch.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, SaltString};
use argon2::{Argon2, PasswordHasher, PasswordVerifier};
use serde::{Deserialize, Serialize};

/// Errors raised while hashing a password.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PasswordHashError {
    /// The hashing primitive rejected the input.
    #[error("failed to hash password: {message}")]
    Hash { message: String },
}

/// Stored Argon2id digest in PHC string format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PasswordDigest(String);

impl PasswordDigest {
    /// Hash a plaintext password with a fresh random salt.
    pub fn hash(password: &str) -> Result<Self, PasswordHashError> {
        let salt = SaltString::generate(&mut OsRng);
        let digest = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|error| PasswordHashError::Hash {
                message: error.to_string(),
            })?;
        Ok(Self(digest.to_string()))
    }

    /// Reconstruct a digest from its stored PHC string.
    pub fn from_phc_string(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Verify a plaintext password against this digest.
    ///
    /// An unparsable stored digest verifies as a mismatch rather than an
    /// error; login must not disclose storage problems to the caller.
    pub fn verify(&self, password: &str) -> bool {
        match PasswordHash::new(&self.0) {
            Ok(parsed) => Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok(),
            Err(error) => {
                tracing::warn!(%error, "stored password digest is not a valid PHC string");
                false
            }
        }
    }

    /// Digest of a throwaway password, used to equalise the work done on
    /// login attempts against unregistered email addresses.
    pub fn fallback() -> Result<Self, PasswordHashError> {
        Self::hash("fallback-password-for-unknown-accounts")
    }

    /// Borrow the PHC string for persistence.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

#[cfg(test)]
mod tests {
    //! Hashing and verification behaviour.
    use super::*;

    #[test]
    fn hash_then_verify_round_trips() {
        let digest = PasswordDigest::hash("correct horse battery staple").expect("hashing works");
        assert!(digest.verify("correct horse battery staple"));
        assert!(!digest.verify("incorrect horse"));
    }

    #[test]
    fn digests_are_salted() {
        let first = PasswordDigest::hash("pw").expect("hashing works");
        let second = PasswordDigest::hash("pw").expect("hashing works");
        assert_ne!(first.as_str(), second.as_str());
    }

    #[test]
    fn malformed_digest_verifies_as_mismatch() {
        let digest = PasswordDigest::from_phc_string("not-a-phc-string");
        assert!(!digest.verify("anything"));
    }

    #[test]
    fn digest_is_a_phc_string() {
        let digest = PasswordDigest::hash("pw").expect("hashing works");
        assert!(digest.as_str().starts_with("$argon2"));
    }
}
