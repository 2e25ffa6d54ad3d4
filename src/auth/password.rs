use bcrypt::{hash, verify, DEFAULT_COST};

/// Hash a password for storage.
pub fn hash_password(plain: &str) -> Result<String, bcrypt::BcryptError> {
    hash(plain, DEFAULT_COST)
}

/// Verify a password against a stored hash.
///
/// Any verification error (corrupt hash, unsupported format) counts
/// as a mismatch.
pub fn verify_password(plain: &str, hashed: &str) -> bool {
    verify(plain, hashed).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hashed = hash_password("secret1").unwrap();
        assert!(verify_password("secret1", &hashed));
        assert!(!verify_password("secret2", &hashed));
    }

    #[test]
    fn test_corrupt_hash_is_mismatch() {
        assert!(!verify_password("secret1", "not-a-bcrypt-hash"));
    }
}
