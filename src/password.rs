use crate::error::AppResult;

/// bcrypt work factor applied to every stored admin password.
pub const PASSWORD_HASH_COST: u32 = 14;

/// Hashes a plaintext password with bcrypt at `PASSWORD_HASH_COST`.
///
/// Each call draws a fresh salt, so hashing the same password twice yields different strings.
pub fn hash_password(password: &str) -> AppResult<String> {
    hash_password_with_cost(password, PASSWORD_HASH_COST)
}

/// Same as `hash_password` with an explicit cost. Costs outside bcrypt's 4..=31 range fail.
pub fn hash_password_with_cost(password: &str, cost: u32) -> AppResult<String> {
    Ok(bcrypt::hash(password, cost)?)
}

/// Checks a plaintext password against a stored bcrypt hash.
///
/// Returns `Ok(false)` on mismatch and an error only when `hash` is not a valid bcrypt string.
pub fn verify_password(password: &str, hash: &str) -> AppResult<bool> {
    Ok(bcrypt::verify(password, hash)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    // bcrypt's minimum cost keeps the suite fast.
    const TEST_COST: u32 = 4;

    #[test]
    fn test_hash_then_verify_roundtrip() {
        let hash = hash_password_with_cost("correct horse", TEST_COST).unwrap();

        assert!(verify_password("correct horse", &hash).unwrap());
        assert!(!verify_password("battery staple", &hash).unwrap());
    }

    #[test]
    fn test_same_password_produces_different_hashes() {
        let first = hash_password_with_cost("same_password", TEST_COST).unwrap();
        let second = hash_password_with_cost("same_password", TEST_COST).unwrap();

        assert_ne!(first, second, "every hash must use a fresh salt");
    }

    #[test]
    fn test_hash_does_not_contain_plaintext() {
        let hash = hash_password_with_cost("my_secret_password", TEST_COST).unwrap();

        assert!(hash.starts_with("$2"));
        assert!(!hash.contains("my_secret_password"));
    }

    #[test]
    fn test_verify_rejects_malformed_hash() {
        assert!(verify_password("password", "not-a-bcrypt-hash").is_err());
    }

    #[test]
    fn test_invalid_cost_is_an_error() {
        assert!(hash_password_with_cost("password", 2).is_err());
    }

    #[test]
    fn test_default_cost_is_embedded_in_hash() {
        let hash = hash_password("cost check").unwrap();

        // Modular crypt format: $2b$<cost>$...
        let cost: u32 = hash.split('$').nth(2).unwrap().parse().unwrap();
        assert_eq!(cost, PASSWORD_HASH_COST);
        assert!(verify_password("cost check", &hash).unwrap());
    }
}
