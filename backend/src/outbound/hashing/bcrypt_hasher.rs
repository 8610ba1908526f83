//! bcrypt implementation of the password hashing port.
//!
//! Digests use the `$2b$` format, so rows written by earlier deployments of
//! the service keep verifying.

use async_trait::async_trait;
use zeroize::Zeroizing;

use crate::domain::ports::{PasswordHashError, PasswordHasher};
use crate::domain::{PasswordDigest, TraceId};

/// Work factor applied to new digests.
pub const DEFAULT_BCRYPT_COST: u32 = 10;

const MIN_COST: u32 = 4;
const MAX_COST: u32 = 31;

/// [`PasswordHasher`] using bcrypt on the blocking pool.
#[derive(Debug, Clone, Copy)]
pub struct BcryptPasswordHasher {
    cost: u32,
}

impl BcryptPasswordHasher {
    /// Hasher with an explicit work factor, clamped to bcrypt's valid range.
    pub fn with_cost(cost: u32) -> Self {
        Self {
            cost: cost.clamp(MIN_COST, MAX_COST),
        }
    }

    /// Configured work factor.
    pub fn cost(&self) -> u32 {
        self.cost
    }
}

impl Default for BcryptPasswordHasher {
    fn default() -> Self {
        Self::with_cost(DEFAULT_BCRYPT_COST)
    }
}

#[async_trait]
impl PasswordHasher for BcryptPasswordHasher {
    async fn hash(&self, plaintext: &str) -> Result<PasswordDigest, PasswordHashError> {
        let plaintext = Zeroizing::new(plaintext.to_owned());
        let cost = self.cost;
        let digest = TraceId::spawn_blocking(move || bcrypt::hash(plaintext.as_str(), cost))
            .await
            .map_err(|err| PasswordHashError::hash(err.to_string()))?
            .map_err(|err| PasswordHashError::hash(err.to_string()))?;
        Ok(PasswordDigest::new(digest))
    }

    async fn verify(
        &self,
        plaintext: &str,
        digest: &PasswordDigest,
    ) -> Result<bool, PasswordHashError> {
        let plaintext = Zeroizing::new(plaintext.to_owned());
        let digest = digest.as_str().to_owned();
        TraceId::spawn_blocking(move || bcrypt::verify(plaintext.as_str(), &digest))
            .await
            .map_err(|err| PasswordHashError::verify(err.to_string()))?
            .map_err(|err| PasswordHashError::verify(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn hasher() -> BcryptPasswordHasher {
        BcryptPasswordHasher::with_cost(MIN_COST)
    }

    #[rstest]
    #[tokio::test]
    async fn digest_verifies_only_the_original_password(hasher: BcryptPasswordHasher) {
        let digest = hasher.hash("paddy-field").await.expect("hash");
        assert!(digest.as_str().starts_with("$2b$04$"));
        assert!(hasher.verify("paddy-field", &digest).await.expect("verify"));
        assert!(!hasher.verify("paddy-field ", &digest).await.expect("verify"));
    }

    #[rstest]
    #[tokio::test]
    async fn same_password_gets_distinct_salts(hasher: BcryptPasswordHasher) {
        let first = hasher.hash("secret").await.expect("hash");
        let second = hasher.hash("secret").await.expect("hash");
        assert_ne!(first, second);
    }

    #[rstest]
    #[tokio::test]
    async fn malformed_digest_is_a_verify_error(hasher: BcryptPasswordHasher) {
        let err = hasher
            .verify("secret", &PasswordDigest::new("not-a-bcrypt-digest"))
            .await
            .expect_err("malformed digest");
        assert!(matches!(err, PasswordHashError::Verify { .. }));
    }

    #[rstest]
    #[case(0, MIN_COST)]
    #[case(10, 10)]
    #[case(99, MAX_COST)]
    fn cost_is_clamped(#[case] requested: u32, #[case] expected: u32) {
        assert_eq!(BcryptPasswordHasher::with_cost(requested).cost(), expected);
    }

    #[test]
    fn default_cost_matches_stored_digests() {
        assert_eq!(BcryptPasswordHasher::default().cost(), DEFAULT_BCRYPT_COST);
    }
}
