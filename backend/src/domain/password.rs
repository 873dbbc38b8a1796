//! Password hashing and verification.
//!
//! bcrypt with a per-call random salt. Hashing is CPU-bound, so both
//! operations run on the blocking thread pool rather than the async
//! executor. Verification uses the library's constant-time comparison.

use bcrypt::{hash, verify};

use super::Error;

/// bcrypt cost factor applied to new password digests.
pub const BCRYPT_COST: u32 = 8;

/// Hash a plaintext password into a salted bcrypt digest.
pub async fn hash_password(password: &str) -> Result<String, Error> {
    let password = password.to_owned();
    tokio::task::spawn_blocking(move || {
        hash(password, BCRYPT_COST)
            .map_err(|err| Error::internal(format!("password hashing failed: {err}")))
    })
    .await
    .map_err(|err| Error::internal(format!("password hashing task failed: {err}")))?
}

/// Verify a plaintext password against a stored bcrypt digest.
pub async fn verify_password(password: &str, digest: &str) -> Result<bool, Error> {
    let password = password.to_owned();
    let digest = digest.to_owned();
    tokio::task::spawn_blocking(move || {
        verify(password, &digest)
            .map_err(|err| Error::internal(format!("password verification failed: {err}")))
    })
    .await
    .map_err(|err| Error::internal(format!("password verification task failed: {err}")))?
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn hash_then_verify_round_trips() {
        let digest = hash_password("password1").await.expect("hashing succeeds");
        assert!(digest.starts_with("$2"));
        assert_ne!(digest, "password1");

        let matches = verify_password("password1", &digest)
            .await
            .expect("verification succeeds");
        assert!(matches);
    }

    #[tokio::test]
    async fn wrong_password_does_not_verify() {
        let digest = hash_password("password1").await.expect("hashing succeeds");
        let matches = verify_password("password2", &digest)
            .await
            .expect("verification succeeds");
        assert!(!matches);
    }

    #[tokio::test]
    async fn salts_differ_between_calls() {
        let first = hash_password("password1").await.expect("hashing succeeds");
        let second = hash_password("password1").await.expect("hashing succeeds");
        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn malformed_digest_is_an_error_not_a_mismatch() {
        let err = verify_password("password1", "not-a-bcrypt-digest")
            .await
            .expect_err("malformed digest must error");
        assert_eq!(err.code(), crate::domain::ErrorCode::InternalError);
    }
}
