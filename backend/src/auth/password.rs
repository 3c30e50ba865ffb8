//! Password hashing using bcrypt
//!
//! Provides salted one-way hashing and verification of user credentials.
//!
//! # Performance Considerations
//!
//! bcrypt is intentionally CPU-intensive. Request handlers should use the
//! `_async` variants, which run on the blocking thread pool.

use anyhow::Result;
use tokio::sync::OnceCell;

/// Fixed bcrypt work factor
pub const BCRYPT_COST: u32 = 10;

/// Stand-in credential verified when an account has no hash to check
static DUMMY_HASH: OnceCell<String> = OnceCell::const_new();

/// Credential store operations
///
/// Every call to [`PasswordService::hash`] generates a fresh salt, so the
/// same password never produces the same hash twice.
pub struct PasswordService;

impl PasswordService {
    /// Hash a password using bcrypt (blocking operation)
    pub fn hash(password: &str) -> Result<String> {
        bcrypt::hash(password, BCRYPT_COST)
            .map_err(|e| anyhow::anyhow!("Failed to hash password: {}", e))
    }

    /// Hash a password asynchronously (non-blocking)
    pub async fn hash_async(password: String) -> Result<String> {
        tokio::task::spawn_blocking(move || Self::hash(&password))
            .await
            .map_err(|e| anyhow::anyhow!("Task join error: {}", e))?
    }

    /// Verify a password against a stored hash (blocking operation)
    ///
    /// Returns `false` when there is no stored hash or when the stored
    /// value is not a bcrypt hash. Never errors.
    pub fn verify(password: &str, stored_hash: Option<&str>) -> bool {
        match stored_hash {
            Some(hash) => bcrypt::verify(password, hash).unwrap_or(false),
            None => false,
        }
    }

    /// Verify a password asynchronously (non-blocking)
    pub async fn verify_async(password: String, stored_hash: Option<String>) -> Result<bool> {
        tokio::task::spawn_blocking(move || Self::verify(&password, stored_hash.as_deref()))
            .await
            .map_err(|e| anyhow::anyhow!("Task join error: {}", e))
    }

    /// Verify a login attempt with the same bcrypt cost whether or not the
    /// account exists
    ///
    /// `None` means there is no credential to check (unknown email or a
    /// record without a hash). The password is then run against
    /// [`dummy_hash`](Self::dummy_hash) and the result is always `false`.
    pub async fn verify_credential(password: String, stored_hash: Option<String>) -> Result<bool> {
        match stored_hash {
            Some(hash) => Self::verify_async(password, Some(hash)).await,
            None => {
                let dummy = Self::dummy_hash().await?.to_string();
                Self::verify_async(password, Some(dummy)).await?;
                Ok(false)
            }
        }
    }

    /// Cost-10 hash of a throwaway secret, computed once per process
    pub async fn dummy_hash() -> Result<&'static str> {
        let hash = DUMMY_HASH
            .get_or_try_init(|| Self::hash_async("eventmap-no-such-account".to_string()))
            .await?;
        Ok(hash.as_str())
    }
}
