//! Session token issuance and verification
//!
//! Tokens are HS256 JWTs carrying exactly `{id, email, iat, exp}`. They are
//! not stored server-side: the signature and the expiry are the whole story,
//! so a token stays valid until it expires even after logout.

use anyhow::Result;
use chrono::{DateTime, Duration, Utc};
use eventmap_shared::{Identity, TokenError};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

/// Lifetime of every session token: one hour, not configurable
pub const SESSION_TTL_SECS: i64 = 3600;

/// Session token claims
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionClaims {
    /// Identity id
    pub id: Uuid,
    /// Identity email
    pub email: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

/// Pre-computed signing keys, shared behind `Arc`
#[derive(Clone)]
struct SessionKeys {
    encoding: Arc<EncodingKey>,
    decoding: Arc<DecodingKey>,
}

impl SessionKeys {
    fn new(secret: &str) -> Self {
        Self {
            encoding: Arc::new(EncodingKey::from_secret(secret.as_bytes())),
            decoding: Arc::new(DecodingKey::from_secret(secret.as_bytes())),
        }
    }
}

/// Session token codec
///
/// Build once at startup and keep it in `AppState`; cloning is cheap.
#[derive(Clone)]
pub struct SessionCodec {
    keys: SessionKeys,
    ttl: Duration,
    validation: Validation,
}

impl SessionCodec {
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is checked in `verify_at` against an explicit clock
        validation.validate_exp = false;
        validation.leeway = 0;

        Self {
            keys: SessionKeys::new(secret),
            ttl: Duration::seconds(SESSION_TTL_SECS),
            validation,
        }
    }

    /// Lifetime of a freshly issued token
    #[inline]
    pub fn ttl_secs(&self) -> i64 {
        self.ttl.num_seconds()
    }

    /// Issue a token for an identity, valid from now
    #[inline]
    pub fn issue(&self, id: Uuid, email: &str) -> Result<String> {
        self.issue_at(id, email, Utc::now())
    }

    /// Issue a token as if the current time were `now`
    pub fn issue_at(&self, id: Uuid, email: &str, now: DateTime<Utc>) -> Result<String> {
        let claims = SessionClaims {
            id,
            email: email.to_string(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.keys.encoding)
            .map_err(|e| anyhow::anyhow!("Failed to issue session token: {}", e))
    }

    /// Verify a token against the current time
    #[inline]
    pub fn verify(&self, token: Option<&str>) -> Result<Identity, TokenError> {
        self.verify_at(token, Utc::now())
    }

    /// Verify signature and expiry as of `now`
    ///
    /// A token is valid up to and including its `exp` second.
    pub fn verify_at(&self, token: Option<&str>, now: DateTime<Utc>) -> Result<Identity, TokenError> {
        let token = match token {
            Some(t) if !t.is_empty() => t,
            _ => return Err(TokenError::Missing),
        };

        let data = decode::<SessionClaims>(token, &self.keys.decoding, &self.validation).map_err(
            |e| match e.kind() {
                ErrorKind::InvalidSignature => TokenError::BadSignature,
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Malformed,
            },
        )?;

        if data.claims.exp < now.timestamp() {
            return Err(TokenError::Expired);
        }

        Ok(Identity {
            id: data.claims.id,
            email: data.claims.email,
        })
    }
}
