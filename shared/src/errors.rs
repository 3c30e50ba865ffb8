//! Error types shared between the backend and its clients

use thiserror::Error;

/// Why a session token could not be turned into an identity.
///
/// Every variant is treated as "anonymous" by the session layer; the
/// distinction only exists for logging and tests.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Missing token")]
    Missing,

    #[error("Malformed token")]
    Malformed,

    #[error("Bad token signature")]
    BadSignature,

    #[error("Token expired")]
    Expired,
}

/// Access-control denials produced by the authorization guard
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessError {
    /// No identity is attached to the request
    #[error("Not logged in")]
    Unauthenticated,

    /// An identity is attached but does not own the resource
    #[error("Not allowed")]
    Unauthorized,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_error_messages_are_distinct() {
        assert_ne!(
            AccessError::Unauthenticated.to_string(),
            AccessError::Unauthorized.to_string()
        );
    }
}
