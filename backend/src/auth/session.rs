//! Request-scoped session resolution
//!
//! Identity flows in two layers:
//! - [`identify`] runs on every request, never rejects, and stores a
//!   [`Session`] in the request extensions.
//! - [`RequireIdentity`] is an extractor for handlers that cannot run
//!   without a caller and rejects with `401 Unauthenticated`.
//!
//! A bad or expired token is the same as no token: the request continues
//! as anonymous and the individual operation decides what that means.

use crate::auth::cookie::SESSION_COOKIE;
use crate::auth::SessionCodec;
use crate::error::ApiError;
use crate::state::AppState;
use axum::{
    extract::{FromRef, FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::CookieJar;
use eventmap_shared::{AccessError, Identity, TokenError};
use std::convert::Infallible;
use tracing::debug;

/// Who is calling, as far as the session token can tell
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Session {
    #[default]
    Anonymous,
    Authenticated(Identity),
}

impl Session {
    /// Resolve the session from request headers
    ///
    /// The `token` cookie is tried first, then an `Authorization: Bearer`
    /// header. A stale cookie does not hide a valid bearer token.
    pub fn from_headers(codec: &SessionCodec, headers: &HeaderMap) -> Self {
        let candidates = [cookie_token(headers), bearer_token(headers)];

        for token in candidates.iter().flatten() {
            match codec.verify(Some(token.as_str())) {
                Ok(identity) => return Session::Authenticated(identity),
                Err(TokenError::Missing) => {}
                Err(reason) => {
                    debug!(%reason, "Session token rejected");
                }
            }
        }

        Session::Anonymous
    }

    pub fn identity(&self) -> Option<&Identity> {
        match self {
            Session::Authenticated(identity) => Some(identity),
            Session::Anonymous => None,
        }
    }

    pub fn require(&self) -> Result<&Identity, AccessError> {
        self.identity().ok_or(AccessError::Unauthenticated)
    }

    pub fn is_authenticated(&self) -> bool {
        self.identity().is_some()
    }
}

fn cookie_token(headers: &HeaderMap) -> Option<String> {
    CookieJar::from_headers(headers)
        .get(SESSION_COOKIE)
        .map(|cookie| cookie.value().to_string())
}

fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::to_string)
}

/// Middleware attaching a [`Session`] to every request
pub async fn identify(State(state): State<AppState>, mut request: Request, next: Next) -> Response {
    let session = Session::from_headers(state.sessions(), request.headers());
    request.extensions_mut().insert(session);
    next.run(request).await
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for Session
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        if let Some(session) = parts.extensions.get::<Session>() {
            return Ok(session.clone());
        }

        // Routes mounted without the `identify` layer resolve on demand
        let app_state = AppState::from_ref(state);
        Ok(Session::from_headers(app_state.sessions(), &parts.headers))
    }
}

/// Extractor for handlers that need an authenticated caller
#[derive(Debug, Clone)]
pub struct RequireIdentity(pub Identity);

#[axum::async_trait]
impl<S> FromRequestParts<S> for RequireIdentity
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let session = match Session::from_request_parts(parts, state).await {
            Ok(session) => session,
            Err(never) => match never {},
        };

        match session {
            Session::Authenticated(identity) => Ok(RequireIdentity(identity)),
            Session::Anonymous => Err(ApiError::Unauthenticated),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use uuid::Uuid;

    fn codec() -> SessionCodec {
        SessionCodec::new("session-test-secret")
    }

    #[test]
    fn test_no_token_is_anonymous() {
        let session = Session::from_headers(&codec(), &HeaderMap::new());
        assert_eq!(session, Session::Anonymous);
        assert!(session.require().is_err());
    }

    #[test]
    fn test_cookie_token_authenticates() {
        let codec = codec();
        let id = Uuid::new_v4();
        let token = codec.issue(id, "a@x.com").unwrap();

        let mut headers = HeaderMap::new();
        headers.insert(
            "cookie",
            HeaderValue::from_str(&format!("theme=dark; token={}", token)).unwrap(),
        );

        let session = Session::from_headers(&codec, &headers);
        assert_eq!(session.identity().map(|i| i.id), Some(id));
    }

    #[test]
    fn test_bearer_header_authenticates() {
        let codec = codec();
        let token = codec.issue(Uuid::new_v4(), "a@x.com").unwrap();

        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", token)).unwrap(),
        );

        assert!(Session::from_headers(&codec, &headers).is_authenticated());
    }

    #[test]
    fn test_bad_token_soft_fails_to_anonymous() {
        let mut headers = HeaderMap::new();
        headers.insert("cookie", HeaderValue::from_static("token=not.a.jwt"));

        assert_eq!(Session::from_headers(&codec(), &headers), Session::Anonymous);
    }

    #[test]
    fn test_stale_cookie_falls_back_to_bearer() {
        let codec = codec();
        let id = Uuid::new_v4();
        let token = codec.issue(id, "a@x.com").unwrap();

        let mut headers = HeaderMap::new();
        headers.insert("cookie", HeaderValue::from_static("token=not.a.jwt"));
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", token)).unwrap(),
        );

        let session = Session::from_headers(&codec, &headers);
        assert_eq!(session.identity().map(|i| i.id), Some(id));
    }

    #[test]
    fn test_valid_cookie_wins_over_bearer() {
        let codec = codec();
        let cookie_id = Uuid::new_v4();
        let cookie = codec.issue(cookie_id, "cookie@x.com").unwrap();
        let bearer = codec.issue(Uuid::new_v4(), "bearer@x.com").unwrap();

        let mut headers = HeaderMap::new();
        headers.insert(
            "cookie",
            HeaderValue::from_str(&format!("token={}", cookie)).unwrap(),
        );
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", bearer)).unwrap(),
        );

        let session = Session::from_headers(&codec, &headers);
        assert_eq!(session.identity().map(|i| i.id), Some(cookie_id));
    }

    #[test]
    fn test_token_from_other_secret_is_anonymous() {
        let foreign = SessionCodec::new("someone-else")
            .issue(Uuid::new_v4(), "a@x.com")
            .unwrap();

        let mut headers = HeaderMap::new();
        headers.insert(
            "cookie",
            HeaderValue::from_str(&format!("token={}", foreign)).unwrap(),
        );

        assert_eq!(Session::from_headers(&codec(), &headers), Session::Anonymous);
    }
}
