//! Authentication routes
//!
//! Signup, login, logout, and the caller's identity. The session token
//! travels in the `token` cookie.

use crate::auth::RequireIdentity;
use crate::error::ApiResult;
use crate::routes::extract::JsonBody;
use crate::services::AuthService;
use crate::state::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use axum_extra::extract::CookieJar;
use eventmap_shared::{Identity, LoginRequest, MessageResponse, SignupRequest};

/// Create auth routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/me", get(me))
}

/// POST /signup
async fn signup(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<SignupRequest>,
) -> ApiResult<(StatusCode, Json<MessageResponse>)> {
    AuthService::signup(state.users.as_ref(), &req.email, &req.password).await?;
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("User created successfully")),
    ))
}

/// POST /login
///
/// Sets the session cookie on success.
async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    JsonBody(req): JsonBody<LoginRequest>,
) -> ApiResult<(CookieJar, Json<MessageResponse>)> {
    let token =
        AuthService::login(state.users.as_ref(), state.sessions(), &req.email, &req.password)
            .await?;

    let jar = jar.add(state.cookies().session_cookie(token));
    Ok((jar, Json(MessageResponse::new("Login successful"))))
}

/// POST /logout
async fn logout(State(state): State<AppState>, jar: CookieJar) -> (CookieJar, Json<MessageResponse>) {
    let jar = jar.add(AuthService::logout(state.cookies()));
    (jar, Json(MessageResponse::new("Logged out")))
}

/// GET /me
///
/// Unlike list reads, this rejects anonymous callers with 401.
async fn me(RequireIdentity(identity): RequireIdentity) -> Json<Identity> {
    Json(identity)
}
