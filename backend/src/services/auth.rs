//! Signup, login, and logout
//!
//! This is the only place that mints session tokens.
//!
//! # Performance
//!
//! Password hashing and verification run on the blocking thread pool.

use crate::auth::{CookiePolicy, PasswordService, SessionCodec};
use crate::error::ApiError;
use crate::repositories::{NewUser, UserStore};
use axum_extra::extract::cookie::Cookie;
use eventmap_shared::validation::{validate_email, validate_password};
use eventmap_shared::User;
use secrecy::{ExposeSecret, SecretString};
use tracing::info;

/// Authentication operations
pub struct AuthService;

impl AuthService {
    /// Register a new identity with only `{email, password_hash}` populated
    pub async fn signup(
        users: &dyn UserStore,
        email: &str,
        password: &SecretString,
    ) -> Result<User, ApiError> {
        validate_email(email).map_err(ApiError::Validation)?;
        validate_password(password.expose_secret()).map_err(ApiError::Validation)?;

        // The store also rejects duplicates, which covers concurrent signups
        if users.find_by_email(email).await?.is_some() {
            return Err(ApiError::AlreadyExists("User already exists".to_string()));
        }

        let password_hash = PasswordService::hash_async(password.expose_secret().clone())
            .await
            .map_err(ApiError::Internal)?;

        let user = users
            .insert(NewUser {
                email: email.to_string(),
                password_hash,
            })
            .await?;

        info!(user_id = %user.id, "User signed up");
        Ok(user)
    }

    /// Check credentials and issue a session token
    ///
    /// Unknown email and wrong password both return
    /// [`ApiError::InvalidCredentials`].
    pub async fn login(
        users: &dyn UserStore,
        sessions: &SessionCodec,
        email: &str,
        password: &SecretString,
    ) -> Result<String, ApiError> {
        let user = users.find_by_email(email).await?;

        // Unknown accounts still pay for a bcrypt verify
        let valid = PasswordService::verify_credential(
            password.expose_secret().clone(),
            user.as_ref().and_then(|u| u.password_hash.clone()),
        )
        .await
        .map_err(ApiError::Internal)?;

        let user = match user {
            Some(user) if valid => user,
            Some(user) => {
                info!(user_id = %user.id, "Login rejected: wrong password");
                return Err(ApiError::InvalidCredentials);
            }
            None => {
                info!("Login rejected: unknown email");
                return Err(ApiError::InvalidCredentials);
            }
        };

        let token = sessions
            .issue(user.id, &user.email)
            .map_err(ApiError::Internal)?;

        info!(user_id = %user.id, "User logged in");
        Ok(token)
    }

    /// Sessions are stateless, so logging out only tells the client to drop
    /// its cookie
    pub fn logout(cookies: &CookiePolicy) -> Cookie<'static> {
        cookies.removal_cookie()
    }
}
