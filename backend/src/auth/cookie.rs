//! Session cookie construction

use crate::auth::token::SESSION_TTL_SECS;
use crate::config::CookieMode;
use axum_extra::extract::cookie::{Cookie, SameSite};

/// Name of the cookie carrying the session token
pub const SESSION_COOKIE: &str = "token";

/// Builds the session cookie with attributes fixed by configuration
#[derive(Debug, Clone, Copy)]
pub struct CookiePolicy {
    mode: CookieMode,
}

impl CookiePolicy {
    pub fn new(mode: CookieMode) -> Self {
        Self { mode }
    }

    /// Cookie that hands a freshly issued token to the browser; it lives
    /// exactly as long as the token
    pub fn session_cookie(&self, token: String) -> Cookie<'static> {
        let mut cookie = self.base(token);
        cookie.set_max_age(time::Duration::seconds(SESSION_TTL_SECS));
        cookie
    }

    /// Cookie that instructs the browser to discard the token
    pub fn removal_cookie(&self) -> Cookie<'static> {
        let mut cookie = self.base(String::new());
        cookie.make_removal();
        cookie
    }

    fn base(&self, value: String) -> Cookie<'static> {
        let (secure, same_site) = match self.mode {
            CookieMode::Strict => (true, SameSite::None),
            CookieMode::Relaxed => (false, SameSite::Lax),
        };

        Cookie::build((SESSION_COOKIE, value))
            .path("/")
            .http_only(true)
            .secure(secure)
            .same_site(same_site)
            .build()
    }
}
