//! Application state management
//!
//! This module provides the shared application state that is passed
//! to all request handlers via Axum's state extraction.
//!
//! # Design Principles
//!
//! 1. **Injected collaborators**: stores and search providers are trait
//!    objects handed in by the caller; there is no global connection
//! 2. **Cheap cloning**: all fields are `Arc`s or `Arc`-backed
//! 3. **Immutable after creation**: state is read-only during request handling

use crate::auth::{CookiePolicy, SessionCodec};
use crate::config::AppConfig;
use crate::repositories::{EventStore, MemoryEventStore, MemoryUserStore, UserStore};
use crate::search::{ArtistSearch, LocationSearch, Unconfigured};
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Identity storage
    pub users: Arc<dyn UserStore>,
    /// Event storage
    pub events: Arc<dyn EventStore>,
    pub artists: Arc<dyn ArtistSearch>,
    pub locations: Arc<dyn LocationSearch>,
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Session token codec with pre-computed keys
    sessions: SessionCodec,
    cookies: CookiePolicy,
}

impl AppState {
    /// Create a new application state around the given stores
    ///
    /// Search providers start out unconfigured; see [`AppState::with_search`].
    pub fn new(users: Arc<dyn UserStore>, events: Arc<dyn EventStore>, config: AppConfig) -> Self {
        let sessions = SessionCodec::new(&config.jwt.secret);
        let cookies = CookiePolicy::new(config.cookie.mode);

        Self {
            users,
            events,
            artists: Arc::new(Unconfigured),
            locations: Arc::new(Unconfigured),
            config: Arc::new(config),
            sessions,
            cookies,
        }
    }

    /// State backed by fresh in-memory stores
    pub fn in_memory(config: AppConfig) -> Self {
        Self::new(
            Arc::new(MemoryUserStore::new()),
            Arc::new(MemoryEventStore::new()),
            config,
        )
    }

    /// Replace the search providers
    pub fn with_search(
        mut self,
        artists: Arc<dyn ArtistSearch>,
        locations: Arc<dyn LocationSearch>,
    ) -> Self {
        self.artists = artists;
        self.locations = locations;
        self
    }

    /// Get a reference to the configuration
    #[inline]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Get a reference to the session codec
    #[inline]
    pub fn sessions(&self) -> &SessionCodec {
        &self.sessions
    }

    /// Get the session cookie policy
    #[inline]
    pub fn cookies(&self) -> &CookiePolicy {
        &self.cookies
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_clone_shares_stores() {
        let state = AppState::in_memory(AppConfig::default());
        let cloned = state.clone();

        assert!(Arc::ptr_eq(&state.users, &cloned.users));
        assert!(Arc::ptr_eq(&state.events, &cloned.events));
    }

    #[test]
    fn test_session_and_cookie_share_fixed_lifetime() {
        let state = AppState::in_memory(AppConfig::default());
        let cookie = state.cookies().session_cookie("abc".to_string());

        assert_eq!(state.sessions().ttl_secs(), crate::auth::SESSION_TTL_SECS);
        assert_eq!(
            cookie.max_age(),
            Some(time::Duration::seconds(crate::auth::SESSION_TTL_SECS))
        );
    }
}
