//! Third-party artist and location lookup
//!
//! The upstream catalogues are opaque collaborators behind the
//! [`ArtistSearch`] and [`LocationSearch`] traits. This crate only decides
//! who may call them and short-circuits empty queries.

use crate::error::ApiError;
use anyhow::Result;
use async_trait::async_trait;
use eventmap_shared::{Artist, Location};
use tracing::debug;

/// Artist catalogue lookup by name
#[async_trait]
pub trait ArtistSearch: Send + Sync {
    async fn search(&self, name: &str) -> Result<Vec<Artist>>;
}

/// Place lookup by name
#[async_trait]
pub trait LocationSearch: Send + Sync {
    async fn search(&self, name: &str) -> Result<Vec<Location>>;
}

/// Provider used when no upstream catalogue is wired in; finds nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct Unconfigured;

#[async_trait]
impl ArtistSearch for Unconfigured {
    async fn search(&self, name: &str) -> Result<Vec<Artist>> {
        debug!(query = name, "No artist search provider configured");
        Ok(Vec::new())
    }
}

#[async_trait]
impl LocationSearch for Unconfigured {
    async fn search(&self, name: &str) -> Result<Vec<Location>> {
        debug!(query = name, "No location search provider configured");
        Ok(Vec::new())
    }
}

/// Query the artist provider; an empty name never reaches upstream
pub async fn search_artists(provider: &dyn ArtistSearch, name: &str) -> Result<Vec<Artist>, ApiError> {
    if name.trim().is_empty() {
        return Ok(Vec::new());
    }
    provider.search(name).await.map_err(ApiError::Internal)
}

/// Query the location provider; an empty name never reaches upstream
pub async fn search_locations(
    provider: &dyn LocationSearch,
    name: &str,
) -> Result<Vec<Location>, ApiError> {
    if name.trim().is_empty() {
        return Ok(Vec::new());
    }
    provider.search(name).await.map_err(ApiError::Internal)
}
