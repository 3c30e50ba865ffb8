//! Artist and location search routes
//!
//! Pass-through to the configured providers; callers must be logged in.

use crate::auth::RequireIdentity;
use crate::error::ApiResult;
use crate::search::{search_artists, search_locations};
use crate::state::AppState;
use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use eventmap_shared::{Artist, Location, SearchQuery};

/// Create search routes
pub fn search_routes() -> Router<AppState> {
    Router::new()
        .route("/artists", get(artists))
        .route("/locations", get(locations))
}

/// GET /api/search/artists?name=
async fn artists(
    State(state): State<AppState>,
    RequireIdentity(_): RequireIdentity,
    Query(query): Query<SearchQuery>,
) -> ApiResult<Json<Vec<Artist>>> {
    Ok(Json(search_artists(state.artists.as_ref(), &query.name).await?))
}

/// GET /api/search/locations?name=
async fn locations(
    State(state): State<AppState>,
    RequireIdentity(_): RequireIdentity,
    Query(query): Query<SearchQuery>,
) -> ApiResult<Json<Vec<Location>>> {
    Ok(Json(search_locations(state.locations.as_ref(), &query.name).await?))
}
