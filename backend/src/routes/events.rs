//! Event API routes

use crate::auth::{ReadScope, Session};
use crate::error::ApiResult;
use crate::routes::extract::JsonBody;
use crate::services::EventService;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, patch},
    Json, Router,
};
use eventmap_shared::{CreateEventRequest, Event, EventPatch};
use uuid::Uuid;

/// Create event routes
pub fn event_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_my_events).post(create_event))
        .route("/public", get(list_public_events))
        .route("/:id", patch(update_event).delete(delete_event))
}

/// GET /api/events - Events created by the caller
async fn list_my_events(State(state): State<AppState>, session: Session) -> ApiResult<Json<Vec<Event>>> {
    let events = EventService::list(state.events.as_ref(), &session, ReadScope::Mine).await?;
    Ok(Json(events))
}

/// GET /api/events/public - All events, for logged-in callers
async fn list_public_events(
    State(state): State<AppState>,
    session: Session,
) -> ApiResult<Json<Vec<Event>>> {
    let events = EventService::list(state.events.as_ref(), &session, ReadScope::Public).await?;
    Ok(Json(events))
}

/// POST /api/events
async fn create_event(
    State(state): State<AppState>,
    session: Session,
    JsonBody(req): JsonBody<CreateEventRequest>,
) -> ApiResult<(StatusCode, Json<Event>)> {
    let event = EventService::create(state.events.as_ref(), &session, req).await?;
    Ok((StatusCode::CREATED, Json(event)))
}

/// PATCH /api/events/:id
async fn update_event(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<Uuid>,
    Json(patch): Json<EventPatch>,
) -> ApiResult<Json<Event>> {
    let event = EventService::update(state.events.as_ref(), &session, id, patch).await?;
    Ok(Json(event))
}

/// DELETE /api/events/:id
async fn delete_event(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    EventService::delete(state.events.as_ref(), &session, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
