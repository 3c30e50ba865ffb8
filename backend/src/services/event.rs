//! Event service
//!
//! Every operation runs the authorization guard before touching storage.

use crate::auth::{can_create, can_read, can_write, ReadAccess, ReadScope, Session};
use crate::error::ApiError;
use crate::repositories::{EventStore, NewEvent};
use eventmap_shared::validation::{
    validate_artists, validate_date_range, validate_location, validate_name,
};
use eventmap_shared::{CreateEventRequest, Event, EventPatch};
use tracing::info;
use uuid::Uuid;

/// Event service for business logic
pub struct EventService;

impl EventService {
    /// List events in a scope; anonymous callers get an empty list
    pub async fn list(
        events: &dyn EventStore,
        session: &Session,
        scope: ReadScope,
    ) -> Result<Vec<Event>, ApiError> {
        match can_read(session, scope) {
            ReadAccess::Empty => Ok(Vec::new()),
            ReadAccess::Query(filter) => Ok(events.find(filter).await?),
        }
    }

    /// Create an event owned by the caller
    pub async fn create(
        events: &dyn EventStore,
        session: &Session,
        input: CreateEventRequest,
    ) -> Result<Event, ApiError> {
        let identity = can_create(session)?;

        validate_name(&input.name).map_err(ApiError::Validation)?;
        validate_date_range(input.date_from, input.date_to).map_err(ApiError::Validation)?;
        validate_location(&input.location).map_err(ApiError::Validation)?;
        validate_artists(&input.artists).map_err(ApiError::Validation)?;

        let event = events
            .insert(NewEvent {
                name: input.name,
                date_from: input.date_from,
                date_to: input.date_to,
                artists: input.artists,
                location: input.location,
                created_by: identity.id,
            })
            .await?;

        info!(event_id = %event.id, owner = %event.created_by, "Event created");
        Ok(event)
    }

    /// Apply an allow-listed patch to an event the caller owns
    pub async fn update(
        events: &dyn EventStore,
        session: &Session,
        id: Uuid,
        patch: EventPatch,
    ) -> Result<Event, ApiError> {
        session.require()?;
        let existing = Self::find_existing(events, id).await?;
        can_write(session, &existing)?;

        if let Some(name) = &patch.name {
            validate_name(name).map_err(ApiError::Validation)?;
        }
        validate_date_range(
            patch.date_from.unwrap_or(existing.date_from),
            patch.date_to.unwrap_or(existing.date_to),
        )
        .map_err(ApiError::Validation)?;
        if let Some(location) = &patch.location {
            validate_location(location).map_err(ApiError::Validation)?;
        }
        if let Some(artists) = &patch.artists {
            validate_artists(artists).map_err(ApiError::Validation)?;
        }

        if patch.is_empty() {
            return Ok(existing);
        }

        let updated = events
            .update_by_id(id, patch)
            .await?
            .ok_or_else(|| ApiError::NotFound("Event not found".to_string()))?;

        info!(event_id = %id, "Event updated");
        Ok(updated)
    }

    /// Delete an event the caller owns
    pub async fn delete(events: &dyn EventStore, session: &Session, id: Uuid) -> Result<(), ApiError> {
        session.require()?;
        let existing = Self::find_existing(events, id).await?;
        can_write(session, &existing)?;

        if !events.delete_by_id(id).await? {
            return Err(ApiError::NotFound("Event not found".to_string()));
        }

        info!(event_id = %id, "Event deleted");
        Ok(())
    }

    async fn find_existing(events: &dyn EventStore, id: Uuid) -> Result<Event, ApiError> {
        events
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApiError::NotFound("Event not found".to_string()))
    }
}
