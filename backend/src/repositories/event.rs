//! Event repository for database operations
//!
//! Artists and location are stored as JSONB documents next to the scalar
//! columns.

use super::{EventFilter, EventStore, NewEvent, StoreError};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use eventmap_shared::{Artist, Event, EventPatch, Location};
use sqlx::{types::Json, PgPool};
use uuid::Uuid;

/// Event record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct EventRecord {
    pub id: Uuid,
    pub name: String,
    pub date_from: NaiveDate,
    pub date_to: NaiveDate,
    pub artists: Json<Vec<Artist>>,
    pub location: Json<Location>,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
}

impl From<EventRecord> for Event {
    fn from(r: EventRecord) -> Self {
        Self {
            id: r.id,
            name: r.name,
            date_from: r.date_from,
            date_to: r.date_to,
            artists: r.artists.0,
            location: r.location.0,
            created_by: r.created_by,
            created_at: r.created_at,
        }
    }
}

/// PostgreSQL-backed event store
#[derive(Clone)]
pub struct PgEventRepository {
    pool: PgPool,
}

impl PgEventRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EventStore for PgEventRepository {
    async fn find(&self, filter: EventFilter) -> Result<Vec<Event>, StoreError> {
        let owner = match filter {
            EventFilter::All => None,
            EventFilter::CreatedBy(id) => Some(id),
        };

        let records = sqlx::query_as::<_, EventRecord>(
            r#"
            SELECT id, name, date_from, date_to, artists, location, created_by, created_at
            FROM events
            WHERE $1::uuid IS NULL OR created_by = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(owner)
        .fetch_all(&self.pool)
        .await?;

        Ok(records.into_iter().map(Event::from).collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Event>, StoreError> {
        let record = sqlx::query_as::<_, EventRecord>(
            r#"
            SELECT id, name, date_from, date_to, artists, location, created_by, created_at
            FROM events
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record.map(Event::from))
    }

    async fn insert(&self, event: NewEvent) -> Result<Event, StoreError> {
        let record = sqlx::query_as::<_, EventRecord>(
            r#"
            INSERT INTO events (name, date_from, date_to, artists, location, created_by)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, name, date_from, date_to, artists, location, created_by, created_at
            "#,
        )
        .bind(&event.name)
        .bind(event.date_from)
        .bind(event.date_to)
        .bind(Json(&event.artists))
        .bind(Json(&event.location))
        .bind(event.created_by)
        .fetch_one(&self.pool)
        .await?;

        Ok(record.into())
    }

    async fn update_by_id(&self, id: Uuid, patch: EventPatch) -> Result<Option<Event>, StoreError> {
        // created_by and created_at are not writable here
        let record = sqlx::query_as::<_, EventRecord>(
            r#"
            UPDATE events SET
                name = COALESCE($2, name),
                date_from = COALESCE($3, date_from),
                date_to = COALESCE($4, date_to),
                artists = COALESCE($5, artists),
                location = COALESCE($6, location)
            WHERE id = $1
            RETURNING id, name, date_from, date_to, artists, location, created_by, created_at
            "#,
        )
        .bind(id)
        .bind(patch.name)
        .bind(patch.date_from)
        .bind(patch.date_to)
        .bind(patch.artists.map(Json))
        .bind(patch.location.map(Json))
        .fetch_optional(&self.pool)
        .await?;

        Ok(record.map(Event::from))
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
