//! Storage collaborators
//!
//! Services depend on the [`UserStore`] and [`EventStore`] traits and get a
//! handle injected through `AppState`. Two implementations exist:
//! PostgreSQL ([`PgUserRepository`], [`PgEventRepository`]) and process-local
//! maps ([`MemoryUserStore`], [`MemoryEventStore`]).

use async_trait::async_trait;
use chrono::NaiveDate;
use eventmap_shared::{Artist, Event, EventPatch, Location, ProfilePatch, User};
use thiserror::Error;
use uuid::Uuid;

pub mod event;
pub mod memory;
pub mod user;

pub use event::PgEventRepository;
pub use memory::{MemoryEventStore, MemoryUserStore};
pub use user::PgUserRepository;

/// Storage-layer failure
#[derive(Error, Debug)]
pub enum StoreError {
    /// A uniqueness constraint rejected the write
    #[error("{0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Input for inserting a user
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
}

/// Input for inserting an event; `created_by` comes from the session
#[derive(Debug, Clone)]
pub struct NewEvent {
    pub name: String,
    pub date_from: NaiveDate,
    pub date_to: NaiveDate,
    pub artists: Vec<Artist>,
    pub location: Location,
    pub created_by: Uuid,
}

/// Access-control predicate applied to event queries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventFilter {
    All,
    CreatedBy(Uuid),
}

impl EventFilter {
    pub fn matches(&self, event: &Event) -> bool {
        match self {
            EventFilter::All => true,
            EventFilter::CreatedBy(owner) => event.created_by == *owner,
        }
    }
}

/// Identity storage
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Exact-match lookup by login email
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError>;

    /// Insert a new user; a duplicate email yields [`StoreError::Duplicate`]
    async fn insert(&self, user: NewUser) -> Result<User, StoreError>;

    /// Apply a profile patch, returning `None` when the user does not exist
    async fn update_profile(&self, id: Uuid, patch: ProfilePatch) -> Result<Option<User>, StoreError>;

    async fn ping(&self) -> Result<(), StoreError>;
}

/// Event storage
#[async_trait]
pub trait EventStore: Send + Sync {
    /// Events matching the filter, oldest first
    async fn find(&self, filter: EventFilter) -> Result<Vec<Event>, StoreError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Event>, StoreError>;

    async fn insert(&self, event: NewEvent) -> Result<Event, StoreError>;

    /// Apply an allow-listed patch, returning `None` when the event is gone
    async fn update_by_id(&self, id: Uuid, patch: EventPatch) -> Result<Option<Event>, StoreError>;

    /// Returns whether a row was deleted
    async fn delete_by_id(&self, id: Uuid) -> Result<bool, StoreError>;

    async fn ping(&self) -> Result<(), StoreError>;
}
