//! In-memory stores for tests and single-process development
//!
//! Each store guards its map with a `tokio` `RwLock`, so a uniqueness check
//! and the insert that follows it happen under one write lock.

use super::{EventFilter, EventStore, NewEvent, NewUser, StoreError, UserStore};
use async_trait::async_trait;
use chrono::Utc;
use eventmap_shared::{Event, EventPatch, ProfilePatch, User};
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

/// User store backed by a `HashMap`
#[derive(Default)]
pub struct MemoryUserStore {
    users: RwLock<HashMap<Uuid, User>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users
    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }

    /// Simulate a record created without a credential
    #[cfg(test)]
    pub async fn clear_password_hash(&self, id: Uuid) {
        if let Some(user) = self.users.write().await.get_mut(&id) {
            user.password_hash = None;
        }
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn insert(&self, user: NewUser) -> Result<User, StoreError> {
        let mut users = self.users.write().await;
        if users.values().any(|u| u.email == user.email) {
            return Err(StoreError::Duplicate("User already exists".to_string()));
        }

        let record = User {
            id: Uuid::new_v4(),
            email: user.email,
            password_hash: Some(user.password_hash),
            firstname: None,
            lastname: None,
            created_at: Utc::now(),
        };
        users.insert(record.id, record.clone());
        Ok(record)
    }

    async fn update_profile(&self, id: Uuid, patch: ProfilePatch) -> Result<Option<User>, StoreError> {
        let mut users = self.users.write().await;
        let Some(user) = users.get_mut(&id) else {
            return Ok(None);
        };

        if let Some(firstname) = patch.firstname {
            user.firstname = Some(firstname);
        }
        if let Some(lastname) = patch.lastname {
            user.lastname = Some(lastname);
        }
        Ok(Some(user.clone()))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

/// Event store backed by a `HashMap`
#[derive(Default)]
pub struct MemoryEventStore {
    events: RwLock<HashMap<Uuid, Event>>,
}

impl MemoryEventStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored events
    pub async fn len(&self) -> usize {
        self.events.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.events.read().await.is_empty()
    }
}

#[async_trait]
impl EventStore for MemoryEventStore {
    async fn find(&self, filter: EventFilter) -> Result<Vec<Event>, StoreError> {
        let events = self.events.read().await;
        let mut found: Vec<Event> = events
            .values()
            .filter(|e| filter.matches(e))
            .cloned()
            .collect();
        found.sort_by_key(|e| e.created_at);
        Ok(found)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Event>, StoreError> {
        Ok(self.events.read().await.get(&id).cloned())
    }

    async fn insert(&self, event: NewEvent) -> Result<Event, StoreError> {
        let record = Event {
            id: Uuid::new_v4(),
            name: event.name,
            date_from: event.date_from,
            date_to: event.date_to,
            artists: event.artists,
            location: event.location,
            created_by: event.created_by,
            created_at: Utc::now(),
        };
        self.events.write().await.insert(record.id, record.clone());
        Ok(record)
    }

    async fn update_by_id(&self, id: Uuid, patch: EventPatch) -> Result<Option<Event>, StoreError> {
        let mut events = self.events.write().await;
        let Some(event) = events.get_mut(&id) else {
            return Ok(None);
        };

        if let Some(name) = patch.name {
            event.name = name;
        }
        if let Some(date_from) = patch.date_from {
            event.date_from = date_from;
        }
        if let Some(date_to) = patch.date_to {
            event.date_to = date_to;
        }
        if let Some(artists) = patch.artists {
            event.artists = artists;
        }
        if let Some(location) = patch.location {
            event.location = location;
        }
        Ok(Some(event.clone()))
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<bool, StoreError> {
        Ok(self.events.write().await.remove(&id).is_some())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
