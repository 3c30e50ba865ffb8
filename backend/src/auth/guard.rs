//! Ownership-based authorization
//!
//! Every owned resource records the id of the identity that created it.
//! Reads are scoped to the caller ("mine") or unfiltered ("public") and both
//! require a caller; writes require the caller to be the owner.

use crate::auth::Session;
use crate::repositories::EventFilter;
use eventmap_shared::{AccessError, Event, Identity};
use uuid::Uuid;

/// A resource with a single owning identity
pub trait Owned {
    fn owner(&self) -> Uuid;
}

impl Owned for Event {
    fn owner(&self) -> Uuid {
        self.created_by
    }
}

/// Which slice of a collection a list read asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadScope {
    Mine,
    Public,
}

/// Outcome of a list-read authorization check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadAccess {
    /// Anonymous caller: answer with an empty collection, not an error
    Empty,
    /// Run the query with this filter
    Query(EventFilter),
}

/// Decide what a list read may return
pub fn can_read(session: &Session, scope: ReadScope) -> ReadAccess {
    match (session.identity(), scope) {
        (None, _) => ReadAccess::Empty,
        (Some(identity), ReadScope::Mine) => ReadAccess::Query(EventFilter::CreatedBy(identity.id)),
        (Some(_), ReadScope::Public) => ReadAccess::Query(EventFilter::All),
    }
}

/// Creation needs a caller, who becomes the owner
pub fn can_create(session: &Session) -> Result<&Identity, AccessError> {
    session.require()
}

/// Update and delete need the caller to own the resource
pub fn can_write<'a, R: Owned>(session: &'a Session, resource: &R) -> Result<&'a Identity, AccessError> {
    let identity = session.require()?;
    if resource.owner() != identity.id {
        return Err(AccessError::Unauthorized);
    }
    Ok(identity)
}
