//! Business logic services
//!
//! Services encapsulate business logic and coordinate between
//! the injected stores and the auth layer.

pub mod auth;
pub mod event;
pub mod user;

pub use auth::AuthService;
pub use event::EventService;
pub use user::UserService;
