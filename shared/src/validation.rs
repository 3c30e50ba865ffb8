//! Input validation functions
//!
//! Plain functions returning a user-facing message on failure, so both the
//! backend and any client can reuse them.

use crate::models::{Artist, Location};
use chrono::NaiveDate;
use validator::ValidateEmail;

/// Shortest password accepted at signup
pub const MIN_PASSWORD_LEN: usize = 6;

/// bcrypt only looks at the first 72 bytes of its input
pub const MAX_PASSWORD_LEN: usize = 72;

const MAX_NAME_LEN: usize = 200;

/// Validate email format
pub fn validate_email(email: &str) -> Result<(), String> {
    if email.is_empty() {
        return Err("Email cannot be empty".to_string());
    }
    if email.len() > 255 {
        return Err("Email too long".to_string());
    }
    if !email.validate_email() {
        return Err("Invalid email format".to_string());
    }
    Ok(())
}

/// Validate password length
pub fn validate_password(password: &str) -> Result<(), String> {
    if password.len() < MIN_PASSWORD_LEN {
        return Err(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LEN
        ));
    }
    if password.len() > MAX_PASSWORD_LEN {
        return Err(format!(
            "Password must be at most {} bytes",
            MAX_PASSWORD_LEN
        ));
    }
    Ok(())
}

/// Validate an event or profile display name
pub fn validate_name(name: &str) -> Result<(), String> {
    if name.trim().is_empty() {
        return Err("Name cannot be empty".to_string());
    }
    if name.len() > MAX_NAME_LEN {
        return Err("Name too long".to_string());
    }
    Ok(())
}

/// Validate that an event does not end before it starts
pub fn validate_date_range(from: NaiveDate, to: NaiveDate) -> Result<(), String> {
    if to < from {
        return Err("dateTo must not be before dateFrom".to_string());
    }
    Ok(())
}

/// Validate location coordinates
pub fn validate_location(location: &Location) -> Result<(), String> {
    if !location.lat.is_finite() || !location.lon.is_finite() {
        return Err("Coordinates must be valid numbers".to_string());
    }
    if !(-90.0..=90.0).contains(&location.lat) {
        return Err("Latitude must be between -90 and 90".to_string());
    }
    if !(-180.0..=180.0).contains(&location.lon) {
        return Err("Longitude must be between -180 and 180".to_string());
    }
    validate_name(&location.name)
}

/// Validate the artist list of an event
pub fn validate_artists(artists: &[Artist]) -> Result<(), String> {
    for artist in artists {
        if artist.name.trim().is_empty() {
            return Err("Artist name cannot be empty".to_string());
        }
    }
    Ok(())
}
