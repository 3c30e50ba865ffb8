//! Data models for the Eventmap application

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Registered user account
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    /// bcrypt hash; absent for accounts created without a password
    #[serde(skip_serializing, default)]
    pub password_hash: Option<String>,
    pub firstname: Option<String>,
    pub lastname: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Identity carried by a verified session token
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Identity {
    pub id: Uuid,
    pub email: String,
}

impl From<&User> for Identity {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
        }
    }
}

/// Artist performing at an event
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Artist {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub name: String,
}

/// Named place with WGS84 coordinates
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Location {
    pub id: String,
    pub name: String,
    pub lon: f64,
    pub lat: f64,
}

/// Event owned by the user who created it
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: Uuid,
    pub name: String,
    pub date_from: NaiveDate,
    pub date_to: NaiveDate,
    #[serde(default)]
    pub artists: Vec<Artist>,
    pub location: Location,
    /// Set once from the creator's identity; never taken from client input
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_hash_never_serialized() {
        let user = User {
            id: Uuid::new_v4(),
            email: "a@x.com".to_string(),
            password_hash: Some("$2b$10$abcdefghijklmnopqrstuv".to_string()),
            firstname: None,
            lastname: None,
            created_at: Utc::now(),
        };

        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["email"], "a@x.com");
    }

    #[test]
    fn test_event_uses_camel_case_fields() {
        let event = Event {
            id: Uuid::new_v4(),
            name: "Open air".to_string(),
            date_from: NaiveDate::from_ymd_opt(2025, 7, 10).unwrap(),
            date_to: NaiveDate::from_ymd_opt(2025, 7, 13).unwrap(),
            artists: vec![],
            location: Location {
                id: "1".to_string(),
                name: "Sion".to_string(),
                lon: 7.3606,
                lat: 46.2306,
            },
            created_by: Uuid::new_v4(),
            created_at: Utc::now(),
        };

        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["dateFrom"], "2025-07-10");
        assert!(json.get("createdBy").is_some());
    }
}
