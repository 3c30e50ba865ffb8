//! User profile service

use crate::error::ApiError;
use crate::repositories::UserStore;
use eventmap_shared::validation::validate_name;
use eventmap_shared::{Identity, ProfilePatch, PublicUser};
use uuid::Uuid;

/// User profile operations
pub struct UserService;

impl UserService {
    /// Look up another user's public profile
    pub async fn get_user(users: &dyn UserStore, id: Uuid) -> Result<PublicUser, ApiError> {
        users
            .find_by_id(id)
            .await?
            .map(PublicUser::from)
            .ok_or_else(|| ApiError::NotFound("User not found".to_string()))
    }

    /// Update the caller's own display fields
    pub async fn update_profile(
        users: &dyn UserStore,
        identity: &Identity,
        patch: ProfilePatch,
    ) -> Result<PublicUser, ApiError> {
        for field in [&patch.firstname, &patch.lastname].into_iter().flatten() {
            validate_name(field).map_err(ApiError::Validation)?;
        }

        users
            .update_profile(identity.id, patch)
            .await?
            .map(PublicUser::from)
            .ok_or_else(|| ApiError::NotFound("User not found".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::{MemoryUserStore, NewUser};

    async fn seeded() -> (MemoryUserStore, Identity) {
        let users = MemoryUserStore::new();
        let user = users
            .insert(NewUser {
                email: "a@x.com".to_string(),
                password_hash: "hash".to_string(),
            })
            .await
            .unwrap();
        let identity = Identity::from(&user);
        (users, identity)
    }

    #[tokio::test]
    async fn test_get_user_hides_credentials() {
        let (users, identity) = seeded().await;
        let profile = UserService::get_user(&users, identity.id).await.unwrap();

        assert_eq!(profile.email, "a@x.com");
        let json = serde_json::to_value(&profile).unwrap();
        assert!(json.get("password_hash").is_none());
    }

    #[tokio::test]
    async fn test_unknown_user_not_found() {
        let (users, _) = seeded().await;
        let err = UserService::get_user(&users, Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_update_profile() {
        let (users, identity) = seeded().await;
        let patch = ProfilePatch {
            firstname: Some("Ada".to_string()),
            lastname: None,
        };

        let profile = UserService::update_profile(&users, &identity, patch)
            .await
            .unwrap();
        assert_eq!(profile.firstname.as_deref(), Some("Ada"));
        assert!(profile.lastname.is_none());
    }

    #[tokio::test]
    async fn test_blank_name_rejected() {
        let (users, identity) = seeded().await;
        let patch = ProfilePatch {
            firstname: Some("   ".to_string()),
            lastname: None,
        };

        let err = UserService::update_profile(&users, &identity, patch)
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }
}
