//! Process-local user profile store.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::ports::{FIXTURE_USER_ID, UserPersistenceError, UserRepository};
use crate::domain::{
    Email, ProfileUpdate, UserId, UserPreferences, UserProfile, UserValidationError,
};

/// [`UserRepository`] backed by a map behind an async lock.
///
/// Email uniqueness is checked under the write lock, so two concurrent
/// updates cannot both claim the same address.
#[derive(Default)]
pub struct InMemoryUserStore {
    users: RwLock<HashMap<UserId, UserProfile>>,
}

impl InMemoryUserStore {
    /// Store holding only the account the fixture login signs in as.
    ///
    /// # Errors
    /// Fails only if the fixture constants stop validating.
    pub fn with_fixture_user() -> Result<Self, UserValidationError> {
        Ok(Self::with_profiles([fixture_profile()?]))
    }

    /// Store seeded with `profiles`.
    #[must_use]
    pub fn with_profiles(profiles: impl IntoIterator<Item = UserProfile>) -> Self {
        let users = profiles
            .into_iter()
            .map(|profile| (profile.id.clone(), profile))
            .collect();
        Self {
            users: RwLock::new(users),
        }
    }
}

/// Profile of the fixture account (`admin@example.com`).
///
/// # Errors
/// Fails only if the fixture constants stop validating.
pub fn fixture_profile() -> Result<UserProfile, UserValidationError> {
    Ok(UserProfile {
        id: UserId::new(FIXTURE_USER_ID)?,
        name: "Ada Lovelace".to_owned(),
        email: Email::new("admin@example.com")?,
        resume_url: None,
        headline: None,
        daily_focus: Vec::new(),
        preferences: UserPreferences::default(),
    })
}

#[async_trait]
impl UserRepository for InMemoryUserStore {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<UserProfile>, UserPersistenceError> {
        Ok(self.users.read().await.get(id).cloned())
    }

    async fn update_profile(
        &self,
        id: &UserId,
        update: &ProfileUpdate,
    ) -> Result<Option<UserProfile>, UserPersistenceError> {
        let mut users = self.users.write().await;
        if let Some(email) = &update.email {
            let taken = users
                .values()
                .any(|other| &other.id != id && &other.email == email);
            if taken {
                return Err(UserPersistenceError::duplicate_email(email.to_string()));
            }
        }
        let Some(profile) = users.get_mut(id) else {
            return Ok(None);
        };
        update.clone().apply_to(profile);
        Ok(Some(profile.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn admin() -> UserProfile {
        fixture_profile().expect("fixture profile")
    }

    fn other_user() -> UserProfile {
        UserProfile {
            id: UserId::random(),
            name: "Grace Hopper".to_owned(),
            email: Email::new("grace@example.com").expect("email"),
            ..admin()
        }
    }

    #[rstest]
    #[tokio::test]
    async fn fixture_user_is_seeded(admin: UserProfile) {
        let store = InMemoryUserStore::with_fixture_user().expect("seeded store");
        let found = store.find_by_id(&admin.id).await.expect("lookup");
        assert_eq!(found, Some(admin));
    }

    #[rstest]
    #[tokio::test]
    async fn taken_email_is_rejected(admin: UserProfile) {
        let grace = other_user();
        let store = InMemoryUserStore::with_profiles([admin.clone(), grace.clone()]);
        let update = ProfileUpdate {
            email: Some(grace.email.clone()),
            ..ProfileUpdate::default()
        };

        let err = store
            .update_profile(&admin.id, &update)
            .await
            .expect_err("duplicate");
        assert!(matches!(err, UserPersistenceError::DuplicateEmail { .. }));
    }

    #[rstest]
    #[tokio::test]
    async fn own_email_can_be_resubmitted(admin: UserProfile) {
        let store = InMemoryUserStore::with_profiles([admin.clone()]);
        let update = ProfileUpdate {
            name: Some("Augusta Ada King".to_owned()),
            email: Some(admin.email.clone()),
            ..ProfileUpdate::default()
        };

        let updated = store
            .update_profile(&admin.id, &update)
            .await
            .expect("update")
            .expect("known user");
        assert_eq!(updated.name, "Augusta Ada King");
        assert_eq!(updated.email, admin.email);
    }

    #[rstest]
    #[tokio::test]
    async fn unknown_user_yields_none() {
        let store = InMemoryUserStore::default();
        let result = store
            .update_profile(&UserId::random(), &ProfileUpdate::default())
            .await
            .expect("update");
        assert!(result.is_none());
    }
}
