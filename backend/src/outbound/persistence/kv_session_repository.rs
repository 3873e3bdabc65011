//! Session repository storing the logged-in user under `currentUser`.

use std::sync::Arc;

use tracing::debug;

use crate::domain::User;
use crate::domain::ports::{KeyValueStore, SessionRepository, SessionRepositoryError, StorageKey};

/// Key-value backed [`SessionRepository`].
pub struct KeyValueSessionRepository<S> {
    store: Arc<S>,
}

impl<S> KeyValueSessionRepository<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }
}

impl<S: KeyValueStore> SessionRepository for KeyValueSessionRepository<S> {
    fn current_user(&self) -> Result<Option<User>, SessionRepositoryError> {
        let Some(raw) = self.store.get(StorageKey::CurrentUser)? else {
            return Ok(None);
        };
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|err| SessionRepositoryError::corrupt(err.to_string()))
    }

    fn store_current_user(&self, user: &User) -> Result<(), SessionRepositoryError> {
        let raw = serde_json::to_string(user)
            .map_err(|err| SessionRepositoryError::serialization(err.to_string()))?;
        self.store.set(StorageKey::CurrentUser, &raw)?;
        debug!(user_id = user.id(), "current user stored");
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionRepositoryError> {
        self.store.remove(StorageKey::CurrentUser)?;
        Ok(())
    }
}
