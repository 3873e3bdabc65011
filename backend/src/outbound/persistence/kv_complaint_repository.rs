//! Complaint repository over a [`KeyValueStore`].
//!
//! The whole collection is one JSON array under `complaints`. The first
//! read of an empty store writes the seed collection and returns it.

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::complaints::Complaint;
use crate::domain::ports::{
    ComplaintRepository, ComplaintRepositoryError, KeyValueStore, StorageKey,
};

/// Key-value backed [`ComplaintRepository`] with lazy seeding.
pub struct KeyValueComplaintRepository<S> {
    store: Arc<S>,
    seeds: Vec<Complaint>,
}

impl<S> KeyValueComplaintRepository<S> {
    /// Repository that seeds `seeds` when the store holds no complaints yet.
    pub fn new(store: Arc<S>, seeds: Vec<Complaint>) -> Self {
        Self { store, seeds }
    }

    /// Repository that starts from an empty collection.
    pub fn unseeded(store: Arc<S>) -> Self {
        Self::new(store, Vec::new())
    }
}

impl<S: KeyValueStore> KeyValueComplaintRepository<S> {
    fn decode(raw: &str) -> Result<Vec<Complaint>, ComplaintRepositoryError> {
        serde_json::from_str(raw).map_err(|err| ComplaintRepositoryError::corrupt(err.to_string()))
    }
}

impl<S: KeyValueStore> ComplaintRepository for KeyValueComplaintRepository<S> {
    fn load(&self) -> Result<Vec<Complaint>, ComplaintRepositoryError> {
        if let Some(raw) = self.store.get(StorageKey::Complaints)? {
            let complaints = Self::decode(&raw)?;
            debug!(count = complaints.len(), "complaints loaded");
            return Ok(complaints);
        }
        self.save_all(&self.seeds)?;
        info!(count = self.seeds.len(), "complaint store seeded");
        Ok(self.seeds.clone())
    }

    fn save_all(&self, complaints: &[Complaint]) -> Result<(), ComplaintRepositoryError> {
        let raw = serde_json::to_string(complaints)
            .map_err(|err| ComplaintRepositoryError::serialization(err.to_string()))?;
        self.store.set(StorageKey::Complaints, &raw)?;
        debug!(count = complaints.len(), "complaints saved");
        Ok(())
    }
}
