//! Port for reading and overwriting the complaint collection.

use crate::domain::complaints::Complaint;

use super::{KeyValueStoreError, define_port_error};

define_port_error! {
    /// Errors raised by complaint repository adapters.
    pub enum ComplaintRepositoryError {
        /// The underlying store failed.
        Store { message: String } => "complaint store failed: {message}",
        /// The stored collection could not be decoded.
        Corrupt { message: String } => "stored complaints are corrupt: {message}",
        /// The collection could not be encoded for storage.
        Serialization { message: String } =>
            "complaints could not be serialised: {message}",
    }
}

impl From<KeyValueStoreError> for ComplaintRepositoryError {
    fn from(err: KeyValueStoreError) -> Self {
        Self::store(err.to_string())
    }
}

/// Whole-collection access to complaints.
///
/// There is no locking or versioning: the last writer wins.
#[cfg_attr(test, mockall::automock)]
pub trait ComplaintRepository: Send + Sync {
    /// Return the persisted complaints, seeding the store on first access.
    fn load(&self) -> Result<Vec<Complaint>, ComplaintRepositoryError>;

    /// Overwrite the stored collection with `complaints`.
    fn save_all(&self, complaints: &[Complaint]) -> Result<(), ComplaintRepositoryError>;

    /// Prepend `complaint` to the stored collection.
    fn append(&self, complaint: Complaint) -> Result<(), ComplaintRepositoryError> {
        let mut complaints = self.load()?;
        complaints.insert(0, complaint);
        self.save_all(&complaints)
    }
}
