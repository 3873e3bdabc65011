//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven adapters (the key-value stores and the repositories layered on
//! them) implement these traits. Each port exposes a typed error so adapters
//! map their failures into predictable variants.

mod macros;
pub(crate) use macros::define_port_error;

mod complaint_repository;
mod identity_directory;
mod key_value_store;
mod session_repository;

#[cfg(test)]
pub use complaint_repository::MockComplaintRepository;
pub use complaint_repository::{ComplaintRepository, ComplaintRepositoryError};
#[cfg(test)]
pub use identity_directory::MockIdentityDirectory;
pub use identity_directory::{IdentityDirectory, SeededIdentityDirectory};
#[cfg(test)]
pub use key_value_store::MockKeyValueStore;
pub use key_value_store::{KeyValueStore, KeyValueStoreError, StorageKey};
#[cfg(test)]
pub use session_repository::MockSessionRepository;
pub use session_repository::{SessionRepository, SessionRepositoryError};
