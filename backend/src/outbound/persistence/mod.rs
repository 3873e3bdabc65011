//! Persistence adapters for the key-value store port and the repositories
//! layered on it.

mod json_file_store;
mod kv_complaint_repository;
mod kv_session_repository;
mod memory_store;

pub use json_file_store::JsonFileStore;
pub use kv_complaint_repository::KeyValueComplaintRepository;
pub use kv_session_repository::KeyValueSessionRepository;
pub use memory_store::InMemoryKeyValueStore;
