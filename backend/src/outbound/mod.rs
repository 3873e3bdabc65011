//! Outbound adapters implementing domain ports.
//!
//! - **persistence**: key-value stores (in-memory and a directory of JSON
//!   files) plus the complaint and session repositories built on them.
//!
//! Adapters translate between domain types and stored JSON. They contain no
//! business logic.

pub mod persistence;
