//! Demonstration seed data for the campus complaint management system.
//!
//! This crate ships the fixed demo accounts and the fallback complaint set as
//! a JSON seed registry. It is designed to be independent of backend domain
//! types to avoid circular dependencies: records are exposed as plain string
//! fields and converted into validated domain values by the backend.
//!
//! # Overview
//!
//! The crate supports:
//!
//! - Loading the bundled registry compiled into the crate
//! - Loading alternative registries from JSON strings or files
//! - Registry-level validation (version, non-empty accounts, unique ids)
//!
//! # Example
//!
//! ```
//! use example_data::SeedRegistry;
//!
//! let registry = SeedRegistry::bundled().expect("bundled registry is valid");
//!
//! assert_eq!(registry.users().len(), 4);
//! assert_eq!(registry.complaints().len(), 10);
//! ```

mod error;
mod registry;
mod seed;

pub use error::RegistryError;
pub use registry::SeedRegistry;
pub use seed::{ExampleComplaintSeed, ExampleUserSeed};
