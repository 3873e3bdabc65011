//! Error types for the example-data crate.
//!
//! This module defines the semantic error enum for registry parsing,
//! following the project's error handling conventions with `thiserror`.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur when parsing a seed registry.
///
/// These errors cover file I/O, JSON parsing and registry-level validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// The registry file could not be read.
    #[error("failed to read registry file at '{path}': {message}")]
    IoError {
        /// Path to the registry file.
        path: PathBuf,
        /// Description of the I/O error.
        message: String,
    },

    /// The registry JSON is malformed or missing required fields.
    #[error("invalid registry JSON: {message}")]
    ParseError {
        /// Description of the parse error.
        message: String,
    },

    /// The registry version is not supported.
    #[error("unsupported registry version: expected {expected}, found {actual}")]
    UnsupportedVersion {
        /// Expected version number.
        expected: u32,
        /// Actual version found in the registry.
        actual: u32,
    },

    /// The registry contains no demo accounts.
    #[error("registry contains no user seeds")]
    EmptyUsers,

    /// Two user seeds share the same email and role.
    #[error("duplicate user seed for email '{email}' with role '{role}'")]
    DuplicateUser {
        /// Email shared by both seeds.
        email: String,
        /// Role shared by both seeds.
        role: String,
    },

    /// Two complaint seeds share the same identifier.
    #[error("duplicate complaint seed id '{id}'")]
    DuplicateComplaintId {
        /// The repeated complaint identifier.
        id: String,
    },
}
