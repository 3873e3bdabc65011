//! Seed registry types and JSON parsing.
//!
//! The registry holds the demo accounts and the fallback complaint set. It is
//! loaded from JSON and validated once so consumers can trust its contents.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::RegistryError;
use crate::seed::{ExampleComplaintSeed, ExampleUserSeed};

/// Current supported registry version.
const SUPPORTED_VERSION: u32 = 1;

/// Registry compiled into the crate.
const BUNDLED_REGISTRY: &str = include_str!("../fixtures/seeds.json");

/// A seed registry containing demo users and complaints.
///
/// # Example
///
/// ```
/// use example_data::SeedRegistry;
///
/// let json = r#"{
///     "version": 1,
///     "users": [
///         {"id": "4", "name": "Admin Head", "email": "head@cms.edu", "role": "head"}
///     ],
///     "complaints": []
/// }"#;
///
/// let registry = SeedRegistry::from_json(json).expect("valid registry");
/// assert_eq!(registry.users().len(), 1);
/// assert!(registry.complaints().is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedRegistry {
    version: u32,
    users: Vec<ExampleUserSeed>,
    complaints: Vec<ExampleComplaintSeed>,
}

impl SeedRegistry {
    /// Parses the registry bundled with the crate.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] if the bundled fixture fails validation.
    pub fn bundled() -> Result<Self, RegistryError> {
        Self::from_json(BUNDLED_REGISTRY)
    }

    /// Parses a seed registry from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] if:
    /// - The JSON is malformed
    /// - Required fields are missing
    /// - The version is unsupported
    /// - The users array is empty
    /// - A user (email, role) pair or a complaint id is repeated
    pub fn from_json(json: &str) -> Result<Self, RegistryError> {
        let raw: RawSeedRegistry =
            serde_json::from_str(json).map_err(|e| RegistryError::ParseError {
                message: e.to_string(),
            })?;

        Self::from_raw(raw)
    }

    /// Loads a seed registry from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, RegistryError> {
        let contents = fs::read_to_string(path).map_err(|e| RegistryError::IoError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        Self::from_json(&contents)
    }

    fn from_raw(raw: RawSeedRegistry) -> Result<Self, RegistryError> {
        if raw.version != SUPPORTED_VERSION {
            return Err(RegistryError::UnsupportedVersion {
                expected: SUPPORTED_VERSION,
                actual: raw.version,
            });
        }

        if raw.users.is_empty() {
            return Err(RegistryError::EmptyUsers);
        }

        let mut logins = HashSet::with_capacity(raw.users.len());
        for user in &raw.users {
            if !logins.insert((user.email.as_str(), user.role.as_str())) {
                return Err(RegistryError::DuplicateUser {
                    email: user.email.clone(),
                    role: user.role.clone(),
                });
            }
        }

        let mut ids = HashSet::with_capacity(raw.complaints.len());
        for complaint in &raw.complaints {
            if !ids.insert(complaint.id.as_str()) {
                return Err(RegistryError::DuplicateComplaintId {
                    id: complaint.id.clone(),
                });
            }
        }

        Ok(Self {
            version: raw.version,
            users: raw.users,
            complaints: raw.complaints,
        })
    }

    /// Returns the registry version.
    #[must_use]
    pub const fn version(&self) -> u32 {
        self.version
    }

    /// Returns the demo accounts in registry order.
    #[must_use]
    pub fn users(&self) -> &[ExampleUserSeed] {
        &self.users
    }

    /// Returns the fallback complaints in registry order.
    #[must_use]
    pub fn complaints(&self) -> &[ExampleComplaintSeed] {
        &self.complaints
    }
}

/// Raw registry structure for JSON deserialization.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSeedRegistry {
    version: u32,
    users: Vec<ExampleUserSeed>,
    #[serde(default)]
    complaints: Vec<ExampleComplaintSeed>,
}
