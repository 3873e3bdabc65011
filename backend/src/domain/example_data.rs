//! Conversion of the bundled demo registry into domain values.
//!
//! The example-data crate exposes plain string records; this module validates
//! them into [`User`] and [`Complaint`] values so a malformed registry fails
//! loudly at startup rather than producing half-valid records later.

use example_data::{ExampleComplaintSeed, ExampleUserSeed, RegistryError, SeedRegistry};
use thiserror::Error;

use crate::domain::complaints::{
    Complaint, ComplaintId, ComplaintParts, ComplaintValidationError, ParseComplaintValueError,
    TimestampParseError, parse_timestamp,
};
use crate::domain::{ParseRoleError, Role, User, UserValidationError};

/// Errors raised while converting seed records.
#[derive(Debug, Error)]
pub enum ExampleDataSeedingError {
    /// Seed registry parsing failed.
    #[error("seed registry error: {0}")]
    Registry(#[from] RegistryError),
    /// A user seed names an unknown role.
    #[error("user seed {id} has an invalid role: {source}")]
    UserRole {
        id: String,
        #[source]
        source: ParseRoleError,
    },
    /// A user seed failed domain validation.
    #[error("user seed {id} failed validation: {source}")]
    UserInvalid {
        id: String,
        #[source]
        source: UserValidationError,
    },
    /// A complaint seed holds a value outside its closed set.
    #[error("complaint seed {id} has an invalid value: {source}")]
    ComplaintValue {
        id: String,
        #[source]
        source: ParseComplaintValueError,
    },
    /// A complaint seed holds an unreadable timestamp.
    #[error("complaint seed {id} has an invalid timestamp: {source}")]
    ComplaintTimestamp {
        id: String,
        #[source]
        source: TimestampParseError,
    },
    /// A complaint seed breaks a record invariant.
    #[error("complaint seed {id} failed validation: {source}")]
    ComplaintInvalid {
        id: String,
        #[source]
        source: ComplaintValidationError,
    },
}

/// Convert every user seed in registry order.
pub fn seed_users(registry: &SeedRegistry) -> Result<Vec<User>, ExampleDataSeedingError> {
    registry.users().iter().map(convert_seed_user).collect()
}

/// Convert every complaint seed in registry order.
pub fn seed_complaints(registry: &SeedRegistry) -> Result<Vec<Complaint>, ExampleDataSeedingError> {
    registry
        .complaints()
        .iter()
        .map(convert_seed_complaint)
        .collect()
}

fn convert_seed_user(seed: &ExampleUserSeed) -> Result<User, ExampleDataSeedingError> {
    let role: Role = seed
        .role
        .parse()
        .map_err(|source| ExampleDataSeedingError::UserRole {
            id: seed.id.clone(),
            source,
        })?;
    User::try_new(
        seed.id.clone(),
        seed.name.clone(),
        seed.email.clone(),
        role,
        seed.department.clone(),
    )
    .map_err(|source| ExampleDataSeedingError::UserInvalid {
        id: seed.id.clone(),
        source,
    })
}

fn convert_seed_complaint(
    seed: &ExampleComplaintSeed,
) -> Result<Complaint, ExampleDataSeedingError> {
    let invalid = |source| ExampleDataSeedingError::ComplaintInvalid {
        id: seed.id.clone(),
        source,
    };
    let value = |source| ExampleDataSeedingError::ComplaintValue {
        id: seed.id.clone(),
        source,
    };
    let timestamp = |raw: &str| {
        parse_timestamp(raw).map_err(|source| ExampleDataSeedingError::ComplaintTimestamp {
            id: seed.id.clone(),
            source,
        })
    };

    let parts = ComplaintParts {
        id: ComplaintId::new(seed.id.clone()).map_err(invalid)?,
        title: seed.title.clone(),
        category: seed.category.clone().into(),
        description: seed.description.clone(),
        status: seed.status.parse().map_err(value)?,
        priority: seed.priority.parse().map_err(value)?,
        submitted_by: seed.submitted_by.clone(),
        submitted_by_role: seed.submitted_by_role.parse().map_err(value)?,
        submitted_at: timestamp(&seed.submitted_at)?,
        updated_at: timestamp(&seed.updated_at)?,
        assigned_to: seed.assigned_to.clone(),
        location: None,
        contact_number: None,
    };
    Complaint::try_from(parts).map_err(invalid)
}
