//! Seed record types.
//!
//! These types mirror the persisted JSON shape of users and complaints but
//! carry plain strings so the crate stays independent of backend domain
//! types.

use serde::{Deserialize, Serialize};

/// A demo account available for login.
///
/// # Example
///
/// ```
/// use example_data::ExampleUserSeed;
///
/// let user = ExampleUserSeed {
///     id: "4".to_owned(),
///     name: "Admin Head".to_owned(),
///     email: "head@cms.edu".to_owned(),
///     role: "head".to_owned(),
///     department: None,
/// };
///
/// assert_eq!(user.role, "head");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExampleUserSeed {
    /// Stable account identifier.
    pub id: String,
    /// Display name stamped on submitted complaints.
    pub name: String,
    /// Login email; unique only together with the role.
    pub email: String,
    /// Lower-case role name (`student`, `faculty`, `staff`, `head`).
    pub role: String,
    /// Optional department label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
}

/// A complaint in the fallback data set.
///
/// Timestamps are kept as the literal strings found in the registry; the
/// seed format omits a UTC offset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExampleComplaintSeed {
    /// Complaint identifier, e.g. `C001`.
    pub id: String,
    /// Short summary.
    pub title: String,
    /// Category display name.
    pub category: String,
    /// Full description.
    pub description: String,
    /// Status display name (`Pending`, `In Progress`, `Resolved`).
    pub status: String,
    /// Priority display name (`Low`, `Medium`, `High`).
    pub priority: String,
    /// Display name of the submitter.
    pub submitted_by: String,
    /// Role of the submitter (`student` or `faculty`).
    pub submitted_by_role: String,
    /// Creation timestamp.
    pub submitted_at: String,
    /// Last mutation timestamp.
    pub updated_at: String,
    /// Display name of the staff member handling the complaint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<String>,
}
