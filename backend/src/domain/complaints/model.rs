//! Complaint record and its closed value types.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::Role;

use super::timestamp;

/// Error returned when a display name does not match any variant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {kind} '{value}'")]
pub struct ParseComplaintValueError {
    kind: &'static str,
    value: String,
}

impl ParseComplaintValueError {
    fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_owned(),
        }
    }
}

/// Normalise user input for lenient enum parsing: case, spaces, `-` and `_`
/// are ignored.
fn fold(value: &str) -> String {
    value
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_'))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Lifecycle state of a complaint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComplaintStatus {
    Pending,
    #[serde(rename = "In Progress")]
    InProgress,
    Resolved,
}

impl ComplaintStatus {
    /// Every status in dashboard order.
    pub const ALL: [Self; 3] = [Self::Pending, Self::InProgress, Self::Resolved];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::InProgress => "In Progress",
            Self::Resolved => "Resolved",
        }
    }
}

impl fmt::Display for ComplaintStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ComplaintStatus {
    type Err = ParseComplaintValueError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let folded = fold(value);
        Self::ALL
            .into_iter()
            .find(|status| fold(status.as_str()) == folded)
            .ok_or_else(|| ParseComplaintValueError::new("status", value))
    }
}

/// Urgency assigned by the submitter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    /// Every priority from least to most urgent.
    pub const ALL: [Self; 3] = [Self::Low, Self::Medium, Self::High];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = ParseComplaintValueError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let folded = fold(value);
        Self::ALL
            .into_iter()
            .find(|priority| fold(priority.as_str()) == folded)
            .ok_or_else(|| ParseComplaintValueError::new("priority", value))
    }
}

/// Complaint category.
///
/// The nine listed categories are the only ones offered on submission.
/// Persisted values outside the list are kept verbatim as
/// [`Category::Unlisted`] so grouping still reports them under their literal
/// name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    AcademicIssues,
    Infrastructure,
    HostelFacilities,
    LibraryServices,
    Cafeteria,
    Administrative,
    Harassment,
    TechnicalSupport,
    Others,
    Unlisted(String),
}

impl Category {
    /// Categories offered on the submission form, in form order.
    pub const LISTED: [Self; 9] = [
        Self::AcademicIssues,
        Self::Infrastructure,
        Self::HostelFacilities,
        Self::LibraryServices,
        Self::Cafeteria,
        Self::Administrative,
        Self::Harassment,
        Self::TechnicalSupport,
        Self::Others,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            Self::AcademicIssues => "Academic Issues",
            Self::Infrastructure => "Infrastructure",
            Self::HostelFacilities => "Hostel Facilities",
            Self::LibraryServices => "Library Services",
            Self::Cafeteria => "Cafeteria",
            Self::Administrative => "Administrative",
            Self::Harassment => "Harassment",
            Self::TechnicalSupport => "Technical Support",
            Self::Others => "Others",
            Self::Unlisted(value) => value.as_str(),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Strict parse: only the listed categories are accepted.
impl FromStr for Category {
    type Err = ParseComplaintValueError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let folded = fold(value);
        Self::LISTED
            .into_iter()
            .find(|category| fold(category.as_str()) == folded)
            .ok_or_else(|| ParseComplaintValueError::new("category", value))
    }
}

/// Lenient conversion used when reading stored data.
impl From<String> for Category {
    fn from(value: String) -> Self {
        Self::LISTED
            .into_iter()
            .find(|category| category.as_str() == value)
            .unwrap_or(Self::Unlisted(value))
    }
}

impl From<Category> for String {
    fn from(value: Category) -> Self {
        match value {
            Category::Unlisted(raw) => raw,
            listed => listed.as_str().to_owned(),
        }
    }
}

/// Role of the person who filed a complaint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmitterRole {
    Student,
    Faculty,
}

impl SubmitterRole {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Faculty => "faculty",
        }
    }
}

impl fmt::Display for SubmitterRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SubmitterRole {
    type Err = ParseComplaintValueError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match fold(value).as_str() {
            "student" => Ok(Self::Student),
            "faculty" => Ok(Self::Faculty),
            _ => Err(ParseComplaintValueError::new("submitter role", value)),
        }
    }
}

impl TryFrom<Role> for SubmitterRole {
    type Error = Role;

    fn try_from(role: Role) -> Result<Self, Self::Error> {
        match role {
            Role::Student => Ok(Self::Student),
            Role::Faculty => Ok(Self::Faculty),
            other @ (Role::Staff | Role::Head) => Err(other),
        }
    }
}

/// Complaint identifier, a time-based token such as `C1737012345678`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ComplaintId(String);

impl ComplaintId {
    /// Validate and construct a [`ComplaintId`].
    pub fn new(id: impl Into<String>) -> Result<Self, ComplaintValidationError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(ComplaintValidationError::EmptyId);
        }
        if id.trim() != id {
            return Err(ComplaintValidationError::IdContainsWhitespace);
        }
        Ok(Self(id))
    }

    /// Token derived from a creation instant.
    pub(crate) fn from_millis(millis: i64) -> Self {
        Self(format!("C{millis}"))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for ComplaintId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for ComplaintId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ComplaintId {
    type Err = ComplaintValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::new(value)
    }
}

impl From<ComplaintId> for String {
    fn from(value: ComplaintId) -> Self {
        value.0
    }
}

impl TryFrom<String> for ComplaintId {
    type Error = ComplaintValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Validation errors raised when assembling a [`Complaint`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ComplaintValidationError {
    #[error("complaint id must not be empty")]
    EmptyId,
    #[error("complaint id must not contain surrounding whitespace")]
    IdContainsWhitespace,
    #[error("complaint {id} was updated before it was submitted")]
    UpdatedBeforeSubmitted { id: String },
}

/// Field-by-field representation of a complaint.
///
/// This is the persisted JSON shape. Converting it into a [`Complaint`]
/// checks the record invariants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplaintParts {
    pub id: ComplaintId,
    pub title: String,
    pub category: Category,
    pub description: String,
    pub status: ComplaintStatus,
    pub priority: Priority,
    pub submitted_by: String,
    pub submitted_by_role: SubmitterRole,
    #[serde(with = "timestamp")]
    pub submitted_at: DateTime<Utc>,
    #[serde(with = "timestamp")]
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_number: Option<String>,
}

/// A filed complaint.
///
/// ## Invariants
/// - `submitted_at <= updated_at`.
/// - `submitted_at` never changes after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ComplaintParts", into = "ComplaintParts")]
pub struct Complaint {
    parts: ComplaintParts,
}

impl Complaint {
    /// Wrap parts whose invariants the caller has already established.
    pub(crate) fn from_validated(parts: ComplaintParts) -> Self {
        debug_assert!(parts.submitted_at <= parts.updated_at);
        Self { parts }
    }

    pub fn id(&self) -> &ComplaintId {
        &self.parts.id
    }

    pub fn title(&self) -> &str {
        self.parts.title.as_str()
    }

    pub fn category(&self) -> &Category {
        &self.parts.category
    }

    pub fn description(&self) -> &str {
        self.parts.description.as_str()
    }

    pub fn status(&self) -> ComplaintStatus {
        self.parts.status
    }

    pub fn priority(&self) -> Priority {
        self.parts.priority
    }

    /// Display name of the submitter (not a user id).
    pub fn submitted_by(&self) -> &str {
        self.parts.submitted_by.as_str()
    }

    pub fn submitted_by_role(&self) -> SubmitterRole {
        self.parts.submitted_by_role
    }

    pub fn submitted_at(&self) -> DateTime<Utc> {
        self.parts.submitted_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.parts.updated_at
    }

    /// Staff display name handling the complaint, never validated.
    pub fn assigned_to(&self) -> Option<&str> {
        self.parts.assigned_to.as_deref()
    }

    pub fn location(&self) -> Option<&str> {
        self.parts.location.as_deref()
    }

    pub fn contact_number(&self) -> Option<&str> {
        self.parts.contact_number.as_deref()
    }

    /// Copy with a new status stamped at `at`.
    pub(crate) fn with_status(&self, status: ComplaintStatus, at: DateTime<Utc>) -> Self {
        let mut parts = self.parts.clone();
        parts.status = status;
        parts.updated_at = at.max(parts.updated_at);
        Self { parts }
    }
}

impl TryFrom<ComplaintParts> for Complaint {
    type Error = ComplaintValidationError;

    fn try_from(parts: ComplaintParts) -> Result<Self, Self::Error> {
        if parts.updated_at < parts.submitted_at {
            return Err(ComplaintValidationError::UpdatedBeforeSubmitted {
                id: parts.id.to_string(),
            });
        }
        Ok(Self { parts })
    }
}

impl From<Complaint> for ComplaintParts {
    fn from(value: Complaint) -> Self {
        value.parts
    }
}
