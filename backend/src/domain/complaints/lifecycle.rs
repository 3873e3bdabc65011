//! Complaint creation and status changes.
//!
//! A complaint is born `Pending` from a student or faculty submission and
//! afterwards only its status (and `updated_at`) changes. Transitions are not
//! guarded: any status may follow any other, including `Resolved` back to
//! `Pending`.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, SubsecRound, Utc};
use mockable::Clock;
use thiserror::Error;

use super::model::{
    Category, Complaint, ComplaintId, ComplaintParts, ComplaintStatus, Priority, SubmitterRole,
};

/// Required submission fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequiredField {
    Title,
    Category,
    Description,
}

impl RequiredField {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Category => "category",
            Self::Description => "description",
        }
    }
}

impl fmt::Display for RequiredField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Submission rejected because required fields were blank.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("please fill in all required fields (missing: {})", join_fields(.missing))]
pub struct SubmissionValidationError {
    missing: Vec<RequiredField>,
}

impl SubmissionValidationError {
    /// Blank fields in form order.
    pub fn missing(&self) -> &[RequiredField] {
        &self.missing
    }
}

fn join_fields(fields: &[RequiredField]) -> String {
    fields
        .iter()
        .map(|field| field.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Unvalidated submission form contents.
///
/// # Examples
/// ```
/// use cms_backend::domain::complaints::{Category, ComplaintDraft, Priority};
///
/// let draft = ComplaintDraft::new("Broken projector", Some(Category::Infrastructure), "Room 204")
///     .with_priority(Priority::High)
///     .with_location("Room 204");
/// assert!(draft.validate().is_ok());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComplaintDraft {
    pub title: String,
    pub category: Option<Category>,
    pub description: String,
    /// Defaults to [`Priority::Medium`] when not chosen.
    pub priority: Option<Priority>,
    pub location: Option<String>,
    pub contact_number: Option<String>,
}

impl ComplaintDraft {
    pub fn new(
        title: impl Into<String>,
        category: Option<Category>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            category,
            description: description.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    #[must_use]
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    #[must_use]
    pub fn with_contact_number(mut self, contact_number: impl Into<String>) -> Self {
        self.contact_number = Some(contact_number.into());
        self
    }

    /// Check that every required field is present.
    pub fn validate(&self) -> Result<(), SubmissionValidationError> {
        let mut missing = Vec::new();
        if self.title.trim().is_empty() {
            missing.push(RequiredField::Title);
        }
        if self
            .category
            .as_ref()
            .is_none_or(|category| category.as_str().trim().is_empty())
        {
            missing.push(RequiredField::Category);
        }
        if self.description.trim().is_empty() {
            missing.push(RequiredField::Description);
        }

        if missing.is_empty() {
            Ok(())
        } else {
            Err(SubmissionValidationError { missing })
        }
    }
}

/// Identity stamped on a new complaint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submitter {
    pub name: String,
    pub role: SubmitterRole,
}

/// Creation and status-change rules bound to a clock.
#[derive(Clone)]
pub struct ComplaintLifecycle {
    clock: Arc<dyn Clock>,
}

impl ComplaintLifecycle {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }

    /// Current instant at the millisecond precision timestamps are stored with.
    fn now(&self) -> DateTime<Utc> {
        self.clock.utc().trunc_subsecs(3)
    }

    /// Build a new `Pending` complaint from a validated draft.
    ///
    /// `existing` supplies the identifiers already in use; a generated token
    /// that collides is moved forward one millisecond at a time.
    pub fn submit(
        &self,
        draft: ComplaintDraft,
        submitter: Submitter,
        existing: &[Complaint],
    ) -> Result<Complaint, SubmissionValidationError> {
        draft.validate()?;
        let ComplaintDraft {
            title,
            category,
            description,
            priority,
            location,
            contact_number,
        } = draft;
        let Some(category) = category else {
            return Err(SubmissionValidationError {
                missing: vec![RequiredField::Category],
            });
        };

        let now = self.now();
        let parts = ComplaintParts {
            id: next_id(now.timestamp_millis(), existing),
            title,
            category,
            description,
            status: ComplaintStatus::Pending,
            priority: priority.unwrap_or_default(),
            submitted_by: submitter.name,
            submitted_by_role: submitter.role,
            submitted_at: now,
            updated_at: now,
            assigned_to: None,
            location: non_blank(location),
            contact_number: non_blank(contact_number),
        };
        // `submitted_at == updated_at`, so the record invariants hold.
        Ok(Complaint::from_validated(parts))
    }

    /// Copy of `complaint` with a new status and a refreshed `updated_at`.
    ///
    /// The new `updated_at` never precedes the previous one, even if the
    /// clock moves backwards.
    pub fn set_status(&self, complaint: &Complaint, status: ComplaintStatus) -> Complaint {
        complaint.with_status(status, self.now())
    }
}

fn next_id(millis: i64, existing: &[Complaint]) -> ComplaintId {
    let taken: HashSet<&str> = existing.iter().map(|c| c.id().as_str()).collect();
    let mut candidate = millis;
    loop {
        let id = ComplaintId::from_millis(candidate);
        if !taken.contains(id.as_str()) {
            return id;
        }
        candidate = candidate.saturating_add(1);
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|raw| raw.trim().to_owned())
        .filter(|trimmed| !trimmed.is_empty())
}
