//! Complaint use-cases bound to a repository and a session.
//!
//! Each operation checks the session role first, then works on the whole
//! collection: load, derive, and (for mutations) overwrite.

use std::sync::Arc;

use mockable::Clock;
use serde_json::json;
use tracing::{debug, info};

use crate::domain::complaints::{
    Complaint, ComplaintDraft, ComplaintId, ComplaintLifecycle, ComplaintStats, ComplaintStatus,
    FilterCriteria, SubmissionValidationError, aggregate, apply_filters, sort_most_recent_first,
};
use crate::domain::ports::{ComplaintRepository, ComplaintRepositoryError};
use crate::domain::session::View;
use crate::domain::{Error, Role, Session};

/// Filtered dashboard listing plus statistics over the whole collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dashboard {
    /// Complaints matching the criteria, newest first.
    pub complaints: Vec<Complaint>,
    /// Statistics over every stored complaint, not just the filtered ones.
    pub stats: ComplaintStats,
}

impl Dashboard {
    /// Number of complaints shown after filtering.
    pub fn shown(&self) -> usize {
        self.complaints.len()
    }

    /// Number of stored complaints.
    pub fn total(&self) -> usize {
        self.stats.total()
    }
}

/// Complaint service implementing submission, triage and reporting.
#[derive(Clone)]
pub struct ComplaintService<R> {
    repository: Arc<R>,
    lifecycle: ComplaintLifecycle,
}

impl<R> ComplaintService<R> {
    pub fn new(repository: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self {
            repository,
            lifecycle: ComplaintLifecycle::new(clock),
        }
    }
}

impl<R> ComplaintService<R>
where
    R: ComplaintRepository,
{
    fn map_repository_error(error: ComplaintRepositoryError) -> Error {
        match error {
            ComplaintRepositoryError::Store { message } => {
                Error::internal(format!("complaint store unavailable: {message}"))
            }
            ComplaintRepositoryError::Corrupt { message } => {
                Error::internal(format!("stored complaints are unreadable: {message}"))
            }
            ComplaintRepositoryError::Serialization { message } => {
                Error::internal(format!("complaints could not be saved: {message}"))
            }
        }
    }

    fn validation_error(error: SubmissionValidationError) -> Error {
        let missing: Vec<&str> = error.missing().iter().map(|field| field.as_str()).collect();
        Error::invalid_request("please fill in all required fields")
            .with_details(json!({ "missingFields": missing }))
    }

    fn load(&self) -> Result<Vec<Complaint>, Error> {
        self.repository.load().map_err(Self::map_repository_error)
    }

    /// File a new complaint for a student or faculty session.
    ///
    /// Blank required fields fail with `invalid_request` before the
    /// repository is touched.
    pub fn submit(&self, session: &Session, draft: ComplaintDraft) -> Result<Complaint, Error> {
        session.require_view(View::SubmitComplaint)?;
        let submitter = session.submitter()?;
        draft.validate().map_err(Self::validation_error)?;

        let existing = self.load()?;
        let complaint = self
            .lifecycle
            .submit(draft, submitter, &existing)
            .map_err(Self::validation_error)?;
        self.repository
            .append(complaint.clone())
            .map_err(Self::map_repository_error)?;

        info!(
            complaint_id = %complaint.id(),
            role = %session.role(),
            category = %complaint.category(),
            "complaint submitted"
        );
        Ok(complaint)
    }

    /// Change the status of one complaint. Staff only.
    pub fn update_status(
        &self,
        session: &Session,
        id: &ComplaintId,
        status: ComplaintStatus,
    ) -> Result<Complaint, Error> {
        session.require_view(View::StaffDashboard)?;
        let mut complaints = self.load()?;
        let Some(slot) = complaints.iter_mut().find(|complaint| complaint.id() == id) else {
            return Err(Error::not_found(format!("complaint {id} not found")));
        };
        let previous = slot.status();
        *slot = self.lifecycle.set_status(slot, status);
        let updated = slot.clone();
        self.repository
            .save_all(&complaints)
            .map_err(Self::map_repository_error)?;

        info!(
            complaint_id = %id,
            from = %previous,
            to = %status,
            "complaint status updated"
        );
        Ok(updated)
    }

    /// Filtered, newest-first listing for the staff and head dashboards.
    pub fn dashboard(&self, session: &Session, criteria: &FilterCriteria) -> Result<Dashboard, Error> {
        session.require_role(&[Role::Staff, Role::Head])?;
        let stored = self.load()?;
        let stats = aggregate(&stored);
        let mut visible = apply_filters(&stored, criteria);
        sort_most_recent_first(&mut visible);
        let complaints: Vec<Complaint> = visible.into_iter().cloned().collect();
        debug!(
            shown = complaints.len(),
            total = stats.total(),
            "dashboard assembled"
        );
        Ok(Dashboard { complaints, stats })
    }
}

#[cfg(test)]
#[path = "complaint_service_tests.rs"]
mod tests;
