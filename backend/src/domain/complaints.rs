//! Complaint records, their lifecycle, and the filter and aggregation engine.
//!
//! Everything here is pure: persistence lives behind
//! [`ComplaintRepository`](crate::domain::ports::ComplaintRepository) and
//! orchestration in [`ComplaintService`](crate::domain::ComplaintService).

mod filter;
mod lifecycle;
mod model;
mod stats;
mod timestamp;

pub use filter::{
    ALL, AssigneeFilter, FilterCriteria, Selection, UNASSIGNED, apply_filters,
    sort_most_recent_first,
};
pub use lifecycle::{
    ComplaintDraft, ComplaintLifecycle, RequiredField, SubmissionValidationError, Submitter,
};
pub use model::{
    Category, Complaint, ComplaintId, ComplaintParts, ComplaintStatus, ComplaintValidationError,
    ParseComplaintValueError, Priority, SubmitterRole,
};
pub use stats::{Breakdown, ComplaintStats, TOP_CATEGORY_COUNT, aggregate};
pub use timestamp::{TimestampParseError, format_timestamp, parse_timestamp};
