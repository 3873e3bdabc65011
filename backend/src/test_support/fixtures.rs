//! Seeded users, complaints and builders shared by tests.

use chrono::{DateTime, TimeZone, Utc};
use example_data::SeedRegistry;

use crate::domain::complaints::{
    Category, Complaint, ComplaintId, ComplaintParts, ComplaintStatus, Priority, SubmitterRole,
};
use crate::domain::example_data::{seed_complaints as convert_complaints, seed_users};
use crate::domain::ports::SeededIdentityDirectory;
use crate::domain::{Role, Session, User};

fn bundled() -> SeedRegistry {
    SeedRegistry::bundled().expect("bundled seed registry parses")
}

/// UTC instant from calendar parts.
pub fn utc(year: i32, month: u32, day: u32, hour: u32, minute: u32, second: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, minute, second)
        .single()
        .expect("valid calendar date")
}

/// The ten bundled demo complaints, C001 to C010.
pub fn seed_complaints() -> Vec<Complaint> {
    convert_complaints(&bundled()).expect("seed complaints convert")
}

/// The seeded account holding `role`.
pub fn demo_user(role: Role) -> User {
    seed_users(&bundled())
        .expect("seed users convert")
        .into_iter()
        .find(|user| user.role() == role)
        .expect("every role has a seeded account")
}

/// A session for the seeded account holding `role`.
pub fn demo_session(role: Role) -> Session {
    Session::new(demo_user(role))
}

/// Identity directory over the seeded accounts.
pub fn demo_directory() -> SeededIdentityDirectory {
    SeededIdentityDirectory::from_registry(&bundled()).expect("seed users convert")
}

/// Builder for complaints with sensible defaults.
///
/// Defaults to a pending, medium-priority "Others" complaint filed by a
/// student on 2025-01-15 09:00 UTC.
#[derive(Debug, Clone)]
pub struct ComplaintBuilder {
    parts: ComplaintParts,
}

impl ComplaintBuilder {
    pub fn new(id: &str) -> Self {
        let at = utc(2025, 1, 15, 9, 0, 0);
        Self {
            parts: ComplaintParts {
                id: ComplaintId::new(id).expect("valid complaint id"),
                title: format!("Complaint {id}"),
                category: Category::Others,
                description: format!("Description of {id}"),
                status: ComplaintStatus::Pending,
                priority: Priority::Medium,
                submitted_by: "John Smith".to_owned(),
                submitted_by_role: SubmitterRole::Student,
                submitted_at: at,
                updated_at: at,
                assigned_to: None,
                location: None,
                contact_number: None,
            },
        }
    }

    pub fn title(mut self, title: &str) -> Self {
        self.parts.title = title.to_owned();
        self
    }

    pub fn description(mut self, description: &str) -> Self {
        self.parts.description = description.to_owned();
        self
    }

    pub fn category(mut self, category: Category) -> Self {
        self.parts.category = category;
        self
    }

    pub fn status(mut self, status: ComplaintStatus) -> Self {
        self.parts.status = status;
        self
    }

    pub fn priority(mut self, priority: Priority) -> Self {
        self.parts.priority = priority;
        self
    }

    pub fn assigned_to(mut self, name: &str) -> Self {
        self.parts.assigned_to = Some(name.to_owned());
        self
    }

    /// Set both timestamps to `at`.
    pub fn submitted_at(mut self, at: DateTime<Utc>) -> Self {
        self.parts.submitted_at = at;
        self.parts.updated_at = at;
        self
    }

    pub fn updated_at(mut self, at: DateTime<Utc>) -> Self {
        self.parts.updated_at = at;
        self
    }

    pub fn build(self) -> Complaint {
        Complaint::try_from(self.parts).expect("builder keeps record invariants")
    }
}
