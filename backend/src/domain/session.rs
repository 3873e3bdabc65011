//! Explicit session context passed to every role-gated operation.
//!
//! A [`Session`] exists only between login and logout. Its role decides the
//! landing view and which operations may run.

use std::fmt;

use tracing::warn;

use super::complaints::{Submitter, SubmitterRole};
use super::{Error, Role, User};

/// Top-level screens reachable after login.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {
    /// Complaint form for students and faculty.
    SubmitComplaint,
    /// Triage table for staff.
    StaffDashboard,
    /// Analytics for the head of department.
    HeadDashboard,
}

impl View {
    /// Landing view for `role`.
    pub fn for_role(role: Role) -> Self {
        match role {
            Role::Student | Role::Faculty => Self::SubmitComplaint,
            Role::Staff => Self::StaffDashboard,
            Role::Head => Self::HeadDashboard,
        }
    }

    /// Roles allowed to open this view.
    pub fn allowed_roles(self) -> &'static [Role] {
        match self {
            Self::SubmitComplaint => &[Role::Student, Role::Faculty],
            Self::StaffDashboard => &[Role::Staff],
            Self::HeadDashboard => &[Role::Head],
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::SubmitComplaint => "submit-complaint",
            Self::StaffDashboard => "staff-dashboard",
            Self::HeadDashboard => "head-dashboard",
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The logged-in user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    user: User,
}

impl Session {
    pub fn new(user: User) -> Self {
        Self { user }
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    pub fn role(&self) -> Role {
        self.user.role()
    }

    pub fn landing_view(&self) -> View {
        View::for_role(self.role())
    }

    /// Fail with `forbidden` unless the session role is one of `roles`.
    pub fn require_role(&self, roles: &[Role]) -> Result<(), Error> {
        if roles.contains(&self.role()) {
            return Ok(());
        }
        warn!(
            user_id = self.user.id(),
            role = %self.role(),
            "rejected access for role"
        );
        Err(Error::forbidden(format!(
            "role {} may not perform this action",
            self.role()
        )))
    }

    /// Fail with `forbidden` unless the session role may open `view`.
    pub fn require_view(&self, view: View) -> Result<(), Error> {
        self.require_role(view.allowed_roles())
    }

    /// Identity stamped on complaints filed in this session.
    pub fn submitter(&self) -> Result<Submitter, Error> {
        let role = SubmitterRole::try_from(self.role()).map_err(|role| {
            Error::forbidden(format!("role {role} may not submit complaints"))
        })?;
        Ok(Submitter {
            name: self.user.name().to_owned(),
            role,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    fn session(role: Role) -> Session {
        let user = User::try_new("7", "Test User", "test@cms.edu", role, None).expect("valid user");
        Session::new(user)
    }

    #[rstest]
    #[case(Role::Student, View::SubmitComplaint)]
    #[case(Role::Faculty, View::SubmitComplaint)]
    #[case(Role::Staff, View::StaffDashboard)]
    #[case(Role::Head, View::HeadDashboard)]
    fn each_role_lands_on_its_view(#[case] role: Role, #[case] view: View) {
        let session = session(role);
        assert_eq!(session.landing_view(), view);
        assert!(session.require_view(view).is_ok());
    }

    #[rstest]
    #[case(Role::Student, View::StaffDashboard)]
    #[case(Role::Staff, View::HeadDashboard)]
    #[case(Role::Head, View::SubmitComplaint)]
    fn other_views_are_forbidden(#[case] role: Role, #[case] view: View) {
        let err = session(role).require_view(view).expect_err("forbidden");
        assert_eq!(err.code(), ErrorCode::Forbidden);
    }

    #[rstest]
    #[case(Role::Student, SubmitterRole::Student)]
    #[case(Role::Faculty, SubmitterRole::Faculty)]
    fn complainants_become_submitters(#[case] role: Role, #[case] expected: SubmitterRole) {
        let submitter = session(role).submitter().expect("complainant");
        assert_eq!(submitter.name, "Test User");
        assert_eq!(submitter.role, expected);
    }

    #[rstest]
    #[case(Role::Staff)]
    #[case(Role::Head)]
    fn staff_and_head_cannot_submit(#[case] role: Role) {
        let err = session(role).submitter().expect_err("not a complainant");
        assert_eq!(err.code(), ErrorCode::Forbidden);
    }
}
