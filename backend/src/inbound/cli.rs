//! Command-line adapter for the `cms` binary.
//!
//! Arguments are parsed with clap into [`Command`] values; [`CliContext`]
//! runs them against the domain services and writes one human-readable
//! report to the supplied writer. The session persists between invocations
//! in the key-value store, so `cms login` followed by `cms list` works like
//! the browser flow it replaces.

use std::convert::Infallible;
use std::io::{self, Write};
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use mockable::Clock;
use thiserror::Error;

use crate::domain::complaints::{
    AssigneeFilter, Category, Complaint, ComplaintDraft, ComplaintId, ComplaintStatus,
    FilterCriteria, Priority, Selection, TOP_CATEGORY_COUNT,
};
use crate::domain::ports::{KeyValueStore, SeededIdentityDirectory};
use crate::domain::{
    ComplaintService, Dashboard, Error, ErrorCode, LoginCredentials, LoginValidationError, Role,
    Session, SessionService, View,
};
use crate::outbound::persistence::{KeyValueComplaintRepository, KeyValueSessionRepository};

/// Campus complaint management.
#[derive(Debug, Parser)]
#[command(name = "cms", about = "File, triage and report on campus complaints", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// `cms` subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Log in with a seeded account.
    Login(LoginArgs),
    /// Forget the logged-in user.
    Logout,
    /// Show the logged-in user.
    Whoami,
    /// File a new complaint (students and faculty).
    Submit(SubmitArgs),
    /// List complaints with optional filters (staff and head).
    List(ListArgs),
    /// Change the status of a complaint (staff).
    SetStatus(SetStatusArgs),
    /// Show complaint analytics (head).
    Stats,
}

#[derive(Debug, Clone, Args)]
pub struct LoginArgs {
    #[arg(long)]
    pub email: String,
    #[arg(long)]
    pub password: String,
    /// Account role. When omitted the university login applies: `faculty` if
    /// the email mentions faculty, otherwise `student`.
    #[arg(long)]
    pub role: Option<Role>,
}

#[derive(Debug, Clone, Default, Args)]
pub struct SubmitArgs {
    #[arg(long)]
    pub title: Option<String>,
    /// One of the listed categories, e.g. "Library Services".
    #[arg(long)]
    pub category: Option<Category>,
    #[arg(long)]
    pub description: Option<String>,
    /// Defaults to Medium.
    #[arg(long)]
    pub priority: Option<Priority>,
    #[arg(long)]
    pub location: Option<String>,
    #[arg(long = "contact-number")]
    pub contact_number: Option<String>,
}

impl SubmitArgs {
    fn into_draft(self) -> ComplaintDraft {
        ComplaintDraft {
            title: self.title.unwrap_or_default(),
            category: self.category,
            description: self.description.unwrap_or_default(),
            priority: self.priority,
            location: self.location,
            contact_number: self.contact_number,
        }
    }
}

#[derive(Debug, Clone, Args)]
pub struct ListArgs {
    #[arg(long, default_value = "all")]
    pub status: Selection<ComplaintStatus>,
    /// Listed category, any other stored category name, or `all`.
    #[arg(long, default_value = "all", value_parser = parse_category_selection)]
    pub category: Selection<Category>,
    #[arg(long, default_value = "all")]
    pub priority: Selection<Priority>,
    /// Staff display name, `unassigned`, or `all`.
    #[arg(long, default_value = "all")]
    pub assignee: AssigneeFilter,
    /// Case-insensitive text matched against title, description and id.
    #[arg(long)]
    pub search: Option<String>,
}

fn parse_category_selection(value: &str) -> Result<Selection<Category>, Infallible> {
    Ok(Selection::parse_category(value))
}

impl From<ListArgs> for FilterCriteria {
    fn from(args: ListArgs) -> Self {
        Self {
            status: args.status,
            category: args.category,
            priority: args.priority,
            assignee: args.assignee,
            search: args.search,
        }
    }
}

#[derive(Debug, Clone, Args)]
pub struct SetStatusArgs {
    pub id: ComplaintId,
    /// Pending, "In Progress" or Resolved.
    pub status: ComplaintStatus,
}

/// Failures reported by [`CliContext::execute`].
#[derive(Debug, Error)]
pub enum CliError {
    #[error("{0}")]
    Login(#[from] LoginValidationError),
    #[error("{0}")]
    Domain(#[from] Error),
    #[error("failed to write output: {0}")]
    Output(#[from] io::Error),
}

impl CliError {
    /// Whether the failure is the user's to fix (bad input, wrong role,
    /// unknown id) rather than a fault in the tool or its storage.
    pub fn is_user_facing(&self) -> bool {
        match self {
            Self::Login(_) => true,
            Self::Domain(err) => err.code() != ErrorCode::InternalError,
            Self::Output(_) => false,
        }
    }
}

type ComplaintRepo<K> = KeyValueComplaintRepository<K>;
type SessionRepo<K> = KeyValueSessionRepository<K>;

/// Services wired over one key-value store.
pub struct CliContext<K> {
    sessions: SessionService<SessionRepo<K>, SeededIdentityDirectory>,
    complaints: ComplaintService<ComplaintRepo<K>>,
}

impl<K: KeyValueStore> CliContext<K> {
    /// Wire the services. `seeds` is written to the store the first time
    /// complaints are read.
    pub fn new(
        store: Arc<K>,
        directory: SeededIdentityDirectory,
        seeds: Vec<Complaint>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let sessions = SessionService::new(
            Arc::new(KeyValueSessionRepository::new(store.clone())),
            Arc::new(directory),
        );
        let complaints = ComplaintService::new(
            Arc::new(KeyValueComplaintRepository::new(store, seeds)),
            clock,
        );
        Self {
            sessions,
            complaints,
        }
    }

    /// Run `command`, writing its report to `out`.
    pub fn execute(&self, command: Command, out: &mut impl Write) -> Result<(), CliError> {
        match command {
            Command::Login(args) => self.login(args, out),
            Command::Logout => {
                self.sessions.logout()?;
                writeln!(out, "Logged out successfully")?;
                Ok(())
            }
            Command::Whoami => self.whoami(out),
            Command::Submit(args) => {
                let session = self.sessions.require_session()?;
                let complaint = self.complaints.submit(&session, args.into_draft())?;
                writeln!(
                    out,
                    "Complaint {} submitted successfully! You will be notified of any updates.",
                    complaint.id()
                )?;
                Ok(())
            }
            Command::List(args) => {
                let session = self.sessions.require_session()?;
                let criteria = FilterCriteria::from(args);
                let dashboard = self.complaints.dashboard(&session, &criteria)?;
                write_listing(&dashboard, out)
            }
            Command::SetStatus(args) => {
                let session = self.sessions.require_session()?;
                let updated = self
                    .complaints
                    .update_status(&session, &args.id, args.status)?;
                writeln!(
                    out,
                    "Complaint {} status updated to {}",
                    updated.id(),
                    updated.status()
                )?;
                Ok(())
            }
            Command::Stats => {
                let session = self.sessions.require_session()?;
                session.require_view(View::HeadDashboard)?;
                let dashboard = self
                    .complaints
                    .dashboard(&session, &FilterCriteria::default())?;
                write_stats(&dashboard, out)
            }
        }
    }

    fn login(&self, args: LoginArgs, out: &mut impl Write) -> Result<(), CliError> {
        let credentials = LoginCredentials::try_from_parts(&args.email, &args.password)?;
        let session = match args.role {
            Some(role) => self.sessions.login(&credentials, role)?,
            None => self.sessions.login_university(&credentials)?,
        };
        writeln!(out, "Welcome back, {}!", session.user().name())?;
        writeln!(out, "Landing view: {}", session.landing_view())?;
        Ok(())
    }

    fn whoami(&self, out: &mut impl Write) -> Result<(), CliError> {
        match self.sessions.resume()? {
            Some(session) => write_identity(&session, out)?,
            None => writeln!(out, "Not logged in")?,
        }
        Ok(())
    }
}

fn write_identity(session: &Session, out: &mut impl Write) -> io::Result<()> {
    let user = session.user();
    write!(out, "{} <{}> ({})", user.name(), user.email(), user.role())?;
    if let Some(department) = user.department() {
        write!(out, ", {department}")?;
    }
    writeln!(out)
}

fn write_listing(dashboard: &Dashboard, out: &mut impl Write) -> Result<(), CliError> {
    writeln!(
        out,
        "Showing {} of {} complaints",
        dashboard.shown(),
        dashboard.total()
    )?;
    if dashboard.complaints.is_empty() {
        writeln!(out, "No complaints found matching the filters")?;
        return Ok(());
    }
    for complaint in &dashboard.complaints {
        write!(
            out,
            "{} [{}] [{}] {}: {} (by {}, {}",
            complaint.id(),
            complaint.status(),
            complaint.priority(),
            complaint.category(),
            complaint.title(),
            complaint.submitted_by(),
            complaint.submitted_at().format("%Y-%m-%d"),
        )?;
        if let Some(assignee) = complaint.assigned_to() {
            write!(out, ", assigned to {assignee}")?;
        }
        writeln!(out, ")")?;
    }
    Ok(())
}

fn write_stats(dashboard: &Dashboard, out: &mut impl Write) -> Result<(), CliError> {
    let stats = &dashboard.stats;
    writeln!(out, "Total complaints: {}", stats.total())?;
    for status in ComplaintStatus::ALL {
        writeln!(
            out,
            "{status}: {} ({}%)",
            stats.status_count(status),
            stats.status_percentage(status)
        )?;
    }
    writeln!(out, "High priority: {}", stats.high_priority())?;
    writeln!(out, "Top categories:")?;
    for (category, count) in stats.top_categories(TOP_CATEGORY_COUNT) {
        writeln!(out, "  {category}: {count}")?;
    }
    writeln!(out, "By priority:")?;
    for (priority, count) in stats.count_by_priority().iter() {
        writeln!(out, "  {priority}: {count}")?;
    }
    if !stats.assignees().is_empty() {
        writeln!(out, "Assigned staff: {}", stats.assignees().join(", "))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests;
