//! End-to-end coverage of the `cms` commands over an in-memory store.

use std::sync::Arc;

use clap::Parser;
use rstest::{fixture, rstest};

use super::*;
use crate::domain::complaints::{ComplaintStatus, Priority};
use crate::outbound::persistence::InMemoryKeyValueStore;
use crate::test_support::{MutableClock, demo_directory, seed_complaints, utc};

struct Harness {
    context: CliContext<InMemoryKeyValueStore>,
}

impl Harness {
    fn run(&self, command: Command) -> Result<String, CliError> {
        let mut out = Vec::new();
        self.context.execute(command, &mut out)?;
        Ok(String::from_utf8(out).expect("utf-8 output"))
    }

    fn run_ok(&self, command: Command) -> String {
        self.run(command).expect("command succeeds")
    }

    fn login(&self, email: &str, role: Option<Role>) -> String {
        self.run_ok(login_command(email, role))
    }
}

#[fixture]
fn harness() -> Harness {
    let clock = Arc::new(MutableClock::new(utc(2025, 2, 1, 12, 0, 0)));
    Harness {
        context: CliContext::new(
            Arc::new(InMemoryKeyValueStore::new()),
            demo_directory(),
            seed_complaints(),
            clock,
        ),
    }
}

fn login_command(email: &str, role: Option<Role>) -> Command {
    Command::Login(LoginArgs {
        email: email.to_owned(),
        password: "password".to_owned(),
        role,
    })
}

fn list(status: &str) -> Command {
    Command::List(ListArgs {
        status: status.parse().expect("valid status"),
        category: Selection::All,
        priority: Selection::All,
        assignee: AssigneeFilter::All,
        search: None,
    })
}

fn domain_code(err: &CliError) -> Option<ErrorCode> {
    match err {
        CliError::Domain(inner) => Some(inner.code()),
        _ => None,
    }
}

#[rstest]
fn head_login_lands_on_the_head_dashboard(harness: Harness) {
    let out = harness.login("head@cms.edu", Some(Role::Head));
    assert_eq!(out, "Welcome back, Admin Head!\nLanding view: head-dashboard\n");
}

#[rstest]
fn wrong_role_is_rejected(harness: Harness) {
    let err = harness
        .run(login_command("staff@cms.edu", Some(Role::Head)))
        .expect_err("staff account cannot log in as head");
    assert_eq!(domain_code(&err), Some(ErrorCode::Unauthorized));
    assert!(err.is_user_facing());
}

#[rstest]
#[case("faculty@university.edu", "Dr. Sarah Johnson", "submit-complaint")]
#[case("student@university.edu", "John Smith", "submit-complaint")]
fn university_login_infers_the_role(
    harness: Harness,
    #[case] email: &str,
    #[case] name: &str,
    #[case] view: &str,
) {
    let out = harness.login(email, None);
    assert_eq!(out, format!("Welcome back, {name}!\nLanding view: {view}\n"));
}

#[rstest]
fn blank_email_is_a_login_error(harness: Harness) {
    let err = harness
        .run(login_command("   ", Some(Role::Student)))
        .expect_err("blank email");
    assert!(matches!(err, CliError::Login(LoginValidationError::EmptyEmail)));
    assert!(err.is_user_facing());
}

#[rstest]
fn whoami_and_logout_follow_the_session(harness: Harness) {
    assert_eq!(harness.run_ok(Command::Whoami), "Not logged in\n");

    harness.login("staff@cms.edu", Some(Role::Staff));
    assert_eq!(
        harness.run_ok(Command::Whoami),
        "Mike Wilson <staff@cms.edu> (staff), CMS Operations\n"
    );

    assert_eq!(harness.run_ok(Command::Logout), "Logged out successfully\n");
    assert_eq!(harness.run_ok(Command::Whoami), "Not logged in\n");
}

#[rstest]
fn commands_need_a_session(harness: Harness) {
    let err = harness.run(list("all")).expect_err("nobody logged in");
    assert_eq!(domain_code(&err), Some(ErrorCode::Unauthorized));
}

#[rstest]
fn student_submission_is_listed_first(harness: Harness) {
    harness.login("student@university.edu", None);
    let out = harness.run_ok(Command::Submit(SubmitArgs {
        title: Some("Flickering lights".to_owned()),
        category: Some(Category::Infrastructure),
        description: Some("Corridor lights in block B flicker all evening.".to_owned()),
        priority: Some(Priority::Low),
        ..SubmitArgs::default()
    }));
    assert_eq!(
        out,
        "Complaint C1738411200000 submitted successfully! You will be notified of any updates.\n"
    );

    harness.login("staff@cms.edu", Some(Role::Staff));
    let listing = harness.run_ok(list("pending"));
    let mut lines = listing.lines();
    assert_eq!(lines.next(), Some("Showing 5 of 11 complaints"));
    assert_eq!(
        lines.next(),
        Some(
            "C1738411200000 [Pending] [Low] Infrastructure: Flickering lights \
             (by John Smith, 2025-02-01)"
        )
    );
}

#[rstest]
fn blank_title_is_rejected(harness: Harness) {
    harness.login("faculty@university.edu", None);
    let err = harness
        .run(Command::Submit(SubmitArgs {
            title: Some("  ".to_owned()),
            category: Some(Category::Cafeteria),
            description: Some("Cold food again.".to_owned()),
            ..SubmitArgs::default()
        }))
        .expect_err("blank title");
    assert_eq!(domain_code(&err), Some(ErrorCode::InvalidRequest));
    assert_eq!(err.to_string(), "please fill in all required fields");
}

#[rstest]
fn staff_cannot_submit(harness: Harness) {
    harness.login("staff@cms.edu", Some(Role::Staff));
    let err = harness
        .run(Command::Submit(SubmitArgs::default()))
        .expect_err("staff do not file complaints");
    assert_eq!(domain_code(&err), Some(ErrorCode::Forbidden));
}

#[rstest]
fn staff_list_filters_by_status(harness: Harness) {
    harness.login("staff@cms.edu", Some(Role::Staff));
    let out = harness.run_ok(list("Resolved"));
    assert_eq!(
        out,
        "Showing 2 of 10 complaints\n\
         C003 [Resolved] [High] Infrastructure: Broken Projector in Room 204 \
         (by Dr. Sarah Johnson, 2025-01-14, assigned to Mike Wilson)\n\
         C008 [Resolved] [Low] Library Services: Library Book Renewal System \
         (by Lisa Anderson, 2025-01-13)\n"
    );
}

#[rstest]
fn empty_listing_says_so(harness: Harness) {
    harness.login("head@cms.edu", Some(Role::Head));
    let out = harness.run_ok(Command::List(ListArgs {
        status: Selection::All,
        category: Selection::All,
        priority: Selection::All,
        assignee: AssigneeFilter::All,
        search: Some("no such complaint".to_owned()),
    }));
    assert_eq!(
        out,
        "Showing 0 of 10 complaints\nNo complaints found matching the filters\n"
    );
}

#[rstest]
fn set_status_persists_the_change(harness: Harness) {
    harness.login("staff@cms.edu", Some(Role::Staff));
    let out = harness.run_ok(Command::SetStatus(SetStatusArgs {
        id: ComplaintId::new("C002").expect("valid id"),
        status: ComplaintStatus::Resolved,
    }));
    assert_eq!(out, "Complaint C002 status updated to Resolved\n");

    let listing = harness.run_ok(list("resolved"));
    assert!(listing.starts_with("Showing 3 of 10 complaints\nC002 [Resolved]"));
}

#[rstest]
fn set_status_on_unknown_id_is_not_found(harness: Harness) {
    harness.login("staff@cms.edu", Some(Role::Staff));
    let err = harness
        .run(Command::SetStatus(SetStatusArgs {
            id: ComplaintId::new("C999").expect("valid id"),
            status: ComplaintStatus::Pending,
        }))
        .expect_err("unknown id");
    assert_eq!(domain_code(&err), Some(ErrorCode::NotFound));
}

#[rstest]
fn head_sees_the_analytics(harness: Harness) {
    harness.login("head@cms.edu", Some(Role::Head));
    let out = harness.run_ok(Command::Stats);
    let lines: Vec<&str> = out.lines().collect();

    assert_eq!(lines[0], "Total complaints: 10");
    assert_eq!(lines[1], "Pending: 4 (40%)");
    assert_eq!(lines[2], "In Progress: 4 (40%)");
    assert_eq!(lines[3], "Resolved: 2 (20%)");
    assert_eq!(lines[4], "High priority: 4");
    assert_eq!(lines[5], "Top categories:");
    assert_eq!(lines[6], "  Infrastructure: 4");
    assert_eq!(lines[7], "  Library Services: 2");
    assert!(lines.contains(&"By priority:"));
    assert_eq!(lines.last(), Some(&"Assigned staff: Mike Wilson"));
}

#[rstest]
fn staff_cannot_open_the_analytics(harness: Harness) {
    harness.login("staff@cms.edu", Some(Role::Staff));
    let err = harness.run(Command::Stats).expect_err("head only");
    assert_eq!(domain_code(&err), Some(ErrorCode::Forbidden));
}

#[rstest]
fn internal_failures_are_not_user_facing() {
    let err = CliError::from(Error::internal("store offline"));
    assert!(!err.is_user_facing());
    let err = CliError::from(io::Error::other("broken pipe"));
    assert!(!err.is_user_facing());
}

#[rstest]
fn list_arguments_parse_from_the_command_line() {
    let cli = Cli::try_parse_from([
        "cms",
        "list",
        "--status",
        "in-progress",
        "--priority",
        "high",
        "--assignee",
        "unassigned",
    ])
    .expect("arguments parse");

    let Command::List(args) = cli.command else {
        panic!("expected list command");
    };
    let criteria = FilterCriteria::from(args);
    assert_eq!(criteria.status, Selection::Only(ComplaintStatus::InProgress));
    assert_eq!(criteria.priority, Selection::Only(Priority::High));
    assert_eq!(criteria.category, Selection::All);
    assert_eq!(criteria.assignee, AssigneeFilter::Unassigned);
}

#[rstest]
fn unknown_status_fails_to_parse() {
    let result = Cli::try_parse_from(["cms", "set-status", "C001", "closed"]);
    assert!(result.is_err());
}

#[rstest]
fn unlisted_category_is_accepted_as_a_filter() {
    let cli = Cli::try_parse_from(["cms", "list", "--category", "Parking"])
        .expect("unlisted category parses");

    let Command::List(args) = cli.command else {
        panic!("expected list command");
    };
    assert_eq!(
        args.category,
        Selection::Only(Category::Unlisted("Parking".to_owned()))
    );
}
