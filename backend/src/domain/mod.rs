//! Domain primitives, services and ports.
//!
//! Purpose: define the complaint workflow independently of how state is
//! stored or how users drive it. Types are immutable once validated and
//! document their invariants and serialisation contracts in Rustdoc.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure with a stable code.
//! - User / Role: seeded accounts and their roles.
//! - LoginCredentials: validated login input.
//! - Session / View: the logged-in user and the screens it may open.
//! - complaints: records, lifecycle, filtering and statistics.
//! - ComplaintService / SessionService: use-cases over the ports.

pub mod auth;
pub mod complaints;
pub mod error;
pub mod example_data;
pub mod ports;
pub mod session;
pub mod user;

mod complaint_service;
mod session_service;

pub use self::auth::{LoginCredentials, LoginValidationError};
pub use self::complaint_service::{ComplaintService, Dashboard};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::example_data::ExampleDataSeedingError;
pub use self::session::{Session, View};
pub use self::session_service::SessionService;
pub use self::user::{ParseRoleError, Role, User, UserValidationError};

