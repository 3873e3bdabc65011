//! User data model.
//!
//! Users are the seeded demo accounts. They never change after seeding; the
//! login key is the (email, role) pair because the same email may exist
//! under several roles.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Validation errors returned by [`User::try_new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    EmptyId,
    EmptyName,
    EmptyEmail,
    EmailContainsWhitespace,
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => write!(f, "user id must not be empty"),
            Self::EmptyName => write!(f, "user name must not be empty"),
            Self::EmptyEmail => write!(f, "user email must not be empty"),
            Self::EmailContainsWhitespace => {
                write!(f, "user email must not contain whitespace")
            }
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Account role. Each role sees a different view of the system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Faculty,
    Staff,
    Head,
}

/// Error returned when parsing a [`Role`] from string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseRoleError(String);

impl Role {
    /// Every role in display order.
    pub const ALL: [Self; 4] = [Self::Student, Self::Faculty, Self::Staff, Self::Head];

    /// Lower-case wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Faculty => "faculty",
            Self::Staff => "staff",
            Self::Head => "head",
        }
    }

    /// Whether this role may file complaints.
    pub fn is_complainant(self) -> bool {
        matches!(self, Self::Student | Self::Faculty)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for ParseRoleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid role '{}'", self.0)
    }
}

impl std::error::Error for ParseRoleError {}

impl FromStr for Role {
    type Err = ParseRoleError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|role| role.as_str().eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| ParseRoleError(value.to_owned()))
    }
}

/// Seeded application user.
///
/// ## Invariants
/// - `id`, `name` and `email` are non-empty once trimmed.
/// - `email` contains no whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "UserDto", into = "UserDto")]
pub struct User {
    id: String,
    name: String,
    email: String,
    role: Role,
    department: Option<String>,
}

impl User {
    /// Fallible constructor enforcing the identity invariants.
    ///
    /// # Examples
    /// ```
    /// use cms_backend::domain::{Role, User};
    ///
    /// let user = User::try_new("4", "Admin Head", "head@cms.edu", Role::Head, None)
    ///     .expect("valid user");
    /// assert_eq!(user.email(), "head@cms.edu");
    /// ```
    pub fn try_new(
        id: impl Into<String>,
        name: impl Into<String>,
        email: impl Into<String>,
        role: Role,
        department: Option<String>,
    ) -> Result<Self, UserValidationError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(UserValidationError::EmptyId);
        }
        let name = name.into();
        if name.trim().is_empty() {
            return Err(UserValidationError::EmptyName);
        }
        let email = email.into();
        if email.trim().is_empty() {
            return Err(UserValidationError::EmptyEmail);
        }
        if email.chars().any(char::is_whitespace) {
            return Err(UserValidationError::EmailContainsWhitespace);
        }
        let department = department.filter(|value| !value.trim().is_empty());

        Ok(Self {
            id,
            name,
            email,
            role,
            department,
        })
    }

    /// Stable account identifier.
    pub fn id(&self) -> &str {
        self.id.as_str()
    }

    /// Display name stamped on complaints the user files.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Login email.
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn department(&self) -> Option<&str> {
        self.department.as_deref()
    }

    /// Whether this account is the one addressed by a login attempt.
    pub fn matches_login(&self, email: &str, role: Role) -> bool {
        self.email == email && self.role == role
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserDto {
    id: String,
    name: String,
    email: String,
    role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    department: Option<String>,
}

impl From<User> for UserDto {
    fn from(value: User) -> Self {
        let User {
            id,
            name,
            email,
            role,
            department,
        } = value;
        Self {
            id,
            name,
            email,
            role,
            department,
        }
    }
}

impl TryFrom<UserDto> for User {
    type Error = UserValidationError;

    fn try_from(value: UserDto) -> Result<Self, Self::Error> {
        User::try_new(value.id, value.name, value.email, value.role, value.department)
    }
}
