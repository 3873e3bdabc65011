//! Login form input.
//!
//! Accounts are matched on email and role only. A password must be typed,
//! but no account stores one, so any non-empty value is accepted.

use thiserror::Error;
use zeroize::Zeroizing;

use super::Role;

/// Blank login form fields.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoginValidationError {
    #[error("email must not be empty")]
    EmptyEmail,
    #[error("password must not be empty")]
    EmptyPassword,
}

/// Email and password as typed into `cms login`.
///
/// The email is stored trimmed. The password is kept verbatim in zeroised
/// memory.
///
/// # Examples
/// ```
/// use cms_backend::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" head@cms.edu ", "password").unwrap();
/// assert_eq!(creds.email(), "head@cms.edu");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Validate raw `--email` and `--password` values.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, LoginValidationError> {
        let normalized = email.trim();
        if normalized.is_empty() {
            return Err(LoginValidationError::EmptyEmail);
        }

        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }

        Ok(Self {
            email: normalized.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Trimmed email, matched exactly against seeded accounts.
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// The typed password.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }

    /// Role implied by a university (non-staff) login.
    ///
    /// University members share one login form; addresses containing
    /// `faculty` sign in as faculty, everything else as a student.
    pub fn university_role(&self) -> Role {
        if self.email.contains("faculty") {
            Role::Faculty
        } else {
            Role::Student
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", "pw", LoginValidationError::EmptyEmail, "email must not be empty")]
    #[case("   ", "pw", LoginValidationError::EmptyEmail, "email must not be empty")]
    #[case(
        "staff@cms.edu",
        "",
        LoginValidationError::EmptyPassword,
        "password must not be empty"
    )]
    fn invalid_credentials(
        #[case] email: &str,
        #[case] password: &str,
        #[case] expected: LoginValidationError,
        #[case] message: &str,
    ) {
        let err = LoginCredentials::try_from_parts(email, password)
            .expect_err("invalid inputs must fail");
        assert_eq!(err, expected);
        assert_eq!(err.to_string(), message);
    }

    #[rstest]
    #[case("  head@cms.edu  ", "secret")]
    #[case("student@university.edu", " any password ")]
    fn valid_credentials_trim_email(#[case] email: &str, #[case] password: &str) {
        let creds =
            LoginCredentials::try_from_parts(email, password).expect("valid inputs should succeed");
        assert_eq!(creds.email(), email.trim());
        assert_eq!(creds.password(), password);
    }

    #[rstest]
    #[case("faculty@university.edu", Role::Faculty)]
    #[case("dr.faculty.jones@university.edu", Role::Faculty)]
    #[case("student@university.edu", Role::Student)]
    #[case("someone@university.edu", Role::Student)]
    fn university_role_is_inferred_from_email(#[case] email: &str, #[case] expected: Role) {
        let creds = LoginCredentials::try_from_parts(email, "pw").expect("valid credentials");
        assert_eq!(creds.university_role(), expected);
    }
}
