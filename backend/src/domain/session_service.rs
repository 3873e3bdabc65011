//! Login, resume and logout.
//!
//! Login is a lookup on the (email, role) pair against the identity
//! directory. The password must be present but is never checked. The
//! logged-in user is persisted so later invocations can resume the session.

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::ports::{IdentityDirectory, SessionRepository, SessionRepositoryError};
use crate::domain::{Error, LoginCredentials, Role, Session};

/// Session service backed by a session store and an identity directory.
#[derive(Clone)]
pub struct SessionService<S, D> {
    sessions: Arc<S>,
    directory: Arc<D>,
}

impl<S, D> SessionService<S, D> {
    pub fn new(sessions: Arc<S>, directory: Arc<D>) -> Self {
        Self {
            sessions,
            directory,
        }
    }
}

impl<S, D> SessionService<S, D>
where
    S: SessionRepository,
    D: IdentityDirectory,
{
    fn map_session_error(error: SessionRepositoryError) -> Error {
        match error {
            SessionRepositoryError::Store { message } => {
                Error::internal(format!("session store unavailable: {message}"))
            }
            SessionRepositoryError::Corrupt { message } => {
                Error::internal(format!("stored session is unreadable: {message}"))
            }
            SessionRepositoryError::Serialization { message } => {
                Error::internal(format!("session could not be saved: {message}"))
            }
        }
    }

    /// Log in as `role`. Fails with `unauthorized` when no account matches
    /// the (email, role) pair.
    pub fn login(&self, credentials: &LoginCredentials, role: Role) -> Result<Session, Error> {
        let Some(user) = self.directory.find_by_login(credentials.email(), role) else {
            warn!(role = %role, "login rejected: no matching account");
            return Err(Error::unauthorized("invalid credentials"));
        };
        self.sessions
            .store_current_user(&user)
            .map_err(Self::map_session_error)?;
        info!(user_id = user.id(), role = %role, "user logged in");
        Ok(Session::new(user))
    }

    /// Log in through the shared university form, inferring the role from
    /// the email address.
    pub fn login_university(&self, credentials: &LoginCredentials) -> Result<Session, Error> {
        self.login(credentials, credentials.university_role())
    }

    /// Rebuild the session persisted by an earlier login, if any.
    pub fn resume(&self) -> Result<Option<Session>, Error> {
        let user = self
            .sessions
            .current_user()
            .map_err(Self::map_session_error)?;
        Ok(user.map(Session::new))
    }

    /// Like [`Self::resume`], but fails with `unauthorized` when nobody is
    /// logged in.
    pub fn require_session(&self) -> Result<Session, Error> {
        self.resume()?
            .ok_or_else(|| Error::unauthorized("not logged in"))
    }

    /// Forget the logged-in user. Succeeds when nobody is logged in.
    pub fn logout(&self) -> Result<(), Error> {
        self.sessions.clear().map_err(Self::map_session_error)?;
        info!("user logged out");
        Ok(())
    }
}

#[cfg(test)]
#[path = "session_service_tests.rs"]
mod tests;
