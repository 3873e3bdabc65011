//! Port persisting the logged-in user between invocations.

use crate::domain::User;

use super::{KeyValueStoreError, define_port_error};

define_port_error! {
    /// Errors raised by session repository adapters.
    pub enum SessionRepositoryError {
        /// The underlying store failed.
        Store { message: String } => "session store failed: {message}",
        /// The stored user could not be decoded.
        Corrupt { message: String } => "stored session is corrupt: {message}",
        /// The user could not be encoded for storage.
        Serialization { message: String } =>
            "session could not be serialised: {message}",
    }
}

impl From<KeyValueStoreError> for SessionRepositoryError {
    fn from(err: KeyValueStoreError) -> Self {
        Self::store(err.to_string())
    }
}

/// Storage for the `currentUser` entry.
#[cfg_attr(test, mockall::automock)]
pub trait SessionRepository: Send + Sync {
    /// The persisted user, if someone is logged in.
    fn current_user(&self) -> Result<Option<User>, SessionRepositoryError>;

    /// Record `user` as logged in, replacing any previous user.
    fn store_current_user(&self, user: &User) -> Result<(), SessionRepositoryError>;

    /// Forget the logged-in user. Succeeds when nobody is logged in.
    fn clear(&self) -> Result<(), SessionRepositoryError>;
}
