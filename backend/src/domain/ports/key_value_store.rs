//! Port for the opaque key-value store holding all persisted state.
//!
//! Values are JSON documents stored as text. The store knows nothing about
//! their shape; repositories serialise and deserialise on top of it.

use std::fmt;

use super::define_port_error;

/// Keys the application persists under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKey {
    /// The logged-in user, absent when nobody is logged in.
    CurrentUser,
    /// The full complaint collection, absent until first seeded.
    Complaints,
}

impl StorageKey {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::CurrentUser => "currentUser",
            Self::Complaints => "complaints",
        }
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

define_port_error! {
    /// Errors raised by key-value store adapters.
    pub enum KeyValueStoreError {
        /// The backing medium could not be read or written.
        Io { key: String, message: String } =>
            "key-value store I/O failed for {key}: {message}",
        /// The stored bytes are not valid UTF-8 text.
        Encoding { key: String } =>
            "key-value store value for {key} is not valid UTF-8",
    }
}

/// Get/set/remove access to JSON text by key.
///
/// `set` replaces any previous value wholesale and `remove` of an absent key
/// succeeds.
#[cfg_attr(test, mockall::automock)]
pub trait KeyValueStore: Send + Sync {
    /// Fetch the value stored under `key`, if any.
    fn get(&self, key: StorageKey) -> Result<Option<String>, KeyValueStoreError>;

    /// Store `value` under `key`.
    fn set(&self, key: StorageKey, value: &str) -> Result<(), KeyValueStoreError>;

    /// Delete the value stored under `key`.
    fn remove(&self, key: StorageKey) -> Result<(), KeyValueStoreError>;
}
