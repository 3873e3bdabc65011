//! Port for looking up the seeded demo accounts.

use example_data::SeedRegistry;

use crate::domain::example_data::{ExampleDataSeedingError, seed_users};
use crate::domain::{Role, User};

/// Read-only lookup table of known users.
#[cfg_attr(test, mockall::automock)]
pub trait IdentityDirectory: Send + Sync {
    /// Exact match on the (email, role) pair.
    fn find_by_login(&self, email: &str, role: Role) -> Option<User>;

    /// Every known user in seed order.
    fn users(&self) -> Vec<User>;
}

/// Directory backed by a fixed list of users.
#[derive(Debug, Clone, Default)]
pub struct SeededIdentityDirectory {
    users: Vec<User>,
}

impl SeededIdentityDirectory {
    pub fn new(users: Vec<User>) -> Self {
        Self { users }
    }

    /// Build the directory from the users of a seed registry.
    pub fn from_registry(registry: &SeedRegistry) -> Result<Self, ExampleDataSeedingError> {
        seed_users(registry).map(Self::new)
    }
}

impl IdentityDirectory for SeededIdentityDirectory {
    fn find_by_login(&self, email: &str, role: Role) -> Option<User> {
        self.users
            .iter()
            .find(|user| user.matches_login(email, role))
            .cloned()
    }

    fn users(&self) -> Vec<User> {
        self.users.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn directory() -> SeededIdentityDirectory {
        let registry = SeedRegistry::bundled().expect("bundled registry");
        SeededIdentityDirectory::from_registry(&registry).expect("seed users convert")
    }

    #[rstest]
    #[case("student@university.edu", Role::Student, "John Smith")]
    #[case("faculty@university.edu", Role::Faculty, "Dr. Sarah Johnson")]
    #[case("staff@cms.edu", Role::Staff, "Mike Wilson")]
    #[case("head@cms.edu", Role::Head, "Admin Head")]
    fn finds_each_seeded_account(
        directory: SeededIdentityDirectory,
        #[case] email: &str,
        #[case] role: Role,
        #[case] name: &str,
    ) {
        let user = directory.find_by_login(email, role).expect("seeded user");
        assert_eq!(user.name(), name);
        assert_eq!(user.role(), role);
    }

    #[rstest]
    #[case("head@cms.edu", Role::Staff)]
    #[case("student@university.edu", Role::Faculty)]
    #[case("nobody@cms.edu", Role::Head)]
    fn requires_the_exact_email_and_role_pair(
        directory: SeededIdentityDirectory,
        #[case] email: &str,
        #[case] role: Role,
    ) {
        assert!(directory.find_by_login(email, role).is_none());
    }

    #[rstest]
    fn lists_users_in_seed_order(directory: SeededIdentityDirectory) {
        let ids: Vec<String> = directory
            .users()
            .iter()
            .map(|user| user.id().to_owned())
            .collect();
        assert_eq!(ids, vec!["1", "2", "3", "4"]);
    }
}
