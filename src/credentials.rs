//! In-memory credential table.

use secrecy::SecretString;
use std::collections::HashMap;

/// Demo accounts loaded by [`CredentialStore::with_default_users`].
const DEFAULT_USERS: [(&str, &str); 4] = [
    ("admin", "admin"),
    ("user", "runner"),
    ("rana", "AaBbC"),
    ("hacker", "LmNop"),
];

/// Maps usernames to plaintext passwords.
///
/// Built once at startup and read-only afterwards.
#[derive(Debug, Default)]
pub struct CredentialStore {
    users: HashMap<String, SecretString>,
}

impl CredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store populated with the demo accounts.
    pub fn with_default_users() -> Self {
        DEFAULT_USERS
            .iter()
            .fold(Self::new(), |store, (user, pwd)| store.with_user(user, pwd))
    }

    /// Adds (or replaces) an entry while building the store.
    pub fn with_user(mut self, username: &str, password: &str) -> Self {
        self.users.insert(
            username.to_string(),
            SecretString::new(password.to_string().into()),
        );
        self
    }

    /// Returns the password stored for `username`, if any.
    pub fn lookup(&self, username: &str) -> Option<&SecretString> {
        self.users.get(username)
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Known usernames, in no particular order.
    pub fn usernames(&self) -> impl Iterator<Item = &str> {
        self.users.keys().map(String::as_str)
    }
}
