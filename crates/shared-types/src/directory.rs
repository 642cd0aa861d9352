//! # Directory Ports
//!
//! People and login users are owned by collaborators outside this core.
//! The workflow only needs narrow lookups, expressed as the two driven
//! ports below.
//!
//! Production: the host application implements these over its own store.
//! Testing / standalone runtime: `InMemoryDirectory` (below), optionally
//! seeded from a JSON file.

use parking_lot::RwLock;
use serde::Deserialize;

use crate::entities::{Person, PersonId, User, UserId};
use crate::errors::DirectoryError;

/// Person lookups used for requester/handler resolution.
pub trait PersonDirectory: Send + Sync {
    /// Find a person by id.
    fn find_person_by_id(&self, id: PersonId) -> Result<Option<Person>, DirectoryError>;

    /// First person in directory order. Only used when the operator
    /// explicitly opts into the "first available requester" fallback.
    fn find_first_person(&self) -> Result<Option<Person>, DirectoryError>;

    /// The person record linked to a login user.
    fn find_person_by_linked_user(&self, user: UserId) -> Result<Option<Person>, DirectoryError>;
}

/// Login-user lookups used for recipient resolution.
pub trait UserDirectory: Send + Sync {
    /// Find a user by id.
    fn find_user(&self, id: UserId) -> Result<Option<User>, DirectoryError>;

    /// Every user holding an elevated role.
    fn elevated_users(&self) -> Result<Vec<User>, DirectoryError>;
}

/// Seed file format for `InMemoryDirectory`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DirectorySeed {
    #[serde(default)]
    pub persons: Vec<Person>,
    #[serde(default)]
    pub users: Vec<User>,
}

impl DirectorySeed {
    /// Parse a JSON seed document.
    pub fn from_json(raw: &str) -> Result<Self, DirectoryError> {
        serde_json::from_str(raw).map_err(|e| DirectoryError::InvalidSeed(e.to_string()))
    }
}

/// In-memory directory. Insertion order is directory order.
#[derive(Debug, Default)]
pub struct InMemoryDirectory {
    persons: RwLock<Vec<Person>>,
    users: RwLock<Vec<User>>,
}

impl InMemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_seed(seed: DirectorySeed) -> Self {
        Self {
            persons: RwLock::new(seed.persons),
            users: RwLock::new(seed.users),
        }
    }

    pub fn with_person(self, person: Person) -> Self {
        self.insert_person(person);
        self
    }

    pub fn with_user(self, user: User) -> Self {
        self.insert_user(user);
        self
    }

    /// Insert or replace a person.
    pub fn insert_person(&self, person: Person) {
        let mut persons = self.persons.write();
        match persons.iter_mut().find(|p| p.id == person.id) {
            Some(existing) => *existing = person,
            None => persons.push(person),
        }
    }

    /// Insert or replace a user.
    pub fn insert_user(&self, user: User) {
        let mut users = self.users.write();
        match users.iter_mut().find(|u| u.id == user.id) {
            Some(existing) => *existing = user,
            None => users.push(user),
        }
    }

    pub fn person_count(&self) -> usize {
        self.persons.read().len()
    }

    pub fn user_count(&self) -> usize {
        self.users.read().len()
    }
}

impl PersonDirectory for InMemoryDirectory {
    fn find_person_by_id(&self, id: PersonId) -> Result<Option<Person>, DirectoryError> {
        Ok(self.persons.read().iter().find(|p| p.id == id).cloned())
    }

    fn find_first_person(&self) -> Result<Option<Person>, DirectoryError> {
        Ok(self.persons.read().first().cloned())
    }

    fn find_person_by_linked_user(&self, user: UserId) -> Result<Option<Person>, DirectoryError> {
        Ok(self
            .persons
            .read()
            .iter()
            .find(|p| p.linked_user == Some(user))
            .cloned())
    }
}

impl UserDirectory for InMemoryDirectory {
    fn find_user(&self, id: UserId) -> Result<Option<User>, DirectoryError> {
        Ok(self.users.read().iter().find(|u| u.id == id).cloned())
    }

    fn elevated_users(&self) -> Result<Vec<User>, DirectoryError> {
        Ok(self
            .users
            .read()
            .iter()
            .filter(|u| u.role.is_elevated())
            .cloned()
            .collect())
    }
}
