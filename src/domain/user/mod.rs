//! User accounts.
//!
//! Account management (passwords, sessions, profile photos) lives outside
//! this crate. The domain only needs who a user is, how to display them in
//! notification messages, and which role they hold.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Actor, DomainError, Role, UserId};

/// A person who can act on the system or receive notifications.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    username: String,
    first_name: String,
    last_name: String,
    email: String,
    role: Role,
}

impl User {
    /// Creates a new user.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if the username is blank
    pub fn new(
        id: UserId,
        username: impl Into<String>,
        email: impl Into<String>,
        role: Role,
    ) -> Result<Self, DomainError> {
        let username = username.into();
        if username.trim().is_empty() {
            return Err(DomainError::validation("username", "Username cannot be empty"));
        }
        Ok(Self {
            id,
            username,
            first_name: String::new(),
            last_name: String::new(),
            email: email.into(),
            role,
        })
    }

    /// Builder: set first and last name.
    pub fn with_name(mut self, first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        self.first_name = first_name.into();
        self.last_name = last_name.into();
        self
    }

    /// Reconstitute a user from persistence.
    pub fn reconstitute(
        id: UserId,
        username: String,
        first_name: String,
        last_name: String,
        email: String,
        role: Role,
    ) -> Self {
        Self {
            id,
            username,
            first_name,
            last_name,
            email,
            role,
        }
    }

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Administrator
    }

    /// "First Last" when both names are known, the username otherwise.
    pub fn display_name(&self) -> String {
        if !self.first_name.is_empty() && !self.last_name.is_empty() {
            format!("{} {}", self.first_name, self.last_name)
        } else {
            self.username.clone()
        }
    }

    /// The acting identity of this user.
    pub fn as_actor(&self) -> Actor {
        Actor::new(self.id, self.role)
    }
}
