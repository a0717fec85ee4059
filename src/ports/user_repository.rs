//! User repository port.
//!
//! Accounts are managed elsewhere; the core only reads them to resolve
//! actors and notification recipients.

use crate::domain::foundation::{DomainError, Role, UserId};
use crate::domain::user::User;
use async_trait::async_trait;

/// Repository port for user lookups.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Save a new user.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn save(&self, user: &User) -> Result<(), DomainError>;

    /// Find a user by ID. Returns `None` if not found.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError>;

    /// All users holding a role, ordered by username.
    async fn find_by_role(&self, role: Role) -> Result<Vec<User>, DomainError>;
}
