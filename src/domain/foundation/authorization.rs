//! Capability checks invoked at the top of every state-machine operation.
//!
//! Two kinds of rule exist in this system:
//! - role rules: only an administrator may validate a report, run the
//!   detection action, create a mission, ...
//! - ownership rules: only the assigned intervenant may start an
//!   intervention; only the responsible user (or an administrator) may
//!   resolve a delay.
//!
//! Each check produces an `AuthorizationResult`, which is turned into a
//! `Result` so handlers can use `?`. Denials are logged at debug level.

use super::{Actor, DomainError, ErrorCode, Role, UserId};

/// Result of an authorization check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorizationResult {
    /// Whether access was granted.
    pub granted: bool,

    /// The action being attempted (e.g. "intervention.start").
    pub action: &'static str,

    /// The user who requested access.
    pub user_id: UserId,

    /// Reason for denial (if denied).
    pub denial_reason: Option<String>,
}

impl AuthorizationResult {
    pub fn granted(action: &'static str, user_id: UserId) -> Self {
        Self {
            granted: true,
            action,
            user_id,
            denial_reason: None,
        }
    }

    pub fn denied(action: &'static str, user_id: UserId, reason: impl Into<String>) -> Self {
        Self {
            granted: false,
            action,
            user_id,
            denial_reason: Some(reason.into()),
        }
    }

    /// Converts this result to a `Result<(), DomainError>`.
    ///
    /// Returns `Ok(())` if granted, `Err(Unauthorized)` if denied.
    pub fn into_result(self) -> Result<(), DomainError> {
        if self.granted {
            return Ok(());
        }
        let reason = self
            .denial_reason
            .unwrap_or_else(|| "Access denied".to_string());
        tracing::debug!(
            action = self.action,
            user_id = %self.user_id,
            reason = %reason,
            "authorization denied"
        );
        Err(DomainError::new(ErrorCode::Unauthorized, reason)
            .with_detail("action", self.action)
            .with_detail("user_id", self.user_id.to_string()))
    }

    pub fn is_granted(&self) -> bool {
        self.granted
    }
}

/// Checks that the actor holds the given role.
pub fn check_role(actor: &Actor, role: Role, action: &'static str) -> AuthorizationResult {
    if actor.role == role {
        AuthorizationResult::granted(action, actor.user_id)
    } else {
        AuthorizationResult::denied(
            action,
            actor.user_id,
            format!("Role '{}' is required for {}", role, action),
        )
    }
}

/// Checks that the actor is the owner recorded on the resource.
///
/// A resource with no owner (e.g. an unassigned intervention) grants no one.
pub fn check_ownership(
    actor: &Actor,
    owner: Option<&UserId>,
    action: &'static str,
) -> AuthorizationResult {
    if actor.is(owner) {
        AuthorizationResult::granted(action, actor.user_id)
    } else {
        AuthorizationResult::denied(
            action,
            actor.user_id,
            format!("User {} is not the owner for {}", actor.user_id, action),
        )
    }
}

/// `requires(actor, Role::Administrator)`.
pub fn require_admin(actor: &Actor, action: &'static str) -> Result<(), DomainError> {
    check_role(actor, Role::Administrator, action).into_result()
}

/// `requires_ownership(actor, owner)`.
pub fn require_ownership(
    actor: &Actor,
    owner: Option<&UserId>,
    action: &'static str,
) -> Result<(), DomainError> {
    check_ownership(actor, owner, action).into_result()
}

/// Grants an administrator, or the actor if it is any of the given owners.
pub fn require_admin_or_any_owner(
    actor: &Actor,
    owners: &[Option<&UserId>],
    action: &'static str,
) -> Result<(), DomainError> {
    if actor.is_admin() || owners.iter().any(|owner| actor.is(*owner)) {
        return AuthorizationResult::granted(action, actor.user_id).into_result();
    }
    AuthorizationResult::denied(
        action,
        actor.user_id,
        format!(
            "User {} must be an administrator or an owner for {}",
            actor.user_id, action
        ),
    )
    .into_result()
}

/// Grants an administrator or the single owner.
pub fn require_admin_or_owner(
    actor: &Actor,
    owner: Option<&UserId>,
    action: &'static str,
) -> Result<(), DomainError> {
    require_admin_or_any_owner(actor, &[owner], action)
}
