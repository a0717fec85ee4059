//! Roles and the acting user.
//!
//! Authentication happens outside this crate. By the time a command reaches
//! a handler, the caller has been resolved to an `Actor`: a user id plus
//! the role that user holds in the organisation.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{UserId, ValidationError};

/// Organisation role of a user account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "administrateur")]
    Administrator,
    #[serde(rename = "employe")]
    Employee,
    #[serde(rename = "freelance")]
    Freelancer,
}

impl Role {
    /// Returns the persisted string form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Administrator => "administrateur",
            Role::Employee => "employe",
            Role::Freelancer => "freelance",
        }
    }

    /// Employees and freelancers are the ones who carry out interventions.
    pub fn is_field_worker(&self) -> bool {
        matches!(self, Role::Employee | Role::Freelancer)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "administrateur" => Ok(Role::Administrator),
            "employe" => Ok(Role::Employee),
            "freelance" => Ok(Role::Freelancer),
            other => Err(ValidationError::invalid_format(
                "role",
                format!("unknown role '{}'", other),
            )),
        }
    }
}

/// The user on whose behalf a command runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub user_id: UserId,
    pub role: Role,
}

impl Actor {
    pub fn new(user_id: UserId, role: Role) -> Self {
        Self { user_id, role }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Administrator
    }

    /// True if this actor is the given (optional) user.
    pub fn is(&self, user_id: Option<&UserId>) -> bool {
        user_id == Some(&self.user_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_round_trips_through_str() {
        for role in [Role::Administrator, Role::Employee, Role::Freelancer] {
            assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
        }
    }

    #[test]
    fn unknown_role_is_rejected() {
        assert!("chef".parse::<Role>().is_err());
    }

    #[test]
    fn role_serializes_to_persisted_value() {
        assert_eq!(
            serde_json::to_string(&Role::Administrator).unwrap(),
            "\"administrateur\""
        );
    }

    #[test]
    fn actor_is_matches_only_same_user() {
        let actor = Actor::new(UserId::new(), Role::Employee);
        assert!(actor.is(Some(&actor.user_id)));
        assert!(!actor.is(Some(&UserId::new())));
        assert!(!actor.is(None));
    }

    #[test]
    fn only_administrator_is_admin() {
        assert!(Actor::new(UserId::new(), Role::Administrator).is_admin());
        assert!(!Actor::new(UserId::new(), Role::Freelancer).is_admin());
    }
}
