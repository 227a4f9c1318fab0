//! The caller on whose behalf an operation runs.
//!
//! A `Principal` is built once per request at the boundary and passed
//! explicitly into every handler. Internal jobs that act without a user use
//! `Principal::System`, which carries no role and bypasses visibility
//! restrictions.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{UserId, ValidationError};

/// Roles understood by the scheduling rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    User,
    EventCoordinator,
    Admin,
}

impl UserRole {
    /// Coordinators and admins may moderate proposals and see every conference.
    pub fn is_coordinator_level(&self) -> bool {
        matches!(self, UserRole::EventCoordinator | UserRole::Admin)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::User => "user",
            UserRole::EventCoordinator => "event_coordinator",
            UserRole::Admin => "admin",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(UserRole::User),
            "event_coordinator" => Ok(UserRole::EventCoordinator),
            "admin" => Ok(UserRole::Admin),
            other => Err(ValidationError::invalid_format(
                "role",
                format!("unknown role '{}'", other),
            )),
        }
    }
}

/// Identity and role of the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Principal {
    /// An authenticated end user.
    User { id: UserId, role: UserRole },
    /// Internal context with no user and no role.
    System,
}

impl Principal {
    pub fn user(id: UserId, role: UserRole) -> Self {
        Principal::User { id, role }
    }

    pub fn system() -> Self {
        Principal::System
    }

    pub fn user_id(&self) -> Option<&UserId> {
        match self {
            Principal::User { id, .. } => Some(id),
            Principal::System => None,
        }
    }

    pub fn role(&self) -> Option<UserRole> {
        match self {
            Principal::User { role, .. } => Some(*role),
            Principal::System => None,
        }
    }

    /// True if this principal is the given user.
    pub fn is(&self, user_id: &UserId) -> bool {
        self.user_id() == Some(user_id)
    }

    pub fn is_system(&self) -> bool {
        matches!(self, Principal::System)
    }

    pub fn is_coordinator(&self) -> bool {
        self.role().is_some_and(|r| r.is_coordinator_level())
    }

    /// Plain users are subject to host-only visibility and ownership rules.
    pub fn is_plain_user(&self) -> bool {
        self.role() == Some(UserRole::User)
    }

    /// Coordinators, admins and internal jobs may moderate.
    pub fn can_moderate(&self) -> bool {
        self.is_system() || self.is_coordinator()
    }
}

impl fmt::Display for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Principal::User { id, role } => write!(f, "{}({})", id, role),
            Principal::System => write!(f, "system"),
        }
    }
}
