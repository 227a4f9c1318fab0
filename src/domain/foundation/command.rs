//! Command infrastructure for CQRS handlers.
//!
//! `CommandMetadata` carries the principal and correlation context that
//! flows through command processing.

use uuid::Uuid;

use super::Principal;

/// Metadata context for command handlers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandMetadata {
    /// The caller executing this command (required for authorization).
    pub principal: Principal,

    /// Links related operations across a single user request.
    /// Taken from the `x-request-id` header at the HTTP boundary.
    correlation_id: Option<String>,
}

impl CommandMetadata {
    /// Creates new command metadata for the given principal.
    pub fn new(principal: Principal) -> Self {
        Self {
            principal,
            correlation_id: None,
        }
    }

    /// Builder: Add correlation ID for request tracing.
    pub fn with_correlation_id(mut self, id: impl Into<String>) -> Self {
        self.correlation_id = Some(id.into());
        self
    }

    /// Returns the correlation ID, generating one if not set.
    pub fn correlation_id(&self) -> String {
        self.correlation_id
            .clone()
            .unwrap_or_else(|| Uuid::new_v4().to_string())
    }

    /// Returns the correlation ID only if explicitly set.
    pub fn correlation_id_opt(&self) -> Option<&str> {
        self.correlation_id.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{UserId, UserRole};

    #[test]
    fn new_creates_without_correlation() {
        let principal = Principal::user(UserId::new(), UserRole::User);
        let metadata = CommandMetadata::new(principal);

        assert_eq!(metadata.principal, principal);
        assert!(metadata.correlation_id_opt().is_none());
    }

    #[test]
    fn correlation_id_is_kept_when_set() {
        let metadata = CommandMetadata::new(Principal::system()).with_correlation_id("req-1");
        assert_eq!(metadata.correlation_id(), "req-1");
    }

    #[test]
    fn correlation_id_generates_if_missing() {
        let metadata = CommandMetadata::new(Principal::system());
        assert!(!metadata.correlation_id().is_empty());
    }
}
