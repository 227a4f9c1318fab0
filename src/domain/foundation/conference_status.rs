//! ConferenceStatus enum for the proposal approval workflow.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{StateMachine, ValidationError};

/// Approval status of a conference proposal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ConferenceStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl ConferenceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConferenceStatus::Pending => "pending",
            ConferenceStatus::Approved => "approved",
            ConferenceStatus::Rejected => "rejected",
        }
    }

    pub fn is_approved(&self) -> bool {
        matches!(self, ConferenceStatus::Approved)
    }
}

impl StateMachine for ConferenceStatus {
    /// Valid transitions:
    /// - Pending -> Approved
    /// - Pending -> Rejected
    fn can_transition_to(&self, target: &Self) -> bool {
        use ConferenceStatus::*;
        matches!((self, target), (Pending, Approved) | (Pending, Rejected))
    }

    fn valid_transitions(&self) -> Vec<Self> {
        match self {
            ConferenceStatus::Pending => {
                vec![ConferenceStatus::Approved, ConferenceStatus::Rejected]
            }
            ConferenceStatus::Approved | ConferenceStatus::Rejected => vec![],
        }
    }
}

impl fmt::Display for ConferenceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ConferenceStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(ConferenceStatus::Pending),
            "approved" => Ok(ConferenceStatus::Approved),
            "rejected" => Ok(ConferenceStatus::Rejected),
            other => Err(ValidationError::invalid_format(
                "status",
                format!("unknown status '{}'", other),
            )),
        }
    }
}
