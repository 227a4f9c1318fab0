//! Conference module - proposals, moderation and visibility.

mod aggregate;
mod errors;
mod update;
pub mod visibility;

pub use aggregate::{Conference, ConferenceDetails};
pub use errors::{ConferenceError, ConflictSummary, ProposalSummary};
pub use update::ConferenceUpdate;

#[cfg(test)]
pub(crate) use aggregate::test_support;
