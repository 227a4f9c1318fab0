//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, enums, errors)
//! - `pagination` - Keyset pagination requests, envelopes and page assembly
//! - `conference` - Conference aggregate, lifecycle and visibility rules
//! - `registration` - Seat reservations
//! - `feedback` - Post-conference feedback

pub mod conference;
pub mod feedback;
pub mod foundation;
pub mod pagination;
pub mod registration;
