//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod conference;
pub mod feedback;
pub mod registration;

#[cfg(test)]
pub(crate) mod test_support;

pub use conference::*;
pub use feedback::*;
pub use registration::*;
