//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Persistence Ports
//!
//! - `ConferenceRepository` - Conference writes and conflict queries
//! - `ConferenceReader` - Paged conference listings with registration counts
//! - `RegistrationRepository` - Seat reservations and registration listings
//! - `FeedbackRepository` - Post-conference feedback
//!
//! ## Collaborator Ports
//!
//! - `SessionValidator` - Bearer token validation
//! - `IdGenerator` - Time-sortable identifiers

mod conference_reader;
mod conference_repository;
mod feedback_repository;
mod id_generator;
mod registration_repository;
mod session_validator;

pub use conference_reader::{ConferenceQuery, ConferenceReader, ConferenceView};
pub use conference_repository::{ConferenceRepository, CONFLICT_LIMIT};
pub use feedback_repository::FeedbackRepository;
pub use id_generator::IdGenerator;
pub use registration_repository::RegistrationRepository;
pub use session_validator::SessionValidator;
