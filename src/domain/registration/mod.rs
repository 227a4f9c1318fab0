//! Registration module - seat reservations for approved conferences.

mod record;

pub use record::Registration;
