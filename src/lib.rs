//! Conference Scheduler - conference proposals, moderation and seat registration.
//!
//! Hosts propose conferences, coordinators approve or reject them, and
//! users register for seats in approved conferences. Approved conferences
//! never overlap in time, registrations never exceed capacity, and every
//! listing is paged with keyset cursors.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
