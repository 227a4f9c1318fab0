//! Registration command and query handlers.

mod capacity_guard;
mod list_registered_conferences;
mod list_registered_users;
mod register;

pub use capacity_guard::CapacityGuard;
pub use list_registered_conferences::{
    ListRegisteredConferencesHandler, ListRegisteredConferencesQuery,
};
pub use list_registered_users::{ListRegisteredUsersHandler, ListRegisteredUsersQuery};
pub use register::{RegisterCommand, RegisterHandler, RegisterResult};
