//! Identifier generation adapter.

use uuid::Uuid;

use crate::domain::foundation::DomainError;
use crate::ports::IdGenerator;

/// Issues UUIDv7 identifiers, which sort by creation time.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidV7Generator;

impl UuidV7Generator {
    pub fn new() -> Self {
        Self
    }
}

impl IdGenerator for UuidV7Generator {
    fn new_sortable_id(&self) -> Result<Uuid, DomainError> {
        Ok(Uuid::now_v7())
    }
}
