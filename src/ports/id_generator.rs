//! Identifier generation port.

use uuid::Uuid;

use crate::domain::foundation::DomainError;

/// Produces time-sortable identifiers for new records.
///
/// Generated ids must sort in creation order, since identifier-order
/// pagination relies on it.
pub trait IdGenerator: Send + Sync {
    /// # Errors
    ///
    /// - `IdGenerationFailed` if no identifier could be produced
    fn new_sortable_id(&self) -> Result<Uuid, DomainError>;
}
