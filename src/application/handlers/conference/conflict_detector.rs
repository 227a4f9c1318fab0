//! ConflictDetector - approved-window overlap checks.

use std::sync::Arc;

use crate::domain::conference::{ConferenceError, ConflictSummary};
use crate::domain::foundation::{ConferenceId, TimeWindow};
use crate::ports::ConferenceRepository;

/// Finds approved conferences whose window overlaps a candidate window.
///
/// Overlap is half-open, so abutting windows do not conflict. Only live,
/// approved conferences take part, and `exclude` lets a conference be
/// re-checked without conflicting with itself.
#[derive(Clone)]
pub struct ConflictDetector {
    repository: Arc<dyn ConferenceRepository>,
}

impl ConflictDetector {
    pub fn new(repository: Arc<dyn ConferenceRepository>) -> Self {
        Self { repository }
    }

    /// Conflicting conferences in `(starts_at, id)` order, capped by the store.
    pub async fn find(
        &self,
        window: &TimeWindow,
        exclude: Option<&ConferenceId>,
    ) -> Result<Vec<ConflictSummary>, ConferenceError> {
        let conflicts = self.repository.find_conflicting(window, exclude).await?;
        Ok(conflicts.iter().map(ConflictSummary::from).collect())
    }

    /// Fails with `TimeWindowConflict` listing the blockers, if any.
    pub async fn ensure_free(
        &self,
        window: &TimeWindow,
        exclude: Option<&ConferenceId>,
    ) -> Result<(), ConferenceError> {
        let conflicts = self.find(window, exclude).await?;
        if conflicts.is_empty() {
            Ok(())
        } else {
            Err(ConferenceError::TimeWindowConflict(conflicts))
        }
    }
}
