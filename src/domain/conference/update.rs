//! Partial update of a conference.

use crate::domain::foundation::{validate_length, Timestamp, ValidationError};

use super::aggregate::{AUDIENCE_LEN, DESCRIPTION_LEN, PREREQUISITES_MAX, SPEAKER_LEN, TITLE_LEN};
use super::ConferenceDetails;

/// Host edit of a conference. `None` leaves a field untouched.
///
/// `prerequisites` is nullable on the conference itself, so it takes a
/// nested option: `Some(None)` clears it, `Some(Some(text))` replaces it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConferenceUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub speaker_name: Option<String>,
    pub speaker_title: Option<String>,
    pub target_audience: Option<String>,
    pub prerequisites: Option<Option<String>>,
    pub starts_at: Option<Timestamp>,
    pub ends_at: Option<Timestamp>,
}

impl ConferenceUpdate {
    /// Validates every field that is present.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(title) = &self.title {
            validate_length("title", title, TITLE_LEN.0, TITLE_LEN.1)?;
        }
        if let Some(description) = &self.description {
            validate_length("description", description, DESCRIPTION_LEN.0, DESCRIPTION_LEN.1)?;
        }
        if let Some(name) = &self.speaker_name {
            validate_length("speaker_name", name, SPEAKER_LEN.0, SPEAKER_LEN.1)?;
        }
        if let Some(title) = &self.speaker_title {
            validate_length("speaker_title", title, SPEAKER_LEN.0, SPEAKER_LEN.1)?;
        }
        if let Some(audience) = &self.target_audience {
            validate_length("target_audience", audience, AUDIENCE_LEN.0, AUDIENCE_LEN.1)?;
        }
        if let Some(Some(prerequisites)) = &self.prerequisites {
            validate_length("prerequisites", prerequisites, 0, PREREQUISITES_MAX)?;
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Copies present content fields onto `details`. Time fields are
    /// handled by the aggregate.
    pub(super) fn apply_to(self, details: &mut ConferenceDetails) {
        if let Some(title) = self.title {
            details.title = title;
        }
        if let Some(description) = self.description {
            details.description = description;
        }
        if let Some(name) = self.speaker_name {
            details.speaker_name = name;
        }
        if let Some(title) = self.speaker_title {
            details.speaker_title = title;
        }
        if let Some(audience) = self.target_audience {
            details.target_audience = audience;
        }
        if let Some(prerequisites) = self.prerequisites {
            details.prerequisites = prerequisites;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::conference::aggregate::test_support::details;

    #[test]
    fn default_update_is_empty() {
        assert!(ConferenceUpdate::default().is_empty());
    }

    #[test]
    fn absent_fields_are_left_alone() {
        let mut current = details("Original Title");
        let update = ConferenceUpdate {
            speaker_name: Some("Grace Hopper".to_string()),
            ..Default::default()
        };
        update.apply_to(&mut current);
        assert_eq!(current.title, "Original Title");
        assert_eq!(current.speaker_name, "Grace Hopper");
    }

    #[test]
    fn prerequisites_can_be_cleared() {
        let mut current = details("Original Title");
        current.prerequisites = Some("Basic Rust".to_string());

        ConferenceUpdate {
            prerequisites: Some(None),
            ..Default::default()
        }
        .apply_to(&mut current);

        assert_eq!(current.prerequisites, None);
    }

    #[test]
    fn present_fields_are_validated() {
        let update = ConferenceUpdate {
            target_audience: Some("x".to_string()),
            ..Default::default()
        };
        assert_eq!(update.validate().unwrap_err().field(), "target_audience");
    }

    #[test]
    fn overlong_prerequisites_are_rejected() {
        let update = ConferenceUpdate {
            prerequisites: Some(Some("p".repeat(PREREQUISITES_MAX + 1))),
            ..Default::default()
        };
        assert!(update.validate().is_err());
    }
}
