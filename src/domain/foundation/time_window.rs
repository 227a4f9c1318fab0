//! Half-open time interval used by the scheduling rules.

use serde::{Deserialize, Serialize};

use super::{DomainError, ErrorCode, Timestamp};

/// The `[starts_at, ends_at)` interval a conference occupies.
///
/// Construction guarantees `ends_at > starts_at`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeWindow {
    starts_at: Timestamp,
    ends_at: Timestamp,
}

impl TimeWindow {
    /// Creates a window, rejecting empty or inverted intervals.
    pub fn new(starts_at: Timestamp, ends_at: Timestamp) -> Result<Self, DomainError> {
        if !ends_at.is_after(&starts_at) {
            return Err(DomainError::new(
                ErrorCode::EndTimeBeforeStart,
                "End time must be after start time",
            )
            .with_detail("starts_at", starts_at.to_string())
            .with_detail("ends_at", ends_at.to_string()));
        }
        Ok(Self { starts_at, ends_at })
    }

    pub fn starts_at(&self) -> Timestamp {
        self.starts_at
    }

    pub fn ends_at(&self) -> Timestamp {
        self.ends_at
    }

    /// Interval intersection test. Touching endpoints do not overlap.
    pub fn overlaps(&self, other: &TimeWindow) -> bool {
        self.starts_at < other.ends_at && self.ends_at > other.starts_at
    }

    /// True once `now` has reached the start.
    pub fn has_started(&self, now: Timestamp) -> bool {
        self.starts_at <= now
    }

    /// True once `now` has reached the end.
    pub fn has_ended(&self, now: Timestamp) -> bool {
        self.ends_at <= now
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn window(base: Timestamp, start_min: i64, end_min: i64) -> TimeWindow {
        TimeWindow::new(base.plus_minutes(start_min), base.plus_minutes(end_min)).unwrap()
    }

    #[test]
    fn rejects_end_before_start() {
        let now = Timestamp::now();
        let err = TimeWindow::new(now.plus_hours(2), now.plus_hours(1)).unwrap_err();
        assert_eq!(err.code, ErrorCode::EndTimeBeforeStart);
    }

    #[test]
    fn rejects_zero_length_window() {
        let now = Timestamp::now();
        assert!(TimeWindow::new(now, now).is_err());
    }

    #[test]
    fn abutting_windows_do_not_overlap() {
        let base = Timestamp::now();
        let a = window(base, 60, 120);
        let b = window(base, 120, 180);
        assert!(!a.overlaps(&b));
        assert!(!b.overlaps(&a));
    }

    #[test]
    fn partially_shifted_windows_overlap() {
        let base = Timestamp::now();
        let a = window(base, 60, 120);
        let b = window(base, 90, 150);
        assert!(a.overlaps(&b));
    }

    #[test]
    fn contained_window_overlaps() {
        let base = Timestamp::now();
        let outer = window(base, 0, 240);
        let inner = window(base, 60, 120);
        assert!(outer.overlaps(&inner));
        assert!(inner.overlaps(&outer));
    }

    #[test]
    fn started_and_ended_are_inclusive_of_now() {
        let now = Timestamp::now();
        let w = TimeWindow::new(now, now.plus_minutes(1)).unwrap();
        assert!(w.has_started(now));
        assert!(!w.has_ended(now));
        assert!(w.has_ended(now.plus_minutes(1)));
    }

    proptest! {
        #[test]
        fn overlap_is_symmetric(a in 0i64..500, la in 1i64..200, b in 0i64..500, lb in 1i64..200) {
            let base = Timestamp::now();
            let x = window(base, a, a + la);
            let y = window(base, b, b + lb);
            prop_assert_eq!(x.overlaps(&y), y.overlaps(&x));
        }

        #[test]
        fn overlap_matches_interval_arithmetic(a in 0i64..500, la in 1i64..200, b in 0i64..500, lb in 1i64..200) {
            let base = Timestamp::now();
            let x = window(base, a, a + la);
            let y = window(base, b, b + lb);
            let expected = a.max(b) < (a + la).min(b + lb);
            prop_assert_eq!(x.overlaps(&y), expected);
        }
    }
}
