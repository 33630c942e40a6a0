//! Scoring context for criterion evaluation.

use crate::tracking::{BandwidthTracker, ConsecutiveAssignmentCounter};

/// Read-only view of the run state passed to criteria.
///
/// Borrowed from the allocation run for the duration of one ranking; the
/// run mutates its trackers only between rankings.
#[derive(Debug, Clone, Copy)]
pub struct ScoringContext<'a> {
    /// Weekly bandwidth ledger.
    pub tracker: &'a BandwidthTracker,
    /// Consecutive-assignment streaks.
    pub streaks: &'a ConsecutiveAssignmentCounter,
}

impl<'a> ScoringContext<'a> {
    /// Creates a context over the given trackers.
    pub fn new(tracker: &'a BandwidthTracker, streaks: &'a ConsecutiveAssignmentCounter) -> Self {
        Self { tracker, streaks }
    }

    /// Total committed bandwidth of `person`.
    pub fn committed_load(&self, person: &str) -> u32 {
        self.tracker.total_committed(person)
    }

    /// Current streak of `person`.
    pub fn streak(&self, person: &str) -> u32 {
        self.streaks.count(person)
    }
}
