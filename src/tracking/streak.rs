//! Consecutive-assignment streak counter.

use std::collections::HashMap;

/// Tracks, per person, how many tasks in a row went to that person.
///
/// "In a row" is assignment order, not calendar adjacency: two tasks that
/// are emitted back to back count as consecutive even when they are
/// scheduled months apart.
///
/// When the streak moves to someone else, the previous holder drops to 0
/// and the new holder starts at 1.
#[derive(Debug, Clone, Default)]
pub struct ConsecutiveAssignmentCounter {
    streaks: HashMap<String, u32>,
    last: Option<String>,
}

impl ConsecutiveAssignmentCounter {
    /// Creates an empty counter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current streak of `person` (0 if never assigned or streak broken).
    pub fn count(&self, person: &str) -> u32 {
        self.streaks.get(person).copied().unwrap_or(0)
    }

    /// The person who received the most recent assignment.
    pub fn last_assigned(&self) -> Option<&str> {
        self.last.as_deref()
    }

    /// Records an assignment to `person` and returns their new streak.
    pub fn record(&mut self, person: &str) -> u32 {
        if self.last.as_deref() == Some(person) {
            let streak = self.streaks.entry(person.to_string()).or_insert(0);
            *streak += 1;
            return *streak;
        }

        if let Some(previous) = self.last.take() {
            self.streaks.insert(previous, 0);
        }
        self.streaks.insert(person.to_string(), 1);
        self.last = Some(person.to_string());
        1
    }
}
