//! Candidate scoring for task assignment.
//!
//! Ranks the people who could take a task. Each criterion scores one
//! aspect of a (task, person) pair; the scorer combines them with a weight
//! tuple and sorts candidates best-first.
//!
//! # Usage
//!
//! ```
//! use u_allocate::scoring::{CandidateScorer, ScoringContext, ScoringProfile};
//! use u_allocate::tracking::{BandwidthTracker, ConsecutiveAssignmentCounter};
//! use u_allocate::models::{Person, Phase, Task};
//!
//! let people = vec![
//!     Person::new("Alice").with_skill("rust"),
//!     Person::new("Bob").with_skill("go"),
//! ];
//! let task = Task::new("T1", "P1", Phase::Development).with_skill("rust").with_hours(40.0);
//!
//! let tracker = BandwidthTracker::for_roster(&people);
//! let streaks = ConsecutiveAssignmentCounter::new();
//! let context = ScoringContext::new(&tracker, &streaks);
//!
//! let scorer = CandidateScorer::from_profile(&ScoringProfile::portfolio());
//! let ranked = scorer.rank(&task, &people, &context);
//! assert_eq!(people[ranked[0].person_index].name, "Alice");
//! ```

mod context;
pub mod criteria;
mod scorer;

pub use context::ScoringContext;
pub use criteria::{ConsecutivePenalty, SkillMatch, WorkloadBalance};
pub use scorer::{
    Candidate, CandidateScorer, ComponentScore, ScoreWeights, ScoringProfile,
};

use crate::models::{Person, Task};
use std::fmt::Debug;

/// Score returned by a criterion.
///
/// **Higher = better fit**, always within `[0, 1]`.
pub type CriterionScore = f64;

/// One aspect of candidate fitness.
pub trait ScoringCriterion: Send + Sync + Debug {
    /// Criterion name (e.g., "skill", "workload").
    fn name(&self) -> &'static str;

    /// Scores `person` for `task` given the current run state.
    fn evaluate(&self, task: &Task, person: &Person, context: &ScoringContext<'_>) -> CriterionScore;

    /// Criterion description.
    fn description(&self) -> &'static str {
        self.name()
    }
}
