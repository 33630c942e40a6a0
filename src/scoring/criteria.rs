//! Built-in scoring criteria.
//!
//! # Criteria
//!
//! - **Skill**: fraction of the task's required skills the person has
//! - **Workload**: inverse of the person's committed load
//! - **Consecutive**: penalty for receiving many tasks in a row
//!
//! # Score Convention
//! All criteria return higher scores for better candidates, in `[0, 1]`.

use super::{CriterionScore, ScoringContext, ScoringCriterion};
use crate::models::{Person, Task};

/// Skill match.
///
/// `|required ∩ skills| / |required|`. Tasks without required skills get
/// the neutral score, which depends on granularity (0.5 for portfolio
/// runs, 0.3 for deep-dive runs).
#[derive(Debug, Clone, Copy)]
pub struct SkillMatch {
    /// Score for tasks that require no skills.
    pub neutral: f64,
}

impl Default for SkillMatch {
    fn default() -> Self {
        Self { neutral: 0.5 }
    }
}

impl SkillMatch {
    /// Creates a skill criterion with a custom neutral score.
    pub fn with_neutral(neutral: f64) -> Self {
        Self {
            neutral: neutral.clamp(0.0, 1.0),
        }
    }
}

impl ScoringCriterion for SkillMatch {
    fn name(&self) -> &'static str {
        "skill"
    }

    fn evaluate(&self, task: &Task, person: &Person, _context: &ScoringContext<'_>) -> CriterionScore {
        if task.required_skills.is_empty() {
            return self.neutral;
        }
        person.matched_skills(&task.required_skills) as f64 / task.required_skills.len() as f64
    }

    fn description(&self) -> &'static str {
        "Required skill coverage"
    }
}

/// Workload balance.
///
/// `1 / (1 + load / 100)` where `load` is the person's total committed
/// bandwidth across all weeks. Strictly decreasing in load, never 0.
#[derive(Debug, Clone, Copy, Default)]
pub struct WorkloadBalance;

impl ScoringCriterion for WorkloadBalance {
    fn name(&self) -> &'static str {
        "workload"
    }

    fn evaluate(&self, _task: &Task, person: &Person, context: &ScoringContext<'_>) -> CriterionScore {
        let load = context.committed_load(&person.name) as f64;
        1.0 / (1.0 + load / 100.0)
    }

    fn description(&self) -> &'static str {
        "Inverse committed workload"
    }
}

/// Consecutive-assignment penalty.
///
/// Full score with no streak, minus `decay` per consecutive assignment.
/// From `floor_streak` onward the score is pinned at `floor` no matter how
/// long the streak grows.
#[derive(Debug, Clone, Copy)]
pub struct ConsecutivePenalty {
    /// Score lost per consecutive assignment (default: 0.15).
    pub decay: f64,
    /// Pinned score once the streak reaches `floor_streak` (default: 0.5).
    pub floor: f64,
    /// Streak length at which the floor applies (default: 3).
    pub floor_streak: u32,
}

impl Default for ConsecutivePenalty {
    fn default() -> Self {
        Self {
            decay: 0.15,
            floor: 0.5,
            floor_streak: 3,
        }
    }
}

impl ConsecutivePenalty {
    /// Score for a streak of the given length.
    pub fn score_for(&self, streak: u32) -> CriterionScore {
        if streak >= self.floor_streak {
            return self.floor;
        }
        (1.0 - self.decay * streak as f64).max(self.floor)
    }
}

impl ScoringCriterion for ConsecutivePenalty {
    fn name(&self) -> &'static str {
        "consecutive"
    }

    fn evaluate(&self, _task: &Task, person: &Person, context: &ScoringContext<'_>) -> CriterionScore {
        self.score_for(context.streak(&person.name))
    }

    fn description(&self) -> &'static str {
        "Consecutive assignment penalty"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Phase;
    use crate::tracking::{BandwidthTracker, ConsecutiveAssignmentCounter};

    fn task(skills: &[&str]) -> Task {
        skills
            .iter()
            .fold(Task::new("T1", "P1", Phase::Design).with_hours(40.0), |t, s| {
                t.with_skill(*s)
            })
    }

    #[test]
    fn test_skill_full_partial_none() {
        let tracker = BandwidthTracker::new();
        let streaks = ConsecutiveAssignmentCounter::new();
        let ctx = ScoringContext::new(&tracker, &streaks);
        let t = task(&["python", "sql"]);

        let full = Person::new("A").with_skills(["python", "sql", "aws"]);
        let half = Person::new("B").with_skill("python");
        let none = Person::new("C").with_skill("java");

        let skill = SkillMatch::default();
        assert!((skill.evaluate(&t, &full, &ctx) - 1.0).abs() < 1e-10);
        assert!((skill.evaluate(&t, &half, &ctx) - 0.5).abs() < 1e-10);
        assert!((skill.evaluate(&t, &none, &ctx) - 0.0).abs() < 1e-10);
    }

    #[test]
    fn test_skill_neutral_only_without_requirements() {
        let tracker = BandwidthTracker::new();
        let streaks = ConsecutiveAssignmentCounter::new();
        let ctx = ScoringContext::new(&tracker, &streaks);
        let p = Person::new("A").with_skill("python");

        assert!((SkillMatch::default().evaluate(&task(&[]), &p, &ctx) - 0.5).abs() < 1e-10);
        assert!((SkillMatch::with_neutral(0.3).evaluate(&task(&[]), &p, &ctx) - 0.3).abs() < 1e-10);
        // Non-empty requirements never use the neutral score.
        assert!((SkillMatch::with_neutral(0.3).evaluate(&task(&["go"]), &p, &ctx) - 0.0).abs() < 1e-10);
    }

    #[test]
    fn test_workload_decreasing() {
        let alice = Person::new("Alice");
        let mut tracker = BandwidthTracker::for_roster(&[alice.clone()]);
        let streaks = ConsecutiveAssignmentCounter::new();
        let t = task(&[]);

        let before = WorkloadBalance.evaluate(&t, &alice, &ScoringContext::new(&tracker, &streaks));
        assert!((before - 1.0).abs() < 1e-10);

        tracker.commit(&alice, 0, 2, 50); // load 100
        let after = WorkloadBalance.evaluate(&t, &alice, &ScoringContext::new(&tracker, &streaks));
        assert!((after - 0.5).abs() < 1e-10);
        assert!(after > 0.0);
    }

    #[test]
    fn test_workload_never_zero() {
        let alice = Person::new("Alice");
        let mut tracker = BandwidthTracker::for_roster(&[alice.clone()]);
        tracker.commit(&alice, 0, 10_000, 100);
        let streaks = ConsecutiveAssignmentCounter::new();
        let score = WorkloadBalance.evaluate(&task(&[]), &alice, &ScoringContext::new(&tracker, &streaks));
        assert!(score > 0.0 && score < 0.001);
    }

    #[test]
    fn test_consecutive_decay_and_floor() {
        let c = ConsecutivePenalty::default();
        assert!((c.score_for(0) - 1.0).abs() < 1e-10);
        assert!((c.score_for(1) - 0.85).abs() < 1e-10);
        assert!((c.score_for(2) - 0.70).abs() < 1e-10);
        assert!((c.score_for(3) - 0.5).abs() < 1e-10);
        assert!((c.score_for(10) - 0.5).abs() < 1e-10);
        assert!((c.score_for(u32::MAX) - 0.5).abs() < 1e-10);
    }

    #[test]
    fn test_consecutive_uses_streak() {
        let tracker = BandwidthTracker::new();
        let mut streaks = ConsecutiveAssignmentCounter::new();
        streaks.record("A");
        streaks.record("A");
        let ctx = ScoringContext::new(&tracker, &streaks);
        let score = ConsecutivePenalty::default().evaluate(&task(&[]), &Person::new("A"), &ctx);
        assert!((score - 0.70).abs() < 1e-10);
        let fresh = ConsecutivePenalty::default().evaluate(&task(&[]), &Person::new("B"), &ctx);
        assert!((fresh - 1.0).abs() < 1e-10);
    }
}
