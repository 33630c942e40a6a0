//! Weighted candidate scorer.
//!
//! Combines criteria with a weight tuple and ranks candidates best-first.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::criteria::{ConsecutivePenalty, SkillMatch, WorkloadBalance};
use super::{CriterionScore, ScoringContext, ScoringCriterion};
use crate::models::{Person, Task};

/// Weights for the three built-in criteria.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreWeights {
    /// Skill match weight.
    pub skill: f64,
    /// Workload balance weight.
    pub workload: f64,
    /// Consecutive-assignment weight.
    pub consecutive: f64,
}

impl ScoreWeights {
    /// Portfolio weights: 0.3 skill, 0.5 workload, 0.2 consecutive.
    pub fn portfolio() -> Self {
        Self {
            skill: 0.3,
            workload: 0.5,
            consecutive: 0.2,
        }
    }

    /// Deep-dive weights: 0.6 skill, 0.4 workload, no consecutive term.
    pub fn deep_dive() -> Self {
        Self {
            skill: 0.6,
            workload: 0.4,
            consecutive: 0.0,
        }
    }

    /// Sum of all weights.
    pub fn total(&self) -> f64 {
        self.skill + self.workload + self.consecutive
    }

    /// Checks that every weight is in `[0, 1]` and the sum is in `(0, 1]`.
    ///
    /// Keeps combined scores inside `[0, 1]`.
    pub fn validate(&self) -> Result<(), String> {
        for (name, w) in [
            ("skill", self.skill),
            ("workload", self.workload),
            ("consecutive", self.consecutive),
        ] {
            if !w.is_finite() || !(0.0..=1.0).contains(&w) {
                return Err(format!("weight '{name}' must be within [0, 1], got {w}"));
            }
        }
        let total = self.total();
        if total <= 0.0 || total > 1.0 + 1e-9 {
            return Err(format!("weights must sum to a value in (0, 1], got {total}"));
        }
        Ok(())
    }
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self::portfolio()
    }
}

/// Weights plus the neutral skill score for one granularity.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoringProfile {
    /// Criterion weights.
    pub weights: ScoreWeights,
    /// Skill score for tasks without required skills.
    pub neutral_skill_score: f64,
}

impl ScoringProfile {
    /// Portfolio profile (neutral skill score 0.5).
    pub fn portfolio() -> Self {
        Self {
            weights: ScoreWeights::portfolio(),
            neutral_skill_score: 0.5,
        }
    }

    /// Deep-dive profile (neutral skill score 0.3).
    pub fn deep_dive() -> Self {
        Self {
            weights: ScoreWeights::deep_dive(),
            neutral_skill_score: 0.3,
        }
    }

    /// Replaces the weights, keeping the neutral skill score.
    pub fn with_weights(mut self, weights: ScoreWeights) -> Self {
        self.weights = weights;
        self
    }
}

impl Default for ScoringProfile {
    fn default() -> Self {
        Self::portfolio()
    }
}

#[derive(Clone)]
struct WeightedCriterion {
    criterion: Arc<dyn ScoringCriterion>,
    weight: f64,
}

/// One criterion's contribution to a candidate score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComponentScore {
    /// Criterion name.
    pub name: &'static str,
    /// Unweighted criterion score.
    pub raw: CriterionScore,
    /// Weight applied.
    pub weight: f64,
}

/// A scored candidate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Candidate {
    /// Index into the roster slice passed to [`CandidateScorer::rank`].
    pub person_index: usize,
    /// Per-criterion breakdown, in scorer order.
    pub components: Vec<ComponentScore>,
    /// Weighted sum of the components.
    pub combined: f64,
}

impl Candidate {
    /// Unweighted score of the named criterion, if the scorer used it.
    pub fn component(&self, name: &str) -> Option<CriterionScore> {
        self.components
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.raw)
    }
}

/// Weighted multi-criteria candidate scorer.
///
/// # Example
/// ```
/// use u_allocate::scoring::{CandidateScorer, SkillMatch, WorkloadBalance};
///
/// let scorer = CandidateScorer::new()
///     .with_criterion(SkillMatch::default(), 0.7)
///     .with_criterion(WorkloadBalance, 0.3);
/// assert_eq!(scorer.criteria_count(), 2);
/// ```
#[derive(Clone, Default)]
pub struct CandidateScorer {
    criteria: Vec<WeightedCriterion>,
}

impl CandidateScorer {
    /// Creates an empty scorer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the standard three-criterion scorer for a profile.
    ///
    /// Zero-weight criteria are left out, so a deep-dive scorer never
    /// evaluates the consecutive penalty.
    pub fn from_profile(profile: &ScoringProfile) -> Self {
        let w = &profile.weights;
        Self::new()
            .with_criterion(SkillMatch::with_neutral(profile.neutral_skill_score), w.skill)
            .with_criterion(WorkloadBalance, w.workload)
            .with_criterion(ConsecutivePenalty::default(), w.consecutive)
    }

    /// Adds a weighted criterion. Criteria with weight 0 are skipped.
    pub fn with_criterion<C: ScoringCriterion + 'static>(mut self, criterion: C, weight: f64) -> Self {
        if weight > 0.0 {
            self.criteria.push(WeightedCriterion {
                criterion: Arc::new(criterion),
                weight,
            });
        }
        self
    }

    /// Number of active criteria.
    pub fn criteria_count(&self) -> usize {
        self.criteria.len()
    }

    /// Scores one person for a task.
    pub fn score(
        &self,
        task: &Task,
        person: &Person,
        person_index: usize,
        context: &ScoringContext<'_>,
    ) -> Candidate {
        let components: Vec<ComponentScore> = self
            .criteria
            .iter()
            .map(|wc| ComponentScore {
                name: wc.criterion.name(),
                raw: wc.criterion.evaluate(task, person, context),
                weight: wc.weight,
            })
            .collect();
        let combined = components.iter().map(|c| c.raw * c.weight).sum();
        Candidate {
            person_index,
            components,
            combined,
        }
    }

    /// Scores every person and sorts best-first.
    ///
    /// The sort is stable: equal scores keep roster order.
    pub fn rank(&self, task: &Task, people: &[Person], context: &ScoringContext<'_>) -> Vec<Candidate> {
        let mut candidates: Vec<Candidate> = people
            .iter()
            .enumerate()
            .map(|(i, p)| self.score(task, p, i, context))
            .collect();
        candidates.sort_by(|a, b| {
            b.combined
                .partial_cmp(&a.combined)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        candidates
    }
}

impl std::fmt::Debug for CandidateScorer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CandidateScorer")
            .field(
                "criteria",
                &self
                    .criteria
                    .iter()
                    .map(|wc| format!("{}({:.2})", wc.criterion.name(), wc.weight))
                    .collect::<Vec<_>>(),
            )
            .finish()
    }
}
