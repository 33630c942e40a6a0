//! Allocation audit.
//!
//! Deterministic checks of how a plan spread the work: task counts and
//! their variance, consecutive runs in emission order, and how often the
//! assignee had the skills the task asked for.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use crate::allocator::ProjectWork;
use crate::models::{AllocationPlan, Person, Task};

/// Run length at which the consecutive penalty reaches its floor.
const FLOOR_RUN: u32 = 3;

/// Audit figures for one plan.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AllocationAudit {
    /// person → number of tasks, for people with at least one task.
    pub task_counts: BTreeMap<String, usize>,
    /// Population variance of `task_counts` (lower = more even).
    pub workload_variance: f64,
    /// person → longest run of back-to-back assignments.
    pub longest_runs: BTreeMap<String, u32>,
    /// People holding three or more tasks.
    pub people_with_three_plus: Vec<String>,
    /// Runs that reached the penalty floor.
    pub floor_runs: usize,
    /// Fraction of allocations whose assignee covers at least one required
    /// skill of the task (tasks without requirements count as matched).
    pub skill_match_rate: f64,
}

impl AllocationAudit {
    /// Audits a plan against its inputs.
    pub fn of(plan: &AllocationPlan, people: &[Person], work: &[ProjectWork]) -> Self {
        if plan.allocations.is_empty() {
            return Self::default();
        }

        let mut task_counts: BTreeMap<String, usize> = BTreeMap::new();
        for a in &plan.allocations {
            *task_counts.entry(a.person.clone()).or_insert(0) += 1;
        }

        let n = task_counts.len() as f64;
        let mean = task_counts.values().sum::<usize>() as f64 / n;
        let workload_variance = task_counts
            .values()
            .map(|&c| (c as f64 - mean).powi(2))
            .sum::<f64>()
            / n;

        let mut longest_runs: BTreeMap<String, u32> = BTreeMap::new();
        let mut floor_runs = 0;
        let mut run = 0u32;
        for (i, a) in plan.allocations.iter().enumerate() {
            let continues = i > 0 && plan.allocations[i - 1].person == a.person;
            run = if continues { run + 1 } else { 1 };
            if run == FLOOR_RUN {
                floor_runs += 1;
            }
            let best = longest_runs.entry(a.person.clone()).or_insert(0);
            *best = (*best).max(run);
        }

        let people_with_three_plus = task_counts
            .iter()
            .filter(|(_, count)| **count >= 3)
            .map(|(name, _)| name.clone())
            .collect();

        let tasks: HashMap<&str, &Task> = work
            .iter()
            .flat_map(|w| w.tasks.iter())
            .map(|t| (t.id.as_str(), t))
            .collect();
        let roster: HashMap<&str, &Person> = people.iter().map(|p| (p.name.as_str(), p)).collect();

        let matched = plan
            .allocations
            .iter()
            .filter(|a| {
                match (tasks.get(a.task_id.as_str()), roster.get(a.person.as_str())) {
                    (Some(task), Some(person)) => {
                        task.required_skills.is_empty()
                            || person.matched_skills(&task.required_skills) > 0
                    }
                    _ => false,
                }
            })
            .count();

        Self {
            task_counts,
            workload_variance,
            longest_runs,
            people_with_three_plus,
            floor_runs,
            skill_match_rate: matched as f64 / plan.allocation_count() as f64,
        }
    }
}
