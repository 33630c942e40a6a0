//! Allocation (solution) model.
//!
//! An allocation plan is the ordered list of task-person-week bindings
//! produced by one allocation run, plus the violations the run knowingly
//! accepted (forced overallocations, horizon overruns).

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

use super::Phase;

/// The result of one allocation run.
///
/// Allocations are kept in emission order; that order is part of the
/// output contract (identical inputs give an identical list).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AllocationPlan {
    /// Task allocations in emission order.
    pub allocations: Vec<Allocation>,
    /// Accepted constraint violations.
    pub violations: Vec<Violation>,
}

/// A task bound to a person over a half-open week interval.
///
/// Never mutated after the allocator emits it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Allocation {
    /// Position in emission order (0-based).
    pub sequence: usize,
    /// Owning project id.
    pub project_id: String,
    /// Owning project name (denormalized for reporting).
    pub project_name: String,
    /// Allocated task id.
    pub task_id: String,
    /// Task name (denormalized for reporting).
    pub task_name: String,
    /// Task phase.
    pub phase: Phase,
    /// Assigned person's name.
    pub person: String,
    /// First week (inclusive).
    pub start_week: u32,
    /// End week (exclusive).
    pub end_week: u32,
    /// Bandwidth committed per week (percent).
    pub bandwidth_percent: u32,
    /// Task effort (hours).
    pub estimated_hours: f64,
    /// Effort × the person's hourly rate.
    pub cost: f64,
    /// Combined candidate score at assignment time.
    pub score: f64,
    /// Whether the assignment was forced past the person's capacity.
    pub overallocated: bool,
}

/// An accepted violation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Violation {
    /// Type of violation.
    pub violation_type: ViolationType,
    /// Related entity (person name or task id).
    pub entity_id: String,
    /// Human-readable description.
    pub message: String,
    /// Severity (0-100, higher = worse).
    pub severity: i32,
}

/// Classification of violations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViolationType {
    /// Person committed beyond their weekly capacity.
    CapacityExceeded,
    /// Allocation ends after the configured timeline horizon.
    HorizonExceeded,
}

impl Allocation {
    /// Number of weeks covered.
    #[inline]
    pub fn duration_weeks(&self) -> u32 {
        self.end_week - self.start_week
    }

    /// Whether `week` falls inside `[start_week, end_week)`.
    #[inline]
    pub fn covers(&self, week: u32) -> bool {
        week >= self.start_week && week < self.end_week
    }

    /// Bandwidth-weeks committed by this allocation.
    pub fn bandwidth_weeks(&self) -> u64 {
        u64::from(self.bandwidth_percent) * u64::from(self.duration_weeks())
    }
}

impl Violation {
    /// Creates a capacity exceeded violation.
    pub fn capacity_exceeded(person: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            violation_type: ViolationType::CapacityExceeded,
            entity_id: person.into(),
            message: message.into(),
            severity: 90,
        }
    }

    /// Creates a horizon exceeded violation.
    pub fn horizon_exceeded(task_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            violation_type: ViolationType::HorizonExceeded,
            entity_id: task_id.into(),
            message: message.into(),
            severity: 40,
        }
    }
}

impl AllocationPlan {
    /// Creates an empty plan.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an allocation.
    pub fn add_allocation(&mut self, allocation: Allocation) {
        self.allocations.push(allocation);
    }

    /// Appends a violation.
    pub fn add_violation(&mut self, violation: Violation) {
        self.violations.push(violation);
    }

    /// Whether no violations were accepted.
    pub fn is_clean(&self) -> bool {
        self.violations.is_empty()
    }

    /// Timeline length: latest end week across all allocations.
    pub fn timeline_weeks(&self) -> u32 {
        self.allocations.iter().map(|a| a.end_week).max().unwrap_or(0)
    }

    /// Sum of allocation costs.
    pub fn total_cost(&self) -> f64 {
        self.allocations.iter().map(|a| a.cost).sum()
    }

    /// Number of allocations.
    pub fn allocation_count(&self) -> usize {
        self.allocations.len()
    }

    /// Allocations flagged as overallocated.
    pub fn overallocated(&self) -> Vec<&Allocation> {
        self.allocations.iter().filter(|a| a.overallocated).collect()
    }

    /// Finds the allocation for a task.
    pub fn allocation_for_task(&self, task_id: &str) -> Option<&Allocation> {
        self.allocations.iter().find(|a| a.task_id == task_id)
    }

    /// All allocations of a project.
    pub fn allocations_for_project(&self, project_id: &str) -> Vec<&Allocation> {
        self.allocations
            .iter()
            .filter(|a| a.project_id == project_id)
            .collect()
    }

    /// All allocations of a person.
    pub fn allocations_for_person(&self, person: &str) -> Vec<&Allocation> {
        self.allocations
            .iter()
            .filter(|a| a.person == person)
            .collect()
    }

    /// Latest end week of a project, if it has allocations.
    pub fn project_end_week(&self, project_id: &str) -> Option<u32> {
        self.allocations_for_project(project_id)
            .iter()
            .map(|a| a.end_week)
            .max()
    }

    /// Latest end week per phase of a project.
    pub fn phase_end_weeks(&self, project_id: &str) -> BTreeMap<Phase, u32> {
        let mut ends = BTreeMap::new();
        for a in self.allocations_for_project(project_id) {
            let end = ends.entry(a.phase).or_insert(0);
            *end = a.end_week.max(*end);
        }
        ends
    }

    /// Committed bandwidth of `person` in `week` (all allocations).
    pub fn load_at(&self, person: &str, week: u32) -> u32 {
        self.allocations
            .iter()
            .filter(|a| a.person == person && a.covers(week))
            .map(|a| a.bandwidth_percent)
            .sum()
    }

    /// Weeks in which `person` carries at least one overallocated assignment.
    pub fn overallocated_weeks(&self, person: &str) -> HashSet<u32> {
        self.allocations
            .iter()
            .filter(|a| a.person == person && a.overallocated)
            .flat_map(|a| a.start_week..a.end_week)
            .collect()
    }
}
