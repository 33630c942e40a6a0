//! Task model.
//!
//! A task is a unit of project work that is allocated to exactly one person.
//! It belongs to one project and one phase, carries the skills it needs and
//! an effort estimate in hours.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Fixed, ordered project phases.
///
/// Declaration order is execution order; `Ord` follows it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Requirements, feasibility, chartering.
    Planning,
    /// Architecture and interface design.
    Design,
    /// Implementation.
    Development,
    /// Verification.
    Testing,
    /// Release and rollout.
    Deployment,
}

impl Phase {
    /// All phases in execution order.
    pub const ALL: [Phase; 5] = [
        Phase::Planning,
        Phase::Design,
        Phase::Development,
        Phase::Testing,
        Phase::Deployment,
    ];

    /// Zero-based position in the execution order.
    pub fn index(&self) -> usize {
        match self {
            Phase::Planning => 0,
            Phase::Design => 1,
            Phase::Development => 2,
            Phase::Testing => 3,
            Phase::Deployment => 4,
        }
    }

    /// The phase preceding this one, if any.
    pub fn previous(&self) -> Option<Phase> {
        self.index().checked_sub(1).map(|i| Phase::ALL[i])
    }

    /// Display label.
    pub fn label(&self) -> &'static str {
        match self {
            Phase::Planning => "Planning",
            Phase::Design => "Design",
            Phase::Development => "Development",
            Phase::Testing => "Testing",
            Phase::Deployment => "Deployment",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A task to be allocated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Unique task identifier.
    pub id: String,
    /// Owning project identifier.
    pub project_id: String,
    /// Human-readable name.
    pub name: String,
    /// Free-text description.
    pub description: String,
    /// Phase this task belongs to.
    pub phase: Phase,
    /// Skills needed to perform the task.
    pub required_skills: BTreeSet<String>,
    /// Estimated effort (hours).
    pub estimated_hours: f64,
}

impl Task {
    /// Creates a task with no skills and zero effort.
    pub fn new(id: impl Into<String>, project_id: impl Into<String>, phase: Phase) -> Self {
        Self {
            id: id.into(),
            project_id: project_id.into(),
            name: String::new(),
            description: String::new(),
            phase,
            required_skills: BTreeSet::new(),
            estimated_hours: 0.0,
        }
    }

    /// Sets the task name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Adds a required skill.
    pub fn with_skill(mut self, skill: impl Into<String>) -> Self {
        self.required_skills.insert(skill.into());
        self
    }

    /// Replaces the required skill set.
    pub fn with_skills(mut self, skills: BTreeSet<String>) -> Self {
        self.required_skills = skills;
        self
    }

    /// Sets the effort estimate (hours).
    pub fn with_hours(mut self, hours: f64) -> Self {
        self.estimated_hours = hours;
        self
    }

    /// Duration in whole weeks at `hours_per_week`, never less than one.
    ///
    /// Fractional weeks are truncated: 30h at 20h/week is one week.
    pub fn duration_weeks(&self, hours_per_week: f64) -> u32 {
        if hours_per_week <= 0.0 || !self.estimated_hours.is_finite() {
            return 1;
        }
        let weeks = (self.estimated_hours / hours_per_week).floor();
        if weeks < 1.0 {
            1
        } else {
            weeks as u32
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_builder() {
        let task = Task::new("P1:Design:0", "P1", Phase::Design)
            .with_name("API Design")
            .with_description("Design API endpoints")
            .with_skill("rust")
            .with_skill("openapi")
            .with_hours(30.0);

        assert_eq!(task.id, "P1:Design:0");
        assert_eq!(task.project_id, "P1");
        assert_eq!(task.name, "API Design");
        assert_eq!(task.phase, Phase::Design);
        assert_eq!(task.required_skills.len(), 2);
        assert!((task.estimated_hours - 30.0).abs() < 1e-10);
    }

    #[test]
    fn test_phase_order() {
        assert!(Phase::Planning < Phase::Design);
        assert!(Phase::Testing < Phase::Deployment);
        for (i, phase) in Phase::ALL.iter().enumerate() {
            assert_eq!(phase.index(), i);
        }
        assert_eq!(Phase::Planning.previous(), None);
        assert_eq!(Phase::Testing.previous(), Some(Phase::Development));
        assert_eq!(Phase::Deployment.to_string(), "Deployment");
    }

    #[test]
    fn test_duration_weeks() {
        let t = |h: f64| Task::new("T", "P", Phase::Planning).with_hours(h);
        assert_eq!(t(40.0).duration_weeks(20.0), 2);
        assert_eq!(t(30.0).duration_weeks(20.0), 1); // truncated
        assert_eq!(t(120.0).duration_weeks(20.0), 6);
        assert_eq!(t(10.0).duration_weeks(20.0), 1);
    }

    #[test]
    fn test_duration_weeks_zero_effort_floors_to_one() {
        let t = Task::new("T", "P", Phase::Planning).with_hours(0.0);
        assert_eq!(t.duration_weeks(20.0), 1);
    }

    #[test]
    fn test_duration_weeks_degenerate_inputs() {
        let t = Task::new("T", "P", Phase::Planning).with_hours(f64::NAN);
        assert_eq!(t.duration_weeks(20.0), 1);
        let t = Task::new("T", "P", Phase::Planning).with_hours(100.0);
        assert_eq!(t.duration_weeks(0.0), 1);
    }
}
