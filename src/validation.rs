//! Input validation for allocation runs.
//!
//! Checks the roster and project work before the allocation loop starts.
//! Detects:
//! - Empty roster or portfolio
//! - Duplicate person names, project ids and task ids
//! - Tasks filed under the wrong project
//! - Tasks with zero or invalid effort
//! - Out-of-range capacity and negative rates
//! - Start offsets or task durations past the horizon
//!
//! Every problem is reported, not just the first.

use crate::allocator::ProjectWork;
use crate::config::AllocationConfig;
use crate::models::Person;
use std::collections::HashSet;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// No people on the roster.
    EmptyRoster,
    /// No projects to allocate.
    EmptyPortfolio,
    /// Two entities share the same key.
    DuplicateId,
    /// A project has no tasks.
    EmptyProject,
    /// A task's project id differs from the project it is filed under.
    TaskProjectMismatch,
    /// A task requires zero hours.
    ZeroEffortTask,
    /// A task's effort is negative or not a number.
    InvalidEffort,
    /// A person's capacity is above 100 percent.
    InvalidCapacity,
    /// A person's hourly rate is negative or not a number.
    InvalidRate,
    /// A project starts, or a single task lasts, beyond the horizon.
    BeyondHorizon,
}

impl ValidationError {
    /// Creates a validation error.
    pub fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates the input of an allocation run.
///
/// Checks:
/// 1. The roster and the portfolio are non-empty
/// 2. No duplicate person names
/// 3. No duplicate project ids, no duplicate task ids across projects
/// 4. Every project has tasks, and every task belongs to its project
/// 5. Task effort is finite and non-negative; zero effort is rejected
///    when `policy.reject_zero_effort` is set
/// 6. Capacities are within 0..=100 and rates are finite and non-negative
/// 7. No project start week and no single task duration exceeds
///    `max_weeks`; chains of tasks may still run past it and get flagged
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_input(
    people: &[Person],
    work: &[ProjectWork],
    config: &AllocationConfig,
) -> ValidationResult {
    let policy = &config.policy;
    let horizon = config.max_weeks;
    let mut errors = Vec::new();

    if people.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::EmptyRoster,
            "Roster has no people",
        ));
    }
    if work.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::EmptyPortfolio,
            "Portfolio has no projects",
        ));
    }

    let mut names = HashSet::new();
    for person in people {
        if !names.insert(person.name.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate person: {}", person.name),
            ));
        }
        if person.capacity_percent > 100 {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidCapacity,
                format!(
                    "Person '{}' has capacity {}% (max 100%)",
                    person.name, person.capacity_percent
                ),
            ));
        }
        if !person.hourly_rate.is_finite() || person.hourly_rate < 0.0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidRate,
                format!("Person '{}' has invalid rate {}", person.name, person.hourly_rate),
            ));
        }
    }

    let mut project_ids = HashSet::new();
    let mut task_ids = HashSet::new();
    for item in work {
        let project = &item.project;
        if !project_ids.insert(project.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate project ID: {}", project.id),
            ));
        }
        if project.start_week > horizon {
            errors.push(ValidationError::new(
                ValidationErrorKind::BeyondHorizon,
                format!(
                    "Project '{}' starts in week {} past the {}-week horizon",
                    project.id, project.start_week, horizon
                ),
            ));
        }
        if item.tasks.is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyProject,
                format!("Project '{}' has no tasks", project.id),
            ));
        }

        for task in &item.tasks {
            if !task_ids.insert(task.id.as_str()) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::DuplicateId,
                    format!("Duplicate task ID: {}", task.id),
                ));
            }
            if task.project_id != project.id {
                errors.push(ValidationError::new(
                    ValidationErrorKind::TaskProjectMismatch,
                    format!(
                        "Task '{}' belongs to '{}' but is filed under '{}'",
                        task.id, task.project_id, project.id
                    ),
                ));
            }
            if !task.estimated_hours.is_finite() || task.estimated_hours < 0.0 {
                errors.push(ValidationError::new(
                    ValidationErrorKind::InvalidEffort,
                    format!("Task '{}' has invalid effort {}", task.id, task.estimated_hours),
                ));
            } else if task.estimated_hours == 0.0 && policy.reject_zero_effort {
                errors.push(ValidationError::new(
                    ValidationErrorKind::ZeroEffortTask,
                    format!("Task '{}' requires zero hours", task.id),
                ));
            } else {
                let weeks = task.duration_weeks(policy.hours_per_week);
                if weeks > horizon {
                    errors.push(ValidationError::new(
                        ValidationErrorKind::BeyondHorizon,
                        format!(
                            "Task '{}' lasts {} weeks, longer than the {}-week horizon",
                            task.id, weeks, horizon
                        ),
                    ));
                }
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AllocationPolicy;
    use crate::models::{Phase, ProjectSpec, Task};

    fn sample_people() -> Vec<Person> {
        vec![
            Person::new("Alice").with_skill("python"),
            Person::new("Bob").with_skill("java").with_capacity(50),
        ]
    }

    fn sample_work() -> Vec<ProjectWork> {
        let project = ProjectSpec::new("Apollo").with_skill("python");
        let tasks = vec![
            Task::new("A:1", "Apollo", Phase::Planning).with_hours(40.0),
            Task::new("A:2", "Apollo", Phase::Design).with_hours(40.0),
        ];
        vec![ProjectWork::new(project, tasks)]
    }

    fn kinds(result: ValidationResult) -> Vec<ValidationErrorKind> {
        result.unwrap_err().into_iter().map(|e| e.kind).collect()
    }

    #[test]
    fn test_valid_input() {
        assert!(validate_input(&sample_people(), &sample_work(), &AllocationConfig::default()).is_ok());
    }

    #[test]
    fn test_empty_roster_and_portfolio() {
        let found = kinds(validate_input(&[], &[], &AllocationConfig::default()));
        assert!(found.contains(&ValidationErrorKind::EmptyRoster));
        assert!(found.contains(&ValidationErrorKind::EmptyPortfolio));
    }

    #[test]
    fn test_duplicate_person() {
        let people = vec![Person::new("Alice"), Person::new("Alice")];
        let errors = validate_input(&people, &sample_work(), &AllocationConfig::default()).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::DuplicateId && e.message.contains("person")));
    }

    #[test]
    fn test_duplicate_task_across_projects() {
        let mut work = sample_work();
        let other = ProjectSpec::new("Hermes");
        work.push(ProjectWork::new(
            other,
            vec![Task::new("A:1", "Hermes", Phase::Planning).with_hours(20.0)],
        ));
        let errors = validate_input(&sample_people(), &work, &AllocationConfig::default()).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::DuplicateId && e.message.contains("task")));
    }

    #[test]
    fn test_zero_effort_policy() {
        let project = ProjectSpec::new("Apollo");
        let work = vec![ProjectWork::new(
            project,
            vec![Task::new("Z", "Apollo", Phase::Planning)],
        )];

        let found = kinds(validate_input(&sample_people(), &work, &AllocationConfig::default()));
        assert_eq!(found, vec![ValidationErrorKind::ZeroEffortTask]);

        let lenient = AllocationConfig::new().with_policy(AllocationPolicy {
            reject_zero_effort: false,
            ..AllocationPolicy::default()
        });
        assert!(validate_input(&sample_people(), &work, &lenient).is_ok());
    }

    #[test]
    fn test_negative_effort_always_rejected() {
        let work = vec![ProjectWork::new(
            ProjectSpec::new("Apollo"),
            vec![Task::new("N", "Apollo", Phase::Planning).with_hours(-5.0)],
        )];
        let lenient = AllocationConfig::new().with_policy(AllocationPolicy {
            reject_zero_effort: false,
            ..AllocationPolicy::default()
        });
        let found = kinds(validate_input(&sample_people(), &work, &lenient));
        assert_eq!(found, vec![ValidationErrorKind::InvalidEffort]);
    }

    #[test]
    fn test_task_project_mismatch() {
        let work = vec![ProjectWork::new(
            ProjectSpec::new("Apollo"),
            vec![Task::new("X", "Hermes", Phase::Planning).with_hours(20.0)],
        )];
        let found = kinds(validate_input(&sample_people(), &work, &AllocationConfig::default()));
        assert_eq!(found, vec![ValidationErrorKind::TaskProjectMismatch]);
    }

    #[test]
    fn test_multiple_errors() {
        let people = vec![Person::new("Zed").with_capacity(150).with_rate(-1.0)];
        let work = vec![ProjectWork::new(ProjectSpec::new("Empty"), vec![])];
        let found = kinds(validate_input(&people, &work, &AllocationConfig::default()));
        assert!(found.contains(&ValidationErrorKind::InvalidCapacity));
        assert!(found.contains(&ValidationErrorKind::InvalidRate));
        assert!(found.contains(&ValidationErrorKind::EmptyProject));
        assert!(found.len() >= 3);
    }

    #[test]
    fn test_start_week_past_horizon() {
        let project = ProjectSpec::new("Apollo").with_start_week(u32::MAX - 1);
        let work = vec![ProjectWork::new(
            project,
            vec![Task::new("A:1", "Apollo", Phase::Planning).with_hours(40.0)],
        )];
        let config = AllocationConfig::deep_dive();
        let found = kinds(validate_input(&sample_people(), &work, &config));
        assert_eq!(found, vec![ValidationErrorKind::BeyondHorizon]);

        // Starting on the last week is still allowed.
        let mut work = work;
        work[0].project.start_week = 52;
        assert!(validate_input(&sample_people(), &work, &config).is_ok());
    }

    #[test]
    fn test_task_longer_than_horizon() {
        let work = vec![ProjectWork::new(
            ProjectSpec::new("Apollo"),
            vec![
                Task::new("A:1", "Apollo", Phase::Planning).with_hours(1.0e12),
                Task::new("A:2", "Apollo", Phase::Design).with_hours(20.0 * 52.0),
            ],
        )];
        let errors = validate_input(&sample_people(), &work, &AllocationConfig::default()).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ValidationErrorKind::BeyondHorizon);
        assert!(errors[0].message.contains("A:1"));
    }
}
