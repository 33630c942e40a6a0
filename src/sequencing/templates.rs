//! Task templates for both granularities.
//!
//! Portfolio runs get one synthetic task per phase; deep-dive runs expand a
//! project into the full per-phase template. Both take the project's first
//! two required skills as every task's requirement.

use crate::models::{Phase, ProjectSpec, Task};

/// Skills carried from the project into each generated task.
const LEADING_SKILLS: usize = 2;

/// Portfolio effort: hours per target week.
const PORTFOLIO_HOURS_PER_WEEK: f64 = 8.0;

/// (name, description, hours) per deep-dive task.
type TemplateEntry = (&'static str, &'static str, f64);

const PLANNING: &[TemplateEntry] = &[
    ("Requirements Gathering", "Collect and document requirements", 40.0),
    ("Feasibility Study", "Assess technical and business feasibility", 30.0),
    ("Project Charter", "Create project charter and roadmap", 20.0),
    ("Stakeholder Analysis", "Identify and analyze stakeholders", 20.0),
];

const DESIGN: &[TemplateEntry] = &[
    ("System Architecture", "Design system architecture", 60.0),
    ("Database Design", "Design database schema", 40.0),
    ("UI/UX Design", "Create wireframes and mockups", 50.0),
    ("API Design", "Design API endpoints and contracts", 30.0),
];

const DEVELOPMENT: &[TemplateEntry] = &[
    ("Backend Development", "Develop backend services", 120.0),
    ("Frontend Development", "Develop user interface", 100.0),
    ("Database Implementation", "Implement database", 60.0),
    ("API Implementation", "Implement APIs", 80.0),
    ("Integration", "Integrate components", 60.0),
    ("Code Review", "Review and refactor code", 40.0),
];

const TESTING: &[TemplateEntry] = &[
    ("Unit Testing", "Write and run unit tests", 50.0),
    ("Integration Testing", "Test component integration", 40.0),
    ("User Acceptance Testing", "Conduct UAT", 30.0),
    ("Performance Testing", "Test system performance", 30.0),
];

const DEPLOYMENT: &[TemplateEntry] = &[
    ("Environment Setup", "Setup production environment", 30.0),
    ("Deployment Configuration", "Configure deployment pipeline", 25.0),
    ("Production Deployment", "Deploy to production", 20.0),
    ("Post-Deployment Monitoring", "Monitor system health", 25.0),
];

fn template(phase: Phase) -> &'static [TemplateEntry] {
    match phase {
        Phase::Planning => PLANNING,
        Phase::Design => DESIGN,
        Phase::Development => DEVELOPMENT,
        Phase::Testing => TESTING,
        Phase::Deployment => DEPLOYMENT,
    }
}

/// Task id: `{project_id}:{phase}:{index}`.
pub fn task_id(project_id: &str, phase: Phase, index: usize) -> String {
    format!("{project_id}:{phase}:{index}")
}

/// Five synthetic tasks, one per phase, named `"{Phase} - {project}"`.
///
/// Effort is `duration_weeks × 8` hours.
pub fn portfolio_tasks(project: &ProjectSpec) -> Vec<Task> {
    let skills = project.leading_skills(LEADING_SKILLS);
    let hours = f64::from(project.duration_weeks) * PORTFOLIO_HOURS_PER_WEEK;
    Phase::ALL
        .iter()
        .map(|&phase| {
            Task::new(task_id(&project.id, phase, 0), &project.id, phase)
                .with_name(format!("{phase} - {}", project.name))
                .with_description(format!("{phase} phase for {}", project.name))
                .with_skills(skills.clone())
                .with_hours(hours)
        })
        .collect()
}

/// The full deep-dive template for a project, in phase order.
pub fn deep_dive_tasks(project: &ProjectSpec) -> Vec<Task> {
    let skills = project.leading_skills(LEADING_SKILLS);
    Phase::ALL
        .iter()
        .flat_map(|&phase| {
            let skills = skills.clone();
            template(phase)
                .iter()
                .enumerate()
                .map(move |(i, &(name, description, hours))| {
                    Task::new(task_id(&project.id, phase, i), &project.id, phase)
                        .with_name(name)
                        .with_description(description)
                        .with_skills(skills.clone())
                        .with_hours(hours)
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project() -> ProjectSpec {
        ProjectSpec::new("Apollo")
            .with_skills(["python", "react", "aws"])
            .with_duration_weeks(12)
    }

    #[test]
    fn test_portfolio_tasks() {
        let tasks = portfolio_tasks(&project());
        assert_eq!(tasks.len(), 5);
        assert_eq!(tasks[0].name, "Planning - Apollo");
        assert_eq!(tasks[4].name, "Deployment - Apollo");
        assert_eq!(tasks[2].id, "Apollo:Development:0");
        for t in &tasks {
            assert!((t.estimated_hours - 96.0).abs() < 1e-10);
            assert_eq!(t.required_skills.len(), 2);
            assert!(!t.required_skills.contains("aws"));
        }
        let phases: Vec<Phase> = tasks.iter().map(|t| t.phase).collect();
        assert_eq!(phases, Phase::ALL.to_vec());
    }

    #[test]
    fn test_deep_dive_template() {
        let tasks = deep_dive_tasks(&project());
        assert_eq!(tasks.len(), 22);
        assert_eq!(tasks[0].name, "Requirements Gathering");
        assert_eq!(tasks[0].id, "Apollo:Planning:0");
        assert_eq!(tasks[21].name, "Post-Deployment Monitoring");
        assert_eq!(tasks[21].id, "Apollo:Deployment:3");

        let dev: Vec<&Task> = tasks.iter().filter(|t| t.phase == Phase::Development).collect();
        assert_eq!(dev.len(), 6);
        assert!((dev[0].estimated_hours - 120.0).abs() < 1e-10);

        // Phase order is non-decreasing.
        assert!(tasks.windows(2).all(|w| w[0].phase <= w[1].phase));
    }

    #[test]
    fn test_project_without_skills() {
        let tasks = deep_dive_tasks(&ProjectSpec::new("Bare"));
        assert!(tasks.iter().all(|t| t.required_skills.is_empty()));
    }
}
