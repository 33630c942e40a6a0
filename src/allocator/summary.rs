//! Plan summary aggregates.
//!
//! Computes cost, timeline and load indicators from a completed plan and
//! its inputs.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Timeline | Latest end week over all allocations |
//! | Total cost | Sum of effort × rate |
//! | Budget variance | Budget − cost, per project |
//! | Peak load | Highest weekly bandwidth booked for a person |
//! | Utilization | Booked bandwidth-weeks / (capacity × timeline) |

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::config::AllocationConfig;
use crate::models::{AllocationPlan, Person, ProjectSpec};

/// Per-project figures.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectSummary {
    /// Project id.
    pub project_id: String,
    /// Project name.
    pub name: String,
    /// Allocated cost.
    pub cost: f64,
    /// Budget.
    pub budget: f64,
    /// Budget minus cost (negative when over budget).
    pub variance: f64,
    /// Latest end week of the project's allocations.
    pub timeline_weeks: u32,
    /// Number of allocations.
    pub allocation_count: usize,
}

/// Per-person figures.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PersonSummary {
    /// Person name.
    pub name: String,
    /// Number of tasks allocated.
    pub task_count: usize,
    /// Committed bandwidth-weeks (percent × weeks).
    pub bandwidth_weeks: u64,
    /// Highest bandwidth booked in any single week.
    pub peak_load: u32,
    /// Booked bandwidth-weeks over available capacity on the timeline (0.0..).
    pub utilization: f64,
}

/// Plan summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AllocationSummary {
    /// Total allocated cost.
    pub total_cost: f64,
    /// Total budget across projects.
    pub total_budget: f64,
    /// Latest end week (0 for an empty plan).
    pub timeline_weeks: u32,
    /// Number of allocations.
    pub allocation_count: usize,
    /// Number of forced overallocations.
    pub overallocated_count: usize,
    /// Task ids of forced overallocations, in emission order.
    pub overallocated_tasks: Vec<String>,
    /// Allocations ending after the configured horizon.
    pub beyond_horizon: usize,
    /// Per-project figures, in input order.
    pub projects: Vec<ProjectSummary>,
    /// Per-person figures, in roster order.
    pub people: Vec<PersonSummary>,
    /// person → bandwidth booked per week, weeks `0..timeline_weeks`.
    pub weekly_load: BTreeMap<String, Vec<u32>>,
    /// Calendar date of week 0, when a start date is configured.
    pub start_date: Option<NaiveDate>,
    /// Calendar date at which the timeline ends.
    pub end_date: Option<NaiveDate>,
}

impl AllocationSummary {
    /// Computes the summary of a plan.
    ///
    /// # Arguments
    /// * `plan` - The completed plan.
    /// * `people` - The roster (for capacities and ordering).
    /// * `projects` - The projects (for budgets and ordering).
    /// * `config` - Horizon and start date.
    pub fn calculate(
        plan: &AllocationPlan,
        people: &[Person],
        projects: &[ProjectSpec],
        config: &AllocationConfig,
    ) -> Self {
        let timeline = plan.timeline_weeks();

        let projects_summary = projects
            .iter()
            .map(|project| {
                let allocations = plan.allocations_for_project(&project.id);
                let cost: f64 = allocations.iter().map(|a| a.cost).sum();
                ProjectSummary {
                    project_id: project.id.clone(),
                    name: project.name.clone(),
                    cost,
                    budget: project.budget,
                    variance: project.budget - cost,
                    timeline_weeks: plan.project_end_week(&project.id).unwrap_or(0),
                    allocation_count: allocations.len(),
                }
            })
            .collect();

        let mut weekly_load = BTreeMap::new();
        let people_summary = people
            .iter()
            .map(|person| {
                let allocations = plan.allocations_for_person(&person.name);
                let load: Vec<u32> = (0..timeline)
                    .map(|week| plan.load_at(&person.name, week))
                    .collect();
                let bandwidth_weeks: u64 = allocations.iter().map(|a| a.bandwidth_weeks()).sum();
                let available = u64::from(person.capacity_percent) * u64::from(timeline);
                let utilization = if available == 0 {
                    0.0
                } else {
                    bandwidth_weeks as f64 / available as f64
                };
                let summary = PersonSummary {
                    name: person.name.clone(),
                    task_count: allocations.len(),
                    bandwidth_weeks,
                    peak_load: load.iter().copied().max().unwrap_or(0),
                    utilization,
                };
                weekly_load.insert(person.name.clone(), load);
                summary
            })
            .collect();

        let overallocated_tasks: Vec<String> = plan
            .overallocated()
            .iter()
            .map(|a| a.task_id.clone())
            .collect();

        Self {
            total_cost: plan.total_cost(),
            total_budget: projects.iter().map(|p| p.budget).sum(),
            timeline_weeks: timeline,
            allocation_count: plan.allocation_count(),
            overallocated_count: overallocated_tasks.len(),
            overallocated_tasks,
            beyond_horizon: plan
                .allocations
                .iter()
                .filter(|a| a.end_week > config.max_weeks)
                .count(),
            projects: projects_summary,
            people: people_summary,
            weekly_load,
            start_date: config.start_date,
            end_date: config.week_start_date(timeline),
        }
    }

    /// Whether cost stays within the total budget.
    pub fn within_budget(&self) -> bool {
        self.total_cost <= self.total_budget
    }

    /// Whether any allocation was forced or ran past the horizon.
    pub fn has_issues(&self) -> bool {
        self.overallocated_count > 0 || self.beyond_horizon > 0
    }

    /// Figures for one person.
    pub fn person(&self, name: &str) -> Option<&PersonSummary> {
        self.people.iter().find(|p| p.name == name)
    }

    /// Figures for one project.
    pub fn project(&self, project_id: &str) -> Option<&ProjectSummary> {
        self.projects.iter().find(|p| p.project_id == project_id)
    }
}
