//! End-to-end planning run.
//!
//! A planning run allocates the whole portfolio once, then expands the
//! selected projects into their task templates and allocates each of those
//! in its own independent run. Training needs and project risks are
//! derived alongside; they never feed back into allocation.

use std::collections::HashMap;

use serde::Serialize;
use tracing::info;

use crate::allocator::{AllocationSummary, Allocator, ProjectWork};
use crate::config::{AllocationConfig, Granularity};
use crate::error::{AllocationError, Result};
use crate::insights::training::{self, TrainingReport};
use crate::insights::{AllocationAudit, RiskAssessment, RiskAssessor};
use crate::models::{AllocationPlan, Person, ProjectSpec};

/// Projects picked for deep-dive when none are named.
const DEFAULT_DEEP_DIVES: usize = 2;

/// Portfolio-level result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PortfolioReport {
    /// Allocation plan.
    pub plan: AllocationPlan,
    /// Aggregates.
    pub summary: AllocationSummary,
    /// Spread diagnostics.
    pub audit: AllocationAudit,
}

/// Deep-dive result for one project.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeepDiveReport {
    /// The expanded project.
    pub project: ProjectSpec,
    /// Allocation plan over the task template.
    pub plan: AllocationPlan,
    /// Aggregates.
    pub summary: AllocationSummary,
    /// Project risks.
    pub risks: RiskAssessment,
}

/// Full planning output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanningReport {
    /// Portfolio allocation.
    pub portfolio: PortfolioReport,
    /// One report per deep-dive project, in selection order.
    pub deep_dives: Vec<DeepDiveReport>,
    /// Training needs across the roster.
    pub training: TrainingReport,
}

impl PlanningReport {
    /// Forced overallocations across every plan in the report.
    pub fn overallocated_count(&self) -> usize {
        self.portfolio.summary.overallocated_count
            + self
                .deep_dives
                .iter()
                .map(|d| d.summary.overallocated_count)
                .sum::<usize>()
    }
}

/// Runs portfolio and deep-dive allocation with one configuration.
///
/// # Example
///
/// ```
/// use u_allocate::config::AllocationConfig;
/// use u_allocate::models::{Person, Priority, ProjectSpec};
/// use u_allocate::workflow::PortfolioPlanner;
///
/// let people = vec![
///     Person::new("Alice").with_skills(["python", "sql"]),
///     Person::new("Bob").with_skill("react"),
/// ];
/// let projects = vec![
///     ProjectSpec::new("Apollo").with_skills(["python", "react"]).with_priority(Priority::Critical),
///     ProjectSpec::new("Hermes").with_skill("sql").with_priority(Priority::Low),
/// ];
///
/// let report = PortfolioPlanner::new(AllocationConfig::default()).run(&people, &projects).unwrap();
/// assert_eq!(report.portfolio.plan.allocation_count(), 10);
/// assert_eq!(report.deep_dives.len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct PortfolioPlanner {
    config: AllocationConfig,
    assessor: RiskAssessor,
    risk_text: HashMap<String, String>,
}

impl PortfolioPlanner {
    /// Creates a planner.
    pub fn new(config: AllocationConfig) -> Self {
        Self {
            config,
            assessor: RiskAssessor::default(),
            risk_text: HashMap::new(),
        }
    }

    /// Supplies externally written risk text for a project (by id).
    pub fn with_risk_text(mut self, project_id: impl Into<String>, text: impl Into<String>) -> Self {
        self.risk_text.insert(project_id.into(), text.into());
        self
    }

    /// Replaces the risk assessor.
    pub fn with_assessor(mut self, assessor: RiskAssessor) -> Self {
        self.assessor = assessor;
        self
    }

    /// Runs the full plan.
    ///
    /// # Errors
    /// Precondition failures from allocation, and
    /// [`AllocationError::UnknownProject`] when a named deep-dive project
    /// does not exist.
    pub fn run(&self, people: &[Person], projects: &[ProjectSpec]) -> Result<PlanningReport> {
        if people.is_empty() {
            return Err(AllocationError::EmptyRoster);
        }
        if projects.is_empty() {
            return Err(AllocationError::EmptyPortfolio);
        }

        let selected = self.select_deep_dives(projects)?;
        info!(
            event = "planning_start",
            people = people.len(),
            projects = projects.len(),
            deep_dives = selected.len(),
        );

        let portfolio = self.run_portfolio(people, projects)?;
        let deep_dives = selected
            .into_iter()
            .map(|project| self.run_deep_dive(people, project))
            .collect::<Result<Vec<_>>>()?;
        let training = training::recommend(people, projects);

        let report = PlanningReport {
            portfolio,
            deep_dives,
            training,
        };
        info!(
            event = "planning_end",
            total_cost = report.portfolio.summary.total_cost,
            timeline_weeks = report.portfolio.summary.timeline_weeks,
            overallocated = report.overallocated_count(),
            people_needing_training = report.training.people_needing_training,
        );
        Ok(report)
    }

    /// Allocates the portfolio with five synthetic tasks per project.
    pub fn run_portfolio(&self, people: &[Person], projects: &[ProjectSpec]) -> Result<PortfolioReport> {
        let config = self.config.clone().with_granularity(Granularity::Portfolio);
        let work: Vec<ProjectWork> = projects.iter().cloned().map(ProjectWork::portfolio).collect();
        let plan = Allocator::new(config.clone()).allocate(people, &work)?;
        let summary = AllocationSummary::calculate(&plan, people, projects, &config);
        let audit = AllocationAudit::of(&plan, people, &work);
        Ok(PortfolioReport {
            plan,
            summary,
            audit,
        })
    }

    /// Allocates one project's task template in a fresh run.
    pub fn run_deep_dive(&self, people: &[Person], project: &ProjectSpec) -> Result<DeepDiveReport> {
        let config = self.config.clone().with_granularity(Granularity::DeepDive);
        let work = [ProjectWork::deep_dive(project.clone())];
        let plan = Allocator::new(config.clone()).allocate(people, &work)?;
        let summary = AllocationSummary::calculate(&plan, people, std::slice::from_ref(project), &config);
        let risks = self
            .assessor
            .assess(project, self.risk_text.get(&project.id).map(String::as_str));
        Ok(DeepDiveReport {
            project: project.clone(),
            plan,
            summary,
            risks,
        })
    }

    /// Projects to expand.
    ///
    /// Named projects (by id or name) in the configured order, skipping
    /// repeats. With no names configured, the first two priority-1 projects
    /// in input order.
    pub fn select_deep_dives<'a>(&self, projects: &'a [ProjectSpec]) -> Result<Vec<&'a ProjectSpec>> {
        if self.config.deep_dive_projects.is_empty() {
            return Ok(projects
                .iter()
                .filter(|p| p.rank() == 1)
                .take(DEFAULT_DEEP_DIVES)
                .collect());
        }

        let mut selected: Vec<&ProjectSpec> = Vec::new();
        for key in &self.config.deep_dive_projects {
            let project = projects
                .iter()
                .find(|p| p.matches(key))
                .ok_or_else(|| AllocationError::UnknownProject(key.clone()))?;
            if !selected.iter().any(|s| s.id == project.id) {
                selected.push(project);
            }
        }
        Ok(selected)
    }
}
