//! Greedy skill-and-workload allocator.
//!
//! # Algorithm
//!
//! 1. Order projects by priority rank (stable, so equal ranks keep input order).
//! 2. Split each project's tasks into phase batches. In phase-gated runs,
//!    each batch opens at the previous batch's latest end week and raises
//!    every person's earliest-free-week cursor to that week.
//! 3. For each task, rank the whole roster with the candidate scorer.
//! 4. Walk the ranking and assign the first person whose weekly ledger can
//!    take the task's bandwidth from their cursor for the task's duration.
//! 5. If nobody fits, force the top-ranked person and flag the allocation.
//!
//! # Complexity
//! O(t * p * d) where t=tasks, p=people, d=task duration in weeks.

use tracing::{debug, info, warn};

use crate::config::AllocationConfig;
use crate::error::{AllocationError, Result};
use crate::models::{Allocation, AllocationPlan, Person, ProjectSpec, Task, Violation};
use crate::scoring::{Candidate, CandidateScorer, ScoringContext};
use crate::sequencing::{templates, PhaseGate, TaskSequencer};
use crate::tracking::{BandwidthTracker, ConsecutiveAssignmentCounter};
use crate::validation::validate_input;

/// A project together with the tasks to allocate for it.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectWork {
    /// The project.
    pub project: ProjectSpec,
    /// Tasks in emission order within each phase.
    pub tasks: Vec<Task>,
}

impl ProjectWork {
    /// Pairs a project with explicit tasks.
    pub fn new(project: ProjectSpec, tasks: Vec<Task>) -> Self {
        Self { project, tasks }
    }

    /// The project with its five synthetic portfolio tasks.
    pub fn portfolio(project: ProjectSpec) -> Self {
        let tasks = templates::portfolio_tasks(&project);
        Self { project, tasks }
    }

    /// The project expanded into the deep-dive task template.
    pub fn deep_dive(project: ProjectSpec) -> Self {
        let tasks = templates::deep_dive_tasks(&project);
        Self { project, tasks }
    }
}

/// Input container for allocation.
#[derive(Debug, Clone, Default)]
pub struct AllocationRequest {
    /// Roster in input order (ties in scoring keep this order).
    pub people: Vec<Person>,
    /// Projects with their tasks.
    pub work: Vec<ProjectWork>,
}

impl AllocationRequest {
    /// Creates a request.
    pub fn new(people: Vec<Person>, work: Vec<ProjectWork>) -> Self {
        Self { people, work }
    }

    /// Portfolio request: five synthetic tasks per project.
    pub fn portfolio(people: Vec<Person>, projects: Vec<ProjectSpec>) -> Self {
        let work = projects.into_iter().map(ProjectWork::portfolio).collect();
        Self { people, work }
    }

    /// Deep-dive request: the task template for each project.
    pub fn deep_dive(people: Vec<Person>, projects: Vec<ProjectSpec>) -> Self {
        let work = projects.into_iter().map(ProjectWork::deep_dive).collect();
        Self { people, work }
    }

    /// Total number of tasks across projects.
    pub fn task_count(&self) -> usize {
        self.work.iter().map(|w| w.tasks.len()).sum()
    }
}

/// Greedy allocator.
///
/// Holds configuration only. Every call to [`allocate`](Self::allocate)
/// builds its own tracker and streak counter, so one allocator can serve
/// any number of independent runs.
///
/// # Example
///
/// ```
/// use u_allocate::allocator::{Allocator, AllocationRequest};
/// use u_allocate::config::AllocationConfig;
/// use u_allocate::models::{Person, Priority, ProjectSpec};
///
/// let people = vec![Person::new("Alice").with_skill("rust")];
/// let projects = vec![ProjectSpec::new("Apollo").with_skill("rust").with_priority(Priority::High)];
///
/// let allocator = Allocator::new(AllocationConfig::default());
/// let plan = allocator.allocate_request(&AllocationRequest::portfolio(people, projects)).unwrap();
/// assert_eq!(plan.allocation_count(), 5);
/// ```
#[derive(Debug, Clone)]
pub struct Allocator {
    config: AllocationConfig,
    scorer: CandidateScorer,
    sequencer: TaskSequencer,
}

impl Allocator {
    /// Creates an allocator for a configuration.
    pub fn new(config: AllocationConfig) -> Self {
        let scorer = CandidateScorer::from_profile(&config.scoring_profile());
        let sequencer = TaskSequencer::for_granularity(config.granularity);
        Self {
            config,
            scorer,
            sequencer,
        }
    }

    /// Replaces the candidate scorer.
    pub fn with_scorer(mut self, scorer: CandidateScorer) -> Self {
        self.scorer = scorer;
        self
    }

    /// The configuration.
    pub fn config(&self) -> &AllocationConfig {
        &self.config
    }

    /// Allocates from a request.
    pub fn allocate_request(&self, request: &AllocationRequest) -> Result<AllocationPlan> {
        self.allocate(&request.people, &request.work)
    }

    /// Allocates every task to one person.
    ///
    /// # Errors
    /// - [`AllocationError::Config`] when the configuration fails
    ///   [`AllocationConfig::validate`]
    /// - [`AllocationError::EmptyRoster`] / [`AllocationError::EmptyPortfolio`]
    ///   when there is nobody to assign or nothing to allocate
    /// - [`AllocationError::InvalidInput`] when any other precondition fails
    ///
    /// Forced overallocations are not errors; they are flagged on the
    /// allocation and recorded as violations on the plan.
    pub fn allocate(&self, people: &[Person], work: &[ProjectWork]) -> Result<AllocationPlan> {
        self.config.validate()?;
        if people.is_empty() {
            return Err(AllocationError::EmptyRoster);
        }
        if work.is_empty() {
            return Err(AllocationError::EmptyPortfolio);
        }
        validate_input(people, work, &self.config).map_err(AllocationError::InvalidInput)?;

        info!(
            event = "allocation_start",
            granularity = ?self.config.granularity,
            people = people.len(),
            projects = work.len(),
            tasks = work.iter().map(|w| w.tasks.len()).sum::<usize>(),
            scorer = ?self.scorer,
        );

        let mut run = AllocationRun::new(self, people);

        let mut order: Vec<&ProjectWork> = work.iter().collect();
        order.sort_by_key(|w| w.project.rank());

        for item in order {
            run.allocate_project(item);
        }

        let plan = run.finish();

        info!(
            event = "allocation_end",
            allocations = plan.allocation_count(),
            overallocated = plan.overallocated().len(),
            total_cost = plan.total_cost(),
            timeline_weeks = plan.timeline_weeks(),
        );

        Ok(plan)
    }
}

impl Default for Allocator {
    fn default() -> Self {
        Self::new(AllocationConfig::default())
    }
}

/// State of one allocation run.
struct AllocationRun<'a> {
    allocator: &'a Allocator,
    people: &'a [Person],
    tracker: BandwidthTracker,
    streaks: ConsecutiveAssignmentCounter,
    plan: AllocationPlan,
}

impl<'a> AllocationRun<'a> {
    fn new(allocator: &'a Allocator, people: &'a [Person]) -> Self {
        Self {
            allocator,
            people,
            tracker: BandwidthTracker::for_roster(people),
            streaks: ConsecutiveAssignmentCounter::new(),
            plan: AllocationPlan::new(),
        }
    }

    fn allocate_project(&mut self, item: &ProjectWork) {
        let project = &item.project;
        let mut gate = PhaseGate::new(project.start_week);

        for batch in self.allocator.sequencer.batches(&item.tasks) {
            if batch.gated {
                let phase_start = gate.open();
                self.tracker.raise_floor_all(phase_start);
                debug!(
                    event = "phase_open",
                    project = %project.id,
                    phase = %batch.phase,
                    start_week = phase_start,
                );
            }
            for task in &batch.tasks {
                let end_week = self.assign(project, task);
                gate.record_end(end_week);
            }
        }
    }

    /// Assigns one task and returns its end week.
    fn assign(&mut self, project: &ProjectSpec, task: &Task) -> u32 {
        let people = self.people;
        let policy = &self.allocator.config.policy;
        let duration = task.duration_weeks(policy.hours_per_week);
        let bandwidth = policy.bandwidth_per_task;

        let ranked = {
            let context = ScoringContext::new(&self.tracker, &self.streaks);
            self.allocator.scorer.rank(task, people, &context)
        };

        let feasible = ranked.iter().find(|c| {
            let person = &people[c.person_index];
            let start = self.tracker.earliest_free_week(&person.name);
            self.tracker.can_fit(person, start, duration, bandwidth)
        });

        // The roster is non-empty, so the ranking always has a head.
        let (chosen, overallocated) = match (feasible, ranked.first()) {
            (Some(c), _) => (c, false),
            (None, Some(top)) => (top, true),
            (None, None) => return 0,
        };

        let person = &people[chosen.person_index];
        let start_week = self.tracker.earliest_free_week(&person.name);
        let end_week = start_week.saturating_add(duration);

        self.tracker.commit(person, start_week, duration, bandwidth);
        let streak = self.streaks.record(&person.name);

        let allocation = Allocation {
            sequence: self.plan.allocation_count(),
            project_id: project.id.clone(),
            project_name: project.name.clone(),
            task_id: task.id.clone(),
            task_name: task.name.clone(),
            phase: task.phase,
            person: person.name.clone(),
            start_week,
            end_week,
            bandwidth_percent: bandwidth,
            estimated_hours: task.estimated_hours,
            cost: person.cost_of(task.estimated_hours),
            score: chosen.combined,
            overallocated,
        };

        log_assignment(&allocation, chosen, streak);

        if overallocated {
            warn!(
                event = "overallocation",
                task = %task.id,
                person = %person.name,
                capacity = person.capacity_percent,
                bandwidth,
                start_week,
                end_week,
            );
            self.plan.add_violation(Violation::capacity_exceeded(
                &person.name,
                format!(
                    "'{}' forced onto {} over capacity ({}% requested, {}% available) in weeks {}..{}",
                    task.id, person.name, bandwidth, person.capacity_percent, start_week, end_week
                ),
            ));
        }

        let horizon = self.allocator.config.max_weeks;
        if end_week > horizon {
            warn!(
                event = "horizon_exceeded",
                task = %task.id,
                end_week,
                max_weeks = horizon,
            );
            self.plan.add_violation(Violation::horizon_exceeded(
                &task.id,
                format!("'{}' ends in week {} past the {}-week horizon", task.id, end_week, horizon),
            ));
        }

        self.plan.add_allocation(allocation);
        end_week
    }

    fn finish(self) -> AllocationPlan {
        self.plan
    }
}

fn log_assignment(allocation: &Allocation, candidate: &Candidate, streak: u32) {
    debug!(
        event = "task_assigned",
        task = %allocation.task_id,
        person = %allocation.person,
        start_week = allocation.start_week,
        end_week = allocation.end_week,
        skill = ?candidate.component("skill"),
        workload = ?candidate.component("workload"),
        consecutive = ?candidate.component("consecutive"),
        combined = candidate.combined,
        streak,
        overallocated = allocation.overallocated,
    );
}
