use std::collections::HashMap;

use u_allocate::allocator::{AllocationRequest, AllocationSummary, Allocator, ProjectWork};
use u_allocate::config::{AllocationConfig, AllocationPolicy, Granularity};
use u_allocate::models::{Person, Phase, Priority, ProjectSpec, Task};
use u_allocate::scoring::{
    CandidateScorer, ConsecutivePenalty, ScoringContext, ScoringCriterion, ScoringProfile, SkillMatch,
};
use u_allocate::tracking::{BandwidthTracker, ConsecutiveAssignmentCounter};
use u_allocate::workflow::PortfolioPlanner;
use u_allocate::AllocationError;

fn roster() -> Vec<Person> {
    vec![
        Person::new("Ana").with_skills(["python", "sql"]).with_rate(70.0),
        Person::new("Ben").with_skills(["react", "typescript"]).with_capacity(80),
        Person::new("Chen").with_skills(["python", "aws"]).with_capacity(40),
        Person::new("Dara").with_skills(["java", "sql"]),
        Person::new("Eli").with_capacity(60).with_rate(35.0),
    ]
}

fn portfolio() -> Vec<ProjectSpec> {
    vec![
        ProjectSpec::new("Ledger")
            .with_skills(["java", "sql"])
            .with_priority(Priority::High)
            .with_duration_weeks(6),
        ProjectSpec::new("Atlas")
            .with_skills(["python", "aws", "sql"])
            .with_priority(Priority::Critical)
            .with_duration_weeks(10),
        ProjectSpec::new("Pixel")
            .with_skills(["react", "typescript"])
            .with_priority(Priority::Medium),
        ProjectSpec::new("Relay")
            .with_priority(Priority::Critical)
            .with_duration_weeks(4),
    ]
}

/// Two people: A knows python at full capacity, B knows java at half
/// capacity; five 40-hour python tasks, one per phase.
fn two_person_scenario() -> (Vec<Person>, Vec<ProjectWork>) {
    let people = vec![
        Person::new("A").with_skill("python").with_capacity(100),
        Person::new("B").with_skill("java").with_capacity(50),
    ];
    let project = ProjectSpec::new("Core")
        .with_skill("python")
        .with_priority(Priority::Critical);
    let tasks = Phase::ALL
        .iter()
        .map(|&phase| {
            Task::new(format!("Core:{phase}"), "Core", phase)
                .with_name(format!("{phase} - Core"))
                .with_skill("python")
                .with_hours(40.0)
        })
        .collect();
    (people, vec![ProjectWork::new(project, tasks)])
}

#[test]
fn two_person_scenario_runs_sequentially_on_the_python_developer() {
    let (people, work) = two_person_scenario();
    let plan = Allocator::new(AllocationConfig::deep_dive())
        .allocate(&people, &work)
        .unwrap();

    let starts: Vec<u32> = plan.allocations.iter().map(|a| a.start_week).collect();
    assert_eq!(starts, vec![0, 2, 4, 6, 8]);
    assert!(plan.allocations.iter().all(|a| a.person == "A"));
    assert!(plan.allocations.iter().all(|a| a.bandwidth_percent == 50));
    assert!(plan.allocations.iter().all(|a| a.duration_weeks() == 2));

    let phases: Vec<Phase> = plan.allocations.iter().map(|a| a.phase).collect();
    assert_eq!(phases, Phase::ALL.to_vec());
    assert!(plan.overallocated().is_empty());
}

#[test]
fn capacity_holds_wherever_nothing_is_flagged() {
    let people = roster();
    for granularity in [Granularity::Portfolio, Granularity::DeepDive] {
        let config = AllocationConfig::new().with_granularity(granularity);
        let request = match granularity {
            Granularity::Portfolio => AllocationRequest::portfolio(people.clone(), portfolio()),
            Granularity::DeepDive => AllocationRequest::deep_dive(people.clone(), portfolio()),
        };
        let plan = Allocator::new(config).allocate_request(&request).unwrap();

        for person in &people {
            let flagged = plan.overallocated_weeks(&person.name);
            for week in 0..plan.timeline_weeks() {
                if !flagged.contains(&week) {
                    assert!(
                        plan.load_at(&person.name, week) <= person.capacity_percent,
                        "{} over capacity in week {week}",
                        person.name
                    );
                }
            }
        }
    }
}

#[test]
fn low_capacity_roster_is_forced_and_flagged() {
    let people = vec![
        Person::new("Thin").with_skill("python").with_capacity(40),
        Person::new("Thinner").with_capacity(20),
    ];
    let plan = Allocator::default()
        .allocate_request(&AllocationRequest::portfolio(people, vec![portfolio()[1].clone()]))
        .unwrap();

    assert_eq!(plan.allocation_count(), 5);
    assert_eq!(plan.overallocated().len(), 5);
    let summary = AllocationSummary::calculate(
        &plan,
        &[Person::new("Thin"), Person::new("Thinner")],
        &[portfolio()[1].clone()],
        &AllocationConfig::default(),
    );
    assert_eq!(summary.overallocated_count, 5);
    assert_eq!(summary.overallocated_tasks.len(), 5);
}

#[test]
fn identical_inputs_give_identical_plans() {
    let config = AllocationConfig::default();
    let request = AllocationRequest::portfolio(roster(), portfolio());

    let first = Allocator::new(config.clone()).allocate_request(&request).unwrap();
    let second = Allocator::new(config).allocate_request(&request).unwrap();

    assert_eq!(
        serde_json::to_string(&first.allocations).unwrap(),
        serde_json::to_string(&second.allocations).unwrap()
    );
}

#[test]
fn deep_dive_phases_never_overlap_their_predecessor() {
    let people = roster();
    let plan = Allocator::new(AllocationConfig::deep_dive())
        .allocate_request(&AllocationRequest::deep_dive(people, portfolio()))
        .unwrap();

    for project in portfolio() {
        let ends = plan.phase_end_weeks(&project.id);
        for a in plan.allocations_for_project(&project.id) {
            if let Some(prev) = a.phase.previous() {
                assert!(
                    a.start_week >= ends[&prev],
                    "{} starts at {} before {} ends at {}",
                    a.task_id,
                    a.start_week,
                    prev,
                    ends[&prev]
                );
            }
        }
    }
}

#[test]
fn consecutive_score_stays_at_floor_for_long_streaks() {
    let penalty = ConsecutivePenalty::default();
    for streak in 3..=10 {
        assert!((penalty.score_for(streak) - 0.5).abs() < 1e-10);
    }

    let people = vec![Person::new("Solo")];
    let tracker = BandwidthTracker::for_roster(&people);
    let mut streaks = ConsecutiveAssignmentCounter::new();
    for _ in 0..10 {
        streaks.record("Solo");
    }
    assert_eq!(streaks.count("Solo"), 10);

    let task = Task::new("T", "P", Phase::Testing).with_hours(20.0);
    let ctx = ScoringContext::new(&tracker, &streaks);
    let ranked = CandidateScorer::from_profile(&ScoringProfile::portfolio()).rank(&task, &people, &ctx);
    assert_eq!(ranked[0].component("consecutive"), Some(0.5));
}

#[test]
fn skill_score_is_bounded_and_full_only_for_supersets() {
    let tracker = BandwidthTracker::new();
    let streaks = ConsecutiveAssignmentCounter::new();
    let ctx = ScoringContext::new(&tracker, &streaks);
    let people = roster();

    let requirements: [&[&str]; 4] = [&["python"], &["python", "aws"], &["sql", "java", "go"], &[]];
    for (neutral, skill) in [(0.5, SkillMatch::default()), (0.3, SkillMatch::with_neutral(0.3))] {
        for required in requirements {
            let task = required
                .iter()
                .fold(Task::new("T", "P", Phase::Design), |t, s| t.with_skill(*s));
            for person in &people {
                let score = skill.evaluate(&task, person, &ctx);
                assert!((0.0..=1.0).contains(&score));
                if required.is_empty() {
                    assert!((score - neutral).abs() < 1e-10);
                } else {
                    let superset = required.iter().all(|s| person.has_skill(s));
                    assert_eq!((score - 1.0).abs() < 1e-10, superset);
                }
            }
        }
    }
}

#[test]
fn every_task_is_allocated_exactly_once() {
    let request = AllocationRequest::portfolio(roster(), portfolio());
    let plan = Allocator::default().allocate_request(&request).unwrap();

    let mut seen: HashMap<&str, usize> = HashMap::new();
    for a in &plan.allocations {
        *seen.entry(a.task_id.as_str()).or_insert(0) += 1;
    }
    assert_eq!(seen.len(), request.task_count());
    for item in &request.work {
        for task in &item.tasks {
            assert_eq!(seen.get(task.id.as_str()), Some(&1), "{}", task.id);
        }
    }
}

#[test]
fn zero_hour_task_takes_one_week_when_allowed() {
    let people = vec![Person::new("A")];
    let work = vec![ProjectWork::new(
        ProjectSpec::new("P"),
        vec![Task::new("P:0", "P", Phase::Planning).with_hours(0.0)],
    )];

    let strict = Allocator::default().allocate(&people, &work);
    assert!(matches!(strict, Err(AllocationError::InvalidInput(_))));

    let lenient = AllocationConfig::new().with_policy(AllocationPolicy {
        reject_zero_effort: false,
        ..AllocationPolicy::default()
    });
    let plan = Allocator::new(lenient).allocate(&people, &work).unwrap();
    assert_eq!(plan.allocations[0].start_week, 0);
    assert_eq!(plan.allocations[0].end_week, 1);
}

#[test]
fn empty_roster_is_rejected_before_allocation() {
    let result = Allocator::default().allocate_request(&AllocationRequest::portfolio(vec![], portfolio()));
    assert!(matches!(result, Err(AllocationError::EmptyRoster)));
}

#[test]
fn toml_config_drives_granularity() {
    let config = AllocationConfig::from_toml_str(
        r#"
        granularity = "deep_dive"
        max_weeks = 20

        [policy]
        hours_per_week = 40.0
        bandwidth_per_task = 50
        "#,
    )
    .unwrap();
    let (people, work) = two_person_scenario();
    let plan = Allocator::new(config).allocate(&people, &work).unwrap();

    // 40h at 40h/week is one week per task.
    let starts: Vec<u32> = plan.allocations.iter().map(|a| a.start_week).collect();
    assert_eq!(starts, vec![0, 1, 2, 3, 4]);
}

#[test]
fn planning_report_serializes() {
    let report = PortfolioPlanner::new(AllocationConfig::default())
        .run(&roster(), &portfolio())
        .unwrap();

    assert_eq!(report.portfolio.plan.allocation_count(), 20);
    let names: Vec<&str> = report
        .deep_dives
        .iter()
        .map(|d| d.project.name.as_str())
        .collect();
    assert_eq!(names, vec!["Atlas", "Relay"]);

    let json = serde_json::to_value(&report).unwrap();
    assert!(json["portfolio"]["summary"]["total_cost"].as_f64().unwrap() > 0.0);
    assert_eq!(json["deep_dives"].as_array().map(Vec::len), Some(2));
}
