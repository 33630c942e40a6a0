//! Resource allocation for project portfolios.
//!
//! Assigns people to project tasks over a weekly timeline. Each task goes
//! to the best-scoring person who still has bandwidth, where the score
//! weighs skill fit, current workload and how many tasks in a row the
//! person has just received. Capacity is enforced per person per week; a
//! task nobody can take is forced onto the top candidate and flagged.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Person`, `ProjectSpec`, `Task`, `Phase`,
//!   `Allocation`, `AllocationPlan`
//! - **`intake`**: Roster and project records with delimited skill text
//! - **`tracking`**: Weekly bandwidth ledger and consecutive-assignment streaks
//! - **`scoring`**: Candidate criteria and the weighted scorer
//! - **`sequencing`**: Phase batches, phase gating and task templates
//! - **`allocator`**: The greedy allocator and plan summaries
//! - **`validation`**: Input integrity checks (empty inputs, duplicate keys, effort)
//! - **`insights`**: Risk statements, training needs and allocation audits
//! - **`workflow`**: Portfolio plus deep-dive planning runs
//! - **`config`**: Run configuration, loadable from TOML
//!
//! # Granularities
//!
//! Portfolio runs give every project five synthetic phase tasks and offer
//! them without phase gating. Deep-dive runs expand one project into its
//! full task template and keep each phase from starting before the
//! previous one has finished.
//!
//! # Example
//!
//! ```
//! use u_allocate::allocator::{Allocator, AllocationRequest};
//! use u_allocate::config::AllocationConfig;
//! use u_allocate::models::{Person, Priority, ProjectSpec};
//!
//! let people = vec![
//!     Person::new("Alice").with_skill("python"),
//!     Person::new("Bob").with_skill("java").with_capacity(50),
//! ];
//! let projects = vec![ProjectSpec::new("Apollo").with_skill("python").with_priority(Priority::Critical)];
//!
//! let allocator = Allocator::new(AllocationConfig::deep_dive());
//! let plan = allocator.allocate_request(&AllocationRequest::deep_dive(people, projects)).unwrap();
//! assert_eq!(plan.allocation_count(), 22);
//! assert!(plan.overallocated().is_empty());
//! ```

pub mod allocator;
pub mod config;
pub mod error;
pub mod insights;
pub mod intake;
pub mod models;
pub mod scoring;
pub mod sequencing;
pub mod tracking;
pub mod validation;
pub mod workflow;

pub use error::{AllocationError, Result};
