//! Allocation domain models.
//!
//! Provides the core data types for describing a staffing problem
//! (people, projects, tasks) and its solution (allocations).
//!
//! # Domain Mappings
//!
//! | u-allocate | Consulting | Software | Events |
//! |------------|------------|----------|--------|
//! | Person | Consultant | Engineer | Crew member |
//! | ProjectSpec | Engagement | Product initiative | Event |
//! | Task | Work package | Ticket/epic | Setup job |
//! | AllocationPlan | Staffing plan | Sprint roadmap | Crew rota |

mod allocation;
mod person;
mod project;
mod task;

pub use allocation::{Allocation, AllocationPlan, Violation, ViolationType};
pub use person::{Person, DEFAULT_CAPACITY_PERCENT, DEFAULT_HOURLY_RATE};
pub use project::{Priority, ProjectSpec};
pub use task::{Phase, Task};
