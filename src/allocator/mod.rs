//! Greedy allocation and plan summaries.
//!
//! `Allocator` runs the single-pass greedy heuristic: priority-ordered
//! projects, phase-ordered tasks, best-scoring person with room, forced
//! fallback when nobody has room. It is not optimal.
//!
//! `AllocationSummary` computes cost, timeline and load figures from the
//! resulting plan.

mod engine;
mod summary;

pub use engine::{AllocationRequest, Allocator, ProjectWork};
pub use summary::{AllocationSummary, PersonSummary, ProjectSummary};
