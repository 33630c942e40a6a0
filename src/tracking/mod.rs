//! Run-scoped allocation state.
//!
//! Both trackers are owned by a single allocation run and never shared
//! between runs. Concurrent requests each build their own.

mod ledger;
mod streak;

pub use ledger::BandwidthTracker;
pub use streak::ConsecutiveAssignmentCounter;
