//! Phase sequencing.
//!
//! Groups a project's tasks by phase in the fixed phase order and, for
//! phase-gated runs, tracks the week at which each phase may open.
//!
//! Only phases of the same project gate each other. Projects never block
//! one another, and portfolio runs emit the same phase order with no
//! gate at all.

pub mod templates;

use crate::config::Granularity;
use crate::models::{Phase, Task};

/// The tasks of one phase of one project.
#[derive(Debug, Clone, PartialEq)]
pub struct PhaseBatch {
    /// Phase of every task in the batch.
    pub phase: Phase,
    /// Tasks in input order.
    pub tasks: Vec<Task>,
    /// Whether the batch waits for the previous phase to finish.
    pub gated: bool,
}

/// Orders tasks into phase batches.
#[derive(Debug, Clone, Copy, Default)]
pub struct TaskSequencer {
    gated: bool,
}

impl TaskSequencer {
    /// Creates a sequencer.
    pub fn new(gated: bool) -> Self {
        Self { gated }
    }

    /// Sequencer matching a granularity.
    pub fn for_granularity(granularity: Granularity) -> Self {
        Self::new(granularity.gates_phases())
    }

    /// Whether batches are gated.
    pub fn is_gated(&self) -> bool {
        self.gated
    }

    /// Splits tasks into non-empty batches in phase order.
    ///
    /// Tasks keep their relative input order within a batch.
    pub fn batches(&self, tasks: &[Task]) -> Vec<PhaseBatch> {
        Phase::ALL
            .iter()
            .filter_map(|&phase| {
                let batch: Vec<Task> = tasks.iter().filter(|t| t.phase == phase).cloned().collect();
                (!batch.is_empty()).then(|| PhaseBatch {
                    phase,
                    tasks: batch,
                    gated: self.gated,
                })
            })
            .collect()
    }
}

/// Phase gate for one project.
///
/// The first phase opens at the project's start week; every later phase
/// opens at the latest end week reached by the phase before it. A phase
/// with no tasks produces no batch, so the next phase opens at the last
/// recorded end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseGate {
    frontier: u32,
    opened_at: u32,
}

impl PhaseGate {
    /// Creates a gate for a project starting at `start_week`.
    pub fn new(start_week: u32) -> Self {
        Self {
            frontier: start_week,
            opened_at: start_week,
        }
    }

    /// Opens the next phase and returns its start week.
    pub fn open(&mut self) -> u32 {
        self.opened_at = self.frontier;
        self.opened_at
    }

    /// Records the end week of an allocation in the open phase.
    pub fn record_end(&mut self, end_week: u32) {
        self.frontier = self.frontier.max(end_week);
    }

    /// Start week of the currently open phase.
    pub fn opened_at(&self) -> u32 {
        self.opened_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(id: &str, phase: Phase) -> Task {
        Task::new(id, "P1", phase).with_hours(40.0)
    }

    #[test]
    fn test_batches_phase_order() {
        let tasks = vec![
            task("t1", Phase::Testing),
            task("t2", Phase::Planning),
            task("t3", Phase::Testing),
            task("t4", Phase::Design),
        ];
        let batches = TaskSequencer::new(true).batches(&tasks);
        let phases: Vec<Phase> = batches.iter().map(|b| b.phase).collect();
        assert_eq!(phases, vec![Phase::Planning, Phase::Design, Phase::Testing]);

        let testing: Vec<&str> = batches[2].tasks.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(testing, vec!["t1", "t3"]);
        assert!(batches.iter().all(|b| b.gated));
    }

    #[test]
    fn test_portfolio_not_gated() {
        let seq = TaskSequencer::for_granularity(Granularity::Portfolio);
        assert!(!seq.is_gated());
        let batches = seq.batches(&[task("t1", Phase::Planning)]);
        assert!(!batches[0].gated);
        assert!(TaskSequencer::for_granularity(Granularity::DeepDive).is_gated());
    }

    #[test]
    fn test_empty_input() {
        assert!(TaskSequencer::new(true).batches(&[]).is_empty());
    }

    #[test]
    fn test_gate_progression() {
        let mut gate = PhaseGate::new(3);
        assert_eq!(gate.open(), 3);
        gate.record_end(7);
        gate.record_end(5);
        assert_eq!(gate.open(), 7);
        assert_eq!(gate.opened_at(), 7);
        // Phase with nothing recorded carries the frontier forward.
        assert_eq!(gate.open(), 7);
    }
}
