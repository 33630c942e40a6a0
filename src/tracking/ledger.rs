//! Per-person, per-week bandwidth ledger.

use std::collections::{BTreeMap, HashMap};

use crate::models::Person;

/// Weekly commitments of one person.
#[derive(Debug, Clone, Default, PartialEq)]
struct PersonLedger {
    /// week → committed bandwidth (percent).
    weeks: BTreeMap<u32, u32>,
    /// Earliest week a new task may start.
    earliest_free_week: u32,
}

impl PersonLedger {
    fn committed_at(&self, week: u32) -> u32 {
        self.weeks.get(&week).copied().unwrap_or(0)
    }
}

/// Capacity ledger for one allocation run.
///
/// Tracks two things per person:
/// - the bandwidth committed in each week, checked against the person's
///   capacity by [`can_fit`](Self::can_fit);
/// - an earliest-free-week cursor, advanced to the end of every committed
///   task. The cursor is what serializes a person's tasks even when the
///   weekly ledger alone would admit parallel low-bandwidth work.
///
/// Keyed by person name. Unknown people have an empty ledger and a cursor
/// at week 0.
#[derive(Debug, Clone, Default)]
pub struct BandwidthTracker {
    ledgers: HashMap<String, PersonLedger>,
}

impl BandwidthTracker {
    /// Creates an empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a tracker with an empty ledger for every person on the roster.
    pub fn for_roster(people: &[Person]) -> Self {
        let ledgers = people
            .iter()
            .map(|p| (p.name.clone(), PersonLedger::default()))
            .collect();
        Self { ledgers }
    }

    /// Whether `bandwidth` more percent fits in every week of
    /// `[start_week, start_week + duration_weeks)` without exceeding the
    /// person's capacity.
    pub fn can_fit(
        &self,
        person: &Person,
        start_week: u32,
        duration_weeks: u32,
        bandwidth: u32,
    ) -> bool {
        let ledger = self.ledgers.get(&person.name);
        (start_week..start_week.saturating_add(duration_weeks)).all(|week| {
            let used = ledger.map(|l| l.committed_at(week)).unwrap_or(0);
            used.saturating_add(bandwidth) <= person.capacity_percent
        })
    }

    /// Adds `bandwidth` to every week of the range and moves the person's
    /// cursor to the end of the range.
    ///
    /// Not idempotent: committing the same range twice books it twice.
    /// Capacity is not checked here; callers that need the guarantee call
    /// [`can_fit`](Self::can_fit) first.
    pub fn commit(&mut self, person: &Person, start_week: u32, duration_weeks: u32, bandwidth: u32) {
        let ledger = self.ledgers.entry(person.name.clone()).or_default();
        let end_week = start_week.saturating_add(duration_weeks);
        for week in start_week..end_week {
            let used = ledger.weeks.entry(week).or_insert(0);
            *used = used.saturating_add(bandwidth);
        }
        ledger.earliest_free_week = end_week;
    }

    /// Earliest week at which a new task for `person` may start.
    pub fn earliest_free_week(&self, person: &str) -> u32 {
        self.ledgers
            .get(person)
            .map(|l| l.earliest_free_week)
            .unwrap_or(0)
    }

    /// Raises the person's cursor to at least `week`. Never lowers it.
    pub fn raise_floor(&mut self, person: &str, week: u32) {
        let ledger = self.ledgers.entry(person.to_string()).or_default();
        ledger.earliest_free_week = ledger.earliest_free_week.max(week);
    }

    /// Raises every known person's cursor to at least `week`.
    pub fn raise_floor_all(&mut self, week: u32) {
        for ledger in self.ledgers.values_mut() {
            ledger.earliest_free_week = ledger.earliest_free_week.max(week);
        }
    }

    /// Bandwidth committed by `person` in `week`.
    pub fn committed_at(&self, person: &str, week: u32) -> u32 {
        self.ledgers
            .get(person)
            .map(|l| l.committed_at(week))
            .unwrap_or(0)
    }

    /// Total bandwidth committed by `person`, summed over all weeks.
    ///
    /// This is the load figure used for workload balancing.
    pub fn total_committed(&self, person: &str) -> u32 {
        self.ledgers
            .get(person)
            .map(|l| l.weeks.values().sum())
            .unwrap_or(0)
    }

    /// Weeks in which `person` is committed beyond their capacity.
    pub fn overbooked_weeks(&self, person: &Person) -> Vec<u32> {
        self.ledgers
            .get(&person.name)
            .map(|l| {
                l.weeks
                    .iter()
                    .filter(|(_, used)| **used > person.capacity_percent)
                    .map(|(week, _)| *week)
                    .collect()
            })
            .unwrap_or_default()
    }
}
