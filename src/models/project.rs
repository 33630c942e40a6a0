//! Project model.
//!
//! A project is the unit of portfolio prioritization. Projects are processed
//! in ascending priority rank (1 = most urgent) and each expands into a set
//! of phase tasks.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Named priority levels with their numeric rank.
///
/// Lower rank = higher priority. Ranks outside the named levels are kept
/// as `Rank(n)` so callers can supply finer-grained orderings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Priority {
    /// Rank 1.
    Critical,
    /// Rank 2.
    High,
    /// Rank 3 (default).
    #[default]
    Medium,
    /// Rank 4.
    Low,
    /// Arbitrary numeric rank.
    Rank(u32),
}

impl Priority {
    /// Numeric rank used as the primary sort key.
    pub fn rank(&self) -> u32 {
        match self {
            Priority::Critical => 1,
            Priority::High => 2,
            Priority::Medium => 3,
            Priority::Low => 4,
            Priority::Rank(n) => *n,
        }
    }

    /// Maps a numeric rank to a priority, preferring the named levels.
    pub fn from_rank(rank: u32) -> Self {
        match rank {
            1 => Priority::Critical,
            2 => Priority::High,
            3 => Priority::Medium,
            4 => Priority::Low,
            n => Priority::Rank(n),
        }
    }

    /// Parses a label such as `"Critical"` or `"2"`.
    ///
    /// Unknown labels fall back to `Medium`.
    pub fn from_label(label: &str) -> Self {
        let trimmed = label.trim();
        if let Ok(n) = trimmed.parse::<u32>() {
            return Self::from_rank(n);
        }
        match trimmed.to_ascii_lowercase().as_str() {
            "critical" => Priority::Critical,
            "high" => Priority::High,
            "medium" => Priority::Medium,
            "low" => Priority::Low,
            _ => Priority::Medium,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Priority::Critical => write!(f, "Critical"),
            Priority::High => write!(f, "High"),
            Priority::Medium => write!(f, "Medium"),
            Priority::Low => write!(f, "Low"),
            Priority::Rank(n) => write!(f, "Rank {n}"),
        }
    }
}

/// A project in the portfolio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectSpec {
    /// Unique project identifier.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Free-text description.
    pub description: String,
    /// Portfolio priority.
    pub priority: Priority,
    /// Skills the project needs. Insertion order matters: phase tasks
    /// take the leading skills.
    pub required_skills: Vec<String>,
    /// Budget (same currency as person rates).
    pub budget: f64,
    /// Target duration in weeks.
    pub duration_weeks: u32,
    /// Client name.
    pub client: String,
    /// Free-form deadline label, carried for reporting only.
    pub deadline: Option<String>,
    /// Week at which the first phase may start in phase-gated runs.
    pub start_week: u32,
}

impl ProjectSpec {
    /// Creates a project; the name doubles as the id.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id: name.clone(),
            name,
            description: String::new(),
            priority: Priority::Medium,
            required_skills: Vec::new(),
            budget: 100_000.0,
            duration_weeks: 8,
            client: "Internal".to_string(),
            deadline: None,
            start_week: 0,
        }
    }

    /// Overrides the project id.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the priority.
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Appends a required skill (duplicates are ignored).
    pub fn with_skill(mut self, skill: impl Into<String>) -> Self {
        let skill = skill.into();
        if !self.required_skills.contains(&skill) {
            self.required_skills.push(skill);
        }
        self
    }

    /// Appends several required skills.
    pub fn with_skills<I, S>(self, skills: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        skills.into_iter().fold(self, |p, s| p.with_skill(s))
    }

    /// Sets the budget.
    pub fn with_budget(mut self, budget: f64) -> Self {
        self.budget = budget;
        self
    }

    /// Sets the target duration in weeks.
    pub fn with_duration_weeks(mut self, weeks: u32) -> Self {
        self.duration_weeks = weeks;
        self
    }

    /// Sets the client.
    pub fn with_client(mut self, client: impl Into<String>) -> Self {
        self.client = client.into();
        self
    }

    /// Sets the deadline label.
    pub fn with_deadline(mut self, deadline: impl Into<String>) -> Self {
        self.deadline = Some(deadline.into());
        self
    }

    /// Sets the start offset used by phase-gated runs.
    pub fn with_start_week(mut self, week: u32) -> Self {
        self.start_week = week;
        self
    }

    /// Priority rank (lower = processed first).
    pub fn rank(&self) -> u32 {
        self.priority.rank()
    }

    /// The first `n` required skills as a set.
    pub fn leading_skills(&self, n: usize) -> BTreeSet<String> {
        self.required_skills.iter().take(n).cloned().collect()
    }

    /// Whether `key` matches this project's id or name.
    pub fn matches(&self, key: &str) -> bool {
        self.id == key || self.name == key
    }
}
