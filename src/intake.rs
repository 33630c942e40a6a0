//! Roster and project input records.
//!
//! Records mirror the tabular inputs people fill in: skills arrive as
//! comma-delimited text and priority as a label or a number. Missing
//! fields take the documented defaults.
//!
//! # Examples
//!
//! ```
//! use u_allocate::intake::{parse_skills, PersonRecord};
//!
//! assert_eq!(parse_skills(" python, sql,,react "), vec!["python", "sql", "react"]);
//!
//! let person = PersonRecord::new("Alice", "python, sql").into_person();
//! assert!(person.has_skill("sql"));
//! assert_eq!(person.capacity_percent, 100);
//! ```

use serde::{Deserialize, Serialize};

use crate::models::{
    Person, Priority, ProjectSpec, DEFAULT_CAPACITY_PERCENT, DEFAULT_HOURLY_RATE,
};

/// Splits comma-delimited skills, trimming whitespace and dropping empties
/// and repeats. First-occurrence order is kept.
pub fn parse_skills(text: &str) -> Vec<String> {
    let mut skills: Vec<String> = Vec::new();
    for skill in text.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        if !skills.iter().any(|s| s == skill) {
            skills.push(skill.to_string());
        }
    }
    skills
}

fn default_bandwidth() -> u32 {
    DEFAULT_CAPACITY_PERCENT
}

fn default_rate() -> f64 {
    DEFAULT_HOURLY_RATE
}

fn default_location() -> String {
    "Remote".to_string()
}

fn default_budget() -> f64 {
    100_000.0
}

fn default_duration() -> u32 {
    8
}

fn default_client() -> String {
    "Internal".to_string()
}

/// A roster row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonRecord {
    /// Unique name.
    pub name: String,
    /// Role or profile text.
    #[serde(default)]
    pub profile: String,
    /// Comma-delimited skills.
    #[serde(default)]
    pub skills: String,
    /// Weekly capacity percent (default 100).
    #[serde(default = "default_bandwidth")]
    pub bandwidth: u32,
    /// Hourly rate (default 50).
    #[serde(default = "default_rate")]
    pub hourly_rate: f64,
    /// Location tag (default "Remote").
    #[serde(default = "default_location")]
    pub location: String,
}

impl PersonRecord {
    /// Creates a record with defaults for everything but name and skills.
    pub fn new(name: impl Into<String>, skills: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            profile: String::new(),
            skills: skills.into(),
            bandwidth: default_bandwidth(),
            hourly_rate: default_rate(),
            location: default_location(),
        }
    }

    /// Converts into a [`Person`].
    pub fn into_person(self) -> Person {
        Person::new(self.name)
            .with_profile(self.profile)
            .with_skills(parse_skills(&self.skills))
            .with_capacity(self.bandwidth)
            .with_rate(self.hourly_rate)
            .with_location(self.location)
    }
}

impl From<PersonRecord> for Person {
    fn from(record: PersonRecord) -> Self {
        record.into_person()
    }
}

/// Priority as it appears in input: a number or a label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PriorityField {
    /// Numeric rank.
    Rank(u32),
    /// Label such as "Critical" or "High".
    Label(String),
}

impl PriorityField {
    /// Resolves to a [`Priority`]. Unknown labels map to `Medium`.
    pub fn resolve(&self) -> Priority {
        match self {
            PriorityField::Rank(n) => Priority::from_rank(*n),
            PriorityField::Label(label) => Priority::from_label(label),
        }
    }
}

/// A project row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectRecord {
    /// Project id; the name is used when absent.
    #[serde(default)]
    pub id: Option<String>,
    /// Project name.
    pub name: String,
    /// Description.
    #[serde(default)]
    pub description: String,
    /// Priority label or rank (default Medium).
    #[serde(default)]
    pub priority: Option<PriorityField>,
    /// Budget (default 100000).
    #[serde(default = "default_budget")]
    pub budget: f64,
    /// Comma-delimited required skills.
    #[serde(default)]
    pub required_skills: String,
    /// Target duration in weeks (default 8).
    #[serde(default = "default_duration")]
    pub duration_weeks: u32,
    /// Client (default "Internal").
    #[serde(default = "default_client")]
    pub client: String,
    /// Deadline label.
    #[serde(default)]
    pub deadline: Option<String>,
    /// Start offset in weeks for phase-gated runs.
    #[serde(default)]
    pub start_week: u32,
}

impl ProjectRecord {
    /// Creates a record with defaults for everything but name and skills.
    pub fn new(name: impl Into<String>, required_skills: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            description: String::new(),
            priority: None,
            budget: default_budget(),
            required_skills: required_skills.into(),
            duration_weeks: default_duration(),
            client: default_client(),
            deadline: None,
            start_week: 0,
        }
    }

    /// Sets the priority from a label.
    pub fn with_priority_label(mut self, label: impl Into<String>) -> Self {
        self.priority = Some(PriorityField::Label(label.into()));
        self
    }

    /// Converts into a [`ProjectSpec`].
    pub fn into_project(self) -> ProjectSpec {
        let priority = self
            .priority
            .as_ref()
            .map(PriorityField::resolve)
            .unwrap_or_default();
        let mut project = ProjectSpec::new(self.name)
            .with_description(self.description)
            .with_priority(priority)
            .with_skills(parse_skills(&self.required_skills))
            .with_budget(self.budget)
            .with_duration_weeks(self.duration_weeks)
            .with_client(self.client)
            .with_start_week(self.start_week);
        if let Some(id) = self.id {
            project = project.with_id(id);
        }
        if let Some(deadline) = self.deadline {
            project = project.with_deadline(deadline);
        }
        project
    }
}

impl From<ProjectRecord> for ProjectSpec {
    fn from(record: ProjectRecord) -> Self {
        record.into_project()
    }
}
