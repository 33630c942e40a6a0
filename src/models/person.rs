//! Person (team member) model.
//!
//! People are the resources that tasks are allocated to. Each person has
//! a skill set, a weekly bandwidth capacity, an hourly cost rate and a
//! location tag. People are created once per run from the input roster and
//! never change during allocation.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Default weekly capacity (percent).
pub const DEFAULT_CAPACITY_PERCENT: u32 = 100;

/// Default hourly cost rate.
pub const DEFAULT_HOURLY_RATE: f64 = 50.0;

/// A team member who can be assigned to tasks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    /// Unique name (also the identity key).
    pub name: String,
    /// Free-text role or profile description.
    pub profile: String,
    /// Skill names. Ordered for deterministic iteration.
    pub skills: BTreeSet<String>,
    /// Total weekly bandwidth capacity (0..=100 percent).
    pub capacity_percent: u32,
    /// Cost per hour of effort.
    pub hourly_rate: f64,
    /// Location tag (e.g., "Remote", "Berlin").
    pub location: String,
}

impl Person {
    /// Creates a person with full capacity and the default rate.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            profile: String::new(),
            skills: BTreeSet::new(),
            capacity_percent: DEFAULT_CAPACITY_PERCENT,
            hourly_rate: DEFAULT_HOURLY_RATE,
            location: "Remote".to_string(),
        }
    }

    /// Sets the profile description.
    pub fn with_profile(mut self, profile: impl Into<String>) -> Self {
        self.profile = profile.into();
        self
    }

    /// Adds a skill.
    pub fn with_skill(mut self, skill: impl Into<String>) -> Self {
        self.skills.insert(skill.into());
        self
    }

    /// Adds several skills.
    pub fn with_skills<I, S>(mut self, skills: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.skills.extend(skills.into_iter().map(Into::into));
        self
    }

    /// Sets the weekly bandwidth capacity (percent).
    pub fn with_capacity(mut self, capacity_percent: u32) -> Self {
        self.capacity_percent = capacity_percent;
        self
    }

    /// Sets the hourly rate.
    pub fn with_rate(mut self, hourly_rate: f64) -> Self {
        self.hourly_rate = hourly_rate;
        self
    }

    /// Sets the location tag.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    /// Whether this person has a given skill.
    pub fn has_skill(&self, name: &str) -> bool {
        self.skills.contains(name)
    }

    /// Number of the given skills this person has.
    pub fn matched_skills(&self, required: &BTreeSet<String>) -> usize {
        required.intersection(&self.skills).count()
    }

    /// Cost of `hours` of effort at this person's rate.
    pub fn cost_of(&self, hours: f64) -> f64 {
        hours * self.hourly_rate
    }
}
