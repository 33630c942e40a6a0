//! Run configuration.
//!
//! Load allocation settings from TOML to switch granularity, horizon and
//! policy constants without code changes.
//!
//! # Examples
//!
//! ```
//! use u_allocate::config::{AllocationConfig, Granularity};
//!
//! let config = AllocationConfig::from_toml_str(r#"
//!     granularity = "deep_dive"
//!     start_date = "2025-01-06"
//!     max_weeks = 26
//!     deep_dive_projects = ["Apollo"]
//!
//!     [policy]
//!     hours_per_week = 20.0
//!     bandwidth_per_task = 50
//! "#).unwrap();
//!
//! assert_eq!(config.granularity, Granularity::DeepDive);
//! assert_eq!(config.max_weeks, 26);
//! ```

use std::path::Path;

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::scoring::{ScoreWeights, ScoringProfile};

/// Configuration error.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Allocation granularity.
///
/// The two granularities differ in task source, scoring weights and phase
/// gating; they are not interchangeable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Granularity {
    /// Many projects, five synthetic phase tasks each, no phase gating.
    #[default]
    Portfolio,
    /// One project expanded into its task template, phases gated.
    DeepDive,
}

impl Granularity {
    /// Default scoring profile for this granularity.
    pub fn scoring_profile(&self) -> ScoringProfile {
        match self {
            Granularity::Portfolio => ScoringProfile::portfolio(),
            Granularity::DeepDive => ScoringProfile::deep_dive(),
        }
    }

    /// Whether phases within a project gate each other.
    pub fn gates_phases(&self) -> bool {
        matches!(self, Granularity::DeepDive)
    }
}

/// Fixed policy values for task sizing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AllocationPolicy {
    /// Hours of task effort that fit in one week.
    pub hours_per_week: f64,
    /// Bandwidth (percent) committed per task per week.
    pub bandwidth_per_task: u32,
    /// Reject tasks with no effort estimate instead of sizing them at one week.
    pub reject_zero_effort: bool,
}

impl Default for AllocationPolicy {
    fn default() -> Self {
        Self {
            hours_per_week: 20.0,
            bandwidth_per_task: 50,
            reject_zero_effort: true,
        }
    }
}

/// Longest horizon accepted, in weeks (100 years).
pub const MAX_HORIZON_WEEKS: u32 = 5200;

/// Scoring weight overrides, one per granularity.
///
/// The granularities keep separate weights; an override for one never
/// changes the other.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeightOverrides {
    /// Replaces the portfolio weights.
    pub portfolio: Option<ScoreWeights>,
    /// Replaces the deep-dive weights.
    pub deep_dive: Option<ScoreWeights>,
}

impl WeightOverrides {
    /// Override for a granularity, if any.
    pub fn get(&self, granularity: Granularity) -> Option<&ScoreWeights> {
        match granularity {
            Granularity::Portfolio => self.portfolio.as_ref(),
            Granularity::DeepDive => self.deep_dive.as_ref(),
        }
    }

    fn set(&mut self, granularity: Granularity, weights: ScoreWeights) {
        match granularity {
            Granularity::Portfolio => self.portfolio = Some(weights),
            Granularity::DeepDive => self.deep_dive = Some(weights),
        }
    }
}

/// Main allocation configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AllocationConfig {
    /// Allocation granularity.
    pub granularity: Granularity,
    /// Calendar date of week 0. `None` keeps the plan in relative weeks.
    pub start_date: Option<NaiveDate>,
    /// Timeline horizon in weeks; allocations past it are flagged.
    pub max_weeks: u32,
    /// Projects (by name or id) to expand at deep-dive granularity.
    pub deep_dive_projects: Vec<String>,
    /// Task sizing policy.
    pub policy: AllocationPolicy,
    /// Per-granularity weight overrides; granularity defaults apply when absent.
    pub weights: WeightOverrides,
}

impl Default for AllocationConfig {
    fn default() -> Self {
        Self {
            granularity: Granularity::Portfolio,
            start_date: None,
            max_weeks: 52,
            deep_dive_projects: Vec::new(),
            policy: AllocationPolicy::default(),
            weights: WeightOverrides::default(),
        }
    }
}

impl AllocationConfig {
    /// Creates a default (portfolio) configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a deep-dive configuration.
    pub fn deep_dive() -> Self {
        Self::default().with_granularity(Granularity::DeepDive)
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if the file doesn't exist, contains invalid TOML or
    /// fails [`validate`](Self::validate).
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_file(path)
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks horizon, policy values and weight overrides.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_weeks == 0 || self.max_weeks > MAX_HORIZON_WEEKS {
            return Err(ConfigError::Invalid(format!(
                "max_weeks must be in 1..={MAX_HORIZON_WEEKS}, got {}",
                self.max_weeks
            )));
        }
        if self.policy.hours_per_week.is_nan() || self.policy.hours_per_week <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "hours_per_week must be positive, got {}",
                self.policy.hours_per_week
            )));
        }
        if self.policy.bandwidth_per_task == 0 || self.policy.bandwidth_per_task > 100 {
            return Err(ConfigError::Invalid(format!(
                "bandwidth_per_task must be in 1..=100, got {}",
                self.policy.bandwidth_per_task
            )));
        }
        for (label, weights) in [
            ("portfolio", &self.weights.portfolio),
            ("deep_dive", &self.weights.deep_dive),
        ] {
            if let Some(weights) = weights {
                weights
                    .validate()
                    .map_err(|e| ConfigError::Invalid(format!("{label} {e}")))?;
            }
        }
        Ok(())
    }

    /// Sets the granularity.
    pub fn with_granularity(mut self, granularity: Granularity) -> Self {
        self.granularity = granularity;
        self
    }

    /// Sets the start date.
    pub fn with_start_date(mut self, date: NaiveDate) -> Self {
        self.start_date = Some(date);
        self
    }

    /// Sets the horizon.
    pub fn with_max_weeks(mut self, weeks: u32) -> Self {
        self.max_weeks = weeks;
        self
    }

    /// Adds a project to the deep-dive selection.
    pub fn with_deep_dive_project(mut self, key: impl Into<String>) -> Self {
        self.deep_dive_projects.push(key.into());
        self
    }

    /// Sets the task sizing policy.
    pub fn with_policy(mut self, policy: AllocationPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Overrides the scoring weights of one granularity.
    pub fn with_weights(mut self, granularity: Granularity, weights: ScoreWeights) -> Self {
        self.weights.set(granularity, weights);
        self
    }

    /// Effective scoring profile: granularity defaults plus that
    /// granularity's override.
    pub fn scoring_profile(&self) -> ScoringProfile {
        let profile = self.granularity.scoring_profile();
        match self.weights.get(self.granularity) {
            Some(w) => profile.with_weights(w.clone()),
            None => profile,
        }
    }

    /// Calendar date on which `week` begins, if a start date is configured.
    pub fn week_start_date(&self, week: u32) -> Option<NaiveDate> {
        self.start_date
            .and_then(|d| d.checked_add_days(Days::new(7 * u64::from(week))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toml_parsing() {
        let toml = r#"
            granularity = "deep_dive"
            start_date = "2025-01-06"
            max_weeks = 30
            deep_dive_projects = ["Apollo", "P7"]

            [policy]
            hours_per_week = 25.0
            bandwidth_per_task = 40
            reject_zero_effort = false

            [weights.deep_dive]
            skill = 0.5
            workload = 0.5
            consecutive = 0.0
        "#;

        let config = AllocationConfig::from_toml_str(toml).unwrap();
        assert_eq!(config.granularity, Granularity::DeepDive);
        assert_eq!(config.start_date, NaiveDate::from_ymd_opt(2025, 1, 6));
        assert_eq!(config.max_weeks, 30);
        assert_eq!(config.deep_dive_projects, vec!["Apollo", "P7"]);
        assert!((config.policy.hours_per_week - 25.0).abs() < 1e-10);
        assert_eq!(config.policy.bandwidth_per_task, 40);
        assert!(!config.policy.reject_zero_effort);
        let profile = config.scoring_profile();
        assert!((profile.weights.skill - 0.5).abs() < 1e-10);
        // Neutral skill default still follows the granularity.
        assert!((profile.neutral_skill_score - 0.3).abs() < 1e-10);
    }

    #[test]
    fn test_defaults_from_empty_toml() {
        let config = AllocationConfig::from_toml_str("").unwrap();
        assert_eq!(config.granularity, Granularity::Portfolio);
        assert_eq!(config.max_weeks, 52);
        assert!(config.start_date.is_none());
        assert_eq!(config.policy, AllocationPolicy::default());
        assert_eq!(config.weights, WeightOverrides::default());
    }

    #[test]
    fn test_invalid_policy_rejected() {
        let err = AllocationConfig::from_toml_str(
            r#"
            [policy]
            bandwidth_per_task = 0
        "#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err = AllocationConfig::from_toml_str(
            r#"
            [policy]
            hours_per_week = -1.0
        "#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_horizon_bounds() {
        let err = AllocationConfig::from_toml_str("max_weeks = 0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
        assert!(AllocationConfig::new()
            .with_max_weeks(MAX_HORIZON_WEEKS + 1)
            .validate()
            .is_err());
        assert!(AllocationConfig::new()
            .with_max_weeks(MAX_HORIZON_WEEKS)
            .validate()
            .is_ok());
    }

    #[test]
    fn test_weight_overrides_are_per_granularity() {
        let config = AllocationConfig::from_toml_str(
            r#"
            [weights.portfolio]
            skill = 0.5
            workload = 0.5
            consecutive = 0.0
        "#,
        )
        .unwrap();

        let portfolio = config.scoring_profile();
        assert!((portfolio.weights.skill - 0.5).abs() < 1e-10);

        let deep_dive = config.clone().with_granularity(Granularity::DeepDive).scoring_profile();
        assert_eq!(deep_dive.weights, ScoreWeights::deep_dive());
    }

    #[test]
    fn test_invalid_weights_rejected() {
        let config = AllocationConfig::new().with_weights(
            Granularity::DeepDive,
            ScoreWeights {
                skill: 1.0,
                workload: 1.0,
                consecutive: 1.0,
            },
        );
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("deep_dive"));
    }

    #[test]
    fn test_malformed_toml() {
        let err = AllocationConfig::from_toml_str("granularity = ").unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = AllocationConfig::load("/nonexistent/u-allocate.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_builder_and_profiles() {
        let config = AllocationConfig::deep_dive()
            .with_max_weeks(10)
            .with_deep_dive_project("Apollo");
        assert!(config.granularity.gates_phases());
        assert!(!Granularity::Portfolio.gates_phases());
        assert_eq!(config.deep_dive_projects, vec!["Apollo"]);

        let portfolio = AllocationConfig::new().scoring_profile();
        assert!((portfolio.weights.consecutive - 0.2).abs() < 1e-10);
        assert!((portfolio.neutral_skill_score - 0.5).abs() < 1e-10);
    }

    #[test]
    fn test_week_start_date() {
        let config =
            AllocationConfig::new().with_start_date(NaiveDate::from_ymd_opt(2025, 1, 6).unwrap());
        assert_eq!(config.week_start_date(0), NaiveDate::from_ymd_opt(2025, 1, 6));
        assert_eq!(config.week_start_date(2), NaiveDate::from_ymd_opt(2025, 1, 20));
        assert_eq!(AllocationConfig::new().week_start_date(3), None);
    }
}
