//! Project risk narrative.
//!
//! Risks come from caller-supplied text when it parses into enough usable
//! lines, and from fixed rules over the project's duration, budget and
//! skill count otherwise. Neither path touches the allocation.

use serde::Serialize;

use crate::models::ProjectSpec;

/// Maximum number of risks reported per project.
pub const MAX_RISKS: usize = 3;

/// Supplied text must yield at least this many lines to be used.
const MIN_SUPPLIED_RISKS: usize = 2;

/// Lines must be longer than this (in characters) to count as a risk.
const MIN_RISK_CHARS: usize = 20;

/// Where the risks came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RiskSource {
    /// Parsed from supplied text.
    Supplied,
    /// Rule-based fallback.
    Fallback,
}

/// Risks for one project.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskAssessment {
    /// Project id.
    pub project_id: String,
    /// Risk statements (at most [`MAX_RISKS`]).
    pub risks: Vec<String>,
    /// Origin of the statements.
    pub source: RiskSource,
}

/// Rule-based risk assessor.
///
/// ```
/// use u_allocate::insights::risk::{RiskAssessor, RiskSource};
/// use u_allocate::models::ProjectSpec;
///
/// let project = ProjectSpec::new("Apollo").with_duration_weeks(6).with_budget(50_000.0);
/// let assessment = RiskAssessor::default().assess(&project, None);
/// assert_eq!(assessment.source, RiskSource::Fallback);
/// assert!(assessment.risks[0].starts_with("Tight timeline"));
/// ```
#[derive(Debug, Clone)]
pub struct RiskAssessor {
    /// Durations up to this many weeks count as tight.
    pub tight_timeline_weeks: u32,
    /// Budgets below this count as limited.
    pub limited_budget: f64,
    /// More required skills than this count as many.
    pub many_skills: usize,
}

impl Default for RiskAssessor {
    fn default() -> Self {
        Self {
            tight_timeline_weeks: 8,
            limited_budget: 100_000.0,
            many_skills: 5,
        }
    }
}

impl RiskAssessor {
    /// Assesses a project, preferring `supplied` text when it parses into
    /// at least two usable lines.
    pub fn assess(&self, project: &ProjectSpec, supplied: Option<&str>) -> RiskAssessment {
        let parsed = supplied.map(parse_risk_lines).unwrap_or_default();
        let (risks, source) = if parsed.len() >= MIN_SUPPLIED_RISKS {
            (parsed, RiskSource::Supplied)
        } else {
            (self.fallback(project), RiskSource::Fallback)
        };
        RiskAssessment {
            project_id: project.id.clone(),
            risks,
            source,
        }
    }

    /// Rule-based risks: timeline, budget, skills.
    pub fn fallback(&self, project: &ProjectSpec) -> Vec<String> {
        let timeline = if project.duration_weeks <= self.tight_timeline_weeks {
            "Tight timeline may impact deliverable quality and thorough testing"
        } else {
            "Extended timeline requires sustained resource commitment and stakeholder engagement"
        };
        let budget = if project.budget < self.limited_budget {
            "Limited budget may constrain resource allocation and technology choices"
        } else {
            "Budget management across multiple resources requires careful oversight and tracking"
        };
        let skills = if project.required_skills.len() > self.many_skills {
            "Multiple specialized skill requirements may create resource conflicts and scheduling challenges"
        } else {
            "Specialized skills availability may impact project scheduling and timelines"
        };
        vec![timeline.to_string(), budget.to_string(), skills.to_string()]
    }
}

/// Extracts risk statements from free text.
///
/// Strips leading numbering (`1.`, `2)`) and bullets (`•`, `-`, `*`),
/// keeps lines longer than 20 characters that contain a letter, and stops
/// after three.
pub fn parse_risk_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(strip_marker)
        .filter(|line| {
            line.chars().count() > MIN_RISK_CHARS && line.chars().any(char::is_alphabetic)
        })
        .take(MAX_RISKS)
        .map(str::to_string)
        .collect()
}

fn strip_marker(line: &str) -> &str {
    line.trim()
        .trim_start_matches(|c: char| c.is_ascii_digit() || c == '.')
        .trim_start_matches(|c: char| c.is_ascii_digit() || c == ')')
        .trim_start_matches('•')
        .trim_start_matches('-')
        .trim_start_matches('*')
        .trim()
}
