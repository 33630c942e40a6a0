//! Skill gaps and training recommendations.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::models::{Person, ProjectSpec};

/// Estimated weeks to learn one skill.
pub const WEEKS_PER_SKILL: u32 = 4;

/// Skills with course suggestions per person.
const RECOMMENDED_SKILLS: usize = 3;

/// Missing-skill count above which training is high priority.
const HIGH_PRIORITY_GAP: usize = 3;

/// Training urgency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TrainingPriority {
    /// More than three missing skills.
    High,
    /// Three or fewer missing skills.
    Medium,
}

/// Course suggestions for one skill.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkillRecommendation {
    /// Skill to learn.
    pub skill: String,
    /// Course titles.
    pub courses: Vec<String>,
    /// Estimated learning time.
    pub estimated_weeks: u32,
}

/// Training plan for one person.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrainingPlan {
    /// Person name.
    pub person: String,
    /// Person profile.
    pub profile: String,
    /// Every missing skill, sorted.
    pub skills_to_learn: Vec<String>,
    /// Suggestions for the first three missing skills.
    pub recommendations: Vec<SkillRecommendation>,
    /// Urgency.
    pub priority: TrainingPriority,
}

/// Training across the roster.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TrainingReport {
    /// Plans in roster order; people without gaps are omitted.
    pub plans: Vec<TrainingPlan>,
    /// Number of people with at least one gap.
    pub people_needing_training: usize,
    /// Missing skills summed over people.
    pub total_skills_to_learn: usize,
    /// `total_skills_to_learn × 4`.
    pub total_training_weeks: u32,
}

/// Skills required by any project that `person` lacks, sorted.
pub fn skill_gaps(person: &Person, projects: &[ProjectSpec]) -> Vec<String> {
    let required: BTreeSet<&str> = projects
        .iter()
        .flat_map(|p| p.required_skills.iter().map(String::as_str))
        .collect();
    required
        .into_iter()
        .filter(|skill| !person.has_skill(skill))
        .map(str::to_string)
        .collect()
}

/// Builds training plans for everyone with a gap.
pub fn recommend(people: &[Person], projects: &[ProjectSpec]) -> TrainingReport {
    let plans: Vec<TrainingPlan> = people
        .iter()
        .filter_map(|person| {
            let missing = skill_gaps(person, projects);
            if missing.is_empty() {
                return None;
            }
            let recommendations = missing
                .iter()
                .take(RECOMMENDED_SKILLS)
                .map(|skill| SkillRecommendation {
                    skill: skill.clone(),
                    courses: courses_for(skill),
                    estimated_weeks: WEEKS_PER_SKILL,
                })
                .collect();
            let priority = if missing.len() > HIGH_PRIORITY_GAP {
                TrainingPriority::High
            } else {
                TrainingPriority::Medium
            };
            Some(TrainingPlan {
                person: person.name.clone(),
                profile: person.profile.clone(),
                skills_to_learn: missing,
                recommendations,
                priority,
            })
        })
        .collect();

    let total_skills_to_learn: usize = plans.iter().map(|p| p.skills_to_learn.len()).sum();
    TrainingReport {
        people_needing_training: plans.len(),
        total_skills_to_learn,
        total_training_weeks: total_skills_to_learn as u32 * WEEKS_PER_SKILL,
        plans,
    }
}

/// Catalog keyed by lowercase skill fragment, checked in order.
const CATALOG: &[(&str, &[&str])] = &[
    ("python", &[
        "[Coursera] Python for Everybody by Dr. Charles Severance - 8 months - Free",
        "[Udemy] Complete Python Bootcamp: Go from Zero to Hero - 22 hours - $84.99",
        "[freeCodeCamp] Python Tutorial for Beginners - 4.5 hours - Free",
    ]),
    ("javascript", &[
        "[Udemy] The Complete JavaScript Course by Jonas Schmedtmann - 69 hours - $84.99",
        "[freeCodeCamp] JavaScript Algorithms and Data Structures - 300 hours - Free",
    ]),
    ("typescript", &[
        "[Udemy] Understanding TypeScript by Maximilian Schwarzmüller - 15 hours - $84.99",
        "[freeCodeCamp] TypeScript Course for Beginners - 5 hours - Free",
    ]),
    ("react", &[
        "[Udemy] React - The Complete Guide by Maximilian Schwarzmüller - 49 hours - $84.99",
        "[freeCodeCamp] React Course for Beginners - 12 hours - Free",
    ]),
    ("java", &[
        "[Coursera] Java Programming by Duke University - 5 months - Free",
        "[Udemy] Java Programming Masterclass by Tim Buchalka - 80 hours - $84.99",
    ]),
    ("sql", &[
        "[Coursera] SQL for Data Science by UC Davis - 4 weeks - Free",
        "[Udemy] The Complete SQL Bootcamp by Jose Portilla - 9 hours - $84.99",
    ]),
    ("aws", &[
        "[Coursera] AWS Fundamentals by AWS - 4 weeks - Free",
        "[freeCodeCamp] AWS Certified Cloud Practitioner - 4 hours - Free",
    ]),
    ("docker", &[
        "[Udemy] Docker Mastery by Bret Fisher - 19 hours - $84.99",
        "[freeCodeCamp] Docker Tutorial for Beginners - 2 hours - Free",
    ]),
    ("kubernetes", &[
        "[Udemy] Kubernetes for Absolute Beginners by Mumshad Mannambeth - 6 hours - $84.99",
        "[freeCodeCamp] Kubernetes Course - 4 hours - Free",
    ]),
    ("mongodb", &[
        "[MongoDB University] MongoDB Basics - 3 weeks - Free",
        "[freeCodeCamp] MongoDB Crash Course - 1 hour - Free",
    ]),
    ("machine learning", &[
        "[Coursera] Machine Learning by Andrew Ng - 11 weeks - Free",
        "[Udemy] Machine Learning A-Z by Kirill Eremenko - 44 hours - $84.99",
    ]),
    ("rust", &[
        "[Udemy] The Rust Programming Language by Dmitri Nesteruk - 9 hours - $84.99",
        "[Rust Book] The Rust Programming Language - Self-paced - Free",
    ]),
    ("go", &[
        "[Coursera] Getting Started with Go by UC Irvine - 4 weeks - Free",
        "[Go.dev] Tour of Go - Self-paced - Free",
    ]),
];

/// Course titles for a skill.
///
/// Matches the catalog case-insensitively when either the skill contains a
/// catalog key or the key contains the skill; the first match wins. Skills
/// outside the catalog get generic titles.
pub fn courses_for(skill: &str) -> Vec<String> {
    let needle = skill.trim().to_lowercase();
    if !needle.is_empty() {
        if let Some((_, courses)) = CATALOG
            .iter()
            .find(|(key, _)| needle.contains(key) || key.contains(needle.as_str()))
        {
            return courses.iter().map(|c| c.to_string()).collect();
        }
    }
    vec![
        format!("[Coursera] {skill} Specialization - 4-6 months - Free (Audit)"),
        format!("[Udemy] Complete {skill} Course - 15-20 hours - $84.99"),
        format!("[LinkedIn Learning] {skill} Essential Training - 3-5 hours - Subscription"),
        format!("[freeCodeCamp] {skill} Tutorial - 5-10 hours - Free"),
    ]
}
