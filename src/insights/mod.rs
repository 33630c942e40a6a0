//! Narrative and diagnostic output around a plan.
//!
//! Everything here is static and deterministic and reads plans without
//! changing them. Risk text may be supplied by an external writer; when it
//! is missing or unusable, rule-based statements take its place.

pub mod audit;
pub mod risk;
pub mod training;

pub use audit::AllocationAudit;
pub use risk::{RiskAssessment, RiskAssessor, RiskSource};
pub use training::{TrainingPlan, TrainingPriority, TrainingReport};
