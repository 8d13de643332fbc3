//! Recommendation core: candidate extraction, windowed filtering, the
//! interchangeable scoring strategies, and the fallback tiers.

pub mod domain;
pub(crate) mod fallback;
pub mod service;
pub mod source;
pub mod strategy;
pub mod window;

#[cfg(test)]
mod tests;

pub use domain::{
    advantage, AdmissionRecord, Category, EliteTier, Preferences, RawAdmissionRow,
    RecommendationItem, RiskLevel, SchoolTags, StudentProfile,
};
pub use service::{RecommendationPlan, RecommendationService};
pub use source::{RecordSource, SourceError, TagCache, TagSource};
pub use strategy::Algorithm;
pub use window::RankWindow;
