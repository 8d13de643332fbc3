//! Admission slate recommendation core.
//!
//! Turns a ranked table of historical admission records plus a student's
//! percentile rank into a bounded, categorized, probability-annotated list of
//! school/major choices. Ingestion, transport, caching, and export live
//! elsewhere and reach the core through the [`engine::RecordSource`] and
//! [`engine::TagSource`] contracts.

pub mod config;
pub mod engine;
pub mod telemetry;

pub use config::{AppConfig, AppEnvironment, ConfigError, EngineConfig};
pub use engine::{
    AdmissionRecord, Algorithm, Category, EliteTier, Preferences, RankWindow, RawAdmissionRow,
    RecommendationItem, RecommendationPlan, RecommendationService, RecordSource, RiskLevel,
    SchoolTags, SourceError, StudentProfile, TagCache, TagSource,
};
