//! Interchangeable scoring strategies behind one seam.
//!
//! Each strategy consumes the same run context and produces the same raw
//! candidate shape; the service normalizes that into the public item schema.
//! Dispatch goes through the explicit [`Algorithm`] enum rather than string
//! matching at call sites.

pub(crate) mod pure_rank;
pub(crate) mod simulated;
pub(crate) mod weighted;

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::domain::{AdmissionRecord, Category, Preferences, RiskLevel, SchoolTags, StudentProfile};
use super::source::TagCache;
use super::window::RankWindow;

/// Strategy selector. Unknown or omitted names resolve to the weighted
/// scorer, by contract never an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    Weighted,
    Simulated,
    Balanced,
    Conservative,
    Aggressive,
}

impl Algorithm {
    pub fn resolve(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "" | "default" | "weighted" => Algorithm::Weighted,
            "ml" | "simulated" => Algorithm::Simulated,
            "balanced" => Algorithm::Balanced,
            "conservative" => Algorithm::Conservative,
            "aggressive" => Algorithm::Aggressive,
            other => {
                warn!(algorithm = other, "unknown algorithm, using weighted");
                Algorithm::Weighted
            }
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Algorithm::Weighted => "weighted",
            Algorithm::Simulated => "simulated",
            Algorithm::Balanced => "balanced",
            Algorithm::Conservative => "conservative",
            Algorithm::Aggressive => "aggressive",
        }
    }
}

/// Inputs shared by every scoring strategy for one run. The tag cache is
/// mutable because lookups memoize for the lifetime of the run.
pub(crate) struct ScoringContext<'a, 'b> {
    pub student: StudentProfile,
    pub student_score: i32,
    pub preferences: &'a Preferences,
    pub records: &'a [AdmissionRecord],
    pub window: RankWindow,
    pub tags: &'a mut TagCache<'b>,
    pub limit: usize,
}

/// Raw strategy output before normalization into the public item schema.
#[derive(Debug, Clone)]
pub(crate) struct ScoredCandidate {
    pub record: AdmissionRecord,
    pub advantage: i64,
    pub category: Category,
    pub risk_level: RiskLevel,
    pub probability: f64,
    pub total_score: Option<f64>,
    pub confidence: Option<f64>,
    pub rationale: String,
    pub tags: SchoolTags,
}

/// Common seam over the interchangeable scorers.
pub(crate) trait Strategy {
    fn score(
        &self,
        ctx: &mut ScoringContext<'_, '_>,
    ) -> Result<Vec<ScoredCandidate>, ScoringError>;
}

#[derive(Debug, thiserror::Error)]
pub(crate) enum ScoringError {
    #[error("student rank must be positive")]
    InvalidRank,
    #[error("no candidates survived filtering")]
    EmptyPool,
}

pub(crate) fn strategy_for(algorithm: Algorithm) -> Box<dyn Strategy> {
    match algorithm {
        Algorithm::Weighted => Box::new(weighted::WeightedMultiFactor),
        Algorithm::Simulated => Box::new(simulated::SimulatedModel),
        Algorithm::Balanced => Box::new(pure_rank::PureRank::balanced()),
        Algorithm::Conservative => Box::new(pure_rank::PureRank::conservative()),
        Algorithm::Aggressive => Box::new(pure_rank::PureRank::aggressive()),
    }
}

/// Category, risk, and base probability from the rank advantage band table.
/// Shared by the weighted scorer and by pure-rank normalization.
pub(crate) fn advantage_bands(advantage: i64) -> (Category, RiskLevel, f64) {
    let adv = advantage as f64;
    if advantage > 100 {
        (
            Category::Safety,
            RiskLevel::VeryLow,
            (70.0 + (adv - 100.0) * 0.05).min(95.0),
        )
    } else if advantage > 0 {
        (Category::Safety, RiskLevel::Low, (50.0 + adv * 0.4).min(90.0))
    } else if advantage >= -100 {
        (
            Category::Stable,
            RiskLevel::Medium,
            (50.0 + adv * 0.2).clamp(30.0, 70.0),
        )
    } else if advantage >= -200 {
        (
            Category::Reach,
            RiskLevel::High,
            (30.0 + (adv + 100.0) * 0.2).clamp(10.0, 50.0),
        )
    } else {
        (
            Category::Reach,
            RiskLevel::VeryHigh,
            (10.0 + (adv + 200.0) * 0.1).clamp(1.0, 30.0),
        )
    }
}

pub(crate) fn clamp_probability(value: f64) -> f64 {
    value.clamp(1.0, 99.0)
}

/// Clamp to [1, 99] and round to one decimal, the precision exposed to
/// callers.
pub(crate) fn round_probability(value: f64) -> f64 {
    (clamp_probability(value) * 10.0).round() / 10.0
}
