use std::sync::Arc;

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::domain::{
    AdmissionRecord, Preferences, RawAdmissionRow, RecommendationItem, StudentProfile,
};
use super::fallback;
use super::source::{RecordSource, TagCache, TagSource};
use super::strategy::{self, Algorithm, ScoredCandidate, ScoringContext};
use super::window::RankWindow;
use crate::config::EngineConfig;

/// Full recommendation run output. `degraded` is true whenever a fallback
/// tier produced the items instead of live scoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationPlan {
    pub algorithm: Algorithm,
    pub degraded: bool,
    pub generated_at: DateTime<Utc>,
    pub items: Vec<RecommendationItem>,
}

/// Service composing the record source, tag source, and strategy set.
///
/// One run is a pure function of the source snapshots, the student, the
/// preferences, and the algorithm; the tag memoization cache lives exactly
/// one run.
pub struct RecommendationService<R, T> {
    records: Arc<R>,
    tags: Arc<T>,
    config: EngineConfig,
}

impl<R, T> RecommendationService<R, T>
where
    R: RecordSource + 'static,
    T: TagSource + 'static,
{
    pub fn new(records: Arc<R>, tags: Arc<T>, config: EngineConfig) -> Self {
        Self {
            records,
            tags,
            config,
        }
    }

    /// Generate a slate for a caller-supplied algorithm name. Unknown names
    /// resolve to the weighted scorer; a zero limit means the configured
    /// default slate size.
    pub fn generate(
        &self,
        student: &StudentProfile,
        preferences: &Preferences,
        algorithm: &str,
        limit: usize,
    ) -> RecommendationPlan {
        self.generate_with(student, preferences, Algorithm::resolve(algorithm), limit)
    }

    /// Generate a slate. Never fails: data or scoring problems degrade
    /// through the fallback tiers and are flagged on the plan. A zero limit
    /// means the configured default slate size.
    pub fn generate_with(
        &self,
        student: &StudentProfile,
        preferences: &Preferences,
        algorithm: Algorithm,
        limit: usize,
    ) -> RecommendationPlan {
        let limit = if limit == 0 {
            self.config.default_limit
        } else {
            limit
        };
        let student_score = student.score_or(self.config.default_score);
        let window = RankWindow::around(student.rank);
        info!(
            rank = student.rank,
            algorithm = algorithm.label(),
            lower = window.lower,
            upper = window.upper,
            limit,
            "recommendation run"
        );

        let rows = match self.records.admission_rows(self.config.admission_year) {
            Ok(rows) => rows,
            Err(error) => {
                warn!(%error, "record source unavailable, emitting synthetic slate");
                return self.synthetic_plan(algorithm, limit);
            }
        };

        let records = parse_rows(&rows);
        if records.is_empty() {
            warn!("no usable admission records, engaging fallback");
            return self.fallback_plan(&records, student, student_score, algorithm, limit);
        }

        let mut cache = TagCache::new(self.tags.as_ref());
        let mut ctx = ScoringContext {
            student: *student,
            student_score,
            preferences,
            records: &records,
            window,
            tags: &mut cache,
            limit,
        };

        match strategy::strategy_for(algorithm).score(&mut ctx) {
            Ok(candidates) => {
                let items: Vec<RecommendationItem> =
                    candidates.into_iter().map(normalize).collect();
                info!(count = items.len(), "recommendation run complete");
                RecommendationPlan {
                    algorithm,
                    degraded: false,
                    generated_at: Utc::now(),
                    items,
                }
            }
            Err(error) => {
                warn!(%error, "scoring produced no usable slate, engaging fallback");
                self.fallback_plan(&records, student, student_score, algorithm, limit)
            }
        }
    }

    /// Legacy alias: weighted algorithm, default score, no preferences.
    pub fn recommend_by_rank(&self, rank: u32, limit: usize) -> RecommendationPlan {
        self.generate_with(
            &StudentProfile::with_rank(rank),
            &Preferences::default(),
            Algorithm::Weighted,
            limit,
        )
    }

    fn fallback_plan(
        &self,
        records: &[AdmissionRecord],
        student: &StudentProfile,
        student_score: i32,
        algorithm: Algorithm,
        limit: usize,
    ) -> RecommendationPlan {
        let mut rng = StdRng::seed_from_u64(self.config.fallback_seed);
        let items =
            fallback::score_band_slate(records, student.rank, student_score, limit, &mut rng);
        if !items.is_empty() {
            return RecommendationPlan {
                algorithm,
                degraded: true,
                generated_at: Utc::now(),
                items,
            };
        }
        self.synthetic_plan(algorithm, limit)
    }

    fn synthetic_plan(&self, algorithm: Algorithm, limit: usize) -> RecommendationPlan {
        let mut rng = StdRng::seed_from_u64(self.config.fallback_seed);
        RecommendationPlan {
            algorithm,
            degraded: true,
            generated_at: Utc::now(),
            items: fallback::synthetic_slate(limit, &mut rng),
        }
    }
}

/// Candidate extraction: malformed rows are skipped, never abort the run.
fn parse_rows(rows: &[RawAdmissionRow]) -> Vec<AdmissionRecord> {
    let mut records = Vec::with_capacity(rows.len());
    for row in rows {
        match row.parse() {
            Some(record) => records.push(record),
            None => warn!(
                school = %row.school_name,
                rank = %row.rank,
                "skipping malformed admission row"
            ),
        }
    }
    records
}

fn normalize(candidate: ScoredCandidate) -> RecommendationItem {
    RecommendationItem {
        school_name: candidate.record.school_name,
        major_name: candidate.record.major_name,
        admission_score: candidate.record.score,
        admission_rank: candidate.record.rank,
        advantage: candidate.advantage,
        category: candidate.category,
        risk_level: candidate.risk_level,
        admission_probability: candidate.probability,
        confidence: candidate.confidence,
        rationale: candidate.rationale,
        tags: candidate.tags,
        degraded: false,
    }
}
