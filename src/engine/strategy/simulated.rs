//! Fixed-weight linear heuristic exposed as the "ml" strategy.
//!
//! This is a simulated stand-in for a trained model: the feature weights are
//! hand-picked constants, not learned parameters, and the confidence figure
//! is a heuristic rather than a calibrated one. The output contract matches
//! the other strategies. Whether a real model ever replaces this is an open
//! question tracked in DESIGN.md.

use super::{clamp_probability, weighted, ScoredCandidate, ScoringContext, ScoringError, Strategy};
use crate::engine::domain::{advantage, Category, Preferences, RiskLevel, SchoolTags};

const W_RANK_GAP: f64 = 0.35;
const W_SCORE_GAP: f64 = 0.20;
const W_RANK_RATIO: f64 = 0.15;
const W_SCHOOL_LEVEL: f64 = 0.15;
const W_MAJOR_MATCH: f64 = 0.10;
const W_YEAR_TREND: f64 = 0.05;

pub(crate) struct SimulatedModel;

#[derive(Debug, Clone, Copy)]
struct FeatureVector {
    rank_gap: f64,
    score_gap: f64,
    rank_ratio: f64,
    school_level: f64,
    major_match: f64,
    year_trend: f64,
}

impl FeatureVector {
    fn build(
        student_rank: u32,
        student_score: i32,
        admission_rank: u32,
        admission_score: i32,
        tags: SchoolTags,
        major_name: &str,
        preferences: &Preferences,
    ) -> Self {
        let rank = f64::from(student_rank.max(1));
        let score = f64::from(student_score.max(1));
        Self {
            rank_gap: advantage(student_rank, admission_rank) as f64 / rank,
            score_gap: f64::from(admission_score - student_score) / score,
            rank_ratio: f64::from(admission_rank) / rank,
            school_level: level_feature(tags),
            major_match: major_feature(major_name, preferences),
            // Placeholder until multi-year data feeds a real trend.
            year_trend: 0.0,
        }
    }

    fn combination(&self) -> f64 {
        self.rank_gap * W_RANK_GAP
            + self.score_gap * W_SCORE_GAP
            + self.rank_ratio * W_RANK_RATIO
            + self.school_level * W_SCHOOL_LEVEL
            + self.major_match * W_MAJOR_MATCH
            + self.year_trend * W_YEAR_TREND
    }
}

impl Strategy for SimulatedModel {
    fn score(
        &self,
        ctx: &mut ScoringContext<'_, '_>,
    ) -> Result<Vec<ScoredCandidate>, ScoringError> {
        if ctx.student.rank == 0 {
            return Err(ScoringError::InvalidRank);
        }

        let min_level = weighted::minimum_level_score(ctx.preferences);
        let mut candidates = Vec::new();

        for record in ctx.records {
            if !ctx.window.contains(record.rank) {
                continue;
            }

            let tags = ctx.tags.tags(&record.school_name);

            // Same hard filters as the weighted path.
            if !ctx.preferences.locations.is_empty() {
                let location = ctx.tags.location(&record.school_name);
                if weighted::location_match(&location, ctx.preferences) < 100.0 {
                    continue;
                }
            }
            if !ctx.preferences.majors.is_empty()
                && weighted::major_match(&record.major_name, ctx.preferences) < 100.0
            {
                continue;
            }
            if weighted::school_level(tags) < min_level {
                continue;
            }

            let features = FeatureVector::build(
                ctx.student.rank,
                ctx.student_score,
                record.rank,
                record.score,
                tags,
                &record.major_name,
                ctx.preferences,
            );
            let probability = round1(clamp_probability(50.0 + features.combination() * 50.0));
            let confidence = round1((80.0 + (probability - 50.0).abs() * 0.5).clamp(60.0, 95.0));
            let (category, risk_level) = probability_bands(probability);

            candidates.push(ScoredCandidate {
                record: record.clone(),
                advantage: advantage(ctx.student.rank, record.rank),
                category,
                risk_level,
                probability,
                total_score: None,
                confidence: Some(confidence),
                rationale: format!(
                    "simulated model: probability {probability:.1}%, confidence {confidence:.1}%"
                ),
                tags,
            });
        }

        if candidates.is_empty() {
            return Err(ScoringError::EmptyPool);
        }

        candidates.sort_by(|a, b| {
            b.probability
                .partial_cmp(&a.probability)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        candidates.truncate(ctx.limit);
        Ok(candidates)
    }
}

/// Banding for this path runs on probability thresholds directly, not the
/// advantage table. The divergence from the weighted scorer is deliberate
/// strategy differentiation.
fn probability_bands(probability: f64) -> (Category, RiskLevel) {
    if probability >= 80.0 {
        (Category::Safety, RiskLevel::Low)
    } else if probability >= 60.0 {
        (Category::Stable, RiskLevel::Medium)
    } else if probability >= 30.0 {
        (Category::Reach, RiskLevel::High)
    } else {
        (Category::Reach, RiskLevel::VeryHigh)
    }
}

fn level_feature(tags: SchoolTags) -> f64 {
    if tags.is_985 {
        1.0
    } else if tags.is_211 {
        0.8
    } else if tags.is_double_first_class {
        0.6
    } else {
        0.3
    }
}

fn major_feature(major_name: &str, preferences: &Preferences) -> f64 {
    let major = major_name.to_lowercase();
    if preferences
        .majors
        .iter()
        .any(|preferred| major.contains(&preferred.to_lowercase()))
    {
        1.0
    } else {
        0.0
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
