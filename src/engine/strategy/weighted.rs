//! Primary scorer: five weighted factors plus the rank advantage band table.

use super::{
    advantage_bands, round_probability, ScoredCandidate, ScoringContext, ScoringError, Strategy,
};
use crate::engine::domain::{advantage, EliteTier, Preferences, SchoolTags};

const WEIGHT_RANK: f64 = 0.40;
const WEIGHT_SCORE: f64 = 0.25;
const WEIGHT_LEVEL: f64 = 0.20;
const WEIGHT_MAJOR: f64 = 0.10;
const WEIGHT_LOCATION: f64 = 0.05;

const LEVEL_985: f64 = 20.0;
const LEVEL_211: f64 = 15.0;
const LEVEL_DOUBLE_FIRST_CLASS: f64 = 10.0;

pub(crate) struct WeightedMultiFactor;

struct FactorScores {
    rank: f64,
    score: f64,
    level: f64,
    major: f64,
    location: f64,
}

impl FactorScores {
    fn weighted_total(&self) -> f64 {
        self.rank * WEIGHT_RANK
            + self.score * WEIGHT_SCORE
            + self.level * WEIGHT_LEVEL
            + self.major * WEIGHT_MAJOR
            + self.location * WEIGHT_LOCATION
    }
}

impl Strategy for WeightedMultiFactor {
    fn score(
        &self,
        ctx: &mut ScoringContext<'_, '_>,
    ) -> Result<Vec<ScoredCandidate>, ScoringError> {
        if ctx.student.rank == 0 {
            return Err(ScoringError::InvalidRank);
        }

        let min_level = minimum_level_score(ctx.preferences);
        let mut candidates = Vec::new();

        for record in ctx.records {
            if !ctx.window.contains(record.rank) {
                continue;
            }

            let tags = ctx.tags.tags(&record.school_name);

            // Location and major preferences are hard excludes when set; a
            // school with an unknown location cannot confirm a match and is
            // excluded too.
            let location_score = if ctx.preferences.locations.is_empty() {
                50.0
            } else {
                let location = ctx.tags.location(&record.school_name);
                location_match(&location, ctx.preferences)
            };
            if !ctx.preferences.locations.is_empty() && location_score < 100.0 {
                continue;
            }
            if !ctx.preferences.majors.is_empty()
                && major_match(&record.major_name, ctx.preferences) < 100.0
            {
                continue;
            }
            // The elite-tier preference is a minimum on the level factor, not
            // an exact tag match.
            if school_level(tags) < min_level {
                continue;
            }

            let factors = FactorScores {
                rank: rank_match(ctx.student.rank, record.rank),
                score: score_match(ctx.student_score, record.score),
                level: school_level(tags),
                major: major_match(&record.major_name, ctx.preferences),
                location: location_score,
            };
            let total = factors.weighted_total();

            let advantage = advantage(ctx.student.rank, record.rank);
            let (category, risk_level, base) = advantage_bands(advantage);
            let boosted = if total >= 70.0 {
                base * 1.10
            } else if total >= 50.0 {
                base * 1.05
            } else {
                base
            };

            candidates.push(ScoredCandidate {
                record: record.clone(),
                advantage,
                category,
                risk_level,
                probability: round_probability(boosted),
                total_score: Some((total * 100.0).round() / 100.0),
                confidence: None,
                rationale: format!("composite score {total:.1}, rank advantage {advantage:+}"),
                tags,
            });
        }

        if candidates.is_empty() {
            return Err(ScoringError::EmptyPool);
        }

        candidates.sort_by(|a, b| {
            b.total_score
                .partial_cmp(&a.total_score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        candidates.truncate(ctx.limit);
        Ok(candidates)
    }
}

pub(crate) fn rank_match(student_rank: u32, admission_rank: u32) -> f64 {
    if student_rank == 0 {
        return 0.0;
    }
    let gap = (i64::from(student_rank) - i64::from(admission_rank)).abs() as f64;
    (100.0 - gap / f64::from(student_rank) * 100.0).max(0.0)
}

/// Every point of score gap costs two factor points.
pub(crate) fn score_match(student_score: i32, admission_score: i32) -> f64 {
    if student_score <= 0 {
        return 0.0;
    }
    let gap = f64::from((student_score - admission_score).abs());
    (100.0 - gap * 2.0).max(0.0)
}

pub(crate) fn school_level(tags: SchoolTags) -> f64 {
    if tags.is_985 {
        LEVEL_985
    } else if tags.is_211 {
        LEVEL_211
    } else if tags.is_double_first_class {
        LEVEL_DOUBLE_FIRST_CLASS
    } else {
        0.0
    }
}

/// 100 on a preferred-major substring hit, 30 baseline otherwise (including
/// when no preference is set).
pub(crate) fn major_match(major_name: &str, preferences: &Preferences) -> f64 {
    if preferences.majors.is_empty() {
        return 30.0;
    }
    if preferences
        .majors
        .iter()
        .any(|preferred| major_name.contains(preferred.as_str()))
    {
        100.0
    } else {
        30.0
    }
}

/// 100 on a location hit, 20 on a confirmed miss, 50 when no preference is
/// set or the school's location is unknown.
pub(crate) fn location_match(location: &str, preferences: &Preferences) -> f64 {
    if preferences.locations.is_empty() || location.is_empty() {
        return 50.0;
    }
    if preferences
        .locations
        .iter()
        .any(|preferred| location.contains(preferred.as_str()))
    {
        100.0
    } else {
        20.0
    }
}

/// Minimum level-factor score implied by the tier preferences; 0 when none
/// are set.
pub(crate) fn minimum_level_score(preferences: &Preferences) -> f64 {
    preferences
        .tiers
        .iter()
        .map(|tier| match tier {
            EliteTier::Elite985 => LEVEL_985,
            EliteTier::Elite211 => LEVEL_211,
            EliteTier::DoubleFirstClass => LEVEL_DOUBLE_FIRST_CLASS,
        })
        .fold(0.0, f64::max)
}
