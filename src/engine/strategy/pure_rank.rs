//! Deterministic partitioning strategies operating purely on rank order.
//!
//! Scores are ignored entirely; candidates are consumed in ascending-rank
//! iteration order with no secondary sort key, so the first one encountered
//! wins a quota slot.

use super::{advantage_bands, round_probability, ScoredCandidate, ScoringContext, ScoringError, Strategy};
use crate::engine::domain::{advantage, AdmissionRecord, Category};
use crate::engine::window::{REACH_SPAN, SAFETY_SPAN};

/// Share of the slate the balanced flavor reserves for safety picks.
const BALANCED_SAFETY_RATIO: f64 = 0.6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flavor {
    Balanced,
    Conservative,
    Aggressive,
}

pub(crate) struct PureRank {
    flavor: Flavor,
}

impl PureRank {
    pub(crate) fn balanced() -> Self {
        Self {
            flavor: Flavor::Balanced,
        }
    }

    pub(crate) fn conservative() -> Self {
        Self {
            flavor: Flavor::Conservative,
        }
    }

    pub(crate) fn aggressive() -> Self {
        Self {
            flavor: Flavor::Aggressive,
        }
    }
}

type Pick<'a> = (&'a AdmissionRecord, Category);

impl Strategy for PureRank {
    fn score(
        &self,
        ctx: &mut ScoringContext<'_, '_>,
    ) -> Result<Vec<ScoredCandidate>, ScoringError> {
        if ctx.student.rank == 0 {
            return Err(ScoringError::InvalidRank);
        }

        let mut sorted: Vec<&AdmissionRecord> = ctx.records.iter().collect();
        sorted.sort_by_key(|record| record.rank);

        let picks = match self.flavor {
            Flavor::Balanced => balanced(&sorted, ctx.student.rank, ctx.limit),
            Flavor::Conservative => conservative(&sorted, ctx.student.rank, ctx.limit),
            Flavor::Aggressive => aggressive(&sorted, ctx.student.rank, ctx.limit),
        };
        if picks.is_empty() {
            return Err(ScoringError::EmptyPool);
        }

        Ok(picks
            .into_iter()
            .map(|(record, category)| {
                let advantage = advantage(ctx.student.rank, record.rank);
                let (_, risk_level, base) = advantage_bands(advantage);
                ScoredCandidate {
                    record: record.clone(),
                    advantage,
                    category,
                    risk_level,
                    probability: round_probability(base),
                    total_score: None,
                    confidence: None,
                    rationale: format!("rank advantage {advantage:+}"),
                    tags: ctx.tags.tags(&record.school_name),
                }
            })
            .collect())
    }
}

/// Safety and reach quotas filled from their own bands, with cross-pool
/// borrowing (relabeled) when one band runs dry. A record is consumed at
/// most once. Output keeps safety picks first.
fn balanced<'a>(sorted: &[&'a AdmissionRecord], student_rank: u32, top_k: usize) -> Vec<Pick<'a>> {
    let safety_quota = (top_k as f64 * BALANCED_SAFETY_RATIO) as usize;
    let reach_quota = top_k - safety_quota;
    let safety_cap = student_rank.saturating_add(SAFETY_SPAN);
    let reach_floor = student_rank.saturating_sub(REACH_SPAN);

    let safety_pool: Vec<&'a AdmissionRecord> = sorted
        .iter()
        .filter(|record| record.rank > student_rank && record.rank <= safety_cap)
        .copied()
        .collect();
    // Reach picks are taken from the near edge of the band first.
    let reach_pool: Vec<&'a AdmissionRecord> = sorted
        .iter()
        .rev()
        .filter(|record| record.rank <= student_rank && record.rank >= reach_floor)
        .copied()
        .collect();

    let safety_take = safety_quota.min(safety_pool.len());
    let reach_take = reach_quota.min(reach_pool.len());

    let mut picks: Vec<Pick<'a>> = safety_pool[..safety_take]
        .iter()
        .map(|&record| (record, Category::Safety))
        .collect();
    picks.extend(
        reach_pool[reach_take..]
            .iter()
            .take(safety_quota - safety_take)
            .map(|&record| (record, Category::Safety)),
    );
    picks.extend(
        reach_pool[..reach_take]
            .iter()
            .map(|&record| (record, Category::Reach)),
    );
    picks.extend(
        safety_pool[safety_take..]
            .iter()
            .take(reach_quota - reach_take)
            .map(|&record| (record, Category::Reach)),
    );
    picks
}

/// Fills the slate from the safety band, then backfills with anything at or
/// below the student's rank, still labeled safety. Accepted simplification
/// carried over from the recommendation rules.
fn conservative<'a>(
    sorted: &[&'a AdmissionRecord],
    student_rank: u32,
    top_k: usize,
) -> Vec<Pick<'a>> {
    let safety_cap = student_rank.saturating_add(SAFETY_SPAN);

    let mut picks: Vec<Pick<'a>> = Vec::new();
    for &record in sorted {
        if picks.len() >= top_k {
            return picks;
        }
        if record.rank > student_rank && record.rank <= safety_cap {
            picks.push((record, Category::Safety));
        }
    }
    for &record in sorted {
        if picks.len() >= top_k {
            break;
        }
        if record.rank <= student_rank {
            picks.push((record, Category::Safety));
        }
    }
    picks
}

/// Mirror of the conservative flavor for the reach band; backfills with
/// candidates above the student's rank, relabeled reach.
fn aggressive<'a>(
    sorted: &[&'a AdmissionRecord],
    student_rank: u32,
    top_k: usize,
) -> Vec<Pick<'a>> {
    let reach_floor = student_rank.saturating_sub(REACH_SPAN);

    let mut picks: Vec<Pick<'a>> = Vec::new();
    for &record in sorted {
        if picks.len() >= top_k {
            return picks;
        }
        if record.rank <= student_rank && record.rank >= reach_floor {
            picks.push((record, Category::Reach));
        }
    }
    for &record in sorted.iter().rev() {
        if picks.len() >= top_k {
            break;
        }
        if record.rank > student_rank {
            picks.push((record, Category::Reach));
        }
    }
    picks
}
