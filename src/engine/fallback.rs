//! Degraded-mode slate generation.
//!
//! Tier 1 relaxes the rank window to an absolute score band over whatever
//! records are on hand. Tier 2 emits a small synthetic catalog when the
//! record source is entirely unavailable. Both tiers mark every item
//! degraded so downstream consumers can tell fallback data from live data,
//! and both draw from a caller-seeded RNG so degraded runs stay reproducible.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;

use super::domain::{advantage, AdmissionRecord, Category, RecommendationItem, RiskLevel, SchoolTags};

/// Score band below the student's score still worth listing.
const BAND_BELOW: i32 = 80;
/// Score band above the student's score still worth listing.
const BAND_ABOVE: i32 = 40;

/// Tier-1 fallback: sample up to `limit` records whose admission line sits
/// within the score band, graded by the gap to that line.
pub(crate) fn score_band_slate(
    records: &[AdmissionRecord],
    student_rank: u32,
    student_score: i32,
    limit: usize,
    rng: &mut StdRng,
) -> Vec<RecommendationItem> {
    let min_score = student_score - BAND_BELOW;
    let max_score = student_score + BAND_ABOVE;

    let mut pool: Vec<&AdmissionRecord> = records
        .iter()
        .filter(|record| record.score >= min_score && record.score <= max_score)
        .collect();
    if pool.is_empty() {
        return Vec::new();
    }
    pool.shuffle(rng);
    pool.truncate(limit);

    pool.into_iter()
        .map(|record| {
            let gap = student_score - record.score;
            let (category, probability) = score_gap_grade(gap);
            RecommendationItem {
                school_name: record.school_name.clone(),
                major_name: record.major_name.clone(),
                admission_score: record.score,
                admission_rank: record.rank,
                advantage: advantage(student_rank, record.rank),
                category,
                risk_level: risk_for_probability(probability),
                admission_probability: probability,
                confidence: None,
                rationale: format!("score-band fallback, {gap:+} points against the admission line"),
                tags: SchoolTags::default(),
                degraded: true,
            }
        })
        .collect()
}

/// Grade by margin above the admission line: comfortably above is a safety
/// pick, at par is stable, below the line is a reach.
fn score_gap_grade(gap: i32) -> (Category, f64) {
    let (category, probability) = if gap >= 20 {
        (Category::Safety, 85.0 + f64::from(((gap - 20) / 2).min(10)))
    } else if gap >= 10 {
        (Category::Safety, 70.0 + f64::from((gap - 10).min(15)))
    } else if gap >= 0 {
        (Category::Stable, 50.0 + f64::from((gap * 2).min(20)))
    } else {
        (Category::Reach, 30.0 + f64::from(((gap + 20) / 2).min(20)))
    };
    (category, probability.clamp(1.0, 99.0))
}

fn risk_for_probability(probability: f64) -> RiskLevel {
    if probability >= 70.0 {
        RiskLevel::Low
    } else if probability >= 30.0 {
        RiskLevel::Medium
    } else {
        RiskLevel::High
    }
}

/// Flagship institutions used by the tier-2 synthetic catalog. All carry the
/// top prestige designations.
const FLAGSHIP_SCHOOLS: &[(&str, &str)] = &[
    ("Tsinghua University", "Beijing"),
    ("Peking University", "Beijing"),
    ("Fudan University", "Shanghai"),
    ("Shanghai Jiao Tong University", "Shanghai"),
    ("Zhejiang University", "Zhejiang"),
    ("Nanjing University", "Jiangsu"),
    ("Wuhan University", "Hubei"),
    ("Huazhong University of Science and Technology", "Hubei"),
    ("Sun Yat-sen University", "Guangdong"),
    ("Sichuan University", "Sichuan"),
];

const CATALOG_MAJORS: &[&str] = &[
    "Computer Science and Technology",
    "Software Engineering",
    "Artificial Intelligence",
    "Data Science and Big Data Technology",
    "Electronic Information Engineering",
    "Automation",
    "Clinical Medicine",
    "Pharmacy",
    "Finance",
    "Economics",
];

/// Tier-2 fallback: a placeholder slate drawn from the synthetic catalog.
/// Admission rank and score are unknown here and stay zeroed; the degraded
/// flag keeps this from ever passing as live data.
pub(crate) fn synthetic_slate(limit: usize, rng: &mut StdRng) -> Vec<RecommendationItem> {
    (0..limit)
        .map(|_| {
            let (school, province) = FLAGSHIP_SCHOOLS[rng.gen_range(0..FLAGSHIP_SCHOOLS.len())];
            let major = CATALOG_MAJORS[rng.gen_range(0..CATALOG_MAJORS.len())];
            let probability = f64::from(rng.gen_range(30..=95));
            let category = if probability >= 70.0 {
                Category::Safety
            } else if probability >= 40.0 {
                Category::Stable
            } else {
                Category::Reach
            };
            RecommendationItem {
                school_name: school.to_string(),
                major_name: major.to_string(),
                admission_score: 0,
                admission_rank: 0,
                advantage: 0,
                category,
                risk_level: risk_for_probability(probability),
                admission_probability: probability,
                confidence: None,
                rationale: format!("synthetic placeholder ({province}), record source unavailable"),
                tags: SchoolTags {
                    is_985: true,
                    is_211: true,
                    is_double_first_class: true,
                    is_private: false,
                    is_independent: false,
                },
                degraded: true,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn gap_grading_covers_every_band() {
        assert_eq!(score_gap_grade(40), (Category::Safety, 95.0));
        assert_eq!(score_gap_grade(20), (Category::Safety, 85.0));
        assert_eq!(score_gap_grade(12), (Category::Safety, 72.0));
        assert_eq!(score_gap_grade(0), (Category::Stable, 50.0));
        assert_eq!(score_gap_grade(-20), (Category::Reach, 30.0));
        assert_eq!(score_gap_grade(-200), (Category::Reach, 1.0));
    }

    #[test]
    fn synthetic_slate_is_seed_deterministic() {
        let mut a = StdRng::seed_from_u64(7);
        let mut b = StdRng::seed_from_u64(7);
        let first = synthetic_slate(6, &mut a);
        let second = synthetic_slate(6, &mut b);
        assert_eq!(first, second);
        assert!(first.iter().all(|item| item.degraded));
    }

    #[test]
    fn empty_score_band_yields_nothing() {
        let mut rng = StdRng::seed_from_u64(0);
        let record = AdmissionRecord {
            school_name: "School".to_string(),
            major_name: "Major".to_string(),
            rank: 9000,
            score: 300,
            year: 2025,
        };
        let items = score_band_slate(&[record], 5000, 550, 10, &mut rng);
        assert!(items.is_empty());
    }
}
