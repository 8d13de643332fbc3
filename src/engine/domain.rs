use serde::{Deserialize, Serialize};

/// Row exactly as the external record source hands it over. Rank and score
/// arrive as text because upstream sheets routinely carry "N/A" cells; the
/// engine validates them during candidate extraction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawAdmissionRow {
    pub school_name: String,
    pub major_name: String,
    pub rank: String,
    pub score: String,
    pub year: i32,
}

impl RawAdmissionRow {
    /// Parse into a validated record. A non-numeric or non-positive rank makes
    /// the row unusable; an unparsable score defaults to 0.
    pub fn parse(&self) -> Option<AdmissionRecord> {
        let rank = self.rank.trim().parse::<u32>().ok().filter(|rank| *rank > 0)?;
        let score = self.score.trim().parse::<i32>().unwrap_or(0);
        Some(AdmissionRecord {
            school_name: self.school_name.trim().to_string(),
            major_name: self.major_name.trim().to_string(),
            rank,
            score,
            year: self.year,
        })
    }
}

/// Validated historical admission record. `rank` uniquely orders
/// competitiveness: smaller means more competitive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdmissionRecord {
    pub school_name: String,
    pub major_name: String,
    pub rank: u32,
    pub score: i32,
    pub year: i32,
}

/// Student seeking a slate. The score is optional; runs substitute the
/// configured default when it is absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentProfile {
    pub rank: u32,
    pub score: Option<i32>,
}

impl StudentProfile {
    pub fn with_rank(rank: u32) -> Self {
        Self { rank, score: None }
    }

    pub fn score_or(&self, default: i32) -> i32 {
        self.score.unwrap_or(default)
    }
}

/// Government prestige designations usable as a preference filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EliteTier {
    Elite985,
    Elite211,
    DoubleFirstClass,
}

/// Caller preferences. Every field is optional; an empty list means the
/// corresponding filter is not applied. Majors and locations match by
/// substring.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    pub majors: Vec<String>,
    pub locations: Vec<String>,
    pub tiers: Vec<EliteTier>,
}

impl Preferences {
    pub fn is_empty(&self) -> bool {
        self.majors.is_empty() && self.locations.is_empty() && self.tiers.is_empty()
    }
}

/// Institutional attribute flags looked up by school name. Unknown schools
/// carry the all-false default set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchoolTags {
    pub is_985: bool,
    pub is_211: bool,
    pub is_double_first_class: bool,
    pub is_private: bool,
    pub is_independent: bool,
}

impl SchoolTags {
    /// Every 985 institution also belongs to the 211 project.
    pub fn normalized(mut self) -> Self {
        if self.is_985 {
            self.is_211 = true;
        }
        self
    }
}

/// Risk tier of a slate entry, least to most competitive relative to the
/// student.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Safety,
    Stable,
    Reach,
}

impl Category {
    pub const fn label(self) -> &'static str {
        match self {
            Category::Safety => "safety",
            Category::Stable => "stable",
            Category::Reach => "reach",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    VeryLow,
    Low,
    Medium,
    High,
    VeryHigh,
}

impl RiskLevel {
    pub const fn label(self) -> &'static str {
        match self {
            RiskLevel::VeryLow => "very_low",
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
            RiskLevel::VeryHigh => "very_high",
        }
    }
}

/// Signed margin between a candidate cohort's admission rank and the
/// student's rank. Positive means the student sits above the cutoff: the
/// admitted cohort is ranked numerically worse, so the pick is safer.
pub fn advantage(student_rank: u32, admission_rank: u32) -> i64 {
    i64::from(admission_rank) - i64::from(student_rank)
}

/// One entry of the recommendation slate, produced fresh per request and
/// never persisted by the core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationItem {
    pub school_name: String,
    pub major_name: String,
    pub admission_score: i32,
    pub admission_rank: u32,
    pub advantage: i64,
    pub category: Category,
    pub risk_level: RiskLevel,
    /// Always clamped to [1, 99].
    pub admission_probability: f64,
    /// Only emitted by the simulated-model strategy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    pub rationale: String,
    pub tags: SchoolTags,
    /// True when a fallback tier produced this entry instead of live scoring.
    pub degraded: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(rank: &str, score: &str) -> RawAdmissionRow {
        RawAdmissionRow {
            school_name: " Hefei University ".to_string(),
            major_name: "Software Engineering".to_string(),
            rank: rank.to_string(),
            score: score.to_string(),
            year: 2025,
        }
    }

    #[test]
    fn parse_trims_and_validates() {
        let record = raw(" 4321 ", "588").parse().expect("valid row parses");
        assert_eq!(record.school_name, "Hefei University");
        assert_eq!(record.rank, 4321);
        assert_eq!(record.score, 588);
    }

    #[test]
    fn parse_rejects_non_numeric_rank() {
        assert!(raw("N/A", "588").parse().is_none());
        assert!(raw("0", "588").parse().is_none());
    }

    #[test]
    fn parse_defaults_missing_score() {
        let record = raw("4321", "").parse().expect("row parses");
        assert_eq!(record.score, 0);
    }

    #[test]
    fn tags_normalization_promotes_985_to_211() {
        let tags = SchoolTags {
            is_985: true,
            ..SchoolTags::default()
        }
        .normalized();
        assert!(tags.is_211);
    }

    #[test]
    fn advantage_is_positive_above_the_cutoff() {
        assert_eq!(advantage(5000, 5050), 50);
        assert_eq!(advantage(5000, 4850), -150);
    }
}
