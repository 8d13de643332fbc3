use std::collections::HashMap;
use std::sync::Arc;

use crate::config::EngineConfig;
use crate::engine::domain::{RawAdmissionRow, SchoolTags, StudentProfile};
use crate::engine::service::RecommendationService;
use crate::engine::source::{RecordSource, SourceError, TagSource};

pub(super) fn row(school: &str, major: &str, rank: &str, score: &str) -> RawAdmissionRow {
    RawAdmissionRow {
        school_name: school.to_string(),
        major_name: major.to_string(),
        rank: rank.to_string(),
        score: score.to_string(),
        year: 2025,
    }
}

/// One row per (rank, score) pair, each under a distinct synthetic school.
pub(super) fn table(entries: &[(u32, i32)]) -> Vec<RawAdmissionRow> {
    entries
        .iter()
        .map(|(rank, score)| {
            row(
                &format!("School {rank}"),
                "General Studies",
                &rank.to_string(),
                &score.to_string(),
            )
        })
        .collect()
}

pub(super) struct MemoryRecords {
    pub rows: Vec<RawAdmissionRow>,
}

impl RecordSource for MemoryRecords {
    fn admission_rows(&self, _year: i32) -> Result<Vec<RawAdmissionRow>, SourceError> {
        Ok(self.rows.clone())
    }
}

pub(super) struct UnavailableRecords;

impl RecordSource for UnavailableRecords {
    fn admission_rows(&self, _year: i32) -> Result<Vec<RawAdmissionRow>, SourceError> {
        Err(SourceError::Unavailable("feed offline".to_string()))
    }
}

#[derive(Default)]
pub(super) struct MemoryTags {
    pub tags: HashMap<String, SchoolTags>,
    pub locations: HashMap<String, String>,
}

impl TagSource for MemoryTags {
    fn school_tags(&self, school: &str) -> SchoolTags {
        self.tags.get(school).copied().unwrap_or_default()
    }

    fn school_location(&self, school: &str) -> String {
        self.locations.get(school).cloned().unwrap_or_default()
    }
}

pub(super) fn service(
    rows: Vec<RawAdmissionRow>,
) -> RecommendationService<MemoryRecords, MemoryTags> {
    service_with_tags(rows, MemoryTags::default())
}

pub(super) fn service_with_tags(
    rows: Vec<RawAdmissionRow>,
    tags: MemoryTags,
) -> RecommendationService<MemoryRecords, MemoryTags> {
    RecommendationService::new(
        Arc::new(MemoryRecords { rows }),
        Arc::new(tags),
        EngineConfig::default(),
    )
}

pub(super) fn student(rank: u32) -> StudentProfile {
    StudentProfile {
        rank,
        score: Some(550),
    }
}
