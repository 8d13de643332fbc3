use std::collections::HashMap;

use super::domain::{RawAdmissionRow, SchoolTags};

/// Error enumeration for record source failures.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("record source unavailable: {0}")]
    Unavailable(String),
}

/// Read-only feed of historical admission rows for one year. An `Ok` with an
/// empty vec means "no data"; an `Err` means the source itself is down.
pub trait RecordSource: Send + Sync {
    fn admission_rows(&self, year: i32) -> Result<Vec<RawAdmissionRow>, SourceError>;
}

/// Institutional attribute lookup. Unknown schools answer with all-false tags
/// and an empty location string, never an error.
pub trait TagSource: Send + Sync {
    fn school_tags(&self, school: &str) -> SchoolTags;
    fn school_location(&self, school: &str) -> String;
}

/// Per-run memoization over a tag source. Built fresh for every
/// recommendation run so stale tags cannot leak across requests.
pub struct TagCache<'a> {
    source: &'a dyn TagSource,
    tags: HashMap<String, SchoolTags>,
    locations: HashMap<String, String>,
}

impl<'a> TagCache<'a> {
    pub fn new(source: &'a dyn TagSource) -> Self {
        Self {
            source,
            tags: HashMap::new(),
            locations: HashMap::new(),
        }
    }

    pub fn tags(&mut self, school: &str) -> SchoolTags {
        if let Some(tags) = self.tags.get(school) {
            return *tags;
        }
        let tags = self.source.school_tags(school).normalized();
        self.tags.insert(school.to_string(), tags);
        tags
    }

    pub fn location(&mut self, school: &str) -> String {
        if let Some(location) = self.locations.get(school) {
            return location.clone();
        }
        let location = self.source.school_location(school);
        self.locations.insert(school.to_string(), location.clone());
        location
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    struct CountingTags {
        lookups: AtomicUsize,
    }

    impl TagSource for CountingTags {
        fn school_tags(&self, _school: &str) -> SchoolTags {
            self.lookups.fetch_add(1, Ordering::Relaxed);
            SchoolTags {
                is_985: true,
                ..SchoolTags::default()
            }
        }

        fn school_location(&self, _school: &str) -> String {
            String::new()
        }
    }

    #[test]
    fn cache_memoizes_and_normalizes() {
        let source = CountingTags {
            lookups: AtomicUsize::new(0),
        };
        let mut cache = TagCache::new(&source);

        let first = cache.tags("Tsinghua University");
        let second = cache.tags("Tsinghua University");

        assert!(first.is_211, "normalization applies inside the cache");
        assert_eq!(first, second);
        assert_eq!(source.lookups.load(Ordering::Relaxed), 1);
    }
}
