use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::classify::Category;

/// Tally of a sorting run, built file by file and returned to the
/// caller once the run completes (or is cancelled part-way).
#[derive(Debug, Clone, Serialize)]
pub struct SortReport {
    /// Root of the sorted output tree.
    pub destination: PathBuf,
    pub client: Vec<String>,
    pub server: Vec<String>,
    pub both: Vec<String>,
    pub unknown: Vec<String>,
    /// True when the run stopped early at a cancellation poll. Files
    /// already recorded keep their classification and copy.
    pub cancelled: bool,
    pub started_at: DateTime<Utc>,
}

impl SortReport {
    pub fn new(destination: PathBuf) -> Self {
        Self {
            destination,
            client: Vec::new(),
            server: Vec::new(),
            both: Vec::new(),
            unknown: Vec::new(),
            cancelled: false,
            started_at: Utc::now(),
        }
    }

    /// Record a file under its category, preserving processing order.
    pub fn record(&mut self, category: Category, file_name: impl Into<String>) {
        self.bucket_mut(category).push(file_name.into());
    }

    pub fn files(&self, category: Category) -> &[String] {
        match category {
            Category::Client => &self.client,
            Category::Server => &self.server,
            Category::Both => &self.both,
            Category::Unknown => &self.unknown,
        }
    }

    pub fn count(&self, category: Category) -> usize {
        self.files(category).len()
    }

    /// Total number of files recorded across all categories.
    pub fn total(&self) -> usize {
        Category::ALL.iter().map(|c| self.count(*c)).sum()
    }

    fn bucket_mut(&mut self, category: Category) -> &mut Vec<String> {
        match category {
            Category::Client => &mut self.client,
            Category::Server => &mut self.server,
            Category::Both => &mut self.both,
            Category::Unknown => &mut self.unknown,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_preserve_order_within_a_category() {
        let mut report = SortReport::new(PathBuf::from("/tmp/sorted_mods"));
        report.record(Category::Both, "b.jar");
        report.record(Category::Client, "a.jar");
        report.record(Category::Both, "c.jar");

        assert_eq!(report.both, vec!["b.jar", "c.jar"]);
        assert_eq!(report.client, vec!["a.jar"]);
        assert_eq!(report.count(Category::Both), 2);
        assert_eq!(report.total(), 3);
        assert!(!report.cancelled);
    }

    #[test]
    fn serializes_category_lists_for_machine_consumers() {
        let mut report = SortReport::new(PathBuf::from("/tmp/sorted_mods"));
        report.record(Category::Unknown, "mystery.jar");

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["unknown"][0], "mystery.jar");
        assert_eq!(json["cancelled"], false);
    }
}
