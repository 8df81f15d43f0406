//! Analysis history - the last few analyzed URLs in .seolens-history.json
//!
//! Loaded explicitly at start, newest entry first, oldest dropped once the
//! list grows past [`MAX_ENTRIES`].

use crate::AnalysisRecord;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const MAX_ENTRIES: usize = 10;

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct HistoryFile {
    /// Newest first
    pub entries: Vec<HistoryEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub url: String,
    /// Overall score at the time of analysis
    pub score: f64,
    pub timestamp: String,
}

/// Load history (a missing or unreadable file is an empty history)
pub fn load_history(path: &Path) -> HistoryFile {
    if let Ok(content) = fs::read_to_string(path) {
        if let Ok(history) = serde_json::from_str::<HistoryFile>(&content) {
            return history;
        }
    }
    HistoryFile::default()
}

pub fn save_history(path: &Path, history: &HistoryFile) -> std::io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let content = serde_json::to_string_pretty(history).unwrap_or_else(|_| "{}".to_string());
    fs::write(path, content)
}

/// Most recent overall score recorded for a URL
pub fn previous_score(history: &HistoryFile, url: &str) -> Option<f64> {
    history
        .entries
        .iter()
        .find(|e| same_url(&e.url, url))
        .map(|e| e.score)
}

/// Push an analysis to the front and evict the oldest past the limit
pub fn record_analysis(history: &mut HistoryFile, record: &AnalysisRecord) {
    history.entries.insert(
        0,
        HistoryEntry {
            url: record.url.clone(),
            score: record.score.overall,
            timestamp: chrono::Utc::now().to_rfc3339(),
        },
    );
    history.entries.truncate(MAX_ENTRIES);
}

fn same_url(a: &str, b: &str) -> bool {
    a.trim_end_matches('/') == b.trim_end_matches('/')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{record, score};

    fn analysis(url: &str, overall: f64) -> AnalysisRecord {
        record(url, score(overall, 5.0, 5.0, 5.0, 5.0))
    }

    #[test]
    fn previous_score_empty_history_returns_none() {
        let history = HistoryFile::default();
        assert_eq!(previous_score(&history, "https://example.com"), None);
    }

    #[test]
    fn previous_score_uses_newest_entry() {
        let mut history = HistoryFile::default();
        record_analysis(&mut history, &analysis("https://example.com", 6.0));
        record_analysis(&mut history, &analysis("https://other.example", 3.0));
        record_analysis(&mut history, &analysis("https://example.com", 7.5));

        assert_eq!(previous_score(&history, "https://example.com"), Some(7.5));
        assert_eq!(previous_score(&history, "https://other.example"), Some(3.0));
        assert_eq!(previous_score(&history, "https://missing.example"), None);
    }

    #[test]
    fn previous_score_ignores_trailing_slash() {
        let mut history = HistoryFile::default();
        record_analysis(&mut history, &analysis("https://example.com/", 6.0));
        assert_eq!(previous_score(&history, "https://example.com"), Some(6.0));
    }

    #[test]
    fn record_analysis_newest_first() {
        let mut history = HistoryFile::default();
        record_analysis(&mut history, &analysis("https://a.example", 1.0));
        record_analysis(&mut history, &analysis("https://b.example", 2.0));
        assert_eq!(history.entries[0].url, "https://b.example");
        assert_eq!(history.entries[1].url, "https://a.example");
    }

    #[test]
    fn record_analysis_evicts_oldest_past_limit() {
        let mut history = HistoryFile::default();
        for i in 0..12 {
            record_analysis(&mut history, &analysis(&format!("https://{}.example", i), 5.0));
        }
        assert_eq!(history.entries.len(), MAX_ENTRIES);
        assert_eq!(history.entries[0].url, "https://11.example");
        assert_eq!(history.entries[MAX_ENTRIES - 1].url, "https://2.example");
    }

    #[test]
    fn save_and_load_history_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("history.json");
        let mut history = HistoryFile::default();
        record_analysis(&mut history, &analysis("https://example.com", 8.5));

        save_history(&path, &history).unwrap();
        let loaded = load_history(&path);

        assert_eq!(loaded.entries.len(), 1);
        assert_eq!(loaded.entries[0].score, 8.5);
        assert!(chrono::DateTime::parse_from_rfc3339(&loaded.entries[0].timestamp).is_ok());
    }

    #[test]
    fn load_history_returns_empty_for_nonexistent_file() {
        let dir = tempfile::tempdir().unwrap();
        let history = load_history(&dir.path().join("missing.json"));
        assert!(history.entries.is_empty());
    }

    #[test]
    fn load_history_returns_empty_for_corrupt_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");
        std::fs::write(&path, "not valid json {{{").unwrap();
        assert!(load_history(&path).entries.is_empty());
    }
}
