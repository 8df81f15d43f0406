//! JSON reporter for machine-readable output

use crate::compare::Tally;
use crate::history::HistoryEntry;
use crate::scoring::{BandSet, Trend, TrendDirection};
use crate::{AnalysisRecord, ComparisonResult, GeoAnalysisRecord, PerformanceReport};
use serde::Serialize;

/// Reporter for JSON output
pub struct JsonReporter {
    /// Whether to pretty-print JSON
    pretty: bool,
}

impl JsonReporter {
    /// Create a new JSON reporter
    pub fn new() -> Self {
        Self { pretty: false }
    }

    /// Enable pretty-printing
    pub fn pretty(mut self) -> Self {
        self.pretty = true;
        self
    }

    /// Analysis with its bands and trend
    pub fn report_analysis(&self, record: &AnalysisRecord, trend: &Trend) -> String {
        self.render(&AnalysisOutput {
            analysis: record,
            bands: BandSet::from_scores(&record.score),
            trend: TrendOutput::from(trend),
        })
    }

    /// Comparison with a winner count over the sub-categories
    pub fn report_comparison(&self, result: &ComparisonResult) -> String {
        self.render(&ComparisonOutput {
            comparison: result,
            tally: result.winner.tally(),
        })
    }

    pub fn report_geo(&self, record: &GeoAnalysisRecord) -> String {
        self.render(record)
    }

    pub fn report_suggestions(&self, seed: &str, suggestions: &[String]) -> String {
        self.render(&SuggestionsOutput { seed, suggestions })
    }

    pub fn report_performance(&self, url: &str, report: &PerformanceReport) -> String {
        self.render(&PerformanceOutput {
            url,
            performance: report,
        })
    }

    /// History entries as an array, newest first
    pub fn report_history(&self, entries: &[HistoryEntry]) -> String {
        self.render(&entries)
    }

    fn render<T: Serialize + ?Sized>(&self, value: &T) -> String {
        if self.pretty {
            serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
        } else {
            serde_json::to_string(value).unwrap_or_else(|_| "{}".to_string())
        }
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize)]
struct AnalysisOutput<'a> {
    analysis: &'a AnalysisRecord,
    bands: BandSet,
    trend: TrendOutput,
}

/// Trend with its delta already signed and rounded ("+1.2", "-0.7", "0.0")
#[derive(Serialize)]
struct TrendOutput {
    direction: TrendDirection,
    #[serde(skip_serializing_if = "Option::is_none")]
    delta: Option<String>,
}

impl From<&Trend> for TrendOutput {
    fn from(trend: &Trend) -> Self {
        Self {
            direction: trend.direction,
            delta: trend.formatted_delta(),
        }
    }
}

#[derive(Serialize)]
struct ComparisonOutput<'a> {
    #[serde(flatten)]
    comparison: &'a ComparisonResult,
    tally: Tally,
}

#[derive(Serialize)]
struct SuggestionsOutput<'a> {
    seed: &'a str,
    suggestions: &'a [String],
}

#[derive(Serialize)]
struct PerformanceOutput<'a> {
    url: &'a str,
    performance: &'a PerformanceReport,
}
