//! Blocking HTTP client for the analysis provider
//!
//! One call per user action, no retries. Every request shares the same
//! timeout; when it elapses the request is abandoned and reported as
//! [`ClientError::Timeout`].

use crate::error::ClientError;
use crate::input::{normalize_url, require_non_empty};
use crate::{
    compare, AnalysisRecord, ComparisonResult, GeoAnalysisRecord, PerformanceReport, WinnerSet,
};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000/api";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Connection settings resolved from config, environment and CLI
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

/// Client for the provider's JSON API
pub struct ProviderClient {
    http: reqwest::blocking::Client,
    base_url: String,
    timeout_secs: u64,
}

#[derive(Serialize)]
struct UrlRequest<'a> {
    url: &'a str,
}

#[derive(Serialize)]
struct CompareRequest<'a> {
    url1: &'a str,
    url2: &'a str,
}

#[derive(Serialize)]
struct GeoRequest<'a> {
    location: &'a str,
    keywords: &'a [String],
}

/// Comparison as sent by the provider; the winner block is recomputed locally
#[derive(Deserialize)]
struct ComparisonBody {
    url1: AnalysisRecord,
    url2: AnalysisRecord,
    /// Kept loosely typed: it is only checked against the computed winners
    #[serde(default)]
    winner: Option<serde_json::Value>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SuggestionsBody {
    List(Vec<String>),
    Wrapped { suggestions: Vec<String> },
}

impl ProviderClient {
    pub fn new(settings: ClientSettings) -> Result<Self, ClientError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(settings.timeout)
            .build()
            .map_err(|e| ClientError::Setup(e.to_string()))?;
        Ok(Self {
            http,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            timeout_secs: settings.timeout.as_secs(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// POST /seo/analyze
    pub fn analyze_url(&self, url: &str) -> Result<AnalysisRecord, ClientError> {
        let url = normalize_url(require_non_empty("url", url)?)?;
        self.post("/seo/analyze", &UrlRequest { url: &url })
    }

    /// POST /seo/compare
    pub fn compare_urls(&self, url1: &str, url2: &str) -> Result<ComparisonResult, ClientError> {
        let url1 = normalize_url(require_non_empty("url1", url1)?)?;
        let url2 = normalize_url(require_non_empty("url2", url2)?)?;
        let body: ComparisonBody = self.post(
            "/seo/compare",
            &CompareRequest {
                url1: &url1,
                url2: &url2,
            },
        )?;

        let winner = compare(&body.url1, &body.url2);
        match body.winner.map(serde_json::from_value::<WinnerSet>) {
            Some(Ok(reported)) if reported != winner => warn!(
                ?reported,
                computed = ?winner,
                "provider winners disagree with scores; using computed winners"
            ),
            Some(Err(e)) => warn!(
                error = %e,
                "provider winner block is unreadable; using computed winners"
            ),
            _ => {}
        }
        Ok(ComparisonResult {
            url1: body.url1,
            url2: body.url2,
            winner,
        })
    }

    /// POST /geo/analyze. `keywords` should already be normalized
    /// (see [`crate::input::parse_keyword_list`]).
    pub fn geo_analysis(
        &self,
        location: &str,
        keywords: &[String],
    ) -> Result<GeoAnalysisRecord, ClientError> {
        let location = require_non_empty("location", location)?;
        if keywords.is_empty() {
            return Err(ClientError::Validation { field: "keywords" });
        }
        self.post("/geo/analyze", &GeoRequest { location, keywords })
    }

    /// GET /keywords/suggestions?seed=...
    pub fn keyword_suggestions(&self, seed: &str) -> Result<Vec<String>, ClientError> {
        let seed = require_non_empty("seed", seed)?;
        let body: SuggestionsBody = self.get("/keywords/suggestions", &[("seed", seed)])?;
        Ok(match body {
            SuggestionsBody::List(list) => list,
            SuggestionsBody::Wrapped { suggestions } => suggestions,
        })
    }

    /// POST /performance/analyze
    pub fn performance_metrics(&self, url: &str) -> Result<PerformanceReport, ClientError> {
        let url = normalize_url(require_non_empty("url", url)?)?;
        self.post("/performance/analyze", &UrlRequest { url: &url })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn post<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T, ClientError> {
        let endpoint = self.endpoint(path);
        debug!(method = "POST", %endpoint, "provider request");
        let started = Instant::now();
        let response = self
            .http
            .post(&endpoint)
            .json(body)
            .send()
            .map_err(|e| ClientError::from_reqwest(e, self.timeout_secs))?;
        self.read(response, started)
    }

    fn get<T: DeserializeOwned>(&self, path: &str, query: &[(&str, &str)]) -> Result<T, ClientError> {
        let endpoint = self.endpoint(path);
        debug!(method = "GET", %endpoint, "provider request");
        let started = Instant::now();
        let response = self
            .http
            .get(&endpoint)
            .query(query)
            .send()
            .map_err(|e| ClientError::from_reqwest(e, self.timeout_secs))?;
        self.read(response, started)
    }

    fn read<T: DeserializeOwned>(
        &self,
        response: reqwest::blocking::Response,
        started: Instant,
    ) -> Result<T, ClientError> {
        let status = response.status();
        let text = response
            .text()
            .map_err(|e| ClientError::from_reqwest(e, self.timeout_secs))?;
        debug!(
            status = status.as_u16(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            bytes = text.len(),
            "provider response"
        );

        if !status.is_success() {
            return Err(ClientError::provider(status.as_u16(), error_message(&text)));
        }

        serde_json::from_str(&text).map_err(|e| ClientError::InvalidResponse(e.to_string()))
    }
}

/// Human-readable message from an error body: `message`, else a string `detail`
fn error_message(body: &str) -> Option<String> {
    let json: serde_json::Value = serde_json::from_str(body).ok()?;
    ["message", "detail"]
        .iter()
        .find_map(|key| json.get(*key).and_then(|v| v.as_str()))
        .map(str::to_string)
}
