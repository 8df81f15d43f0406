//! seolens: SEO/GEO analysis client
//!
//! This library holds the typed contract of the analysis provider, classifies
//! scores into severity bands, tracks trends and compares two analyses with a
//! deterministic per-category winner.

pub mod client;
pub mod compare;
pub mod config;
pub mod error;
pub mod form;
pub mod history;
pub mod input;
pub mod reporter;
pub mod scoring;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::marker::PhantomData;

pub use compare::{compare, Winner, WinnerSet};
pub use scoring::{classify, trend, Band, Trend, TrendDirection};

/// Scores reported by the provider for a single URL (each 0-10)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeoScore {
    /// Provider summary score; never recomputed from the sub-scores
    pub overall: f64,
    pub metadata: f64,
    pub links: f64,
    pub content: f64,
    pub performance: f64,
}

impl SeoScore {
    /// Score for one category
    pub fn get(&self, category: Category) -> f64 {
        match category {
            Category::Overall => self.overall,
            Category::Metadata => self.metadata,
            Category::Links => self.links,
            Category::Content => self.content,
            Category::Performance => self.performance,
        }
    }
}

/// Score categories, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Overall,
    Metadata,
    Links,
    Content,
    Performance,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Overall,
        Category::Metadata,
        Category::Links,
        Category::Content,
        Category::Performance,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Category::Overall => "Overall",
            Category::Metadata => "Metadata",
            Category::Links => "Links",
            Category::Content => "Content",
            Category::Performance => "Performance",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// The result of analyzing a single URL
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRecord {
    /// Analyzed URL as reported by the provider
    pub url: String,
    pub score: SeoScore,
    pub metadata: MetadataStats,
    pub links: LinkStats,
    pub content: ContentStats,
    pub performance: PerformanceStats,
    /// Recommendations in priority order
    #[serde(default)]
    pub recommendations: Vec<String>,
    /// ISO-8601 time of analysis
    pub timestamp: String,
}

impl AnalysisRecord {
    /// Parsed analysis time, if the provider sent a valid RFC 3339 timestamp
    pub fn analyzed_at(&self) -> Option<chrono::DateTime<chrono::FixedOffset>> {
        chrono::DateTime::parse_from_rfc3339(&self.timestamp).ok()
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataStats {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub keywords: Vec<String>,
    pub title_length: u32,
    pub description_length: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LinkStats {
    pub internal: u32,
    pub external: u32,
    pub broken: u32,
    pub nofollow: u32,
}

impl LinkStats {
    pub fn total(&self) -> u32 {
        self.internal + self.external
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentStats {
    pub word_count: u32,
    /// Keyword -> density, in provider order
    #[serde(default)]
    pub keyword_density: OrderedMap<f64>,
    pub headings: HeadingCounts,
    pub images: ImageStats,
}

/// Heading counts by level. Iteration is always h1..h6.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HeadingCounts {
    #[serde(default)]
    pub h1: u32,
    #[serde(default)]
    pub h2: u32,
    #[serde(default)]
    pub h3: u32,
    #[serde(default)]
    pub h4: u32,
    #[serde(default)]
    pub h5: u32,
    #[serde(default)]
    pub h6: u32,
}

impl HeadingCounts {
    pub fn levels(&self) -> [(&'static str, u32); 6] {
        [
            ("h1", self.h1),
            ("h2", self.h2),
            ("h3", self.h3),
            ("h4", self.h4),
            ("h5", self.h5),
            ("h6", self.h6),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageStats {
    pub total: u32,
    pub with_alt: u32,
    pub without_alt: u32,
}

impl ImageStats {
    /// `with_alt + without_alt == total`
    pub fn is_consistent(&self) -> bool {
        self.with_alt as u64 + self.without_alt as u64 == self.total as u64
    }
}

/// Page timings. Paint and load times are seconds, input delay is milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceStats {
    pub load_time: f64,
    pub first_contentful_paint: f64,
    pub largest_contentful_paint: f64,
    pub cumulative_layout_shift: f64,
    pub first_input_delay: f64,
}

/// The result of a local (GEO) analysis for one location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeoAnalysisRecord {
    pub location: String,
    #[serde(default)]
    pub keywords: Vec<KeywordMetric>,
    #[serde(default)]
    pub local_rankings: Vec<LocalRanking>,
    pub reviews: ReviewStats,
    pub nap: NapStats,
    #[serde(default)]
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordMetric {
    pub keyword: String,
    pub volume: u64,
    /// 0-100
    pub difficulty: u8,
    /// Cost per click
    pub cpc: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalRanking {
    pub keyword: String,
    /// 1-based search position
    pub position: u32,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ReviewStats {
    pub total: u64,
    /// Average rating, usually 0-5
    pub average: f64,
    /// Platform -> review count, in provider order
    #[serde(default)]
    pub platforms: OrderedMap<u64>,
}

/// Name/Address/Phone consistency. An empty field means "not found".
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NapStats {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub phone: String,
    /// Consistency percentage (0-100)
    pub consistency: u8,
}

/// Two analyses and their per-category winners
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub url1: AnalysisRecord,
    pub url2: AnalysisRecord,
    pub winner: WinnerSet,
}

impl ComparisonResult {
    /// Build a comparison whose winners come from the comparator
    pub fn new(url1: AnalysisRecord, url2: AnalysisRecord) -> Self {
        let winner = compare(&url1, &url2);
        Self { url1, url2, winner }
    }
}

/// Provider-defined result of the performance-only endpoint
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceReport {
    #[serde(default)]
    pub load_time: Option<f64>,
    #[serde(default)]
    pub first_contentful_paint: Option<f64>,
    #[serde(default)]
    pub largest_contentful_paint: Option<f64>,
    #[serde(default)]
    pub cumulative_layout_shift: Option<f64>,
    #[serde(default)]
    pub first_input_delay: Option<f64>,
    /// Lighthouse-style category scores (0-100)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub performance_score: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accessibility_score: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub best_practices_score: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seo_score: Option<u8>,
    /// Any other field the provider returned
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// String-keyed map that keeps insertion (response) order
#[derive(Debug, Clone, PartialEq)]
pub struct OrderedMap<V>(Vec<(String, V)>);

impl<V> OrderedMap<V> {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Insert or replace. A replaced key keeps its original position.
    pub fn insert(&mut self, key: impl Into<String>, value: V) {
        let key = key.into();
        match self.0.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.0.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<V> Default for OrderedMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Into<String>, V> FromIterator<(K, V)> for OrderedMap<V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

impl<V: Serialize> Serialize for OrderedMap<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (k, v) in &self.0 {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

impl<'de, V: Deserialize<'de>> Deserialize<'de> for OrderedMap<V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct OrderedMapVisitor<V>(PhantomData<V>);

        impl<'de, V: Deserialize<'de>> Visitor<'de> for OrderedMapVisitor<V> {
            type Value = OrderedMap<V>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map with string keys")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut map = OrderedMap::new();
                while let Some((key, value)) = access.next_entry::<String, V>()? {
                    map.insert(key, value);
                }
                Ok(map)
            }
        }

        deserializer.deserialize_map(OrderedMapVisitor(PhantomData))
    }
}

/// Public API: analyze a single URL against the configured provider.
///
/// * `url` - user input; normalized before the request
/// * `config` - resolved client settings (base URL, timeout)
pub fn analyze_url(url: &str, config: &config::Config) -> Result<AnalysisRecord, error::ClientError> {
    let client = client::ProviderClient::new(config.client_settings())?;
    client.analyze_url(url)
}
