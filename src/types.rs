use serde::{Deserialize, Serialize};

/// One unit of search work: a locality plus an optional category, or a
/// grid cell (coordinate) plus an optional place type.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchTarget {
    pub locality: String,
    pub category: Option<String>,
    pub coord: Option<(f64, f64)>,
}

impl SearchTarget {
    pub fn directory(locality: &str, category: Option<&str>) -> Self {
        Self {
            locality: locality.to_string(),
            category: category.map(|c| c.to_string()),
            coord: None,
        }
    }

    pub fn grid(locality: &str, lat: f64, lng: f64, place_type: Option<&str>) -> Self {
        Self {
            locality: locality.to_string(),
            category: place_type.map(|t| t.to_string()),
            coord: Some((lat, lng)),
        }
    }
}

/// Fetched content for one target, consumed once by the extractor.
#[derive(Debug, Clone)]
pub struct RawPage {
    pub target: SearchTarget,
    pub content: PageContent,
    /// Continuation token when the upstream response was paginated
    pub page_token: Option<String>,
}

#[derive(Debug, Clone)]
pub enum PageContent {
    Markup(String),
    Payload(serde_json::Value),
}

/// The canonical output unit. Only `name` is required; every other
/// field stays empty when the source did not expose it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BusinessRecord {
    pub source: String,
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
    pub address: Option<String>,
    pub locality: String,
    pub category: Option<String>,
    /// Upstream-assigned identifier (e.g. a place id); the stronger
    /// dedup key when present
    pub external_id: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub rating: Option<f64>,
    /// Comma-joined place types as reported by the API source
    pub types: Option<String>,
    pub user_ratings_total: Option<u64>,
}

/// Ordered field probes for the structural extraction strategy.
/// Each list is tried in order; the first selector yielding non-empty
/// text wins for that field.
#[derive(Debug, Clone)]
pub struct StructuralHints {
    /// Selectors that fence one business listing each
    pub containers: &'static [&'static str],
    pub name_probes: &'static [&'static str],
    pub phone_probes: &'static [&'static str],
    pub address_probes: &'static [&'static str],
    /// Probes whose `href` carries the value (`mailto:` links)
    pub email_probes: &'static [&'static str],
    /// Probes whose `href` carries the value (external links)
    pub website_probes: &'static [&'static str],
    /// Substring that marks a link as pointing back at the source itself
    pub own_domain: &'static str,
}

/// Core trait every directory site must implement.
pub trait DirectorySource: Send + Sync {
    /// Unique identifier for this source, used in the `source` column
    fn source_name(&self) -> &'static str;

    /// Candidate search URLs for one target, tried in order until one
    /// answers with a success status. The templates are best-effort
    /// guesses; a site that matches none simply yields no page.
    fn search_urls(&self, target: &SearchTarget) -> Vec<String>;

    /// Structural fingerprint of this source's listing markup
    fn hints(&self) -> &StructuralHints;
}

/// Lowercase a locality or category for use in a URL path segment.
pub fn url_slug(text: &str) -> String {
    text.trim().to_lowercase().replace(' ', "-")
}
