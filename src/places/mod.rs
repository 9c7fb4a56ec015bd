pub mod google;

use crate::config::PlacesConfig;
use crate::constants::PLACES_SOURCE;
use crate::dedupe::RunState;
use crate::error::{Result, ScraperError};
use crate::types::{BusinessRecord, PageContent, RawPage, SearchTarget};
use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

/// One result page from the place-search upstream.
#[derive(Debug, Clone)]
pub struct PlacePage {
    pub results: Vec<Value>,
    pub next_page_token: Option<String>,
}

/// The subset of place details this pipeline cares about.
#[derive(Debug, Clone, Default)]
pub struct PlaceDetails {
    pub phone: Option<String>,
    pub intl_phone: Option<String>,
    pub website: Option<String>,
}

/// Opaque place-search capability. The real client talks to the
/// provider; tests substitute a mock.
#[async_trait]
pub trait PlaceSearch: Send + Sync {
    async fn nearby_search(
        &self,
        lat: f64,
        lng: f64,
        radius_m: u32,
        place_type: Option<&str>,
        page_token: Option<&str>,
    ) -> Result<PlacePage>;

    async fn text_search(
        &self,
        query: &str,
        lat: f64,
        lng: f64,
        radius_m: u32,
        page_token: Option<&str>,
    ) -> Result<PlacePage>;

    async fn details(&self, place_id: &str) -> Result<PlaceDetails>;
}

/// Nearby search for one grid cell, following continuation tokens up
/// to the configured cap. Upstream tokens need a settling delay before
/// they are accepted, hence the fixed sleep before each token call.
/// Any failure is contained: the pages fetched so far are returned.
pub async fn fetch_nearby_pages(
    client: &dyn PlaceSearch,
    target: &SearchTarget,
    config: &PlacesConfig,
) -> Vec<RawPage> {
    let (lat, lng) = match target.coord {
        Some(coord) => coord,
        None => return Vec::new(),
    };

    let mut pages = Vec::new();
    let mut token: Option<String> = None;
    let mut extra_pages = 0;

    loop {
        if token.is_some() {
            tokio::time::sleep(Duration::from_millis(config.page_delay_ms)).await;
        }
        let result = client
            .nearby_search(lat, lng, config.radius_m, target.category.as_deref(), token.as_deref())
            .await;
        match result {
            Ok(page) => {
                token = page.next_page_token.clone();
                pages.push(RawPage {
                    target: target.clone(),
                    content: PageContent::Payload(Value::Array(page.results)),
                    page_token: token.clone(),
                });
                if token.is_none() || extra_pages >= config.nearby_page_cap {
                    break;
                }
                extra_pages += 1;
            }
            Err(e) => {
                warn!(locality = %target.locality, "Nearby search failed: {}", e);
                break;
            }
        }
    }
    pages
}

/// Text search for one (city, term) target, same pagination contract.
pub async fn fetch_text_pages(
    client: &dyn PlaceSearch,
    target: &SearchTarget,
    config: &PlacesConfig,
) -> Vec<RawPage> {
    let (lat, lng) = match target.coord {
        Some(coord) => coord,
        None => return Vec::new(),
    };
    let term = match &target.category {
        Some(term) => term,
        None => return Vec::new(),
    };
    let query = format!("{} en {}", term, target.locality);

    let mut pages = Vec::new();
    let mut token: Option<String> = None;
    let mut extra_pages = 0;

    loop {
        if token.is_some() {
            tokio::time::sleep(Duration::from_millis(config.page_delay_ms)).await;
        }
        match client
            .text_search(&query, lat, lng, config.text_radius_m, token.as_deref())
            .await
        {
            Ok(page) => {
                token = page.next_page_token.clone();
                pages.push(RawPage {
                    target: target.clone(),
                    content: PageContent::Payload(Value::Array(page.results)),
                    page_token: token.clone(),
                });
                if token.is_none() || extra_pages >= config.text_page_cap {
                    break;
                }
                extra_pages += 1;
            }
            Err(e) => {
                warn!(query = %query, "Text search failed: {}", e);
                break;
            }
        }
    }
    pages
}

/// Direct field mapping from one payload entry to a record. Entries
/// without a name resolve to nothing.
pub fn place_to_record(entry: &Value, target: &SearchTarget) -> Option<BusinessRecord> {
    let name = entry["name"].as_str()?.trim();
    if name.is_empty() {
        return None;
    }
    let address = entry["vicinity"]
        .as_str()
        .or_else(|| entry["formatted_address"].as_str())
        .map(|s| s.to_string());
    let types = entry["types"].as_array().map(|list| {
        list.iter()
            .filter_map(|t| t.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    });

    Some(BusinessRecord {
        source: PLACES_SOURCE.to_string(),
        name: name.to_string(),
        address,
        locality: target.locality.clone(),
        category: target.category.clone(),
        external_id: entry["place_id"].as_str().map(|s| s.to_string()),
        latitude: entry["geometry"]["location"]["lat"].as_f64(),
        longitude: entry["geometry"]["location"]["lng"].as_f64(),
        rating: entry["rating"].as_f64(),
        types,
        user_ratings_total: entry["user_ratings_total"].as_u64(),
        ..BusinessRecord::default()
    })
}

/// Map one payload page into records, skipping entries whose place id
/// was already accepted (so their detail lookups are never issued),
/// and enrich the rest with phone/website from the details endpoint.
/// A quota or transport failure on details leaves those fields empty;
/// the record is still emitted.
pub async fn records_from_page(
    client: &dyn PlaceSearch,
    page: &RawPage,
    state: &RunState,
    config: &PlacesConfig,
) -> Vec<BusinessRecord> {
    let entries = match &page.content {
        PageContent::Payload(Value::Array(entries)) => entries,
        _ => return Vec::new(),
    };

    let mut records = Vec::new();
    for entry in entries {
        let Some(mut record) = place_to_record(entry, &page.target) else {
            continue;
        };
        if let Some(id) = &record.external_id {
            if state.has_external_id(id) {
                continue;
            }
            if config.detail_lookups {
                match client.details(id).await {
                    Ok(details) => {
                        record.phone = details.phone.or(details.intl_phone);
                        record.website = details.website;
                    }
                    Err(ScraperError::Quota { message }) => {
                        warn!(place_id = %id, "Detail lookup rejected: {}", message);
                    }
                    Err(e) => {
                        debug!(place_id = %id, "Detail lookup failed: {}", e);
                    }
                }
            }
        }
        records.push(record);
    }
    records
}
