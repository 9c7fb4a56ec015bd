use super::{PlaceDetails, PlacePage, PlaceSearch};
use crate::error::{Result, ScraperError};
use crate::pacing::RateGate;
use async_trait::async_trait;
use serde_json::Value;
use std::env;
use tracing::debug;

const API_KEY_ENV: &str = "GOOGLE_PLACES_API_KEY";
const BASE_URL: &str = "https://maps.googleapis.com/maps/api/place";

/// Client for the Google Places web service. Construction fails when
/// the credential is missing, which aborts the run before any target
/// is processed.
pub struct GooglePlacesClient {
    client: reqwest::Client,
    api_key: String,
    gate: RateGate,
}

impl GooglePlacesClient {
    pub fn from_env(gate: RateGate) -> Result<Self> {
        let api_key = env::var(API_KEY_ENV)
            .map_err(|_| ScraperError::Config(format!("{API_KEY_ENV} is not set")))?;
        if api_key.trim().is_empty() {
            return Err(ScraperError::Config(format!("{API_KEY_ENV} is empty")));
        }
        Ok(Self {
            client: reqwest::Client::new(),
            api_key,
            gate,
        })
    }

    async fn get_json(&self, url: String, params: Vec<(&str, String)>) -> Result<Value> {
        self.gate.acquire().await;
        let payload: Value = self
            .client
            .get(url)
            .query(&params)
            .query(&[("key", self.api_key.as_str()), ("language", "es")])
            .send()
            .await?
            .json()
            .await?;

        match payload["status"].as_str().unwrap_or("") {
            "OK" | "ZERO_RESULTS" => Ok(payload),
            status @ ("OVER_QUERY_LIMIT" | "REQUEST_DENIED") => Err(ScraperError::Quota {
                message: format!("{status}: {}", error_detail(&payload)),
            }),
            status => Err(ScraperError::Api {
                message: format!("{status}: {}", error_detail(&payload)),
            }),
        }
    }

    fn page_from(payload: Value) -> PlacePage {
        let results = payload["results"]
            .as_array()
            .cloned()
            .unwrap_or_default();
        let next_page_token = payload["next_page_token"].as_str().map(|s| s.to_string());
        PlacePage {
            results,
            next_page_token,
        }
    }
}

fn error_detail(payload: &Value) -> String {
    payload["error_message"].as_str().unwrap_or("no detail").to_string()
}

#[async_trait]
impl PlaceSearch for GooglePlacesClient {
    async fn nearby_search(
        &self,
        lat: f64,
        lng: f64,
        radius_m: u32,
        place_type: Option<&str>,
        page_token: Option<&str>,
    ) -> Result<PlacePage> {
        let mut params = vec![
            ("location", format!("{lat},{lng}")),
            ("radius", radius_m.to_string()),
        ];
        if let Some(t) = place_type {
            params.push(("type", t.to_string()));
        }
        if let Some(token) = page_token {
            // a token call carries only the cursor
            params = vec![("pagetoken", token.to_string())];
        }
        let payload = self
            .get_json(format!("{BASE_URL}/nearbysearch/json"), params)
            .await?;
        debug!(lat, lng, "Nearby search page fetched");
        Ok(Self::page_from(payload))
    }

    async fn text_search(
        &self,
        query: &str,
        lat: f64,
        lng: f64,
        radius_m: u32,
        page_token: Option<&str>,
    ) -> Result<PlacePage> {
        let params = match page_token {
            Some(token) => vec![
                ("query", query.to_string()),
                ("pagetoken", token.to_string()),
            ],
            None => vec![
                ("query", query.to_string()),
                ("location", format!("{lat},{lng}")),
                ("radius", radius_m.to_string()),
            ],
        };
        let payload = self
            .get_json(format!("{BASE_URL}/textsearch/json"), params)
            .await?;
        Ok(Self::page_from(payload))
    }

    async fn details(&self, place_id: &str) -> Result<PlaceDetails> {
        let params = vec![
            ("place_id", place_id.to_string()),
            (
                "fields",
                "formatted_phone_number,international_phone_number,website".to_string(),
            ),
        ];
        let payload = self
            .get_json(format!("{BASE_URL}/details/json"), params)
            .await?;
        let result = &payload["result"];
        Ok(PlaceDetails {
            phone: result["formatted_phone_number"].as_str().map(|s| s.to_string()),
            intl_phone: result["international_phone_number"]
                .as_str()
                .map(|s| s.to_string()),
            website: result["website"].as_str().map(|s| s.to_string()),
        })
    }
}
