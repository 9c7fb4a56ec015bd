use crate::constants;
use crate::error::Result;
use serde::Deserialize;
use std::fs;
use tracing::info;

/// Runtime configuration, read from `config.toml` when present.
/// Every field has a built-in default so the binary runs without one.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub scrape: ScrapeConfig,
    pub places: PlacesConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScrapeConfig {
    /// Localities searched on the directory sources
    pub localities: Vec<String>,
    /// Categories crossed with each locality
    pub categories: Vec<String>,
    /// Minimum interval between outbound requests, in milliseconds
    pub delay_ms: u64,
    /// Write a checkpoint file after this many processed targets
    pub checkpoint_every: usize,
    /// Directory for checkpoint and final files
    pub output_dir: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlacesConfig {
    /// Search radius for each grid cell, in meters
    pub radius_m: u32,
    /// Radius for the text-search phase, in meters
    pub text_radius_m: u32,
    /// Extra continuation pages fetched per nearby search
    pub nearby_page_cap: u32,
    /// Extra continuation pages fetched per text search
    pub text_page_cap: u32,
    /// Delay before each continuation-token call, in milliseconds.
    /// The upstream needs a settling period before a token is valid.
    pub page_delay_ms: u64,
    /// City centers anchoring the search grid
    pub cities: Vec<City>,
    /// Lat/lng offsets applied around each city center
    pub grid_offsets: Vec<f64>,
    /// Whether each grid cell also gets the untyped "general" search
    pub general_search: bool,
    /// Place types crossed with each grid cell
    pub place_types: Vec<String>,
    /// Free-text terms for the text-search phase
    pub search_terms: Vec<String>,
    /// Whether to call the details endpoint for phone/website
    pub detail_lookups: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct City {
    pub name: String,
    pub lat: f64,
    pub lng: f64,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            localities: constants::DEFAULT_LOCALITIES
                .iter()
                .map(|s| s.to_string())
                .collect(),
            categories: constants::DEFAULT_CATEGORIES
                .iter()
                .map(|s| s.to_string())
                .collect(),
            delay_ms: 2000,
            checkpoint_every: 10,
            output_dir: "output".to_string(),
        }
    }
}

impl Default for PlacesConfig {
    fn default() -> Self {
        Self {
            radius_m: 5000,
            text_radius_m: 20000,
            nearby_page_cap: 2,
            text_page_cap: 1,
            page_delay_ms: 2000,
            cities: constants::DEFAULT_CITIES
                .iter()
                .map(|(name, lat, lng)| City {
                    name: name.to_string(),
                    lat: *lat,
                    lng: *lng,
                })
                .collect(),
            grid_offsets: constants::DEFAULT_GRID_OFFSETS.to_vec(),
            general_search: true,
            place_types: constants::DEFAULT_PLACE_TYPES
                .iter()
                .map(|s| s.to_string())
                .collect(),
            search_terms: constants::DEFAULT_SEARCH_TERMS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            detail_lookups: true,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            scrape: ScrapeConfig::default(),
            places: PlacesConfig::default(),
        }
    }
}

impl Config {
    /// Load `config.toml` if it exists, otherwise fall back to defaults.
    pub fn load_or_default() -> Result<Self> {
        let config_path = "config.toml";
        match fs::read_to_string(config_path) {
            Ok(content) => {
                let config: Config = toml::from_str(&content)?;
                info!("Loaded configuration from {}", config_path);
                Ok(config)
            }
            Err(_) => {
                info!("No {} found, using built-in defaults", config_path);
                Ok(Config::default())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_every_field() {
        let config = Config::default();
        assert_eq!(config.scrape.localities.len(), 17);
        assert_eq!(config.scrape.categories.len(), 8);
        assert_eq!(config.scrape.checkpoint_every, 10);
        assert_eq!(config.places.grid_offsets, vec![-0.05, 0.0, 0.05]);
        assert_eq!(config.places.cities.len(), 7);
        assert_eq!(config.places.place_types.len(), 9);
        assert_eq!(config.places.search_terms.len(), 7);
        assert!(config.places.general_search);
        assert!(config.places.detail_lookups);
    }

    #[test]
    fn partial_toml_keeps_defaults_elsewhere() {
        let config: Config = toml::from_str(
            r#"
            [scrape]
            localities = ["Vigo"]
            delay_ms = 500
            "#,
        )
        .unwrap();
        assert_eq!(config.scrape.localities, vec!["Vigo"]);
        assert_eq!(config.scrape.delay_ms, 500);
        // untouched sections keep their defaults
        assert_eq!(config.scrape.categories.len(), 8);
        assert_eq!(config.places.radius_m, 5000);
    }

    #[test]
    fn place_lists_and_cities_are_overridable() {
        let config: Config = toml::from_str(
            r#"
            [places]
            place_types = ["pharmacy"]
            search_terms = ["astilleros"]
            general_search = false

            [[places.cities]]
            name = "Vigo"
            lat = 42.2406
            lng = -8.7207
            "#,
        )
        .unwrap();
        assert_eq!(config.places.place_types, vec!["pharmacy"]);
        assert_eq!(config.places.search_terms, vec!["astilleros"]);
        assert!(!config.places.general_search);
        assert_eq!(config.places.cities.len(), 1);
        assert_eq!(config.places.cities[0].name, "Vigo");
        // untouched keys keep their defaults
        assert_eq!(config.places.nearby_page_cap, 2);
        assert_eq!(config.places.grid_offsets.len(), 3);
    }
}
