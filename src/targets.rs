use crate::config::{PlacesConfig, ScrapeConfig};
use crate::types::SearchTarget;

/// Targets for the directory sources: every locality crossed with every
/// category, preceded by one category-less target per locality.
/// Order follows the configuration lists and is stable across runs;
/// checkpoint numbering depends on it.
pub fn directory_targets(scrape: &ScrapeConfig) -> Vec<SearchTarget> {
    let mut targets = Vec::new();
    for locality in &scrape.localities {
        targets.push(SearchTarget::directory(locality, None));
        for category in &scrape.categories {
            targets.push(SearchTarget::directory(locality, Some(category.as_str())));
        }
    }
    targets
}

/// Grid targets for the nearby-search phase: the offset pattern around
/// each configured city center, crossed with the untyped "general"
/// search (when enabled) and the configured place-type list.
pub fn grid_targets(places: &PlacesConfig) -> Vec<SearchTarget> {
    let mut targets = Vec::new();
    for city in &places.cities {
        for lat_offset in &places.grid_offsets {
            for lng_offset in &places.grid_offsets {
                let lat = city.lat + lat_offset;
                let lng = city.lng + lng_offset;
                if places.general_search {
                    targets.push(SearchTarget::grid(&city.name, lat, lng, None));
                }
                for place_type in &places.place_types {
                    targets.push(SearchTarget::grid(
                        &city.name,
                        lat,
                        lng,
                        Some(place_type.as_str()),
                    ));
                }
            }
        }
    }
    targets
}

/// Text-search targets: every configured city crossed with the
/// configured search-term list.
pub fn text_targets(places: &PlacesConfig) -> Vec<SearchTarget> {
    let mut targets = Vec::new();
    for city in &places.cities {
        for term in &places.search_terms {
            targets.push(SearchTarget::grid(
                &city.name,
                city.lat,
                city.lng,
                Some(term.as_str()),
            ));
        }
    }
    targets
}
