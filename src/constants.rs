/// Source name constants to keep the `source` column consistent across
/// the codebase and the exported files.

// Directory sources
pub const INFOBEL_SOURCE: &str = "infobel";
pub const QDQ_SOURCE: &str = "qdq";
pub const PAGINAS_AMARILLAS_SOURCE: &str = "paginas_amarillas";
pub const PAXINAS_GALEGAS_SOURCE: &str = "paxinas_galegas";

// Place-search API source
pub const PLACES_SOURCE: &str = "places_api";

/// Get all supported directory source names
pub fn supported_sources() -> Vec<&'static str> {
    vec![
        INFOBEL_SOURCE,
        QDQ_SOURCE,
        PAGINAS_AMARILLAS_SOURCE,
        PAXINAS_GALEGAS_SOURCE,
    ]
}

/// Default Galician localities searched when none are configured
pub const DEFAULT_LOCALITIES: &[&str] = &[
    "A Coruña",
    "Santiago de Compostela",
    "Vigo",
    "Ourense",
    "Lugo",
    "Pontevedra",
    "Ferrol",
    "Vilagarcía de Arousa",
    "Narón",
    "Oleiros",
    "Carballo",
    "Redondela",
    "Cangas",
    "Marín",
    "Ponteareas",
    "Lalín",
    "Monforte de Lemos",
];

/// Default business categories for the directory sources
pub const DEFAULT_CATEGORIES: &[&str] = &[
    "restaurantes",
    "hoteles",
    "construccion",
    "informatica",
    "salud",
    "educacion",
    "transporte",
    "industria",
];

/// Galician city centers used to anchor the place-search grid
pub const DEFAULT_CITIES: &[(&str, f64, f64)] = &[
    ("A Coruña", 43.3623, -8.4115),
    ("Santiago de Compostela", 42.8782, -8.5448),
    ("Vigo", 42.2406, -8.7207),
    ("Ourense", 42.3367, -7.8648),
    ("Lugo", 43.0096, -7.5567),
    ("Pontevedra", 42.4298, -8.6446),
    ("Ferrol", 43.4847, -8.2330),
];

/// Lat/lng offsets applied around each city center (3x3 grid)
pub const DEFAULT_GRID_OFFSETS: &[f64] = &[-0.05, 0.0, 0.05];

/// Place types crossed with each grid cell, on top of the untyped
/// "general" search
pub const DEFAULT_PLACE_TYPES: &[&str] = &[
    "restaurant",
    "store",
    "lodging",
    "health",
    "finance",
    "shopping_mall",
    "car_repair",
    "gas_station",
    "pharmacy",
];

/// Free-text terms used in the second place-search phase
pub const DEFAULT_SEARCH_TERMS: &[&str] = &[
    "empresas",
    "industria",
    "fábrica",
    "oficinas",
    "servicios",
    "consultoria",
    "tecnologia",
];

/// Street keywords that mark a text line as a probable address
pub const ADDRESS_KEYWORDS: &[&str] = &[
    "Rúa", "Rua", "Avenida", "Av.", "Plaza", "Praza", "C/", "Calle", "Estrada", "Polígono",
];
