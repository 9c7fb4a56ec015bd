use crate::constants::PAXINAS_GALEGAS_SOURCE;
use crate::types::{url_slug, DirectorySource, SearchTarget, StructuralHints};

const BASE_URL: &str = "https://www.paxinasgalegas.es";

static HINTS: StructuralHints = StructuralHints {
    // listing containers carry assorted class names on this site
    containers: &[
        "div.empresa",
        "article.empresa",
        "li.empresa",
        "div.listing",
        "div.result",
        "div.negocio",
    ],
    name_probes: &["h2", "h3", "h4", "strong", "a"],
    phone_probes: &[],
    address_probes: &[],
    email_probes: &["a[href^=\"mailto:\"]"],
    website_probes: &[],
    own_domain: "paxinasgalegas",
};

pub struct PaxinasGalegas;

impl DirectorySource for PaxinasGalegas {
    fn source_name(&self) -> &'static str {
        PAXINAS_GALEGAS_SOURCE
    }

    /// This site's search endpoints were never verified, so several
    /// plausible templates are tried in order.
    fn search_urls(&self, target: &SearchTarget) -> Vec<String> {
        let locality = url_slug(&target.locality);
        match &target.category {
            Some(category) => {
                let category = url_slug(category);
                vec![
                    format!("{BASE_URL}/empresas/{category}/{locality}"),
                    format!("{BASE_URL}/buscar?q={category}+{locality}"),
                ]
            }
            None => vec![
                format!("{BASE_URL}/buscar?q={locality}"),
                format!("{BASE_URL}/empresas/{locality}"),
                format!("{BASE_URL}/localidad/{locality}"),
                format!("{BASE_URL}/search?location={locality}"),
            ],
        }
    }

    fn hints(&self) -> &StructuralHints {
        &HINTS
    }
}
