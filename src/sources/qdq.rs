use crate::constants::QDQ_SOURCE;
use crate::types::{url_slug, DirectorySource, SearchTarget, StructuralHints};

const BASE_URL: &str = "https://www.qdq.com";

static HINTS: StructuralHints = StructuralHints {
    containers: &["div.listado-item", "article.listado-item", "div.vcard", "div.listing"],
    name_probes: &[".fn", ".org", "h2", "h3"],
    phone_probes: &[".tel", "a[href^=\"tel:\"]"],
    address_probes: &[".adr", ".address"],
    email_probes: &["a[href^=\"mailto:\"]"],
    website_probes: &[],
    own_domain: "qdq.com",
};

pub struct Qdq;

impl DirectorySource for Qdq {
    fn source_name(&self) -> &'static str {
        QDQ_SOURCE
    }

    fn search_urls(&self, target: &SearchTarget) -> Vec<String> {
        let locality = url_slug(&target.locality);
        match &target.category {
            Some(category) => vec![format!("{BASE_URL}/buscar/{}/{locality}/", url_slug(category))],
            None => vec![format!("{BASE_URL}/buscar/empresas/{locality}/")],
        }
    }

    fn hints(&self) -> &StructuralHints {
        &HINTS
    }
}
