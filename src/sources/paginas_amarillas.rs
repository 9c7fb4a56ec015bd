use crate::constants::PAGINAS_AMARILLAS_SOURCE;
use crate::types::{url_slug, DirectorySource, SearchTarget, StructuralHints};

const BASE_URL: &str = "https://www.paginasamarillas.es";

static HINTS: StructuralHints = StructuralHints {
    containers: &["div.listado-item", "div.item", "div.row"],
    name_probes: &["[itemprop=\"name\"]", "a.business-name", "h2", "h3"],
    phone_probes: &["[itemprop=\"telephone\"]", ".tel"],
    address_probes: &["[itemprop=\"address\"]", ".adr"],
    email_probes: &["a[href^=\"mailto:\"]"],
    website_probes: &["a[itemprop=\"url\"]"],
    own_domain: "paginasamarillas",
};

pub struct PaginasAmarillas;

impl DirectorySource for PaginasAmarillas {
    fn source_name(&self) -> &'static str {
        PAGINAS_AMARILLAS_SOURCE
    }

    fn search_urls(&self, target: &SearchTarget) -> Vec<String> {
        let locality = url_slug(&target.locality);
        let category = target
            .category
            .as_deref()
            .map(url_slug)
            .unwrap_or_else(|| "empresas".to_string());
        vec![format!(
            "{BASE_URL}/search/{category}/all-ma/{locality}/all-is/all-ci/all-ba/all-pu/all-nc/1"
        )]
    }

    fn hints(&self) -> &StructuralHints {
        &HINTS
    }
}
