use crate::constants::INFOBEL_SOURCE;
use crate::types::{url_slug, DirectorySource, SearchTarget, StructuralHints};

const BASE_URL: &str = "https://www.infobel.com/es/spain";

static HINTS: StructuralHints = StructuralHints {
    containers: &["div.listing-item", "div.vcard", "div.result-item"],
    name_probes: &[".fn", ".org", ".company-name", "h2", "h3"],
    phone_probes: &[".tel", ".phone"],
    address_probes: &[".adr", ".address"],
    email_probes: &["a[href^=\"mailto:\"]"],
    website_probes: &[],
    own_domain: "infobel.com",
};

pub struct Infobel;

impl DirectorySource for Infobel {
    fn source_name(&self) -> &'static str {
        INFOBEL_SOURCE
    }

    fn search_urls(&self, target: &SearchTarget) -> Vec<String> {
        let locality = url_slug(&target.locality);
        match &target.category {
            Some(category) => vec![format!(
                "{BASE_URL}/business/{}/{}",
                url_slug(category),
                locality
            )],
            None => vec![format!("{BASE_URL}/city/{locality}")],
        }
    }

    fn hints(&self) -> &StructuralHints {
        &HINTS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_and_city_urls() {
        let source = Infobel;
        let with_cat = source.search_urls(&SearchTarget::directory("A Coruña", Some("hoteles")));
        assert_eq!(
            with_cat,
            vec!["https://www.infobel.com/es/spain/business/hoteles/a-coruña"]
        );
        let without = source.search_urls(&SearchTarget::directory("Vigo", None));
        assert_eq!(without, vec!["https://www.infobel.com/es/spain/city/vigo"]);
    }
}
