pub mod infobel;
pub mod paginas_amarillas;
pub mod paxinas_galegas;
pub mod qdq;

use crate::constants;
use crate::types::DirectorySource;

/// Build a directory source by name, `None` for unknown names.
pub fn create_source(name: &str) -> Option<Box<dyn DirectorySource>> {
    match name {
        constants::INFOBEL_SOURCE => Some(Box::new(infobel::Infobel)),
        constants::QDQ_SOURCE => Some(Box::new(qdq::Qdq)),
        constants::PAGINAS_AMARILLAS_SOURCE => {
            Some(Box::new(paginas_amarillas::PaginasAmarillas))
        }
        constants::PAXINAS_GALEGAS_SOURCE => Some(Box::new(paxinas_galegas::PaxinasGalegas)),
        _ => None,
    }
}

/// All built-in sources in their fixed run order.
pub fn all_sources() -> Vec<Box<dyn DirectorySource>> {
    constants::supported_sources()
        .into_iter()
        .filter_map(create_source)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_supported_name_resolves() {
        for name in constants::supported_sources() {
            let source = create_source(name).expect("source should resolve");
            assert_eq!(source.source_name(), name);
        }
        assert!(create_source("yelp").is_none());
    }
}
