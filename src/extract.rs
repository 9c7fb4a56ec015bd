use crate::constants::ADDRESS_KEYWORDS;
use crate::types::{BusinessRecord, PageContent, RawPage, StructuralHints};
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use tracing::debug;

/// Spanish nine-digit phone written as three groups of three, with
/// optional space/dot/hyphen separators
pub static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b\d{3}[\s.-]?\d{3}[\s.-]?\d{3}\b").unwrap());

pub static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").unwrap());

/// Tag set that fences one candidate record in the heuristic pass
static BLOCK_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("div, article, li, section").unwrap());

static HEADING_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("h1, h2, h3, h4, strong, b, a").unwrap());

static LINK_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("a[href]").unwrap());

/// Extract candidate records from one fetched page. Two strategies are
/// attempted in order; the first one that yields anything wins:
/// structural probes against the source's known markup, then the
/// phone-anchored text heuristic. Records without a name are dropped
/// here and never reach the aggregator.
pub fn extract_records(
    page: &RawPage,
    source_name: &str,
    hints: &StructuralHints,
) -> Vec<BusinessRecord> {
    let body = match &page.content {
        PageContent::Markup(body) => body,
        // API payloads are mapped directly in the places module
        PageContent::Payload(_) => return Vec::new(),
    };

    let document = Html::parse_document(body);

    let mut records = structural_pass(&document, page, source_name, hints);
    if records.is_empty() {
        records = heuristic_pass(&document, page, source_name, hints);
    }

    debug!(
        source = source_name,
        locality = %page.target.locality,
        count = records.len(),
        "Extracted candidate records"
    );
    records
}

fn structural_pass(
    document: &Html,
    page: &RawPage,
    source_name: &str,
    hints: &StructuralHints,
) -> Vec<BusinessRecord> {
    let mut records = Vec::new();
    for container in hints.containers {
        let selector = Selector::parse(container).unwrap();
        for block in document.select(&selector) {
            if let Some(record) = record_from_block(&block, page, source_name, hints) {
                records.push(record);
            }
        }
        if !records.is_empty() {
            break;
        }
    }
    records
}

fn record_from_block(
    block: &ElementRef,
    page: &RawPage,
    source_name: &str,
    hints: &StructuralHints,
) -> Option<BusinessRecord> {
    let name = probe_text(block, hints.name_probes)?;
    let block_text = element_text(block);

    let phone = probe_text(block, hints.phone_probes)
        .or_else(|| PHONE_RE.find(&block_text).map(|m| m.as_str().to_string()));
    let email = probe_href(block, hints.email_probes)
        .map(|href| href.trim_start_matches("mailto:").to_string())
        .or_else(|| EMAIL_RE.find(&block_text).map(|m| m.as_str().to_string()));
    let website = probe_external_href(block, hints.website_probes, hints.own_domain);
    let address =
        probe_text(block, hints.address_probes).or_else(|| address_line(&block_text));

    Some(BusinessRecord {
        source: source_name.to_string(),
        name,
        phone,
        email,
        website,
        address,
        locality: page.target.locality.clone(),
        category: page.target.category.clone(),
        ..BusinessRecord::default()
    })
}

fn heuristic_pass(
    document: &Html,
    page: &RawPage,
    source_name: &str,
    hints: &StructuralHints,
) -> Vec<BusinessRecord> {
    let mut records = Vec::new();
    for block in phone_blocks(document) {
        let block_text = element_text(&block);
        let Some(name) = first_heading_text(&block) else {
            continue;
        };

        let phone = PHONE_RE.find(&block_text).map(|m| m.as_str().to_string());
        let email = EMAIL_RE.find(&block_text).map(|m| m.as_str().to_string());
        let website = probe_external_href(&block, &["a[href^=\"http\"]"], hints.own_domain);
        let address = address_line(&block_text);

        records.push(BusinessRecord {
            source: source_name.to_string(),
            name,
            phone,
            email,
            website,
            address,
            locality: page.target.locality.clone(),
            category: page.target.category.clone(),
            ..BusinessRecord::default()
        });
    }
    records
}

/// Innermost div/article/li/section blocks whose text carries a phone
/// number. A page with no such block at all falls back to the document
/// root, so a bare fragment still yields its one candidate.
fn phone_blocks<'a>(document: &'a Html) -> Vec<ElementRef<'a>> {
    let mut blocks: Vec<ElementRef<'a>> = Vec::new();
    for block in document.select(&BLOCK_SELECTOR) {
        if !PHONE_RE.is_match(&element_text(&block)) {
            continue;
        }
        let has_matching_child = block
            .select(&BLOCK_SELECTOR)
            .any(|child| PHONE_RE.is_match(&element_text(&child)));
        if !has_matching_child {
            blocks.push(block);
        }
    }
    if blocks.is_empty() {
        let root = document.root_element();
        if PHONE_RE.is_match(&element_text(&root)) {
            blocks.push(root);
        }
    }
    blocks
}

fn element_text(element: &ElementRef) -> String {
    element.text().collect::<Vec<_>>().join("\n")
}

/// First probe selector whose match has non-empty text wins.
fn probe_text(block: &ElementRef, probes: &[&str]) -> Option<String> {
    for probe in probes {
        let selector = Selector::parse(probe).unwrap();
        if let Some(element) = block.select(&selector).next() {
            let text = element.text().collect::<String>().trim().to_string();
            if !text.is_empty() {
                return Some(text);
            }
        }
    }
    None
}

fn probe_href(block: &ElementRef, probes: &[&str]) -> Option<String> {
    for probe in probes {
        let selector = Selector::parse(probe).unwrap();
        if let Some(element) = block.select(&selector).next() {
            if let Some(href) = element.value().attr("href") {
                if !href.is_empty() {
                    return Some(href.to_string());
                }
            }
        }
    }
    None
}

/// First link leading away from the source's own site.
fn probe_external_href(block: &ElementRef, probes: &[&str], own_domain: &str) -> Option<String> {
    for probe in probes {
        let selector = Selector::parse(probe).unwrap();
        for element in block.select(&selector) {
            if let Some(href) = element.value().attr("href") {
                if href.starts_with("http") && !href.contains(own_domain) {
                    return Some(href.to_string());
                }
            }
        }
    }
    // the generic scan used when a source defines no website probes
    if probes.is_empty() {
        for element in block.select(&LINK_SELECTOR) {
            if let Some(href) = element.value().attr("href") {
                if href.starts_with("http") && !href.contains(own_domain) {
                    return Some(href.to_string());
                }
            }
        }
    }
    None
}

fn first_heading_text(block: &ElementRef) -> Option<String> {
    for element in block.select(&HEADING_SELECTOR) {
        let text = element.text().collect::<String>().trim().to_string();
        if !text.is_empty() {
            return Some(text);
        }
    }
    None
}

/// First line of text containing a street keyword, returned verbatim.
fn address_line(text: &str) -> Option<String> {
    for line in text.lines() {
        if ADDRESS_KEYWORDS.iter().any(|kw| line.contains(kw)) {
            let line = line.trim();
            if !line.is_empty() {
                return Some(line.to_string());
            }
        }
    }
    None
}
