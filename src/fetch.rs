use crate::pacing::RateGate;
use crate::types::{DirectorySource, PageContent, RawPage, SearchTarget};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, USER_AGENT};
use std::time::Duration;
use tracing::{debug, warn};

const BROWSER_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) \
     Chrome/91.0.4472.124 Safari/537.36";

/// Fetches directory pages. All transport failures are contained here:
/// a target that cannot be fetched yields zero pages and the run moves
/// on to the next target.
pub struct Fetcher {
    client: reqwest::Client,
    gate: RateGate,
}

impl Fetcher {
    pub fn new(gate: RateGate) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(BROWSER_USER_AGENT));
        headers.insert(
            ACCEPT,
            HeaderValue::from_static(
                "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
            ),
        );
        headers.insert(
            ACCEPT_LANGUAGE,
            HeaderValue::from_static("es-ES,es;q=0.9,en;q=0.8"),
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self { client, gate }
    }

    /// Try a source's candidate URLs in order and wrap the first
    /// success body as one RawPage. The URL templates are guesses, so
    /// misses are expected and logged at debug level only.
    pub async fn fetch_directory_page(
        &self,
        source: &dyn DirectorySource,
        target: &SearchTarget,
    ) -> Option<RawPage> {
        for url in source.search_urls(target) {
            self.gate.acquire().await;
            match self.client.get(&url).send().await {
                Ok(response) if response.status().is_success() => match response.text().await {
                    Ok(body) => {
                        debug!(source = source.source_name(), url = %url, "Fetched listing page");
                        return Some(RawPage {
                            target: target.clone(),
                            content: PageContent::Markup(body),
                            page_token: None,
                        });
                    }
                    Err(e) => {
                        warn!(source = source.source_name(), url = %url, "Failed to read body: {}", e);
                    }
                },
                Ok(response) => {
                    debug!(
                        source = source.source_name(),
                        url = %url,
                        status = response.status().as_u16(),
                        "Candidate URL missed"
                    );
                }
                Err(e) => {
                    warn!(source = source.source_name(), url = %url, "Request failed: {}", e);
                }
            }
        }
        None
    }
}
