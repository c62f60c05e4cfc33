//! Page access. The only place that talks to the profile website.
//!
//! A `PageLoader` opens one `PageSession` per run. The session owns whatever resource
//! backs the page (an HTTP body, a browser tab) and must be closed by the caller on
//! every exit path; `scrape_profile` does this.

use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, USER_AGENT};
use reqwest::{Client, Response};
use thiserror::Error;
use tracing::{debug, warn};

/// Desktop Chrome user agent sent when none is configured.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

const PAGE_TIMEOUT: Duration = Duration::from_secs(30);

/// Bodies past this size are cut off; profile headers sit near the top of the page.
const MAX_PAGE_BYTES: usize = 5 * 1024 * 1024;

#[derive(Debug, Error)]
pub enum ExtractionError {
    /// The profile page could not be loaded at all. Fatal for the run.
    #[error("Profile page unreachable: {0}")]
    SourceUnreachable(String),
}

/// A loaded page, scoped to a single extraction run.
#[async_trait]
pub trait PageSession: Send {
    /// Current markup of the page, including anything materialized by scrolling.
    async fn html(&mut self) -> Result<String, ExtractionError>;

    /// Whether the page keeps loading content after the initial response.
    /// Static sessions skip the settle wait and scroll steps entirely.
    fn is_dynamic(&self) -> bool;

    /// Scrolls to `fraction` of the page height (0.0 top, 1.0 bottom). Best effort.
    async fn scroll_to(&mut self, fraction: f32) -> Result<(), ExtractionError>;

    /// Releases the underlying resource. Must be safe to call exactly once per session.
    async fn close(&mut self);
}

#[async_trait]
pub trait PageLoader: Send + Sync {
    async fn open(&self, url: &str) -> Result<Box<dyn PageSession>, ExtractionError>;
}

// ────────────────────────────────────────────────────────────────────────────
// HTTP loader
// ────────────────────────────────────────────────────────────────────────────

/// Fetches the page over plain HTTP with browser-like headers.
///
/// The response body is the whole page: nothing is rendered client-side, so the
/// session reports itself as static.
#[derive(Clone)]
pub struct HttpPageLoader {
    client: Client,
}

impl HttpPageLoader {
    pub fn new(user_agent: &str) -> anyhow::Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(user_agent).context("SCRAPE_USER_AGENT is not a valid header")?,
        );
        headers.insert(
            ACCEPT,
            HeaderValue::from_static(
                "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
            ),
        );
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));

        let client = Client::builder()
            .default_headers(headers)
            .timeout(PAGE_TIMEOUT)
            .build()
            .context("Failed to build page HTTP client")?;

        Ok(Self { client })
    }
}

#[async_trait]
impl PageLoader for HttpPageLoader {
    async fn open(&self, url: &str) -> Result<Box<dyn PageSession>, ExtractionError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ExtractionError::SourceUnreachable(format!("{url}: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            warn!("Profile page {url} returned {status}");
            return Err(ExtractionError::SourceUnreachable(format!(
                "{url}: HTTP {status}"
            )));
        }

        let body = read_capped(response, MAX_PAGE_BYTES)
            .await
            .map_err(|e| ExtractionError::SourceUnreachable(format!("{url}: {e}")))?;
        debug!("Fetched {} bytes from {url}", body.len());

        Ok(Box::new(HttpPageSession { body: Some(body) }))
    }
}

/// Reads at most `limit` bytes of the body, decoding it as lossy UTF-8.
async fn read_capped(mut response: Response, limit: usize) -> Result<String, reqwest::Error> {
    if let Some(len) = response.content_length().filter(|len| *len > limit as u64) {
        warn!("Page body is {len} bytes; reading only the first {limit}");
    }

    let mut buf: Vec<u8> = Vec::new();
    while let Some(chunk) = response.chunk().await? {
        let room = limit - buf.len();
        if chunk.len() >= room {
            buf.extend_from_slice(&chunk[..room]);
            if chunk.len() > room {
                warn!("Page body truncated at {limit} bytes");
            }
            break;
        }
        buf.extend_from_slice(&chunk);
    }
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

struct HttpPageSession {
    body: Option<String>,
}

#[async_trait]
impl PageSession for HttpPageSession {
    async fn html(&mut self) -> Result<String, ExtractionError> {
        self.body
            .clone()
            .ok_or_else(|| ExtractionError::SourceUnreachable("session already closed".into()))
    }

    fn is_dynamic(&self) -> bool {
        false
    }

    async fn scroll_to(&mut self, _fraction: f32) -> Result<(), ExtractionError> {
        Ok(())
    }

    async fn close(&mut self) {
        self.body = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_http_session_is_static_and_closes() {
        let mut session = HttpPageSession {
            body: Some("<h1>Jane</h1>".into()),
        };
        assert!(!session.is_dynamic());
        assert_eq!(session.html().await.unwrap(), "<h1>Jane</h1>");

        session.close().await;
        assert!(session.html().await.is_err());
    }

    async fn serve_body(body: String) -> String {
        use axum::{routing::get, Router};

        let app = Router::new().route("/in/jane", get(move || async move { body }));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}/in/jane")
    }

    #[tokio::test]
    async fn test_body_is_read_up_to_the_cap() {
        let url = serve_body("x".repeat(10_000)).await;
        let client = Client::new();

        let capped = read_capped(client.get(&url).send().await.unwrap(), 1_000).await.unwrap();
        assert_eq!(capped.len(), 1_000);

        let whole = read_capped(client.get(&url).send().await.unwrap(), 1_000_000).await.unwrap();
        assert_eq!(whole.len(), 10_000);
    }

    #[tokio::test]
    async fn test_loader_returns_page_html() {
        let url = serve_body("<h1>Jane Doe</h1>".into()).await;
        let loader = HttpPageLoader::new(DEFAULT_USER_AGENT).unwrap();
        let mut session = loader.open(&url).await.unwrap();
        assert_eq!(session.html().await.unwrap(), "<h1>Jane Doe</h1>");
        session.close().await;
    }

    #[test]
    fn test_invalid_user_agent_is_rejected() {
        assert!(HttpPageLoader::new("bad\nagent").is_err());
        assert!(HttpPageLoader::new(DEFAULT_USER_AGENT).is_ok());
    }

    #[tokio::test]
    async fn test_unreachable_host_maps_to_source_unreachable() {
        let loader = HttpPageLoader::new(DEFAULT_USER_AGENT).unwrap();
        // Port 9 on loopback (discard) is closed on CI hosts; connection is refused.
        let err = loader.open("http://127.0.0.1:9/in/nobody").await.err().unwrap();
        assert!(matches!(err, ExtractionError::SourceUnreachable(_)));
    }
}
