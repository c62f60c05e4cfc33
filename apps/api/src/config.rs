use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::llm_client::DEFAULT_MODELS;
use crate::scrape::{ScrapeSettings, DEFAULT_USER_AGENT};

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub google_api_key: String,
    /// Candidate Gemini models, probed in order at startup.
    pub gemini_models: Vec<String>,
    /// Overrides the Gemini API root, e.g. for a local proxy.
    pub gemini_base_url: Option<String>,
    pub output_dir: PathBuf,
    pub port: u16,
    pub rust_log: String,
    pub user_agent: String,
    pub page_settle: Duration,
    pub scroll_waits: Vec<Duration>,
    pub progress_ttl: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            google_api_key: require_env("GOOGLE_API_KEY")?,
            gemini_models: match std::env::var("GEMINI_MODELS") {
                Ok(raw) => parse_list(&raw),
                Err(_) => DEFAULT_MODELS.iter().map(|m| m.to_string()).collect(),
            },
            gemini_base_url: std::env::var("GEMINI_API_BASE_URL")
                .ok()
                .map(|url| url.trim().to_string())
                .filter(|url| !url.is_empty()),
            output_dir: std::env::var("OUTPUT_DIR")
                .unwrap_or_else(|_| "output".to_string())
                .into(),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "5000".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            user_agent: std::env::var("SCRAPE_USER_AGENT")
                .unwrap_or_else(|_| DEFAULT_USER_AGENT.to_string()),
            page_settle: Duration::from_millis(
                std::env::var("PAGE_SETTLE_MS")
                    .unwrap_or_else(|_| "5000".to_string())
                    .parse::<u64>()
                    .context("PAGE_SETTLE_MS must be a whole number of milliseconds")?,
            ),
            scroll_waits: parse_millis_list(
                &std::env::var("SCROLL_WAIT_MS").unwrap_or_else(|_| "2000,3000".to_string()),
            )
            .context("SCROLL_WAIT_MS must be a comma-separated list of milliseconds")?,
            progress_ttl: Duration::from_secs(
                std::env::var("PROGRESS_TTL_SECS")
                    .unwrap_or_else(|_| "3600".to_string())
                    .parse::<u64>()
                    .context("PROGRESS_TTL_SECS must be a whole number of seconds")?,
            ),
        })
    }

    pub fn scrape_settings(&self) -> ScrapeSettings {
        ScrapeSettings {
            page_settle: self.page_settle,
            scroll_waits: self.scroll_waits.clone(),
        }
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

fn parse_millis_list(raw: &str) -> Result<Vec<Duration>> {
    parse_list(raw)
        .iter()
        .map(|ms| {
            ms.parse::<u64>()
                .map(Duration::from_millis)
                .with_context(|| format!("'{ms}' is not a number"))
        })
        .collect()
}
