//! Field Extractor: turns a rendered profile page into a `ProfileRecord`.
//!
//! Flow: open session → settle wait → header fields → scroll for lazy sections →
//!       fresh snapshot → list fields → close session.
//!
//! Missing fields never fail the run: each falls back to its placeholder (scalars) or
//! an empty list. The only error is an unreachable source.

use std::time::Duration;

use once_cell::sync::Lazy;
use scraper::Html;
use tracing::{debug, info, warn};

use crate::models::profile::{EducationEntry, ExperienceEntry, ProfileRecord};
use crate::scrape::page::{ExtractionError, PageLoader, PageSession};
use crate::scrape::selectors::*;
use crate::scrape::strategy::{Accept, AllTexts, FirstText, StrategyChain};

/// Timing budget for dynamic pages. Waits are fixed; nothing verifies content arrived.
#[derive(Debug, Clone)]
pub struct ScrapeSettings {
    /// Wait after the initial load, before the first snapshot.
    pub page_settle: Duration,
    /// One wait per scroll step; steps scroll evenly down to the bottom of the page.
    pub scroll_waits: Vec<Duration>,
}

impl Default for ScrapeSettings {
    fn default() -> Self {
        Self {
            page_settle: Duration::from_secs(5),
            scroll_waits: vec![Duration::from_secs(2), Duration::from_secs(3)],
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Strategy chains
// ────────────────────────────────────────────────────────────────────────────

fn non_empty(text: &str) -> bool {
    !text.trim().is_empty()
}

fn headline_like(text: &str) -> bool {
    text.chars().count() > MIN_HEADLINE_CHARS
}

fn location_like(text: &str) -> bool {
    !text.to_lowercase().contains("connections")
}

fn experience_like(text: &str) -> bool {
    text.chars().count() > MIN_EXPERIENCE_CHARS
}

fn education_like(text: &str) -> bool {
    text.chars().count() > MIN_EDUCATION_CHARS
}

fn skill_like(text: &str) -> bool {
    text.chars().count() < MAX_SKILL_CHARS
}

fn text_chain(
    field: &'static str,
    selectors: &'static [&'static str],
    accept: Accept,
) -> StrategyChain<String> {
    selectors.iter().copied().fold(StrategyChain::new(field), |chain, css| {
        chain.then(FirstText::new(css, accept))
    })
}

fn list_chain(
    field: &'static str,
    selectors: &'static [&'static str],
    limit: usize,
    accept: Accept,
) -> StrategyChain<Vec<String>> {
    selectors.iter().copied().fold(StrategyChain::new(field), |chain, css| {
        chain.then(AllTexts::new(css, limit, accept))
    })
}

static NAME: Lazy<StrategyChain<String>> =
    Lazy::new(|| text_chain("name", NAME_SELECTORS, non_empty));
static HEADLINE: Lazy<StrategyChain<String>> =
    Lazy::new(|| text_chain("headline", HEADLINE_SELECTORS, headline_like));
static LOCATION: Lazy<StrategyChain<String>> =
    Lazy::new(|| text_chain("location", LOCATION_SELECTORS, location_like));
static ABOUT: Lazy<StrategyChain<String>> =
    Lazy::new(|| text_chain("about", ABOUT_SELECTORS, non_empty));
static EXPERIENCE: Lazy<StrategyChain<Vec<String>>> = Lazy::new(|| {
    list_chain("experience", EXPERIENCE_SELECTORS, MAX_EXPERIENCE, experience_like)
});
static EDUCATION: Lazy<StrategyChain<Vec<String>>> = Lazy::new(|| {
    list_chain("education", EDUCATION_SELECTORS, MAX_EDUCATION, education_like)
});
static SKILLS: Lazy<StrategyChain<Vec<String>>> =
    Lazy::new(|| list_chain("skills", SKILL_SELECTORS, MAX_SKILLS, skill_like));

// ────────────────────────────────────────────────────────────────────────────
// Snapshot extraction (sync: `Html` is !Send and never crosses an await)
// ────────────────────────────────────────────────────────────────────────────

/// Top-of-page fields, available as soon as the page loads.
#[derive(Debug, Clone, PartialEq)]
pub struct HeaderFields {
    pub name: String,
    pub headline: String,
    pub location: String,
    pub about: String,
}

/// Lazily-loaded list sections.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SectionFields {
    pub experience: Vec<String>,
    pub education: Vec<String>,
    pub skills: Vec<String>,
}

pub fn extract_header(html: &str) -> HeaderFields {
    let doc = Html::parse_document(html);
    let fields = HeaderFields {
        name: NAME.resolve_or(&doc, || NAME_PLACEHOLDER.to_string()),
        headline: HEADLINE.resolve_or(&doc, || HEADLINE_PLACEHOLDER.to_string()),
        location: LOCATION.resolve_or(&doc, || LOCATION_PLACEHOLDER.to_string()),
        about: ABOUT.resolve_or(&doc, || ABOUT_PLACEHOLDER.to_string()),
    };
    debug!(
        "Header fields: name={:?} headline={:?} location={:?} about_len={}",
        fields.name,
        fields.headline,
        fields.location,
        fields.about.len()
    );
    fields
}

pub fn extract_sections(html: &str) -> SectionFields {
    let doc = Html::parse_document(html);
    let fields = SectionFields {
        experience: EXPERIENCE.resolve_or(&doc, Vec::new),
        education: EDUCATION.resolve_or(&doc, Vec::new),
        skills: SKILLS.resolve_or(&doc, Vec::new),
    };
    info!(
        "Found {} experience, {} education, {} skill entries",
        fields.experience.len(),
        fields.education.len(),
        fields.skills.len()
    );
    fields
}

/// Assembles the record from the two snapshots' fields.
pub fn assemble_profile(source: &str, header: HeaderFields, sections: SectionFields) -> ProfileRecord {
    ProfileRecord::builder(source)
        .name(header.name)
        .headline(header.headline)
        .location(header.location)
        .about(header.about)
        .experience(sections.experience.into_iter().map(ExperienceEntry::raw).collect())
        .education(sections.education.into_iter().map(EducationEntry::raw).collect())
        .skills(sections.skills)
        .build()
}

// ────────────────────────────────────────────────────────────────────────────
// Session-driven extraction
// ────────────────────────────────────────────────────────────────────────────

/// Loads `url` and extracts a profile. The page session is closed on every exit path.
pub async fn scrape_profile(
    loader: &dyn PageLoader,
    url: &str,
    settings: &ScrapeSettings,
) -> Result<ProfileRecord, ExtractionError> {
    info!("Navigating to {url}");
    let mut session = loader.open(url).await?;
    let result = extract_from_session(session.as_mut(), url, settings).await;
    session.close().await;
    debug!("Page session for {url} closed");
    result
}

async fn extract_from_session(
    session: &mut dyn PageSession,
    url: &str,
    settings: &ScrapeSettings,
) -> Result<ProfileRecord, ExtractionError> {
    let dynamic = session.is_dynamic();
    if dynamic {
        tokio::time::sleep(settings.page_settle).await;
    }

    let first_snapshot = session.html().await?;
    let header = extract_header(&first_snapshot);

    let sections_snapshot = if dynamic {
        load_lazy_sections(session, settings).await;
        session.html().await?
    } else {
        first_snapshot
    };
    let sections = extract_sections(&sections_snapshot);

    Ok(assemble_profile(url, header, sections))
}

/// Scrolls down in even steps so lazily-rendered sections materialize. Best effort.
async fn load_lazy_sections(session: &mut dyn PageSession, settings: &ScrapeSettings) {
    let steps = settings.scroll_waits.len();
    for (i, wait) in settings.scroll_waits.iter().enumerate() {
        let fraction = (i + 1) as f32 / steps as f32;
        if let Err(e) = session.scroll_to(fraction).await {
            warn!("Scroll to {:.0}% failed: {e}", fraction * 100.0);
            continue;
        }
        tokio::time::sleep(*wait).await;
    }
}
