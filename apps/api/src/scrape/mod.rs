// Profile scraping: page access, selector-fallback strategy chains, field extraction.
// Every network touch of the profile website goes through `page`.

pub mod extractor;
pub mod page;
pub mod selectors;
pub mod strategy;

pub use extractor::{scrape_profile, ScrapeSettings};
pub use page::{ExtractionError, HttpPageLoader, PageLoader, DEFAULT_USER_AGENT};
