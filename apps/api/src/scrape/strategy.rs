//! Strategy chains: ordered extraction attempts where the first success wins.
//!
//! No strategy can terminate a chain early: a strategy either yields a value or passes.
//! When every strategy passes the caller decides the default.

use scraper::{ElementRef, Html, Selector};
use tracing::{debug, warn};

/// Validity filter applied to candidate text.
pub type Accept = fn(&str) -> bool;

/// One way of extracting a value of type `T` from a parsed page.
pub trait Strategy<T>: Send + Sync {
    fn describe(&self) -> &str;
    fn extract(&self, doc: &Html) -> Option<T>;
}

/// Text of the first element matching a CSS selector, if it passes `accept`.
pub struct FirstText {
    css: &'static str,
    selector: Selector,
    accept: Accept,
}

impl FirstText {
    /// Returns `None` (and logs) when the selector does not parse.
    pub fn new(css: &'static str, accept: Accept) -> Option<Self> {
        parse_selector(css).map(|selector| Self {
            css,
            selector,
            accept,
        })
    }
}

impl Strategy<String> for FirstText {
    fn describe(&self) -> &str {
        self.css
    }

    fn extract(&self, doc: &Html) -> Option<String> {
        let element = doc.select(&self.selector).next()?;
        let text = element_text(element);
        (!text.is_empty() && (self.accept)(text.as_str())).then_some(text)
    }
}

/// Texts of the first `limit` elements matching a selector, filtered by `accept`.
///
/// Succeeds as soon as the selector matches anything, even if every match is then
/// filtered out: a present-but-empty section is still the section.
pub struct AllTexts {
    css: &'static str,
    selector: Selector,
    limit: usize,
    accept: Accept,
}

impl AllTexts {
    pub fn new(css: &'static str, limit: usize, accept: Accept) -> Option<Self> {
        parse_selector(css).map(|selector| Self {
            css,
            selector,
            limit,
            accept,
        })
    }
}

impl Strategy<Vec<String>> for AllTexts {
    fn describe(&self) -> &str {
        self.css
    }

    fn extract(&self, doc: &Html) -> Option<Vec<String>> {
        let matched: Vec<ElementRef> = doc.select(&self.selector).take(self.limit).collect();
        if matched.is_empty() {
            return None;
        }
        Some(
            matched
                .into_iter()
                .map(element_text)
                .filter(|text| !text.is_empty() && (self.accept)(text.as_str()))
                .collect(),
        )
    }
}

/// Ordered list of strategies for a single field.
pub struct StrategyChain<T> {
    field: &'static str,
    strategies: Vec<Box<dyn Strategy<T>>>,
}

impl<T> StrategyChain<T> {
    pub fn new(field: &'static str) -> Self {
        Self {
            field,
            strategies: Vec::new(),
        }
    }

    /// Appends a strategy; `None` (an unparseable selector) is skipped.
    pub fn then<S>(mut self, strategy: Option<S>) -> Self
    where
        S: Strategy<T> + 'static,
    {
        if let Some(strategy) = strategy {
            self.strategies.push(Box::new(strategy));
        }
        self
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    /// First successful strategy's value, or `None` if all of them passed.
    pub fn first_match(&self, doc: &Html) -> Option<T> {
        for strategy in &self.strategies {
            if let Some(value) = strategy.extract(doc) {
                debug!(field = self.field, strategy = strategy.describe(), "field matched");
                return Some(value);
            }
        }
        debug!(field = self.field, "no strategy matched");
        None
    }

    /// Like `first_match`, falling back to `default` when every strategy passed.
    pub fn resolve_or(&self, doc: &Html, default: impl FnOnce() -> T) -> T {
        self.first_match(doc).unwrap_or_else(default)
    }
}

/// Visible text of an element: every line trimmed, blank lines dropped.
pub fn element_text(element: ElementRef<'_>) -> String {
    let raw: String = element.text().collect();
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn parse_selector(css: &'static str) -> Option<Selector> {
    match Selector::parse(css) {
        Ok(selector) => Some(selector),
        Err(e) => {
            warn!("Skipping invalid selector {css:?}: {e:?}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <html><body>
          <h1 class="title">  Jane   Doe </h1>
          <p class="short">Hi</p>
          <p class="long">A much longer line of text</p>
          <ul>
            <li class="item">one</li>
            <li class="item">two</li>
            <li class="item">three</li>
          </ul>
        </body></html>
    "#;

    fn any(_: &str) -> bool {
        true
    }

    fn longer_than_five(text: &str) -> bool {
        text.chars().count() > 5
    }

    #[test]
    fn test_first_success_wins_in_order() {
        let doc = Html::parse_document(PAGE);
        let chain = StrategyChain::new("name")
            .then(FirstText::new(".missing", any))
            .then(FirstText::new("h1.title", any))
            .then(FirstText::new("p.long", any));
        assert_eq!(chain.first_match(&doc).as_deref(), Some("Jane   Doe"));
    }

    #[test]
    fn test_filter_rejection_falls_through_to_next_strategy() {
        let doc = Html::parse_document(PAGE);
        let chain = StrategyChain::new("headline")
            .then(FirstText::new("p.short", longer_than_five))
            .then(FirstText::new("p.long", longer_than_five));
        assert_eq!(
            chain.first_match(&doc).as_deref(),
            Some("A much longer line of text")
        );
    }

    #[test]
    fn test_all_failing_chain_uses_default() {
        let doc = Html::parse_document(PAGE);
        let chain = StrategyChain::new("about").then(FirstText::new(".nope", any));
        assert_eq!(chain.resolve_or(&doc, || "placeholder".into()), "placeholder");
    }

    #[test]
    fn test_invalid_selector_is_skipped_not_fatal() {
        let doc = Html::parse_document(PAGE);
        let chain = StrategyChain::new("name")
            .then(FirstText::new("h1[", any))
            .then(FirstText::new("h1", any));
        assert_eq!(chain.len(), 1);
        assert!(chain.first_match(&doc).is_some());
    }

    #[test]
    fn test_all_texts_caps_and_filters() {
        let doc = Html::parse_document(PAGE);
        let capped = AllTexts::new("li.item", 2, any).unwrap();
        assert_eq!(capped.extract(&doc).unwrap(), ["one", "two"]);

        let filtered = AllTexts::new("li.item", 10, |t| t.len() > 3).unwrap();
        assert_eq!(filtered.extract(&doc).unwrap(), ["three"]);
    }

    #[test]
    fn test_all_texts_matched_but_filtered_still_wins_chain() {
        let doc = Html::parse_document(PAGE);
        let chain = StrategyChain::new("skills")
            .then(AllTexts::new("li.item", 10, |_| false))
            .then(AllTexts::new("p", 10, any));
        assert_eq!(chain.first_match(&doc), Some(vec![]));
    }
}
