// ABOUTME: Listing locator: finds the elements of a career page that represent individual job postings.
// ABOUTME: Strict selector cascade first, then permissive keyword and heading patterns.

//! Listing location.
//!
//! The cascade runs strict to loose. The structural selectors come first; the
//! first one with any match wins and its full match set is returned. Only when
//! every selector matches nothing do the element patterns run, again first
//! pattern with a match wins. An empty result is a valid outcome.
//!
//! [`LISTING_SELECTORS`] is also the readiness probe list for whatever loads
//! the page, so "waited for" and "located by" use one ordering.

use scraper::{ElementRef, Html};
use tracing::debug;

use crate::extractors::compiled::get_or_compile;
use crate::extractors::pattern::PatternMatcher;
use crate::extractors::rules::ElementPattern;

/// Canonical, priority-ordered selectors for job listing containers.
pub const LISTING_SELECTORS: [&str; 13] = [
    "div[class*=\"job-\"]",
    "div[class*=\"career-\"]",
    "div[class*=\"position-\"]",
    ".job-listing",
    ".careers-list",
    ".jobs-list",
    ".positions-list",
    ".job-posting",
    ".career-posting",
    ".position-posting",
    ".jobs-list-item",
    ".career-opportunities",
    ".vacancy-item",
];

/// Keywords of the first fallback pattern.
pub const LISTING_KEYWORDS: [&str; 5] = ["job", "career", "position", "vacancy", "opening"];

/// Selectors a page loader should wait on before handing over the DOM.
pub fn readiness_selectors() -> &'static [&'static str] {
    &LISTING_SELECTORS
}

/// Which stage of the cascade produced the candidate set.
#[derive(Debug, Clone, PartialEq)]
pub enum Strategy {
    Selector(String),
    Pattern(ElementPattern),
    Nothing,
}

/// Ordered strategies for locating posting elements.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingLocator {
    selectors: Vec<String>,
    patterns: Vec<ElementPattern>,
}

impl ListingLocator {
    pub fn new(selectors: Vec<String>, patterns: Vec<ElementPattern>) -> Self {
        Self {
            selectors,
            patterns,
        }
    }

    pub fn selectors(&self) -> &[String] {
        &self.selectors
    }

    /// Candidate posting elements in document order.
    pub fn locate<'a>(&self, doc: &'a Html) -> Vec<ElementRef<'a>> {
        self.locate_with_strategy(doc).0
    }

    /// Like [`locate`](Self::locate), also reporting the winning strategy.
    pub fn locate_with_strategy<'a>(&self, doc: &'a Html) -> (Vec<ElementRef<'a>>, Strategy) {
        for css in &self.selectors {
            let Some(selector) = get_or_compile(css) else {
                debug!(selector = %css, "skipping unparsable listing selector");
                continue;
            };
            let found: Vec<ElementRef<'a>> = doc.select(&selector).collect();
            if !found.is_empty() {
                debug!(selector = %css, count = found.len(), "found job elements using selector");
                return (found, Strategy::Selector(css.clone()));
            }
        }

        for pattern in &self.patterns {
            let matcher = PatternMatcher::compile(pattern);
            let found: Vec<ElementRef<'a>> = all_elements(doc)
                .filter(|el| matcher.matches(*el))
                .collect();
            if !found.is_empty() {
                debug!(?pattern, count = found.len(), "found job elements using pattern matching");
                return (found, Strategy::Pattern(pattern.clone()));
            }
        }

        debug!("no job elements found");
        (Vec::new(), Strategy::Nothing)
    }
}

impl Default for ListingLocator {
    fn default() -> Self {
        Self {
            selectors: LISTING_SELECTORS.iter().map(|s| s.to_string()).collect(),
            patterns: vec![
                ElementPattern::keywords(["div", "article", "li"], LISTING_KEYWORDS),
                ElementPattern::ContainsHeading,
            ],
        }
    }
}

/// Every element of the document, root included, in document order.
fn all_elements(doc: &Html) -> impl Iterator<Item = ElementRef<'_>> {
    doc.root_element().descendants().filter_map(ElementRef::wrap)
}
