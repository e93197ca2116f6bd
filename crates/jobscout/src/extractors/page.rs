// ABOUTME: JobExtractor runs the whole per-page pipeline: locate postings, extract fields, drop untitled records.
// ABOUTME: Synchronous and side-effect free apart from tracing; safe to share across threads.

use chrono::Utc;
use scraper::Html;
use tracing::{debug, info};

use crate::extractors::compiled::precompile_selectors;
use crate::extractors::fields::{extract_record, PageContext};
use crate::extractors::links::DEFAULT_ANCESTOR_DEPTH;
use crate::extractors::locator::ListingLocator;
use crate::extractors::rules::FieldRules;
use crate::record::JobRecord;

/// Immutable extraction configuration for career pages.
#[derive(Debug, Clone, PartialEq)]
pub struct JobExtractor {
    rules: FieldRules,
    locator: ListingLocator,
    ancestor_depth: usize,
}

impl JobExtractor {
    pub fn new(rules: FieldRules, locator: ListingLocator, ancestor_depth: usize) -> Self {
        precompile_selectors(rules.css_selectors());
        precompile_selectors(locator.selectors());
        Self {
            rules,
            locator,
            ancestor_depth,
        }
    }

    pub fn rules(&self) -> &FieldRules {
        &self.rules
    }

    /// Extracts job records from a parsed page, in candidate order.
    ///
    /// Never fails: a page without postings yields an empty vec and candidates
    /// without a title are skipped.
    pub fn extract(&self, doc: &Html, source_url: &str) -> Vec<JobRecord> {
        let candidates = self.locator.locate(doc);
        let ctx = PageContext {
            source_url,
            rules: &self.rules,
            ancestor_depth: self.ancestor_depth,
            scraped_date: Utc::now(),
        };

        let records: Vec<JobRecord> = candidates
            .iter()
            .filter_map(|element| extract_record(*element, &ctx))
            .collect();

        debug!(
            url = source_url,
            candidates = candidates.len(),
            dropped = candidates.len() - records.len(),
            "dropped candidates without a title"
        );
        info!(url = source_url, jobs = records.len(), "extracted jobs");
        records
    }

    /// Parses `html` and extracts job records from it.
    pub fn extract_html(&self, html: &str, source_url: &str) -> Vec<JobRecord> {
        let doc = Html::parse_document(html);
        self.extract(&doc, source_url)
    }
}

impl Default for JobExtractor {
    fn default() -> Self {
        Self::new(
            FieldRules::default(),
            ListingLocator::default(),
            DEFAULT_ANCESTOR_DEPTH,
        )
    }
}
