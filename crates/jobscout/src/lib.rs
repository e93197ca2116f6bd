// ABOUTME: Main library entry point for jobscout, a job posting extractor for career pages.
// ABOUTME: Re-exports the public API: JobScraper, JobExtractor, JobRecord, rule types and errors.

//! jobscout - extracts structured job postings from career page HTML.
//!
//! Career pages have no common schema. jobscout finds the elements that look
//! like individual postings with an ordered selector cascade and then pulls
//! each field out of them with per-field rule lists, first match wins.
//! Fields that cannot be found are left empty; postings without a title are
//! dropped.
//!
//! # Example
//!
//! ```
//! use jobscout::extract_jobs;
//!
//! let html = r#"<div class="job-listing"><h2>Rust Engineer</h2><a href="/jobs/42">Apply</a></div>"#;
//! let jobs = extract_jobs(html, "https://www.acme.io/careers");
//! assert_eq!(jobs[0].company, "Acme");
//! assert_eq!(jobs[0].url, "https://www.acme.io/jobs/42");
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod extractors;
pub mod formats;
pub mod options;
pub mod record;
pub mod resource;

pub use crate::client::{JobScraper, PageOutcome};
pub use crate::config::ScrapeConfig;
pub use crate::error::{ErrorCode, ScrapeError};
pub use crate::extractors::locator::{readiness_selectors, ListingLocator, LISTING_SELECTORS};
pub use crate::extractors::page::JobExtractor;
pub use crate::extractors::rules::{ElementPattern, Field, FieldRules, SelectorRule};
pub use crate::formats::OutputFormat;
pub use crate::options::{JobScraperBuilder, Options};
pub use crate::record::JobRecord;

/// Extract job records from `html` with the built-in rules.
pub fn extract_jobs(html: &str, source_url: &str) -> Vec<JobRecord> {
    JobExtractor::default().extract_html(html, source_url)
}
