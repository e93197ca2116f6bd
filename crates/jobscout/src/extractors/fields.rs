// ABOUTME: Per-field extraction for one posting element and assembly of the JobRecord.
// ABOUTME: Text fields run the shared rule runner; url and company use their own procedures.

//! Field extraction for a single posting element.
//!
//! Key behaviors:
//! - Each field is independent; a missing field never affects the others.
//! - Absent text fields are empty strings, an absent `date_posted` is `None`.
//! - `company` comes from the source URL, not from the element.

use chrono::{DateTime, Utc};
use scraper::ElementRef;

use crate::extractors::links::{company_from_url, extract_posting_url};
use crate::extractors::rules::{Field, FieldRules};
use crate::extractors::select::first_text;
use crate::record::JobRecord;

/// Text of the first matching rule for `field`, or an empty string.
pub fn extract_text_field(element: ElementRef<'_>, rules: &FieldRules, field: Field) -> String {
    first_text(element, rules.get(field)).unwrap_or_default()
}

/// Posting date as shown on the page. Not parsed or normalized.
pub fn extract_date_posted(element: ElementRef<'_>, rules: &FieldRules) -> Option<String> {
    first_text(element, rules.get(Field::DatePosted))
}

/// Extraction context shared by every element of one page.
#[derive(Debug, Clone, Copy)]
pub struct PageContext<'r> {
    pub source_url: &'r str,
    pub rules: &'r FieldRules,
    pub ancestor_depth: usize,
    pub scraped_date: DateTime<Utc>,
}

/// Builds the record for one posting element, or `None` when no title resolves.
pub fn extract_record(element: ElementRef<'_>, ctx: &PageContext<'_>) -> Option<JobRecord> {
    let title = extract_text_field(element, ctx.rules, Field::Title);
    if title.is_empty() {
        return None;
    }

    Some(JobRecord {
        company: company_from_url(ctx.source_url),
        title,
        location: extract_text_field(element, ctx.rules, Field::Location),
        description: extract_text_field(element, ctx.rules, Field::Description),
        url: extract_posting_url(
            element,
            ctx.rules.get(Field::Url),
            ctx.source_url,
            ctx.ancestor_depth,
        ),
        source_url: ctx.source_url.to_string(),
        date_posted: extract_date_posted(element, ctx.rules),
        department: extract_text_field(element, ctx.rules, Field::Department),
        employment_type: extract_text_field(element, ctx.rules, Field::EmploymentType),
        scraped_date: ctx.scraped_date,
    })
}
