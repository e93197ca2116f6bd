// ABOUTME: JobRecord struct holding the fields extracted for one job posting.
// ABOUTME: Includes the fixed column order used by tabular output.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// One job posting as extracted from a career page.
///
/// Every string field may be empty except `title`; records without a title
/// are dropped before they reach the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobRecord {
    pub company: String,
    pub title: String,
    pub location: String,
    pub description: String,
    pub url: String,
    pub source_url: String,
    pub date_posted: Option<String>,
    pub department: String,
    pub employment_type: String,
    pub scraped_date: DateTime<Utc>,
}

impl JobRecord {
    /// Column names, in output order.
    pub const COLUMNS: [&'static str; 10] = [
        "company",
        "title",
        "location",
        "description",
        "url",
        "source_url",
        "date_posted",
        "department",
        "employment_type",
        "scraped_date",
    ];

    /// Cell values in [`COLUMNS`](Self::COLUMNS) order. An absent date is an empty cell.
    pub fn to_row(&self) -> Vec<String> {
        vec![
            self.company.clone(),
            self.title.clone(),
            self.location.clone(),
            self.description.clone(),
            self.url.clone(),
            self.source_url.clone(),
            self.date_posted.clone().unwrap_or_default(),
            self.department.clone(),
            self.employment_type.clone(),
            self.scraped_date.to_rfc3339_opts(SecondsFormat::Micros, true),
        ]
    }
}
