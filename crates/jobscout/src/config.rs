// ABOUTME: JSON config file loading: the list of career page URLs plus optional scraper settings.
// ABOUTME: Converts the file into a JobScraperBuilder so CLI flags can still override it.

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ScrapeError;
use crate::extractors::rules::{Field, FieldRules, SelectorRule};
use crate::options::JobScraperBuilder;

/// Contents of a scrape config file.
///
/// ```json
/// { "career_urls": ["https://acme.com/careers"], "timeout_secs": 30 }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScrapeConfig {
    #[serde(default)]
    pub career_urls: Vec<String>,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    #[serde(default)]
    pub concurrency: Option<usize>,
    #[serde(default)]
    pub ancestor_depth: Option<usize>,
    #[serde(default)]
    pub user_agent: Option<String>,
    /// Per-field rule lists replacing the built-in ones.
    #[serde(default)]
    pub rules: HashMap<Field, Vec<SelectorRule>>,
}

impl ScrapeConfig {
    /// Load a config file from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ScrapeError> {
        let path = path.as_ref();
        let display = path.display().to_string();
        let raw = fs::read_to_string(path).map_err(|e| {
            ScrapeError::config(
                &display,
                "LoadConfig",
                Some(anyhow::anyhow!("cannot read config file: {}", e)),
            )
        })?;
        Self::from_json(&raw).map_err(|e| ScrapeError { target: display, ..e })
    }

    /// Parse config from a JSON string.
    pub fn from_json(raw: &str) -> Result<Self, ScrapeError> {
        serde_json::from_str(raw).map_err(|e| {
            ScrapeError::config(
                "",
                "LoadConfig",
                Some(anyhow::anyhow!("invalid JSON in config file: {}", e)),
            )
        })
    }

    /// Apply the settings present in this config to `builder`.
    pub fn apply(&self, mut builder: JobScraperBuilder) -> JobScraperBuilder {
        if let Some(secs) = self.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        if let Some(n) = self.concurrency {
            builder = builder.concurrency(n);
        }
        if let Some(depth) = self.ancestor_depth {
            builder = builder.ancestor_depth(depth);
        }
        if let Some(ref ua) = self.user_agent {
            builder = builder.user_agent(ua.clone());
        }
        if !self.rules.is_empty() {
            builder = builder.rules(FieldRules::default().with_overrides(self.rules.clone()));
        }
        builder
    }
}
