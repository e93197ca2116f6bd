// ABOUTME: Configuration options for jobscout including Options and the JobScraperBuilder.
// ABOUTME: JobScraperBuilder provides a fluent API for constructing JobScraper instances.

use std::collections::HashMap;
use std::time::Duration;

use crate::client::JobScraper;
use crate::error::ScrapeError;
use crate::extractors::links::DEFAULT_ANCESTOR_DEPTH;
use crate::extractors::locator::ListingLocator;
use crate::extractors::rules::FieldRules;

/// Desktop browser user agent; many career sites serve bots a stripped page.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/122.0.0.0 Safari/537.36";

/// Configuration options for the jobscout scraper.
#[derive(Debug, Clone)]
pub struct Options {
    pub timeout: Duration,
    pub user_agent: String,
    pub allow_private_networks: bool,
    pub http_client: Option<reqwest::Client>,
    pub headers: HashMap<String, String>,
    /// Pages fetched at once by `scrape_all`.
    pub concurrency: usize,
    pub ancestor_depth: usize,
    pub rules: FieldRules,
    pub locator: ListingLocator,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(60),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            allow_private_networks: false,
            http_client: None,
            headers: HashMap::new(),
            concurrency: 4,
            ancestor_depth: DEFAULT_ANCESTOR_DEPTH,
            rules: FieldRules::default(),
            locator: ListingLocator::default(),
        }
    }
}

/// Builder for constructing JobScraper instances with custom configuration.
#[derive(Debug, Clone, Default)]
pub struct JobScraperBuilder {
    opts: Options,
}

impl JobScraperBuilder {
    /// Create a new JobScraperBuilder with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.opts.timeout = timeout;
        self
    }

    /// Set the User-Agent header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.opts.user_agent = user_agent.into();
        self
    }

    /// Allow or disallow requests to private networks.
    pub fn allow_private_networks(mut self, allow: bool) -> Self {
        self.opts.allow_private_networks = allow;
        self
    }

    /// Use a custom HTTP client.
    pub fn http_client(mut self, client: reqwest::Client) -> Self {
        self.opts.http_client = Some(client);
        self
    }

    /// Add a custom header to all requests.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.opts.headers.insert(key.into(), value.into());
        self
    }

    /// Set how many pages are fetched concurrently. Zero is treated as one.
    pub fn concurrency(mut self, concurrency: usize) -> Self {
        self.opts.concurrency = concurrency.max(1);
        self
    }

    /// Set how many ancestor levels the posting URL lookup may climb.
    pub fn ancestor_depth(mut self, depth: usize) -> Self {
        self.opts.ancestor_depth = depth;
        self
    }

    /// Replace the field rule tables.
    pub fn rules(mut self, rules: FieldRules) -> Self {
        self.opts.rules = rules;
        self
    }

    /// Replace the listing locator.
    pub fn locator(mut self, locator: ListingLocator) -> Self {
        self.opts.locator = locator;
        self
    }

    /// Build the JobScraper with the configured options.
    pub fn build(self) -> Result<JobScraper, ScrapeError> {
        JobScraper::new(self.opts)
    }
}
