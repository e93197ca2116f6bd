// ABOUTME: JobScraper: fetches career pages and runs the extraction pipeline on them.
// ABOUTME: Batches fetch concurrently; one failing page never aborts the others.

use futures::stream::{self, StreamExt};
use tracing::{info, warn};

use crate::error::ScrapeError;
use crate::extractors::page::JobExtractor;
use crate::options::{JobScraperBuilder, Options};
use crate::record::JobRecord;
use crate::resource::{fetch, FetchOptions};

/// What happened to one career page of a batch.
#[derive(Debug)]
pub struct PageOutcome {
    pub url: String,
    pub result: Result<Vec<JobRecord>, ScrapeError>,
}

/// Fetches career pages and extracts job records from them.
#[derive(Debug, Clone)]
pub struct JobScraper {
    opts: Options,
    http_client: reqwest::Client,
    extractor: JobExtractor,
}

impl JobScraper {
    /// Create a new JobScraperBuilder for configuring the scraper.
    pub fn builder() -> JobScraperBuilder {
        JobScraperBuilder::new()
    }

    /// Create a new JobScraper with the given options.
    pub fn new(opts: Options) -> Result<Self, ScrapeError> {
        let http_client = match opts.http_client.clone() {
            Some(client) => client,
            None => reqwest::Client::builder()
                .user_agent(&opts.user_agent)
                .timeout(opts.timeout)
                .gzip(true)
                .brotli(true)
                .deflate(true)
                .build()
                .map_err(|e| {
                    ScrapeError::fetch(
                        "",
                        "BuildClient",
                        Some(anyhow::anyhow!("failed to build HTTP client: {}", e)),
                    )
                })?,
        };

        let extractor = JobExtractor::new(
            opts.rules.clone(),
            opts.locator.clone(),
            opts.ancestor_depth,
        );

        Ok(Self {
            opts,
            http_client,
            extractor,
        })
    }

    pub fn extractor(&self) -> &JobExtractor {
        &self.extractor
    }

    /// Extract job records from HTML already in hand, using `source_url` as
    /// the base for links and the company name.
    pub fn scrape_html(&self, html: &str, source_url: &str) -> Vec<JobRecord> {
        self.extractor.extract_html(html, source_url)
    }

    /// Fetch one career page and extract its job records.
    pub async fn scrape(&self, url: &str) -> Result<Vec<JobRecord>, ScrapeError> {
        let fetch_opts = FetchOptions {
            headers: self.opts.headers.clone(),
            allow_private_networks: self.opts.allow_private_networks,
        };

        info!(url, "scraping jobs");
        let page = fetch(&self.http_client, url, &fetch_opts).await?;
        let html = page.text();

        // Links resolve against the requested URL, as the page was asked for
        Ok(self.extractor.extract_html(&html, url))
    }

    /// Scrape several career pages, up to `concurrency` at a time.
    ///
    /// Outcomes come back in input order. Failed pages are logged and kept as
    /// errors in their slot.
    pub async fn scrape_all<S: AsRef<str>>(&self, urls: &[S]) -> Vec<PageOutcome> {
        stream::iter(urls.iter().map(|u| u.as_ref().to_string()))
            .map(|url| async move {
                let result = self.scrape(&url).await;
                match &result {
                    Ok(records) => info!(url = %url, jobs = records.len(), "found jobs"),
                    Err(e) => warn!(url = %url, error = %e, "error scraping page"),
                }
                PageOutcome { url, result }
            })
            .buffered(self.opts.concurrency.max(1))
            .collect()
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use httpmock::prelude::*;

    const CAREERS: &str = r#"<html><body>
        <div class="job-posting"><h2>Platform Engineer</h2><a href="/jobs/1">Apply</a></div>
        <div class="job-posting"><h2>SRE</h2><span class="location">Remote</span></div>
    </body></html>"#;

    #[tokio::test]
    async fn scrape_fetches_and_extracts() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/careers");
            then.status(200)
                .header("content-type", "text/html; charset=utf-8")
                .body(CAREERS);
        });

        let scraper = JobScraper::builder()
            .allow_private_networks(true)
            .build()
            .unwrap();
        let url = server.url("/careers");
        let records = scraper.scrape(&url).await.expect("scrape should succeed");
        mock.assert();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].title, "Platform Engineer");
        assert_eq!(records[0].url, server.url("/jobs/1"));
        assert_eq!(records[0].source_url, url);
        assert_eq!(records[1].location, "Remote");
    }

    #[tokio::test]
    async fn scrape_blocks_private_hosts_by_default() {
        let server = MockServer::start();
        let scraper = JobScraper::builder().build().unwrap();

        let err = scraper
            .scrape(&server.url("/careers"))
            .await
            .expect_err("should fail on private host");
        assert_eq!(err.code, ErrorCode::Ssrf);
    }

    #[tokio::test]
    async fn scrape_all_keeps_order_and_isolates_failures() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/a");
            then.status(200).body(CAREERS);
        });
        server.mock(|when, then| {
            when.method(GET).path("/broken");
            then.status(500).body("oops");
        });
        server.mock(|when, then| {
            when.method(GET).path("/empty");
            then.status(200).body("<html><body><p>No openings</p></body></html>");
        });

        let scraper = JobScraper::builder()
            .allow_private_networks(true)
            .concurrency(2)
            .build()
            .unwrap();
        let urls = vec![server.url("/a"), server.url("/broken"), server.url("/empty")];
        let outcomes = scraper.scrape_all(&urls).await;

        assert_eq!(outcomes.len(), 3);
        assert_eq!(outcomes[0].url, urls[0]);
        assert_eq!(outcomes[0].result.as_ref().unwrap().len(), 2);
        assert!(outcomes[1].result.as_ref().unwrap_err().is_fetch());
        assert!(outcomes[2].result.as_ref().unwrap().is_empty());
    }

    #[test]
    fn scrape_html_uses_source_url() {
        let scraper = JobScraper::builder().build().unwrap();
        let records = scraper.scrape_html(CAREERS, "https://www.initech.com/careers");
        assert_eq!(records[0].company, "Initech");
        assert_eq!(records[0].url, "https://www.initech.com/jobs/1");
    }
}
