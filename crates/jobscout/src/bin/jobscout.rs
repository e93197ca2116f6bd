// ABOUTME: CLI binary for jobscout.
// ABOUTME: Scrapes career pages (URLs, a config file, or a saved HTML file) and writes CSV or JSON.

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{Duration, Instant};

use anyhow::{anyhow, bail, Result};
use chrono::Local;
use clap::Parser;
use jobscout::formats::{default_csv_filename, render, save};
use jobscout::{JobRecord, JobScraper, OutputFormat, ScrapeConfig};
use tracing::{error, info, warn};

#[derive(Parser, Debug)]
#[command(name = "jobscout")]
#[command(about = "Extract job postings from career pages")]
struct Args {
    /// Career page URLs to scrape
    #[arg()]
    urls: Vec<String>,

    /// JSON config file with "career_urls" and optional settings
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Saved HTML file to extract from (requires --url)
    #[arg(long = "html")]
    html: Option<PathBuf>,

    /// Source URL of the saved HTML file (required with --html)
    #[arg(long = "url")]
    url: Option<String>,

    /// Output format: csv (default) or json
    #[arg(short = 'f', long = "format", default_value = "csv")]
    format: String,

    /// Output file path; "-" for stdout. CSV defaults to jobs_data_<timestamp>.csv, JSON to stdout
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,

    /// Request timeout in seconds
    #[arg(long = "timeout")]
    timeout: Option<u64>,

    /// Pages fetched at once
    #[arg(long = "concurrency")]
    concurrency: Option<usize>,

    /// Ancestor levels searched for a posting link
    #[arg(long = "ancestor-depth")]
    ancestor_depth: Option<usize>,

    /// Allow fetching from private/local networks
    #[arg(long = "allow-private-networks")]
    allow_private_networks: bool,

    /// Print elapsed time in ms to stderr
    #[arg(long = "timing")]
    timing: bool,
}

fn build_scraper(args: &Args, config: &ScrapeConfig) -> Result<JobScraper> {
    let mut builder = config.apply(JobScraper::builder());
    if let Some(secs) = args.timeout {
        builder = builder.timeout(Duration::from_secs(secs));
    }
    if let Some(n) = args.concurrency {
        builder = builder.concurrency(n);
    }
    if let Some(depth) = args.ancestor_depth {
        builder = builder.ancestor_depth(depth);
    }
    builder = builder.allow_private_networks(args.allow_private_networks);
    Ok(builder.build()?)
}

/// Collects records from every source. Returns the records and whether any source failed.
async fn collect(
    args: &Args,
    config: &ScrapeConfig,
    scraper: &JobScraper,
) -> Result<(Vec<JobRecord>, bool)> {
    if let Some(html_path) = &args.html {
        let url = args.url.as_deref().unwrap_or_default();
        let html = fs::read_to_string(html_path)
            .map_err(|e| anyhow!("error reading file {:?}: {}", html_path, e))?;
        return Ok((scraper.scrape_html(&html, url), false));
    }

    let urls: Vec<&str> = config
        .career_urls
        .iter()
        .chain(args.urls.iter())
        .map(String::as_str)
        .collect();
    if urls.is_empty() {
        bail!("no URLs found: pass URLs, --config with career_urls, or --html with --url");
    }

    let mut records = Vec::new();
    let mut had_error = false;
    for outcome in scraper.scrape_all(&urls).await {
        match outcome.result {
            Ok(jobs) => records.extend(jobs),
            Err(_) => had_error = true,
        }
    }
    Ok((records, had_error))
}

fn write_output(args: &Args, format: OutputFormat, records: &[JobRecord]) -> Result<()> {
    let target = match (&args.output, format) {
        (Some(path), _) if path.as_os_str() == "-" => None,
        (Some(path), _) => Some(path.clone()),
        (None, OutputFormat::Csv) => Some(default_csv_filename(Local::now())),
        (None, OutputFormat::Json) => None,
    };

    match target {
        Some(path) => {
            save(records, format, &path)?;
            info!(jobs = records.len(), path = %path.display(), "saved jobs");
        }
        None => {
            let rendered = render(records, format)?;
            let mut stdout = io::stdout().lock();
            stdout.write_all(rendered.as_bytes())?;
            if !rendered.ends_with('\n') {
                writeln!(stdout)?;
            }
        }
    }
    Ok(())
}

async fn run(args: &Args) -> Result<bool> {
    if args.html.is_some() && args.url.is_none() {
        bail!("--url is required when using --html");
    }
    if args.html.is_some() && !args.urls.is_empty() {
        bail!("cannot use both --html and positional URLs");
    }
    let format = OutputFormat::parse(&args.format)
        .ok_or_else(|| anyhow!("unsupported format {:?}: expected csv or json", args.format))?;

    let config = match &args.config {
        Some(path) => ScrapeConfig::load(path)?,
        None => ScrapeConfig::default(),
    };
    let scraper = build_scraper(args, &config)?;

    let (records, had_error) = collect(args, &config, &scraper).await?;
    if records.is_empty() {
        warn!("no jobs data to save");
    } else {
        write_output(args, format, &records)?;
    }
    Ok(had_error)
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let start = Instant::now();

    let had_error = match run(&args).await {
        Ok(had_error) => had_error,
        Err(e) => {
            error!("{}", e);
            true
        }
    };

    if args.timing {
        let _ = writeln!(io::stderr(), "elapsed: {}ms", start.elapsed().as_millis());
    }

    if had_error {
        ExitCode::from(1)
    } else {
        ExitCode::SUCCESS
    }
}
