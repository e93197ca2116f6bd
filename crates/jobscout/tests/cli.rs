// ABOUTME: Integration tests for the jobscout CLI binary.
// ABOUTME: Tests saved HTML extraction, config-driven fetching, output formats and argument errors.

use assert_cmd::assert::OutputAssertExt;
use assert_cmd::cargo::CommandCargoExt;
use httpmock::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::process::Command;
use tempfile::TempDir;

const CAREERS_HTML: &str = r#"<!DOCTYPE html>
<html>
<head><title>Careers</title></head>
<body>
<section class="openings">
  <div class="jobs-list-item"><h3>Data Engineer</h3><span class="location">Remote</span><a href="/jobs/11">View</a></div>
  <div class="jobs-list-item"><h3>QA Analyst</h3><span class="location">Madrid</span><a href="/jobs/12">View</a></div>
</section>
</body>
</html>"#;

fn jobscout_cmd() -> Command {
    Command::cargo_bin("jobscout").unwrap()
}

#[test]
fn extract_from_html_file_as_json() {
    let temp_dir = TempDir::new().unwrap();
    let html_path = temp_dir.path().join("careers.html");
    fs::write(&html_path, CAREERS_HTML).unwrap();

    jobscout_cmd()
        .arg("--html")
        .arg(&html_path)
        .arg("--url")
        .arg("https://www.globex.com/careers")
        .arg("--format")
        .arg("json")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"title\": \"Data Engineer\""))
        .stdout(predicate::str::contains("\"url\": \"https://www.globex.com/jobs/12\""))
        .stdout(predicate::str::contains("\"company\": \"Globex\""));
}

#[test]
fn csv_output_to_file() {
    let temp_dir = TempDir::new().unwrap();
    let html_path = temp_dir.path().join("careers.html");
    let output_path = temp_dir.path().join("jobs.csv");
    fs::write(&html_path, CAREERS_HTML).unwrap();

    jobscout_cmd()
        .arg("--html")
        .arg(&html_path)
        .arg("--url")
        .arg("https://globex.com/careers")
        .arg("-o")
        .arg(&output_path)
        .assert()
        .success();

    let csv = fs::read_to_string(&output_path).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("company,title,location"));
    assert!(lines[1].starts_with("Globex,Data Engineer,Remote,"));
    assert!(lines[2].starts_with("Globex,QA Analyst,Madrid,"));
}

#[test]
fn config_urls_are_fetched() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/careers");
        then.status(200)
            .header("content-type", "text/html; charset=utf-8")
            .body(CAREERS_HTML);
    });

    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("config.json");
    let config = format!(r#"{{"career_urls": ["{}"]}}"#, server.url("/careers"));
    fs::write(&config_path, config).unwrap();

    let output = jobscout_cmd()
        .arg("--config")
        .arg(&config_path)
        .arg("--allow-private-networks")
        .arg("-f")
        .arg("csv")
        .arg("-o")
        .arg("-")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    mock.assert();
    let stdout = String::from_utf8(output).unwrap();
    assert!(stdout.contains("Data Engineer"));
    assert!(stdout.contains(&server.url("/jobs/11")));
}

#[test]
fn failed_page_sets_exit_code_but_keeps_others() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/ok");
        then.status(200).body(CAREERS_HTML);
    });
    server.mock(|when, then| {
        when.method(GET).path("/down");
        then.status(503).body("maintenance");
    });

    jobscout_cmd()
        .arg("--allow-private-networks")
        .arg("-f")
        .arg("json")
        .arg(server.url("/down"))
        .arg(server.url("/ok"))
        .assert()
        .failure()
        .stdout(predicate::str::contains("QA Analyst"))
        .stderr(predicate::str::contains("error scraping page"));
}

#[test]
fn no_jobs_writes_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let html_path = temp_dir.path().join("empty.html");
    let output_path = temp_dir.path().join("jobs.csv");
    fs::write(&html_path, "<html><body><p>Nothing here</p></body></html>").unwrap();

    jobscout_cmd()
        .arg("--html")
        .arg(&html_path)
        .arg("--url")
        .arg("https://example.com/careers")
        .arg("-o")
        .arg(&output_path)
        .assert()
        .success()
        .stderr(predicate::str::contains("no jobs data to save"));

    assert!(!output_path.exists());
}

#[test]
fn timing_flag_prints_elapsed() {
    let temp_dir = TempDir::new().unwrap();
    let html_path = temp_dir.path().join("careers.html");
    fs::write(&html_path, CAREERS_HTML).unwrap();

    jobscout_cmd()
        .arg("--html")
        .arg(&html_path)
        .arg("--url")
        .arg("https://example.com")
        .arg("-f")
        .arg("json")
        .arg("--timing")
        .assert()
        .success()
        .stderr(predicate::str::contains("elapsed:"))
        .stderr(predicate::str::contains("ms"));
}

#[test]
fn missing_url_with_html_fails() {
    let temp_dir = TempDir::new().unwrap();
    let html_path = temp_dir.path().join("careers.html");
    fs::write(&html_path, CAREERS_HTML).unwrap();

    jobscout_cmd()
        .arg("--html")
        .arg(&html_path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("--url is required"));
}

#[test]
fn missing_config_file_fails() {
    jobscout_cmd()
        .arg("--config")
        .arg("/nonexistent/config.json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot read config file"));
}

#[test]
fn no_args_fails() {
    jobscout_cmd()
        .assert()
        .failure()
        .stderr(predicate::str::contains("no URLs found"));
}

#[test]
fn unknown_format_fails() {
    let temp_dir = TempDir::new().unwrap();
    let html_path = temp_dir.path().join("careers.html");
    let output_path = temp_dir.path().join("jobs.xml");
    fs::write(&html_path, CAREERS_HTML).unwrap();

    jobscout_cmd()
        .arg("--html")
        .arg(&html_path)
        .arg("--url")
        .arg("https://globex.com/careers")
        .arg("-f")
        .arg("xml")
        .arg("-o")
        .arg(&output_path)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("unsupported format"));

    assert!(!output_path.exists());
}
