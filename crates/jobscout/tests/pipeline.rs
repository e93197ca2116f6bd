// ABOUTME: End-to-end extraction scenarios over realistic career page markup.
// ABOUTME: Covers cascade ordering, title filtering, URL resolution and idempotence.

use jobscout::{extract_jobs, JobExtractor, JobRecord, ListingLocator};
use pretty_assertions::assert_eq;
use scraper::Html;

const SOURCE: &str = "https://acme.com/careers";

fn without_timestamp(records: &[JobRecord]) -> Vec<Vec<String>> {
    records
        .iter()
        .map(|r| {
            let mut row = r.to_row();
            row.pop();
            row
        })
        .collect()
}

#[test]
fn three_listings_two_titles() {
    let html = r#"<!DOCTYPE html>
<html><body>
  <div class="job-listing">
    <h2>Frontend Developer</h2>
    <span class="job-location">Amsterdam</span>
    <a href="/jobs/fe">Details</a>
  </div>
  <div class="job-listing">
    <h2>Support Lead</h2>
    <span class="job-location">Dublin</span>
  </div>
  <div class="job-listing">
    <span class="badge">  </span>
  </div>
</body></html>"#;

    let jobs = extract_jobs(html, SOURCE);

    assert_eq!(jobs.len(), 2);
    assert_eq!(jobs[0].title, "Frontend Developer");
    assert_eq!(jobs[0].location, "Amsterdam");
    assert_eq!(jobs[0].url, "https://acme.com/jobs/fe");
    assert_eq!(jobs[1].title, "Support Lead");
    assert!(jobs.iter().all(|j| !j.title.is_empty()));
    assert!(jobs.iter().all(|j| j.company == "Acme" && j.source_url == SOURCE));
}

#[test]
fn falls_through_to_keyword_pattern() {
    let html = r#"<html><body>
  <main>
    <div>Open Position</div>
    <div>Open Position</div>
  </main>
</body></html>"#;

    let doc = Html::parse_document(html);
    let found = ListingLocator::default().locate(&doc);

    assert_eq!(found.len(), 2);
    assert!(found.iter().all(|el| el.value().name() == "div"));
}

#[test]
fn page_without_candidates_is_empty() {
    let html = "<html><body><p>We are not hiring right now.</p></body></html>";
    let doc = Html::parse_document(html);

    assert!(ListingLocator::default().locate(&doc).is_empty());
    assert!(extract_jobs(html, SOURCE).is_empty());
}

#[test]
fn absolute_links_are_kept() {
    let html = r#"<div class="vacancy-item"><h3>Analyst</h3><a href="https://other.com/x">Apply</a></div>"#;
    let jobs = extract_jobs(html, SOURCE);
    assert_eq!(jobs[0].url, "https://other.com/x");
}

#[test]
fn url_found_on_wrapping_anchor() {
    let html = r#"<ul>
  <li><a href="/jobs/3"><div class="career-card"><h4>Nurse</h4></div></a></li>
</ul>"#;
    let jobs = extract_jobs(html, "https://www.mercy.org/join-us/");
    assert_eq!(jobs.len(), 1);
    assert_eq!(jobs[0].url, "https://www.mercy.org/jobs/3");
    assert_eq!(jobs[0].company, "Mercy");
}

#[test]
fn fields_follow_rule_priority() {
    let html = r#"<div class="position-row">
  <a class="apply" href="/a/1">Apply now</a>
  <span class="job-title">Controller</span>
  <p>Own the monthly close.</p>
  <div class="details">Finance team, hybrid.</div>
  <span class="dept">ignored</span>
  <span class="contract">Permanent</span>
  <span class="posted-on">3 days ago</span>
</div>"#;

    let jobs = extract_jobs(html, SOURCE);
    assert_eq!(jobs.len(), 1);
    let job = &jobs[0];

    // class*="title" beats the link-text fallback
    assert_eq!(job.title, "Controller");
    // class*="details" beats the paragraph fallback
    assert_eq!(job.description, "Finance team, hybrid.");
    assert_eq!(job.department, "");
    assert_eq!(job.employment_type, "Permanent");
    assert_eq!(job.date_posted.as_deref(), Some("3 days ago"));
    assert_eq!(job.location, "");
}

#[test]
fn text_is_kept_as_written() {
    let html = "<div class=\"job-listing\"><h2>Sen<b>ior</b> Engineer</h2>\
                <span class=\"location\">New\n      York</span></div>";
    let jobs = extract_jobs(html, SOURCE);

    assert_eq!(jobs.len(), 1);
    assert_eq!(jobs[0].title, "Senior Engineer");
    assert_eq!(jobs[0].location, "New\n      York");
}

#[test]
fn extraction_is_idempotent() {
    let html = r#"<div class="job-posting"><h2>Chef</h2><span class="city">Lyon</span></div>
<div class="job-posting"><h2>Sommelier</h2><time>2024-04-01</time></div>"#;
    let doc = Html::parse_document(html);
    let extractor = JobExtractor::default();

    let first = extractor.extract(&doc, SOURCE);
    let second = extractor.extract(&doc, SOURCE);

    assert_eq!(without_timestamp(&first), without_timestamp(&second));
    assert_eq!(first[1].date_posted.as_deref(), Some("2024-04-01"));
}

#[test]
fn malformed_source_url_degrades() {
    let html = r#"<div class="job-posting"><h2>Chef</h2><a href="/jobs/1">x</a></div>"#;
    let jobs = extract_jobs(html, "acme.com/careers");

    assert_eq!(jobs.len(), 1);
    assert_eq!(jobs[0].company, "acme.com/careers");
    assert_eq!(jobs[0].url, "");
}
