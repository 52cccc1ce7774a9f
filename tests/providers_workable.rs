// tests/providers_workable.rs
use std::fs;
use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use job_radar::classify::{Classifier, Level};
use job_radar::ingest::providers::{WorkableProvider, NOT_SPECIFIED};
use job_radar::model::Source;
use job_radar::taxonomy::Taxonomy;

fn provider() -> WorkableProvider {
    let classifier = Arc::new(Classifier::new(
        Taxonomy::embedded().expect("embedded taxonomy"),
    ));
    WorkableProvider::new(reqwest::Client::new(), classifier)
}

#[test]
fn fixture_parses_and_filters() {
    let body = fs::read_to_string("tests/fixtures/workable_jobs.json")
        .expect("missing tests/fixtures/workable_jobs.json");
    let jobs = provider()
        .parse_body("blueground", &body, Utc::now())
        .expect("workable parse ok");

    // The manager posting and the URL-less entry are dropped.
    assert_eq!(jobs.len(), 2);
    assert!(jobs.iter().all(|j| j.source == Source::Workable));
    // Company derives from the slug.
    assert!(jobs.iter().all(|j| j.company == "Blueground"));

    let devops = jobs
        .iter()
        .find(|j| j.title == "DevOps Engineer")
        .expect("devops posting kept");
    assert_eq!(devops.level, Level::MidLevel);
    assert_eq!(devops.location, "Greece");
    assert_eq!(devops.posted_date, NaiveDate::from_ymd_opt(2026, 8, 22));

    let mobile = jobs
        .iter()
        .find(|j| j.title == "Mobile Engineer (Entry Level)")
        .expect("entry-level posting kept");
    assert_eq!(mobile.level, Level::Junior);
    assert_eq!(mobile.location, NOT_SPECIFIED);
    // "22 Aug 2026" is not the expected format; the field stays absent.
    assert_eq!(mobile.posted_date, None);
}

#[test]
fn truncated_body_is_an_error() {
    let err = provider().parse_body("blueground", r#"{ "jobs": [ { "tit"#, Utc::now());
    assert!(err.is_err());
}
