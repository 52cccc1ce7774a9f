// tests/store_latest.rs
//
// Snapshot persistence: dated CSV per run, latest-file discovery, and field
// fidelity across the write/load seam the dashboard boots through.

use chrono::{NaiveDate, TimeZone, Utc};
use job_radar::classify::Level;
use job_radar::model::{ClassifiedPosting, Snapshot, Source};
use job_radar::store;

fn snapshot_at(ts: chrono::DateTime<Utc>, marker: &str) -> Snapshot {
    Snapshot {
        scraped_at: ts,
        jobs: vec![ClassifiedPosting {
            title: format!("Software Engineer II ({marker})"),
            company: "Acme".into(),
            location: "Not specified".into(),
            url: format!("https://jobs.example.com/{marker}"),
            source: Source::Lever,
            level: Level::MidLevel,
            is_remote: false,
            posted_date: NaiveDate::from_ymd_opt(2026, 8, 20),
            scraped_at: ts,
        }],
    }
}

#[test]
fn load_latest_picks_the_newest_run() {
    let dir = tempfile::tempdir().unwrap();

    let morning = Utc.with_ymd_and_hms(2026, 8, 27, 8, 0, 0).unwrap();
    let evening = Utc.with_ymd_and_hms(2026, 8, 27, 19, 0, 0).unwrap();

    store::write_snapshot(dir.path(), &snapshot_at(morning, "old"))
        .unwrap()
        .expect("morning file written");
    store::write_snapshot(dir.path(), &snapshot_at(evening, "new"))
        .unwrap()
        .expect("evening file written");

    let loaded = store::load_latest(dir.path())
        .unwrap()
        .expect("latest snapshot");
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded.jobs[0].title, "Software Engineer II (new)");
}

#[test]
fn loaded_fields_survive_the_csv_seam() {
    let dir = tempfile::tempdir().unwrap();
    let ts = Utc.with_ymd_and_hms(2026, 8, 27, 12, 0, 0).unwrap();
    store::write_snapshot(dir.path(), &snapshot_at(ts, "x")).unwrap();

    let loaded = store::load_latest(dir.path()).unwrap().unwrap();
    let job = &loaded.jobs[0];
    assert_eq!(job.source, Source::Lever);
    assert_eq!(job.level, Level::MidLevel);
    assert!(!job.is_remote);
    assert_eq!(job.posted_date, NaiveDate::from_ymd_opt(2026, 8, 20));
    assert_eq!(job.scraped_at, ts);
    assert_eq!(loaded.scraped_at, ts);
}

#[test]
fn undated_posting_round_trips_as_absent() {
    let dir = tempfile::tempdir().unwrap();
    let ts = Utc.with_ymd_and_hms(2026, 8, 27, 12, 0, 0).unwrap();
    let mut snap = snapshot_at(ts, "undated");
    snap.jobs[0].posted_date = None;
    store::write_snapshot(dir.path(), &snap).unwrap();

    let loaded = store::load_latest(dir.path()).unwrap().unwrap();
    assert_eq!(loaded.jobs[0].posted_date, None);
}

#[test]
fn boot_falls_back_to_persisted_run_when_scrape_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let earlier = Utc.with_ymd_and_hms(2026, 8, 26, 19, 0, 0).unwrap();
    store::write_snapshot(dir.path(), &snapshot_at(earlier, "persisted")).unwrap();

    let boot = store::boot_snapshot(dir.path(), Snapshot::empty(Utc::now()));
    assert_eq!(boot.len(), 1);
    assert_eq!(boot.jobs[0].title, "Software Engineer II (persisted)");
    assert_eq!(boot.scraped_at, earlier);
}

#[test]
fn boot_prefers_the_fresh_scrape_over_history() {
    let dir = tempfile::tempdir().unwrap();
    let earlier = Utc.with_ymd_and_hms(2026, 8, 26, 19, 0, 0).unwrap();
    store::write_snapshot(dir.path(), &snapshot_at(earlier, "persisted")).unwrap();

    let now = Utc.with_ymd_and_hms(2026, 8, 27, 8, 0, 0).unwrap();
    let boot = store::boot_snapshot(dir.path(), snapshot_at(now, "fresh"));
    assert_eq!(boot.jobs[0].title, "Software Engineer II (fresh)");
}

#[test]
fn boot_with_no_history_keeps_the_empty_scrape() {
    let dir = tempfile::tempdir().unwrap();
    let boot = store::boot_snapshot(dir.path(), Snapshot::empty(Utc::now()));
    assert!(boot.is_empty());
}

#[test]
fn missing_dir_yields_none() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("never-created");
    assert!(store::load_latest(&missing).unwrap().is_none());
}
