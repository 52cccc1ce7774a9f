// tests/classify_handpicked.rs
//
// Hand-picked classification scenarios: precedence law, totality, remote
// detection, and the business-filter edge cases downstream code relies on.

use job_radar::classify::{Classifier, Level};
use job_radar::taxonomy::Taxonomy;

fn classifier() -> Classifier {
    Classifier::new(Taxonomy::embedded().expect("embedded taxonomy"))
}

struct Case {
    title: &'static str,
    location: &'static str,
    level: Level,
    is_remote: bool,
    role_relevant: bool,
}

#[test]
fn handpicked_titles_classify_as_expected() {
    let cases = [
        Case {
            title: "Senior Software Engineer",
            location: "Remote - US",
            level: Level::Senior,
            is_remote: true,
            role_relevant: true,
        },
        Case {
            title: "Software Engineer II",
            location: "New York, NY",
            level: Level::MidLevel,
            is_remote: false,
            role_relevant: true,
        },
        Case {
            title: "Junior Frontend Developer",
            location: "",
            level: Level::Junior,
            is_remote: false,
            role_relevant: true,
        },
        Case {
            title: "Backend Developer (3+ years)",
            location: "Berlin",
            level: Level::MidLevel,
            is_remote: false,
            role_relevant: true,
        },
        Case {
            title: "Staff Security Engineer",
            location: "Work From Home",
            level: Level::Senior,
            is_remote: true,
            role_relevant: true,
        },
        Case {
            title: "Data Scientist, Early Career",
            location: "Anywhere",
            level: Level::Junior,
            is_remote: true,
            role_relevant: true,
        },
        // Plain title, no seniority markers: defaults into Mid-Level.
        Case {
            title: "Software Engineer",
            location: "Austin, TX",
            level: Level::MidLevel,
            is_remote: false,
            role_relevant: true,
        },
        // Not an engineering role; still gets a level.
        Case {
            title: "Office Coordinator",
            location: "Chicago, IL",
            level: Level::MidLevel,
            is_remote: false,
            role_relevant: false,
        },
    ];

    let c = classifier();
    for case in &cases {
        let r = c.classify(case.title, case.location);
        assert_eq!(
            r.level, case.level,
            "level mismatch for '{}'",
            case.title
        );
        assert_eq!(
            r.is_remote, case.is_remote,
            "remote mismatch for '{}' @ '{}'",
            case.title, case.location
        );
        assert_eq!(
            r.role_relevant, case.role_relevant,
            "relevance mismatch for '{}'",
            case.title
        );
    }
}

#[test]
fn precedence_senior_wins_over_junior_markers() {
    let c = classifier();
    for title in [
        "Senior Associate Engineer",
        "Sr. Graduate Program Engineer",
        "Lead Engineer, University Partnerships",
        "Principal Engineer - New Grad Mentor",
    ] {
        assert_eq!(
            c.classify(title, "").level,
            Level::Senior,
            "'{title}' must classify Senior"
        );
    }
}

#[test]
fn every_title_gets_exactly_one_level() {
    let c = classifier();
    for title in ["", "x", "zzz 9999", "🦀", "Software Engineer II"] {
        let r = c.classify(title, "");
        // Level is a closed enum; the assertion is that classify returns at
        // all and is stable across calls.
        assert_eq!(r, c.classify(title, ""));
    }
}

#[test]
fn remote_comes_from_location_or_title_only() {
    let c = classifier();
    assert!(c.classify("Engineer (Remote)", "Paris").is_remote);
    assert!(c.classify("Engineer", "Distributed team").is_remote);
    assert!(!c.classify("Engineer", "Paris").is_remote);
}
