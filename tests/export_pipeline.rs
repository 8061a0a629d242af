// tests/export_pipeline.rs
//
// Export cycle against injected transport outcomes: the store only ever
// advances after an accepted batch, so every failure path is retry-safe.

use std::cell::Cell;
use std::fs;
use std::path::PathBuf;

use review_scrape::data::Review;
use review_scrape::dedup::filter_new;
use review_scrape::export::{self, ExportOutcome};
use review_scrape::net::PostOutcome;
use review_scrape::store::SeenIds;

fn tmp_store(name: &str) -> PathBuf {
    let mut p = std::env::temp_dir();
    p.push(format!("review_scrape_{}", name));
    let _ = fs::remove_dir_all(&p);
    fs::create_dir_all(&p).unwrap();
    p.join("seen.json")
}

fn review(id: &str) -> Review {
    Review {
        id: id.into(),
        review_type: "1st review".into(),
        name: "Ada Lovelace".into(),
        email: "ada@example.com".into(),
        score: "85".into(),
        link: "https://learn.example.org/reviews/100".into(),
    }
}

#[test]
fn empty_batch_short_circuits_without_posting() {
    let path = tmp_store("empty");
    let mut seen = SeenIds::load(&path).unwrap();

    let posted = Cell::new(false);
    let outcome = export::send_new(&[], &mut seen, |_| {
        posted.set(true);
        PostOutcome::Accepted
    })
    .unwrap();

    assert_eq!(outcome, ExportOutcome::NothingNew);
    assert!(!posted.get(), "no network call for an empty batch");
    assert!(!path.exists(), "store must stay untouched");
}

#[test]
fn payload_is_data_keyed_five_tuples_without_ids() {
    let batch = vec![review("R-100"), review("R-200")];
    let body = export::payload(&batch);

    let v: serde_json::Value = serde_json::from_str(&body).unwrap();
    let rows = v["data"].as_array().unwrap();
    assert_eq!(rows.len(), 2);
    for row in rows {
        assert_eq!(row.as_array().unwrap().len(), 5);
    }
    assert_eq!(rows[0][0], "1st review");
    assert_eq!(rows[0][1], "Ada Lovelace");
    assert_eq!(rows[0][2], "ada@example.com");
    assert_eq!(rows[0][3], "85");
    assert_eq!(rows[0][4], "https://learn.example.org/reviews/100");
    // the dedup key never goes over the wire
    assert!(!body.contains("R-100"));
    assert!(!body.contains("R-200"));
}

#[test]
fn accepted_batch_advances_and_persists_the_store() {
    let path = tmp_store("accepted");
    let mut seen = SeenIds::load(&path).unwrap();
    let batch = vec![review("R-100"), review("R-200")];

    let outcome = export::send_new(&batch, &mut seen, |_| PostOutcome::Accepted).unwrap();
    assert_eq!(outcome, ExportOutcome::Sent(2));
    assert!(seen.contains("R-100") && seen.contains("R-200"));

    // persisted immediately, not just in memory
    let reloaded = SeenIds::load(&path).unwrap();
    assert!(reloaded.contains("R-100") && reloaded.contains("R-200"));
}

#[test]
fn second_cycle_on_unchanged_data_sends_nothing() {
    let path = tmp_store("idempotent");
    let mut seen = SeenIds::load(&path).unwrap();
    let batch = vec![review("R-100"), review("R-200")];

    let fresh = filter_new(batch.clone(), &seen);
    assert_eq!(fresh.len(), 2);
    export::send_new(&fresh, &mut seen, |_| PostOutcome::Accepted).unwrap();

    // new cycle: reload from disk, same page data
    let seen2 = SeenIds::load(&path).unwrap();
    let fresh2 = filter_new(batch, &seen2);
    assert!(fresh2.is_empty());

    let mut seen2 = seen2;
    let outcome = export::send_new(&fresh2, &mut seen2, |_| {
        panic!("must not post on the second cycle")
    })
    .unwrap();
    assert_eq!(outcome, ExportOutcome::NothingNew);
}

#[test]
fn rejected_batch_leaves_store_unchanged_and_retryable() {
    let path = tmp_store("rejected");
    let mut seen = SeenIds::load(&path).unwrap();
    let batch = vec![review("R-100")];

    let outcome = export::send_new(&batch, &mut seen, |_| PostOutcome::Rejected {
        status: 500,
        reason: "Internal Server Error".into(),
    })
    .unwrap();

    assert_eq!(
        outcome,
        ExportOutcome::Rejected { status: 500, reason: "Internal Server Error".into() }
    );
    assert!(seen.is_empty());
    assert!(!path.exists());

    // re-trigger offers the very same record again
    let again = filter_new(batch, &seen);
    assert_eq!(again.len(), 1);
    let outcome = export::send_new(&again, &mut seen, |_| PostOutcome::Accepted).unwrap();
    assert_eq!(outcome, ExportOutcome::Sent(1));
}

#[test]
fn transport_failure_leaves_store_unchanged() {
    let path = tmp_store("failed");
    let mut seen = SeenIds::load(&path).unwrap();
    let batch = vec![review("R-100")];

    let outcome = export::send_new(&batch, &mut seen, |_| {
        PostOutcome::Failed("connection reset".into())
    })
    .unwrap();

    assert_eq!(outcome, ExportOutcome::Failed("connection reset".into()));
    assert!(seen.is_empty());
    assert!(!path.exists());
}

#[test]
fn filter_new_is_pure_and_order_preserving() {
    let path = tmp_store("filter");
    let mut seen = SeenIds::load(&path).unwrap();
    seen.extend(vec!["R-2".into()]);

    let batch = vec![review("R-1"), review("R-2"), review("R-3")];
    let fresh = filter_new(batch, &seen);
    let ids: Vec<&str> = fresh.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["R-1", "R-3"]);
    // nothing filtered-in may be in the seen set
    assert!(fresh.iter().all(|r| !seen.contains(&r.id)));
}
