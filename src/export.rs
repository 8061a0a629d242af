// src/export.rs
use std::error::Error;

use serde_json::{Value, json};

use crate::data::Review;
use crate::net::PostOutcome;
use crate::store::SeenIds;

/// Result of one export cycle, for the caller to report to the user.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExportOutcome {
    NothingNew,
    Sent(usize),
    Rejected { status: u16, reason: String },
    Failed(String),
}

/// Wire payload: {"data": [[reviewType, name, email, score, link], ...]}.
/// The id is deliberately absent; it only drives the local seen-id filter.
pub fn payload(reviews: &[Review]) -> String {
    let rows: Vec<Value> = reviews
        .iter()
        .map(|r| json!([r.review_type, r.name, r.email, r.score, r.link]))
        .collect();
    json!({ "data": rows }).to_string()
}

/// One export cycle over an already-deduplicated batch. `post` is injected
/// so tests can feed synthetic transport outcomes.
///
/// The batch is atomic from the store's point of view: ids are appended and
/// persisted only after the endpoint accepted the whole batch, so a rejected
/// or failed cycle re-offers the same records next time. The only `Err` here
/// is a store-persist failure after an accepted batch.
pub fn send_new<F>(
    reviews: &[Review],
    seen: &mut SeenIds,
    post: F,
) -> Result<ExportOutcome, Box<dyn Error>>
where
    F: FnOnce(String) -> PostOutcome,
{
    if reviews.is_empty() {
        return Ok(ExportOutcome::NothingNew);
    }

    match post(payload(reviews)) {
        PostOutcome::Accepted => {
            seen.extend(reviews.iter().map(|r| r.id.clone()));
            seen.save()?;
            Ok(ExportOutcome::Sent(reviews.len()))
        }
        PostOutcome::Rejected { status, reason } => {
            crate::loge!("endpoint rejected batch: HTTP {status} {reason}");
            Ok(ExportOutcome::Rejected { status, reason })
        }
        PostOutcome::Failed(detail) => {
            crate::loge!("request failed: {detail}");
            Ok(ExportOutcome::Failed(detail))
        }
    }
}
