// src/dedup.rs
use crate::data::Review;
use crate::store::SeenIds;

/// Order-preserving filter: keep only reviews whose id has not been
/// exported before. Pure; the store is advanced elsewhere, and only after
/// the remote side confirmed the batch.
pub fn filter_new(reviews: Vec<Review>, seen: &SeenIds) -> Vec<Review> {
    reviews.into_iter().filter(|r| !seen.contains(&r.id)).collect()
}
