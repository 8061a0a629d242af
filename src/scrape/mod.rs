// src/scrape/mod.rs
mod reviews;

pub use reviews::{absolutize_links, extract_reviews};
