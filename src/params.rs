// src/params.rs
use std::path::PathBuf;

/// Deployed Google Apps Script web app that appends rows to the sheet.
pub const ENDPOINT_URL: &str =
    "https://script.google.com/macros/s/AKfycbzsp55qYNVaAo7IfpAnAC2TCy36SN5FxTFGyfSnm-3SoZ5lNIL_iFWs2XAViGL7_6LW/exec";

pub const DEFAULT_STORE_FILE: &str = ".store/seen_reviews.json";

/// Where the page HTML comes from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Source {
    Url(String),
    File(PathBuf),
}

#[derive(Clone)]
pub struct Params {
    pub source: Option<Source>,   // --url / --file; required
    pub endpoint: String,         // --endpoint override
    pub store: PathBuf,           // --store override
    pub dry_run: bool,            // extract + dedup only, nothing sent
}

impl Params {
    pub fn new() -> Self {
        Self {
            source: None,
            endpoint: s!(ENDPOINT_URL),
            store: PathBuf::from(DEFAULT_STORE_FILE),
            dry_run: false,
        }
    }
}

impl Default for Params {
    fn default() -> Self { Self::new() }
}
