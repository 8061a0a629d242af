// src/net.rs
use std::error::Error;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;

const TIMEOUT_SECS: u64 = 15;
const USER_AGENT: &str = "review_scrape/1.0";

/// Exactly one of the three fires per POST, matching the
/// onload-200 / onload-other / onerror split of the transport layer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PostOutcome {
    Accepted,
    Rejected { status: u16, reason: String },
    Failed(String),
}

fn client() -> Result<Client, reqwest::Error> {
    Client::builder()
        .timeout(Duration::from_secs(TIMEOUT_SECS))
        .user_agent(USER_AGENT)
        .build()
}

/// Fetch a page; any non-success status is an error.
pub fn http_get(url: &str) -> Result<String, Box<dyn Error>> {
    let resp = client()?.get(url).send()?;
    let status = resp.status();
    if !status.is_success() {
        return Err(format!("HTTP error: {} {}", status, url).into());
    }
    Ok(resp.text()?)
}

/// One JSON POST. The sheet endpoint answers 200 on success; anything else,
/// redirect chains included, counts as a rejection.
pub fn post_json(url: &str, body: String) -> PostOutcome {
    let client = match client() {
        Ok(c) => c,
        Err(e) => return PostOutcome::Failed(e.to_string()),
    };
    match client
        .post(url)
        .header(CONTENT_TYPE, "application/json")
        .body(body)
        .send()
    {
        Ok(resp) => {
            let status = resp.status();
            if status.as_u16() == 200 {
                PostOutcome::Accepted
            } else {
                PostOutcome::Rejected {
                    status: status.as_u16(),
                    reason: s!(status.canonical_reason().unwrap_or("unknown status")),
                }
            }
        }
        Err(e) => PostOutcome::Failed(e.to_string()),
    }
}
