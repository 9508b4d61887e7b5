// src/core/net.rs
// Blocking HTTP GET. Pages are fetched one at a time, no retries.

use std::error::Error;
use std::time::Duration;

use reqwest::blocking::Client;

use crate::config::consts::{REQUEST_TIMEOUT_SECS, USER_AGENT};

/// Anything that can turn a URL into a page body.
/// The scraper only talks to this, so fixtures can stand in for the site.
pub trait Fetch {
    fn get(&self, url: &str) -> Result<String, Box<dyn Error>>;
}

pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self, Box<dyn Error>> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;
        Ok(Self { client })
    }
}

impl Fetch for HttpFetcher {
    fn get(&self, url: &str) -> Result<String, Box<dyn Error>> {
        logd!("GET {}", url);
        let resp = self.client.get(url).send()?;
        let status = resp.status();
        if !status.is_success() {
            return Err(format!("HTTP error: {} {}", status, url).into());
        }
        Ok(resp.text()?)
    }
}
