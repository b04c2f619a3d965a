use crate::config::Config;
use anyhow::{Context, Result};
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

/// Client for a Google Sheets "publish to web" CSV export.
///
/// One GET per run, no retries. The body is decoded as UTF-8 with
/// replacement so a stray byte in a human-edited sheet never aborts a build.
#[derive(Clone)]
pub struct SheetsClient {
    client: Client,
}

impl SheetsClient {
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .user_agent(&config.source.user_agent)
            .timeout(Duration::from_secs(u64::from(
                config.source.request_timeout_seconds,
            )))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { client })
    }

    pub async fn fetch_csv(&self, url: &str) -> Result<String> {
        debug!("Fetching sheet CSV from {url}");

        let response = self
            .client
            .get(url)
            .header("Accept", "text/csv,*/*")
            .send()
            .await
            .context("Sheet request failed")?
            .error_for_status()
            .context("Sheet request returned an error status")?;

        let bytes = response
            .bytes()
            .await
            .context("Failed to read sheet response body")?;

        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}
