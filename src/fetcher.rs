use std::time::Duration;

use log::info;
use reqwest::{Client, StatusCode};
use thiserror::Error;

/// Failure of a single page fetch. Returned as a value, never panics
/// across the boundary; the caller decides what the user sees.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to timetable site failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("timetable site answered with status {0}")]
    Status(StatusCode),
}

/// A trait, necessary for every entity that will be used for getting
/// raw timetable markup.
#[allow(async_fn_in_trait)]
pub trait PageSource {
    async fn fetch_page(&self, query: &[(&str, &str)]) -> Result<String, FetchError>;
}

/// Client for the timetable page: one GET per call, bounded timeout,
/// no retries.
pub struct SiteClient {
    client: Client,
    base_url: String,
}

impl SiteClient {
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.to_owned(),
        })
    }
}

impl PageSource for SiteClient {
    async fn fetch_page(&self, query: &[(&str, &str)]) -> Result<String, FetchError> {
        info!("Getting timetable page with query {:?}", query);
        let response = self.client.get(&self.base_url).query(query).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }
        Ok(response.text().await?)
    }
}
