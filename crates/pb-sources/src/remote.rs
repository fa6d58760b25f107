//! Remote export table reader
//!
//! Posts a fixed form body to the registry endpoint and reads the first
//! column of the returned HTML table.

use std::collections::BTreeMap;
use std::thread;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use scraper::{Html, Selector};
use serde::Deserialize;

use crate::{DomainSource, SourceError};

const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_RETRIES: u32 = 2;
const DEFAULT_RETRY_DELAY_MS: u64 = 1000;

/// Endpoint, payload and transport policy for the remote reader.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RemoteConfig {
    pub url: String,
    /// Form-encoded request body, sent as is.
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
    /// Skip TLS certificate verification. Off unless set explicitly.
    #[serde(default)]
    pub accept_invalid_certs: bool,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Extra attempts after the first failed one.
    #[serde(default = "default_retries")]
    pub retries: u32,
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}
fn default_retries() -> u32 {
    DEFAULT_RETRIES
}
fn default_retry_delay_ms() -> u64 {
    DEFAULT_RETRY_DELAY_MS
}

impl RemoteConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            body: String::new(),
            headers: BTreeMap::new(),
            accept_invalid_certs: false,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            retries: DEFAULT_RETRIES,
            retry_delay_ms: DEFAULT_RETRY_DELAY_MS,
        }
    }
}

/// Reader over the first column of the remote result table.
pub struct RemoteTableSource {
    config: RemoteConfig,
    client: Client,
}

impl RemoteTableSource {
    pub fn new(config: RemoteConfig) -> Result<Self, SourceError> {
        if config.url.trim().is_empty() {
            return Err(SourceError::Config("remote url is empty".to_string()));
        }

        if config.accept_invalid_certs {
            log::warn!("TLS certificate verification disabled for '{}'", config.url);
        }

        let client = Client::builder()
            .default_headers(build_headers(&config.headers)?)
            .timeout(Duration::from_secs(config.timeout_secs))
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .build()
            .map_err(|e| SourceError::Config(format!("failed to build http client: {}", e)))?;

        Ok(Self { config, client })
    }

    /// POST the configured body, retrying network failures.
    fn fetch_body(&self) -> Result<String, SourceError> {
        let attempts = self.config.retries + 1;
        let delay = Duration::from_millis(self.config.retry_delay_ms);
        let mut attempt = 1;

        loop {
            match self.fetch_once() {
                Ok(body) => return Ok(body),
                Err(e) if e.is_retryable() && attempt < attempts => {
                    log::warn!("{} (attempt {}/{}), retrying", e, attempt, attempts);
                    thread::sleep(delay);
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }

    fn fetch_once(&self) -> Result<String, SourceError> {
        let url = &self.config.url;
        let response = self
            .client
            .post(url)
            .body(self.config.body.clone())
            .send()
            .map_err(|source| SourceError::Request {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Fetch {
                url: url.clone(),
                status: status.as_u16(),
            });
        }

        response.text().map_err(|source| SourceError::Request {
            url: url.clone(),
            source,
        })
    }
}

impl DomainSource for RemoteTableSource {
    fn name(&self) -> &str {
        &self.config.url
    }

    fn read(&self) -> Result<Vec<String>, SourceError> {
        let body = self.fetch_body()?;
        extract_first_column(&body)
    }
}

fn build_headers(headers: &BTreeMap<String, String>) -> Result<HeaderMap, SourceError> {
    let mut map = HeaderMap::new();
    for (name, value) in headers {
        let header_name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| SourceError::Config(format!("invalid header name '{}': {}", name, e)))?;
        let header_value = HeaderValue::from_str(value)
            .map_err(|e| SourceError::Config(format!("invalid value for header '{}': {}", name, e)))?;
        map.insert(header_name, header_value);
    }
    Ok(map)
}

fn selector(css: &str) -> Result<Selector, SourceError> {
    Selector::parse(css).map_err(|e| SourceError::Parse(format!("invalid selector '{}': {:?}", css, e)))
}

/// Text of every first cell of every table row. Blank cells are skipped.
pub fn extract_first_column(html: &str) -> Result<Vec<String>, SourceError> {
    let document = Html::parse_document(html);

    let table = selector("table")?;
    if document.select(&table).next().is_none() {
        return Err(SourceError::Parse("response contains no result table".to_string()));
    }

    let first_cell = selector("td:first-of-type")?;
    Ok(document
        .select(&first_cell)
        .map(|cell| cell.text().collect::<String>().trim().to_string())
        .filter(|text| !text.is_empty())
        .collect())
}
