//! HTTP transport for the JSON store.
//!
//! The store speaks plain REST with json-server conventions: collections at
//! `/concepts`, `/apollodocuments`, ..., query-string operators for filters
//! and paging, and the unwindowed result count in an `X-Total-Count` header.

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use apollo_core::{Error, Result};

use crate::config::BackendConfig;

/// Response header carrying the backend's unwindowed result count.
const TOTAL_COUNT_HEADER: &str = "x-total-count";

/// A fetched window plus the backend-reported size of the whole result set.
#[derive(Debug, Clone, PartialEq)]
pub struct Listing<T> {
    pub items: Vec<T>,
    /// Value of `X-Total-Count`, falling back to the window length.
    pub total: u64,
}

impl<T> Listing<T> {
    /// A listing with no items and a zero total.
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            total: 0,
        }
    }
}

/// Thin typed client for the JSON store's REST interface.
#[derive(Debug, Clone)]
pub struct JsonStore {
    client: Client,
    base_url: String,
}

impl JsonStore {
    /// Create a store client with its own connection pool.
    pub fn new(config: &BackendConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self::with_client(client, &config.json_db_url))
    }

    /// Create from an existing client, sharing its connection pool.
    pub(crate) fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// GET a collection, returning the items plus the reported total.
    pub async fn get_list<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(String, String)],
    ) -> Result<Listing<T>> {
        let response = self
            .client
            .get(self.url(path))
            .query(params)
            .send()
            .await
            .map_err(|e| Error::Request(format!("GET {} failed: {}", path, e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Backend {
                status: status.as_u16(),
                message: body,
            });
        }

        let reported_total = response
            .headers()
            .get(TOTAL_COUNT_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse::<u64>().ok());

        let items: Vec<T> = response
            .json()
            .await
            .map_err(|e| Error::Serialization(format!("Failed to parse {} response: {}", path, e)))?;

        let total = reported_total.unwrap_or(items.len() as u64);
        debug!(path, count = items.len(), total, "Fetched listing");

        Ok(Listing { items, total })
    }

    /// GET a single record. A 404 maps to `None`; other failures are errors.
    pub async fn get_one<T: DeserializeOwned>(&self, path: &str) -> Result<Option<T>> {
        let response = self
            .client
            .get(self.url(path))
            .send()
            .await
            .map_err(|e| Error::Request(format!("GET {} failed: {}", path, e)))?;

        if response.status() == StatusCode::NOT_FOUND {
            debug!(path, "Record not found");
            return Ok(None);
        }
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Backend {
                status: status.as_u16(),
                message: body,
            });
        }

        let record = response
            .json()
            .await
            .map_err(|e| Error::Serialization(format!("Failed to parse {} response: {}", path, e)))?;

        Ok(Some(record))
    }

    /// PUT a full record, returning the stored result.
    ///
    /// The store replaces the record wholesale, so callers must send every
    /// field they intend to keep.
    pub async fn put<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .client
            .put(self.url(path))
            .json(body)
            .send()
            .await
            .map_err(|e| Error::Request(format!("PUT {} failed: {}", path, e)))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(Error::NotFound(format!("resource at {}", path)));
        }
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Backend {
                status: status.as_u16(),
                message: body,
            });
        }

        response
            .json()
            .await
            .map_err(|e| Error::Serialization(format!("Failed to parse {} response: {}", path, e)))
    }
}
