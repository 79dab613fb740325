//! Hosted PostgREST backend.

use crate::constants;
use crate::core::store::{CredentialStore, StoreError};
use crate::models::credential::{Credential, CredentialFields};
use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

/// Connection settings for the hosted table.
#[derive(Debug, Clone)]
pub struct RestStoreConfig {
    /// Project base URL, without the `/rest/v1` suffix.
    pub url: String,
    /// Public client key.
    pub api_key: String,
    pub table: String,
    pub timeout: Duration,
}

pub struct RestStore {
    endpoint: String,
    api_key: String,
    client: reqwest::Client,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    message: Option<String>,
}

impl RestStore {
    /// # Errors
    ///
    /// Returns `StoreError::Config` if the URL, key, or table is empty.
    pub fn new(cfg: RestStoreConfig) -> Result<Self, StoreError> {
        let url = cfg.url.trim().trim_end_matches('/');
        if url.is_empty() {
            return Err(StoreError::Config(
                "missing store url; set CREDMAN_URL or [store].url".to_owned(),
            ));
        }
        if cfg.api_key.trim().is_empty() {
            return Err(StoreError::Config(
                "missing api key; set CREDMAN_API_KEY or [store].api_key".to_owned(),
            ));
        }
        if cfg.table.trim().is_empty() {
            return Err(StoreError::Config("table name cannot be empty".to_owned()));
        }

        let client = reqwest::Client::builder()
            .timeout(cfg.timeout)
            .user_agent(concat!("credman/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(StoreError::Network)?;

        Ok(Self {
            endpoint: format!("{}{}/{}", url, constants::REST_PATH, cfg.table.trim()),
            api_key: cfg.api_key,
            client,
        })
    }

    fn request(&self, method: Method) -> RequestBuilder {
        self.client
            .request(method, &self.endpoint)
            .header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {}", self.api_key))
    }

    /// Send a request and decode its JSON body. No retries.
    async fn send<T: DeserializeOwned>(&self, req: RequestBuilder) -> Result<T, StoreError> {
        let resp = req.send().await.map_err(transport_error)?;

        let status = resp.status();
        let text = resp.text().await.map_err(transport_error)?;

        if status.is_success() {
            return serde_json::from_str(&text).map_err(StoreError::Json);
        }

        let message = serde_json::from_str::<ApiErrorBody>(&text)
            .ok()
            .and_then(|b| b.message)
            .unwrap_or_else(|| format!("HTTP {}", status.as_u16()));

        tracing::debug!(status = status.as_u16(), %message, "store request rejected");

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(StoreError::Auth(message));
        }
        Err(StoreError::Api {
            status_code: status.as_u16(),
            message,
        })
    }
}

fn transport_error(e: reqwest::Error) -> StoreError {
    if e.is_timeout() {
        StoreError::Timeout
    } else {
        StoreError::Network(e)
    }
}

#[async_trait]
impl CredentialStore for RestStore {
    async fn list(&self) -> Result<Vec<Credential>, StoreError> {
        let req = self
            .request(Method::GET)
            .query(&[("select", "*"), ("order", "created_at.desc")]);
        let rows: Vec<Credential> = self.send(req).await?;
        tracing::debug!(count = rows.len(), "listed credentials");
        Ok(rows)
    }

    async fn insert(&self, fields: &CredentialFields) -> Result<Credential, StoreError> {
        let req = self
            .request(Method::POST)
            .header("Prefer", "return=representation")
            .json(&[fields]);
        let rows: Vec<Credential> = self.send(req).await?;
        let stored = rows.into_iter().next().ok_or(StoreError::EmptyInsert)?;
        tracing::info!(id = %stored.id, platform = %stored.platform, "inserted credential");
        Ok(stored)
    }

    async fn update(&self, id: &str, fields: &CredentialFields) -> Result<(), StoreError> {
        let filter = format!("eq.{}", id);
        let req = self
            .request(Method::PATCH)
            .query(&[("id", filter.as_str())])
            .header("Prefer", "return=representation")
            .json(fields);
        let rows: Vec<Credential> = self.send(req).await?;
        if rows.is_empty() {
            return Err(StoreError::NotFound { id: id.to_owned() });
        }
        tracing::info!(id, "updated credential");
        Ok(())
    }
}
