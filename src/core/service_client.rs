// src/core/service_client.rs
//! Shared HTTP client for every call to the recruiting backend

use anyhow::{Context, Result};
use reqwest::{RequestBuilder, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::time::Duration;
use tracing::{debug, error};

/// The backend answered with a non-success status
#[derive(Debug)]
pub struct HttpStatusError {
    pub status: StatusCode,
    pub body: String,
}

impl HttpStatusError {
    /// Find a status error anywhere in an error's context chain
    pub fn find(err: &anyhow::Error) -> Option<&HttpStatusError> {
        err.chain().find_map(|cause| cause.downcast_ref::<HttpStatusError>())
    }
}

impl Display for HttpStatusError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "HTTP {} error: {}", self.status, self.body)
    }
}

impl std::error::Error for HttpStatusError {}

pub struct ServiceClient {
    client: reqwest::Client,
    base_url: String,
}

impl ServiceClient {
    /// Create new service client with configuration
    pub fn new(base_url: &str, timeout_seconds: u64) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Join an endpoint such as `/perguntas` onto the base URL
    pub fn url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url, endpoint.trim_start_matches('/'))
    }

    /// Generic GET request
    pub async fn get<R>(&self, endpoint: &str) -> Result<R>
    where
        R: DeserializeOwned,
    {
        let url = self.url(endpoint);
        debug!("GET {}", url);

        let response = self
            .send(self.client.get(&url))
            .await
            .with_context(|| format!("Failed to GET from {}", url))?;

        response
            .json::<R>()
            .await
            .with_context(|| format!("Failed to parse JSON response from {}", url))
    }

    /// Generic POST request with JSON
    pub async fn post_json<T, R>(&self, endpoint: &str, payload: &T) -> Result<R>
    where
        T: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = self.url(endpoint);
        debug!("POST {}", url);

        let response = self
            .send(self.client.post(&url).json(payload))
            .await
            .with_context(|| format!("Failed to POST to {}", url))?;

        response
            .json::<R>()
            .await
            .with_context(|| format!("Failed to parse JSON response from {}", url))
    }

    /// Generic PUT request with JSON
    pub async fn put_json<T, R>(&self, endpoint: &str, payload: &T) -> Result<R>
    where
        T: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = self.url(endpoint);
        debug!("PUT {}", url);

        let response = self
            .send(self.client.put(&url).json(payload))
            .await
            .with_context(|| format!("Failed to PUT to {}", url))?;

        response
            .json::<R>()
            .await
            .with_context(|| format!("Failed to parse JSON response from {}", url))
    }

    /// DELETE request; the response body is ignored
    pub async fn delete(&self, endpoint: &str) -> Result<()> {
        let url = self.url(endpoint);
        debug!("DELETE {}", url);

        self.send(self.client.delete(&url))
            .await
            .with_context(|| format!("Failed to DELETE {}", url))?;
        Ok(())
    }

    /// Send a request and turn any non-success status into an error carrying the body text
    async fn send(&self, request: RequestBuilder) -> Result<Response> {
        let response = request.send().await.context("HTTP request failed")?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        error!("Backend error response {}: {}", status, error_text);
        Err(HttpStatusError {
            status,
            body: error_text,
        }
        .into())
    }
}
