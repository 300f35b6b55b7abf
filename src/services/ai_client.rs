//! Shared HTTP client for the hosted AI services.
//!
//! Wraps one pooled `reqwest::Client` with the configured timeout and maps
//! transport, status and decoding failures into `ServiceError`.

use anyhow::{Context, Result};
use reqwest::{Client, RequestBuilder};
use serde::{de::DeserializeOwned, Serialize};
use std::time::Duration;
use tracing::{debug, error};

use super::ServiceError;
use crate::middleware::request_id::X_REQUEST_ID;

/// Client for the AI services.
#[derive(Clone)]
pub struct AiClient {
    client: Client,
}

impl AiClient {
    /// Create a new AI service client.
    pub fn new(timeout_seconds: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .build()
            .context("Failed to create HTTP client")?;

        tracing::info!(timeout_seconds, "AI client initialized");

        Ok(Self { client })
    }

    /// Start a JSON POST request; callers add their auth headers.
    pub fn post(&self, url: &str, request_id: Option<&str>) -> RequestBuilder {
        let mut req = self
            .client
            .post(url)
            .header("Content-Type", "application/json");

        if let Some(rid) = request_id {
            req = req.header(X_REQUEST_ID, rid);
        }

        req
    }

    /// Send a request with a JSON body and decode a JSON response.
    pub async fn send_json<T: Serialize + ?Sized, R: DeserializeOwned>(
        &self,
        req: RequestBuilder,
        body: &T,
    ) -> Result<R, ServiceError> {
        let response = req.json(body).send().await.map_err(|e| {
            error!(error = %e, "AI service request failed");
            ServiceError::Http(e)
        })?;

        let status = response.status();
        debug!(status = %status, "AI service response");

        if status.is_success() {
            response.json::<R>().await.map_err(|e| {
                error!(error = %e, "Failed to parse AI service response");
                ServiceError::Parse(e.to_string())
            })
        } else {
            // Error bodies differ between providers; keep the raw text.
            let message = response
                .text()
                .await
                .ok()
                .filter(|body| !body.trim().is_empty())
                .unwrap_or_else(|| format!("AI service error: {}", status));

            error!(status = %status, message = %message, "AI service error");
            Err(ServiceError::Status {
                status: status.as_u16(),
                message,
            })
        }
    }
}
