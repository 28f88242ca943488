//! # HTTP Helpers
//!
//! Shared pieces for the upstream API clients: client construction with a per-call timeout,
//! and the status/body classification every response goes through.

use crate::domain::error::ServiceError;
use crate::domain::types::RawPayload;
use anyhow::{Context, Result};
use reqwest::{Client, Response, StatusCode};
use std::time::Duration;

/// Builds the session a client owns for its lifetime.
pub fn build_client(timeout_secs: u64) -> Result<Client> {
    Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .user_agent(concat!("almanac/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("Failed to create HTTP client")
}

/// 2xx with a JSON body, otherwise a classified error.
pub async fn read_json(response: Response) -> Result<RawPayload, ServiceError> {
    let status = response.status();
    let body = response.bytes().await?;
    classify_json(status, &body)
}

/// 2xx with any body, otherwise a classified error.
pub async fn read_bytes(response: Response) -> Result<Vec<u8>, ServiceError> {
    let status = response.status();
    let body = response.bytes().await?;
    if !status.is_success() {
        return Err(transport(status, &body));
    }
    Ok(body.to_vec())
}

pub fn classify_json(status: StatusCode, body: &[u8]) -> Result<RawPayload, ServiceError> {
    if !status.is_success() {
        return Err(transport(status, body));
    }
    Ok(serde_json::from_slice(body)?)
}

fn transport(status: StatusCode, body: &[u8]) -> ServiceError {
    ServiceError::Transport {
        status: Some(status.as_u16()),
        body: String::from_utf8_lossy(body).into_owned(),
    }
}
