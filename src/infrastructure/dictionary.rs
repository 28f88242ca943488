//! # Dictionary Client
//!
//! Thin client for the free dictionary API (`GET {base}/{word}`), plus the raw download used
//! for pronunciation audio.

use crate::domain::config::DictionaryConfig;
use crate::domain::error::ServiceError;
use crate::domain::traits::DictionaryApi;
use crate::domain::types::RawPayload;
use crate::infrastructure::http;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, Url};

pub struct DictionaryClient {
    http: Client,
    base_url: Url,
}

impl DictionaryClient {
    pub fn new(config: &DictionaryConfig) -> Result<Self> {
        let base_url = Url::parse(&config.base_url)
            .with_context(|| format!("Invalid dictionary base_url: {}", config.base_url))?;
        Ok(Self {
            http: http::build_client(config.timeout)?,
            base_url,
        })
    }

    /// Lower-cased, escaped word appended as the last path segment.
    pub fn word_url(&self, word: &str) -> Result<Url, ServiceError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ServiceError::Transport {
                status: None,
                body: format!("base url {} cannot take a path", self.base_url),
            })?
            .pop_if_empty()
            .push(&word.to_lowercase());
        Ok(url)
    }
}

#[async_trait]
impl DictionaryApi for DictionaryClient {
    async fn lookup(&self, word: &str) -> Result<RawPayload, ServiceError> {
        let url = self.word_url(word)?;
        tracing::debug!("Dictionary lookup: {}", url);

        let response = self
            .http
            .get(url)
            .header("Content-Type", "application/json")
            .send()
            .await?;
        http::read_json(response).await
    }

    async fn fetch_audio(&self, url: &str) -> Result<Vec<u8>, ServiceError> {
        tracing::debug!("Fetching audio: {}", url);
        let response = match self.http.get(url).send().await {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!("Audio download from {} failed: {}", url, e);
                return Err(e.into());
            }
        };
        http::read_bytes(response).await.inspect_err(|e| {
            tracing::warn!("Audio download from {} failed: {}", url, e);
        })
    }
}
