//! # Weather Client
//!
//! Thin client for the weather API:
//! `POST {base}/{current|forecast}.json?key=…&q=…[&days=…]`.

use crate::domain::config::WeatherConfig;
use crate::domain::error::ServiceError;
use crate::domain::traits::WeatherApi;
use crate::domain::types::{RawPayload, WeatherQuery};
use crate::infrastructure::http;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, Url};

pub struct WeatherClient {
    http: Client,
    base_url: Url,
    api_key: String,
}

impl WeatherClient {
    pub fn new(config: &WeatherConfig) -> Result<Self> {
        let base_url = Url::parse(&config.base_url)
            .with_context(|| format!("Invalid weather base_url: {}", config.base_url))?;
        Ok(Self {
            http: http::build_client(config.timeout)?,
            base_url,
            api_key: config.resolve_api_key()?,
        })
    }

    pub fn endpoint(&self, query: &WeatherQuery) -> Result<Url, ServiceError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ServiceError::Transport {
                status: None,
                body: format!("base url {} cannot take a path", self.base_url),
            })?
            .pop_if_empty()
            .push(&format!("{}.json", query.mode().as_str()));

        {
            let mut pairs = url.query_pairs_mut();
            pairs
                .append_pair("key", &self.api_key)
                .append_pair("q", query.location());
            if let Some(days) = query.days() {
                pairs.append_pair("days", &days.to_string());
            }
        }
        Ok(url)
    }
}

#[async_trait]
impl WeatherApi for WeatherClient {
    async fn weather(&self, query: &WeatherQuery) -> Result<RawPayload, ServiceError> {
        let url = self.endpoint(query)?;
        tracing::debug!(
            "Weather request: mode={} location='{}' days={:?}",
            query.mode().as_str(),
            query.location(),
            query.days()
        );

        let response = self
            .http
            .post(url)
            .header("Content-Type", "application/json")
            .send()
            .await?;
        http::read_json(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> WeatherClient {
        client_at("https://api.weatherapi.com/v1", "k3y")
    }

    fn client_at(base_url: &str, key: &str) -> WeatherClient {
        WeatherClient::new(&WeatherConfig {
            base_url: base_url.into(),
            api_key: Some(key.into()),
            api_key_env: None,
            timeout: 5,
        })
        .unwrap()
    }

    fn paris() -> WeatherQuery {
        WeatherQuery::Current {
            location: "Paris".into(),
        }
    }

    #[test]
    fn current_endpoint_has_no_days() {
        let url = client()
            .endpoint(&WeatherQuery::Current {
                location: "Paris".into(),
            })
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.weatherapi.com/v1/current.json?key=k3y&q=Paris"
        );
    }

    #[test]
    fn forecast_endpoint_carries_days_and_escapes_location() {
        let url = client()
            .endpoint(&WeatherQuery::Forecast {
                location: "Rostov on Don".into(),
                days: 3,
            })
            .unwrap();
        assert_eq!(url.path(), "/v1/forecast.json");
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(
            pairs,
            vec![
                ("key".to_string(), "k3y".to_string()),
                ("q".to_string(), "Rostov on Don".to_string()),
                ("days".to_string(), "3".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn connection_failure_does_not_leak_the_key() {
        let base = format!("{}/v1", http::stub::closed_port().await);
        let c = client_at(&base, "SUPERSECRETKEY");

        let err = c.weather(&paris()).await.unwrap_err();
        assert!(matches!(err, ServiceError::Transport { status: None, .. }), "{err}");
        assert!(!err.to_string().contains("SUPERSECRETKEY"), "{err}");
        assert!(!format!("{err:?}").contains("SUPERSECRETKEY"));
    }

    #[tokio::test]
    async fn upstream_error_keeps_status() {
        let base = http::stub::respond_once(
            "400 Bad Request",
            br#"{"error":{"code":1006,"message":"No matching location found."}}"#,
        )
        .await;

        let err = client_at(&base, "k3y").weather(&paris()).await.unwrap_err();
        assert_eq!(err.status(), Some(400));
        assert!(err.to_string().contains("No matching location"));
    }

    #[tokio::test]
    async fn success_returns_payload() {
        let base = http::stub::respond_once("200 OK", br#"{"location":{"name":"Paris"}}"#).await;
        let payload = client_at(&base, "k3y").weather(&paris()).await.unwrap();
        assert_eq!(payload["location"]["name"], "Paris");
    }

    #[test]
    fn missing_key_fails_construction() {
        assert!(WeatherClient::new(&WeatherConfig::default()).is_err());
    }
}
