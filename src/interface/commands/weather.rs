//! # Weather Command
//!
//! Handles `/weather current, <location>` and `/weather forecast, <location>, <days>`.

use crate::application::composer;
use crate::application::formatting;
use crate::application::router::DispatchOutcome;
use crate::domain::error::ServiceError;
use crate::domain::traits::{ChatProvider, InteractionRecorder, WeatherApi};
use crate::domain::types::{RequestHandle, WeatherMode, WeatherQuery, WeatherReport};
use anyhow::Result;
use chrono::Utc;

pub async fn handle_weather(
    api: &dyn WeatherApi,
    recorder: &dyn InteractionRecorder,
    chat: &impl ChatProvider,
    handle: Option<RequestHandle>,
    query: &WeatherQuery,
) -> Result<DispatchOutcome> {
    let report = match fetch_report(api, query).await {
        Ok(report) => report,
        Err(e) => {
            tracing::warn!(
                "/weather mode={} location='{}' days={:?} failed (status {:?}): {}",
                query.mode().as_str(),
                query.location(),
                query.days(),
                e.status(),
                e
            );
            return super::reply_failure(chat).await;
        }
    };

    if let Some(handle) = handle {
        for reading in report.readings() {
            if let Err(e) = recorder.record_weather(handle, reading).await {
                tracing::error!("Failed to record weather for '{}': {}", reading.city, e);
            }
        }
    }

    chat.send_plain(&composer::compose_weather_message(&report))
        .await
        .map_err(|e| anyhow::anyhow!(e))?;
    Ok(DispatchOutcome::Replied)
}

async fn fetch_report(
    api: &dyn WeatherApi,
    query: &WeatherQuery,
) -> Result<WeatherReport, ServiceError> {
    let payload = api.weather(query).await?;
    match query.mode() {
        WeatherMode::Current => Ok(WeatherReport::Current(
            formatting::format_weather_current(&payload, Utc::now())?,
        )),
        WeatherMode::Forecast => {
            let days = formatting::format_weather_forecast(&payload)?;
            if days.is_empty() {
                return Err(ServiceError::Decode("forecast has no days".to_string()));
            }
            Ok(WeatherReport::Forecast(days))
        }
    }
}
