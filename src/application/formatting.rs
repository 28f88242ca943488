//! # Response Formatting
//!
//! Pure transforms from upstream JSON payloads into domain models.
//! Each upstream shape is decoded into a typed payload first; a shape mismatch surfaces as
//! `ServiceError::Decode` instead of a missing-key fault further down.

use crate::domain::error::ServiceError;
use crate::domain::types::{RawPayload, WeatherReading, WordDefinition};
use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;

/// Only the first few phonetic entries are searched for a pronunciation clip.
const AUDIO_SEARCH_DEPTH: usize = 3;

// Dictionary API

#[derive(Debug, Deserialize)]
struct WordEntryPayload {
    word: String,
    #[serde(default)]
    phonetics: Vec<PhoneticPayload>,
    #[serde(default)]
    meanings: Vec<MeaningPayload>,
}

#[derive(Debug, Deserialize)]
struct PhoneticPayload {
    #[serde(default)]
    audio: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MeaningPayload {
    #[serde(rename = "partOfSpeech", default)]
    part_of_speech: Option<String>,
    #[serde(default)]
    definitions: Vec<DefinitionPayload>,
}

#[derive(Debug, Deserialize)]
struct DefinitionPayload {
    #[serde(default)]
    definition: Option<String>,
    #[serde(default)]
    example: Option<String>,
}

/// One `WordDefinition` per definition of every meaning of every entry, in payload order.
pub fn format_definitions(payload: &RawPayload) -> Result<Vec<WordDefinition>, ServiceError> {
    if !payload.is_array() {
        return Err(ServiceError::Decode(
            "expected a list of word entries".to_string(),
        ));
    }
    let entries: Vec<WordEntryPayload> = serde_json::from_value(payload.clone())?;

    let mut definitions = Vec::new();
    for entry in entries {
        let audio_url = resolve_audio_url(&entry.phonetics);
        for meaning in entry.meanings {
            for def in meaning.definitions {
                definitions.push(WordDefinition {
                    word: entry.word.clone(),
                    audio_url: audio_url.clone(),
                    part_of_speech: meaning.part_of_speech.clone(),
                    definition: def.definition,
                    example: def.example,
                });
            }
        }
    }
    Ok(definitions)
}

/// First non-empty audio URL among the leading phonetic entries.
fn resolve_audio_url(phonetics: &[PhoneticPayload]) -> Option<String> {
    phonetics
        .iter()
        .take(AUDIO_SEARCH_DEPTH)
        .filter_map(|p| p.audio.as_deref())
        .map(str::trim)
        .find(|url| !url.is_empty())
        .map(str::to_string)
}

// Weather API

#[derive(Debug, Deserialize)]
struct LocationPayload {
    name: String,
    #[serde(default)]
    region: String,
    #[serde(default)]
    country: String,
}

#[derive(Debug, Deserialize)]
struct ConditionPayload {
    text: String,
}

#[derive(Debug, Deserialize)]
struct CurrentResponse {
    current: CurrentPayload,
    location: LocationPayload,
}

#[derive(Debug, Deserialize)]
struct CurrentPayload {
    temp_c: f64,
    #[serde(default)]
    condition: Option<ConditionPayload>,
    #[serde(default)]
    wind_kph: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    location: LocationPayload,
    forecast: ForecastPayload,
}

#[derive(Debug, Deserialize)]
struct ForecastPayload {
    forecastday: Vec<ForecastDayPayload>,
}

#[derive(Debug, Deserialize)]
struct ForecastDayPayload {
    date: String,
    day: DayPayload,
}

#[derive(Debug, Deserialize)]
struct DayPayload {
    maxtemp_c: f64,
    mintemp_c: f64,
    avgtemp_c: f64,
    #[serde(default)]
    maxwind_kph: Option<f64>,
    #[serde(default)]
    condition: Option<ConditionPayload>,
}

/// Current conditions. The reading is stamped with `now`, not an upstream time.
pub fn format_weather_current(
    payload: &RawPayload,
    now: DateTime<Utc>,
) -> Result<WeatherReading, ServiceError> {
    let response: CurrentResponse = serde_json::from_value(payload.clone())?;
    let location = response.location;

    Ok(WeatherReading {
        date: now,
        city: location.name,
        region: location.region,
        country: location.country,
        condition: response.current.condition.map(|c| c.text),
        avg_temp: Some(response.current.temp_c),
        min_temp: None,
        max_temp: None,
        wind_velocity: response.current.wind_kph,
    })
}

/// One reading per forecast day, in upstream order, sharing the single location.
pub fn format_weather_forecast(payload: &RawPayload) -> Result<Vec<WeatherReading>, ServiceError> {
    let response: ForecastResponse = serde_json::from_value(payload.clone())?;
    let location = response.location;

    response
        .forecast
        .forecastday
        .into_iter()
        .map(|day| {
            let date = NaiveDate::parse_from_str(&day.date, "%Y-%m-%d")
                .map_err(|e| ServiceError::Decode(format!("bad forecast date `{}`: {e}", day.date)))?
                .and_hms_opt(0, 0, 0)
                .map(|dt| dt.and_utc())
                .ok_or_else(|| ServiceError::Decode(format!("bad forecast date `{}`", day.date)))?;

            Ok(WeatherReading {
                date,
                city: location.name.clone(),
                region: location.region.clone(),
                country: location.country.clone(),
                condition: day.day.condition.map(|c| c.text),
                avg_temp: Some(day.day.avgtemp_c),
                min_temp: Some(day.day.mintemp_c),
                max_temp: Some(day.day.maxtemp_c),
                wind_velocity: day.day.maxwind_kph,
            })
        })
        .collect()
}
