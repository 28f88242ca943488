//! # Message Composer
//!
//! Renders normalized domain models into the text sent back to the user, and fetches the
//! pronunciation clip for dictionary lookups through an on-disk cache.

use crate::domain::error::ServiceError;
use crate::domain::traits::DictionaryApi;
use crate::domain::types::{WeatherReport, WordDefinition};
use crate::strings::messages;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

const NOT_AVAILABLE: &str = "n/a";

static PARTIAL_SEQ: AtomicU64 = AtomicU64::new(0);

/// Header with the first entry's headword, then one block per definition in input order.
pub fn compose_dictionary_message(definitions: &[WordDefinition]) -> String {
    let Some(first) = definitions.first() else {
        return String::new();
    };

    let mut msg = messages::word_header(&first.word);
    for def in definitions {
        msg.push_str(&messages::word_sense(
            def.part_of_speech.as_deref().unwrap_or(NOT_AVAILABLE),
            def.definition.as_deref().unwrap_or(NOT_AVAILABLE),
        ));
        if let Some(example) = &def.example {
            msg.push_str(&messages::word_example(example));
        }
    }
    msg
}

pub fn compose_weather_message(report: &WeatherReport) -> String {
    match report {
        WeatherReport::Current(r) => messages::current_weather(
            &r.city,
            &r.region,
            &r.country,
            r.condition.as_deref().unwrap_or(NOT_AVAILABLE),
            &number(r.avg_temp),
            &number(r.wind_velocity),
        ),
        WeatherReport::Forecast(days) => {
            let Some(first) = days.first() else {
                return String::new();
            };
            let mut msg = messages::forecast_header(&first.city, &first.region, &first.country);
            for day in days {
                msg.push_str(&messages::forecast_day(
                    &day.date.format("%Y-%m-%d").to_string(),
                    &number(day.max_temp),
                    &number(day.min_temp),
                    &number(day.avg_temp),
                    &number(day.wind_velocity),
                    day.condition.as_deref().unwrap_or(NOT_AVAILABLE),
                ));
            }
            msg
        }
    }
}

fn number(value: Option<f64>) -> String {
    value.map_or_else(|| NOT_AVAILABLE.to_string(), |v| v.to_string())
}

/// Pronunciation clips stored as `<dir>/<word>.mp3`.
/// A file that already exists is served from disk without a network call.
#[derive(Debug, Clone)]
pub struct AudioCache {
    dir: PathBuf,
}

impl AudioCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, word: &str) -> PathBuf {
        let name: String = word
            .to_lowercase()
            .chars()
            .map(|c| if c.is_alphanumeric() || c == '-' || c == '\'' { c } else { '_' })
            .collect();
        self.dir.join(messages::audio_file_name(&name))
    }

    /// Returns the clip bytes, downloading and storing them on a cache miss.
    pub async fn fetch(
        &self,
        word: &str,
        url: &str,
        api: &dyn DictionaryApi,
    ) -> Result<Vec<u8>, ServiceError> {
        let path = self.path_for(word);
        if let Ok(bytes) = tokio::fs::read(&path).await {
            tracing::debug!("Audio cache hit for '{}' at {}", word, path.display());
            return Ok(bytes);
        }

        let bytes = api.fetch_audio(url).await?;
        if let Err(e) = self.store(&path, &bytes).await {
            tracing::warn!("Failed to cache audio for '{}' at {}: {}", word, path.display(), e);
        }
        Ok(bytes)
    }

    /// The clip only appears under its final name once fully written.
    async fn store(&self, path: &Path, bytes: &[u8]) -> std::io::Result<()> {
        tokio::fs::create_dir_all(&self.dir).await?;

        let partial = path.with_extension(format!(
            "mp3.{}-{}.part",
            std::process::id(),
            PARTIAL_SEQ.fetch_add(1, Ordering::Relaxed)
        ));
        if let Err(e) = tokio::fs::write(&partial, bytes).await {
            let _ = tokio::fs::remove_file(&partial).await;
            return Err(e);
        }
        tokio::fs::rename(&partial, path).await
    }
}
