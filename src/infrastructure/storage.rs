//! # Interaction Store
//!
//! SQLite-backed `InteractionRecorder`. Users, requests and their result rows are only ever
//! inserted; child rows reference their request through `request_id`.

use crate::domain::error::PersistenceError;
use crate::domain::traits::InteractionRecorder;
use crate::domain::types::{
    NewRequest, RequestHandle, UserProfile, WeatherReading, WordDefinition,
};
use async_trait::async_trait;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use std::str::FromStr;

const SCHEMA: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS users (
        user_id TEXT PRIMARY KEY,
        username TEXT NOT NULL,
        first_name TEXT,
        last_name TEXT,
        is_bot INTEGER NOT NULL,
        language_code TEXT
    )",
    "CREATE TABLE IF NOT EXISTS user_requests (
        msg_id INTEGER PRIMARY KEY AUTOINCREMENT,
        msg_txt TEXT NOT NULL,
        com_type TEXT,
        com_args TEXT,
        msg_time TEXT NOT NULL,
        user_id TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS word_definitions (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        request_id INTEGER NOT NULL REFERENCES user_requests(msg_id),
        word TEXT NOT NULL,
        audio_url TEXT,
        part_of_speech TEXT,
        definition TEXT,
        example TEXT
    )",
    "CREATE TABLE IF NOT EXISTS weather_readings (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        request_id INTEGER NOT NULL REFERENCES user_requests(msg_id),
        reading_date TEXT NOT NULL,
        city TEXT NOT NULL,
        region TEXT NOT NULL,
        country TEXT NOT NULL,
        condition TEXT,
        avg_temp REAL,
        min_temp REAL,
        max_temp REAL,
        wind_velocity REAL
    )",
    "CREATE INDEX IF NOT EXISTS idx_requests_user ON user_requests(user_id)",
];

#[derive(Clone)]
pub struct SqliteRecorder {
    pool: SqlitePool,
}

impl SqliteRecorder {
    /// Opens (creating if missing) the database at `url` and applies the schema.
    pub async fn connect(url: &str) -> Result<Self, PersistenceError> {
        let opts = SqliteConnectOptions::from_str(url)?
            .create_if_missing(true)
            .foreign_keys(true)
            .journal_mode(SqliteJournalMode::Wal);

        // In-memory databases live per connection.
        let max_connections = if url.contains(":memory:") { 1 } else { 5 };
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(opts)
            .await?;

        let recorder = Self { pool };
        recorder.migrate().await?;
        Ok(recorder)
    }

    async fn migrate(&self) -> Result<(), PersistenceError> {
        for statement in SCHEMA {
            sqlx::query(*statement).execute(&self.pool).await?;
        }
        Ok(())
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl InteractionRecorder for SqliteRecorder {
    async fn ensure_user(&self, profile: &UserProfile) -> Result<(), PersistenceError> {
        let result = sqlx::query(
            "INSERT INTO users (user_id, username, first_name, last_name, is_bot, language_code)
             VALUES (?, ?, ?, ?, ?, ?)
             ON CONFLICT(user_id) DO NOTHING",
        )
        .bind(&profile.user_id)
        .bind(&profile.username)
        .bind(&profile.first_name)
        .bind(&profile.last_name)
        .bind(profile.is_bot)
        .bind(&profile.language_code)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() > 0 {
            tracing::info!("Registered new user {}", profile.user_id);
        }
        Ok(())
    }

    async fn record_request(&self, request: &NewRequest) -> Result<RequestHandle, PersistenceError> {
        let args = request
            .command_args
            .as_ref()
            .map(serde_json::to_string)
            .transpose()?;

        let result = sqlx::query(
            "INSERT INTO user_requests (msg_txt, com_type, com_args, msg_time, user_id)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&request.text)
        .bind(&request.command_type)
        .bind(args)
        .bind(request.timestamp.to_rfc3339())
        .bind(&request.user_id)
        .execute(&self.pool)
        .await?;

        Ok(RequestHandle(result.last_insert_rowid()))
    }

    async fn record_definition(
        &self,
        handle: RequestHandle,
        definition: &WordDefinition,
    ) -> Result<(), PersistenceError> {
        sqlx::query(
            "INSERT INTO word_definitions (request_id, word, audio_url, part_of_speech, definition, example)
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(handle.0)
        .bind(&definition.word)
        .bind(&definition.audio_url)
        .bind(&definition.part_of_speech)
        .bind(&definition.definition)
        .bind(&definition.example)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn record_weather(
        &self,
        handle: RequestHandle,
        reading: &WeatherReading,
    ) -> Result<(), PersistenceError> {
        sqlx::query(
            "INSERT INTO weather_readings
             (request_id, reading_date, city, region, country, condition, avg_temp, min_temp, max_temp, wind_velocity)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(handle.0)
        .bind(reading.date.to_rfc3339())
        .bind(&reading.city)
        .bind(&reading.region)
        .bind(&reading.country)
        .bind(&reading.condition)
        .bind(reading.avg_temp)
        .bind(reading.min_temp)
        .bind(reading.max_temp)
        .bind(reading.wind_velocity)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde_json::json;
    use sqlx::Row;

    async fn recorder() -> SqliteRecorder {
        SqliteRecorder::connect("sqlite::memory:").await.unwrap()
    }

    fn profile(id: &str, name: &str) -> UserProfile {
        UserProfile {
            user_id: id.into(),
            username: name.into(),
            first_name: Some("Ann".into()),
            last_name: None,
            is_bot: false,
            language_code: Some("en".into()),
        }
    }

    fn request(text: &str) -> NewRequest {
        NewRequest {
            user_id: "@ann:example.org".into(),
            text: text.into(),
            command_type: "/weather".into(),
            command_args: Some(json!({ "mode": "current", "location": "Paris" })),
            timestamp: Utc::now(),
        }
    }

    async fn count(rec: &SqliteRecorder, table: &str) -> i64 {
        sqlx::query(sqlx::AssertSqlSafe(format!("SELECT COUNT(*) AS n FROM {table}")))
            .fetch_one(&rec.pool)
            .await
            .unwrap()
            .get("n")
    }

    #[tokio::test]
    async fn ensure_user_inserts_once() {
        let rec = recorder().await;
        rec.ensure_user(&profile("@ann:example.org", "ann")).await.unwrap();
        rec.ensure_user(&profile("@ann:example.org", "renamed")).await.unwrap();
        rec.ensure_user(&profile("@bob:example.org", "bob")).await.unwrap();

        assert_eq!(count(&rec, "users").await, 2);
        let name: String = sqlx::query("SELECT username FROM users WHERE user_id = ?")
            .bind("@ann:example.org")
            .fetch_one(&rec.pool)
            .await
            .unwrap()
            .get("username");
        assert_eq!(name, "ann");
    }

    #[tokio::test]
    async fn interleaved_ensure_user_has_no_duplicates() {
        let rec = recorder().await;
        let p = profile("@ann:example.org", "ann");
        let (a, b) = tokio::join!(rec.ensure_user(&p), rec.ensure_user(&p));
        a.unwrap();
        b.unwrap();
        assert_eq!(count(&rec, "users").await, 1);
    }

    #[tokio::test]
    async fn requests_get_distinct_handles() {
        let rec = recorder().await;
        let first = rec.record_request(&request("/weather current, Paris")).await.unwrap();
        let second = rec.record_request(&request("/weather current, Oslo")).await.unwrap();
        assert_ne!(first, second);

        let row = sqlx::query("SELECT com_type, com_args FROM user_requests WHERE msg_id = ?")
            .bind(first.0)
            .fetch_one(&rec.pool)
            .await
            .unwrap();
        let com_type: String = row.get("com_type");
        let args: String = row.get("com_args");
        assert_eq!(com_type, "/weather");
        assert_eq!(
            serde_json::from_str::<serde_json::Value>(&args).unwrap()["location"],
            "Paris"
        );
    }

    #[tokio::test]
    async fn unparsable_request_has_null_args() {
        let rec = recorder().await;
        let mut req = request("/weather forecast, Rostov");
        req.command_args = None;
        let handle = rec.record_request(&req).await.unwrap();

        let args: Option<String> = sqlx::query("SELECT com_args FROM user_requests WHERE msg_id = ?")
            .bind(handle.0)
            .fetch_one(&rec.pool)
            .await
            .unwrap()
            .get("com_args");
        assert_eq!(args, None);
    }

    #[tokio::test]
    async fn child_rows_keep_order_and_link_to_request() {
        let rec = recorder().await;
        let handle = rec.record_request(&request("/en_word run")).await.unwrap();
        for (i, pos) in ["noun", "verb"].iter().enumerate() {
            rec.record_definition(
                handle,
                &WordDefinition {
                    word: "run".into(),
                    audio_url: None,
                    part_of_speech: Some(pos.to_string()),
                    definition: Some(format!("sense {i}")),
                    example: None,
                },
            )
            .await
            .unwrap();
        }

        let rows = sqlx::query("SELECT part_of_speech FROM word_definitions WHERE request_id = ? ORDER BY id")
            .bind(handle.0)
            .fetch_all(&rec.pool)
            .await
            .unwrap();
        let parts: Vec<String> = rows.iter().map(|r| r.get("part_of_speech")).collect();
        assert_eq!(parts, ["noun", "verb"]);
    }

    #[tokio::test]
    async fn weather_rows_store_optional_temps() {
        let rec = recorder().await;
        let handle = rec.record_request(&request("/weather current, Paris")).await.unwrap();
        rec.record_weather(
            handle,
            &WeatherReading {
                date: Utc::now(),
                city: "Paris".into(),
                region: "IDF".into(),
                country: "France".into(),
                condition: Some("Cloudy".into()),
                avg_temp: Some(18.0),
                min_temp: None,
                max_temp: None,
                wind_velocity: Some(10.0),
            },
        )
        .await
        .unwrap();

        let row = sqlx::query("SELECT avg_temp, min_temp FROM weather_readings WHERE request_id = ?")
            .bind(handle.0)
            .fetch_one(&rec.pool)
            .await
            .unwrap();
        let avg: Option<f64> = row.get("avg_temp");
        let min: Option<f64> = row.get("min_temp");
        assert_eq!(avg, Some(18.0));
        assert_eq!(min, None);
    }

    #[tokio::test]
    async fn child_row_for_missing_request_is_rejected() {
        let rec = recorder().await;
        let err = rec
            .record_definition(RequestHandle(9999), &WordDefinition::default())
            .await;
        assert!(err.is_err());
    }
}
