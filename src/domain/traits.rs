//! # Domain Traits
//!
//! Abstract interfaces for core system components (Chat, upstream APIs, storage).
//! Allows for pluggable implementations in the Infrastructure layer.

use crate::domain::error::{PersistenceError, ServiceError};
use crate::domain::types::{
    NewRequest, RawPayload, RequestHandle, UserProfile, WeatherQuery, WeatherReading,
    WordDefinition,
};
use async_trait::async_trait;

/// Abstract interface for a Chat Provider (e.g., Matrix, Console)
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Send a message to the room
    async fn send_message(&self, content: &str) -> Result<String, String>;

    /// Send a message verbatim, without markdown rendering (for upstream-sourced text)
    async fn send_plain(&self, content: &str) -> Result<String, String>;

    /// Send an audio clip as an attachment
    async fn send_audio(&self, file_name: &str, data: Vec<u8>) -> Result<(), String>;

    /// Get the current room ID
    fn room_id(&self) -> String;
}

/// Word-definition lookup service
#[async_trait]
pub trait DictionaryApi: Send + Sync {
    /// Fetch the raw entries for a word
    async fn lookup(&self, word: &str) -> Result<RawPayload, ServiceError>;

    /// Fetch a binary resource (pronunciation audio) from an arbitrary URL
    async fn fetch_audio(&self, url: &str) -> Result<Vec<u8>, ServiceError>;
}

/// Weather service
#[async_trait]
pub trait WeatherApi: Send + Sync {
    async fn weather(&self, query: &WeatherQuery) -> Result<RawPayload, ServiceError>;
}

/// Append-only audit store
#[async_trait]
pub trait InteractionRecorder: Send + Sync {
    /// Insert the profile unless a row with the same user id exists
    async fn ensure_user(&self, profile: &UserProfile) -> Result<(), PersistenceError>;

    async fn record_request(&self, request: &NewRequest) -> Result<RequestHandle, PersistenceError>;

    async fn record_definition(
        &self,
        handle: RequestHandle,
        definition: &WordDefinition,
    ) -> Result<(), PersistenceError>;

    async fn record_weather(
        &self,
        handle: RequestHandle,
        reading: &WeatherReading,
    ) -> Result<(), PersistenceError>;
}
