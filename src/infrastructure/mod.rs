//! # Infrastructure Layer
//!
//! Handles interactions with external systems and services.
//! Implements the traits defined in the Domain layer (ChatProvider, DictionaryApi, WeatherApi,
//! InteractionRecorder).

pub mod dictionary;
pub mod http;
pub mod matrix;
pub mod storage;
pub mod weather;
