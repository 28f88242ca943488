//! # Domain Types
//!
//! Common data structures and enums used across the application logic:
//! parsed commands, normalized upstream results and the records the bot persists.

use chrono::{DateTime, Utc};
use serde_json::{Value, json};

/// Decoded JSON body of an upstream response, before normalization.
pub type RawPayload = Value;

/// A parsed, validated chat instruction.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Start,
    Help,
    GetId,
    Custom,
    DictionaryLookup { word: String },
    Weather(WeatherQuery),
}

impl Command {
    pub fn kind(&self) -> CommandKind {
        match self {
            Command::Start => CommandKind::Start,
            Command::Help => CommandKind::Help,
            Command::GetId => CommandKind::GetId,
            Command::Custom => CommandKind::Custom,
            Command::DictionaryLookup { .. } => CommandKind::Dictionary,
            Command::Weather(_) => CommandKind::Weather,
        }
    }

    /// Arguments as stored alongside the request record.
    pub fn args(&self) -> Option<Value> {
        match self {
            Command::DictionaryLookup { word } => Some(json!({ "word": word })),
            Command::Weather(query) => {
                let mut args = json!({
                    "mode": query.mode().as_str(),
                    "location": query.location(),
                });
                if let Some(days) = query.days() {
                    args["days"] = json!(days);
                }
                Some(args)
            }
            _ => None,
        }
    }
}

/// The command names the bot understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    Start,
    Help,
    GetId,
    Custom,
    Dictionary,
    Weather,
}

impl CommandKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CommandKind::Start => "/start",
            CommandKind::Help => "/help",
            CommandKind::GetId => "/get_id",
            CommandKind::Custom => "/custom",
            CommandKind::Dictionary => "/en_word",
            CommandKind::Weather => "/weather",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "/start" => Some(CommandKind::Start),
            "/help" => Some(CommandKind::Help),
            "/get_id" => Some(CommandKind::GetId),
            "/custom" => Some(CommandKind::Custom),
            "/en_word" => Some(CommandKind::Dictionary),
            "/weather" => Some(CommandKind::Weather),
            _ => None,
        }
    }

    /// Commands that call an upstream API and leave an audit record.
    pub fn is_recorded(&self) -> bool {
        matches!(self, CommandKind::Dictionary | CommandKind::Weather)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeatherMode {
    Current,
    Forecast,
}

impl WeatherMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            WeatherMode::Current => "current",
            WeatherMode::Forecast => "forecast",
        }
    }
}

/// A weather request. The day count only exists for forecasts.
#[derive(Debug, Clone, PartialEq)]
pub enum WeatherQuery {
    Current { location: String },
    Forecast { location: String, days: u8 },
}

impl WeatherQuery {
    pub const MIN_DAYS: u8 = 1;
    pub const MAX_DAYS: u8 = 14;

    pub fn mode(&self) -> WeatherMode {
        match self {
            WeatherQuery::Current { .. } => WeatherMode::Current,
            WeatherQuery::Forecast { .. } => WeatherMode::Forecast,
        }
    }

    pub fn location(&self) -> &str {
        match self {
            WeatherQuery::Current { location } | WeatherQuery::Forecast { location, .. } => {
                location
            }
        }
    }

    pub fn days(&self) -> Option<u8> {
        match self {
            WeatherQuery::Current { .. } => None,
            WeatherQuery::Forecast { days, .. } => Some(*days),
        }
    }
}

/// One sense of a looked-up word.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WordDefinition {
    pub word: String,
    pub audio_url: Option<String>,
    pub part_of_speech: Option<String>,
    pub definition: Option<String>,
    pub example: Option<String>,
}

/// One observed or forecast day for a location.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherReading {
    pub date: DateTime<Utc>,
    pub city: String,
    pub region: String,
    pub country: String,
    pub condition: Option<String>,
    pub avg_temp: Option<f64>,
    pub min_temp: Option<f64>,
    pub max_temp: Option<f64>,
    pub wind_velocity: Option<f64>,
}

/// Either a single current reading or the forecast days for one location.
#[derive(Debug, Clone, PartialEq)]
pub enum WeatherReport {
    Current(WeatherReading),
    Forecast(Vec<WeatherReading>),
}

impl WeatherReport {
    pub fn readings(&self) -> &[WeatherReading] {
        match self {
            WeatherReport::Current(reading) => std::slice::from_ref(reading),
            WeatherReport::Forecast(readings) => readings,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UserProfile {
    pub user_id: String,
    pub username: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub is_bot: bool,
    pub language_code: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatType {
    Direct,
    Group,
}

/// A text message delivered by the chat platform.
#[derive(Debug, Clone)]
pub struct InboundMessage {
    pub text: String,
    pub user_id: String,
    pub username: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub is_bot: bool,
    pub language_code: Option<String>,
    pub chat_id: String,
    pub chat_type: ChatType,
    pub received_at: DateTime<Utc>,
}

impl InboundMessage {
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            user_id: self.user_id.clone(),
            username: self.username.clone(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            is_bot: self.is_bot,
            language_code: self.language_code.clone(),
        }
    }
}

/// The request row written before any upstream call is made.
#[derive(Debug, Clone)]
pub struct NewRequest {
    pub user_id: String,
    pub text: String,
    pub command_type: String,
    pub command_args: Option<Value>,
    pub timestamp: DateTime<Utc>,
}

/// Reference to a stored request; result rows hang off it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestHandle(pub i64);
