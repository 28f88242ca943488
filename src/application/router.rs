//! # Command Router
//!
//! Routes incoming messages to the appropriate command handler (in `interface/commands`).
//! It parses the command text, records an audit row for commands that reach an upstream API,
//! and dispatches with the clients and recorder it was constructed with.

use anyhow::Result;
use serde_json::Value;
use std::sync::Arc;

use crate::application::composer::AudioCache;
use crate::application::parsing;
use crate::domain::error::ParseError;
use crate::domain::traits::{ChatProvider, DictionaryApi, InteractionRecorder, WeatherApi};
use crate::domain::types::{Command, CommandKind, InboundMessage, NewRequest, RequestHandle};
use crate::interface::commands;

/// Terminal state a message ended in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// `/start` handled.
    Greeted,
    /// A command ran to completion and its reply was sent.
    Replied,
    /// The command was malformed; the clarification message was sent.
    Clarified,
    /// An upstream call or its payload failed; the generic failure message was sent.
    Failed,
    /// Free text answered with a canned response.
    Chatted,
    /// Group chatter not addressed to the bot.
    Ignored,
}

pub struct CommandRouter {
    dictionary: Arc<dyn DictionaryApi>,
    weather: Arc<dyn WeatherApi>,
    recorder: Arc<dyn InteractionRecorder>,
    audio: AudioCache,
    mention_name: String,
}

impl CommandRouter {
    pub fn new(
        dictionary: Arc<dyn DictionaryApi>,
        weather: Arc<dyn WeatherApi>,
        recorder: Arc<dyn InteractionRecorder>,
        audio: AudioCache,
        mention_name: impl Into<String>,
    ) -> Self {
        Self {
            dictionary,
            weather,
            recorder,
            audio,
            mention_name: mention_name.into(),
        }
    }

    pub async fn route<C>(&self, chat: &C, message: &InboundMessage) -> Result<DispatchOutcome>
    where
        C: ChatProvider,
    {
        let msg = message.text.trim();
        let (cmd_preview, args_preview) = match msg.find(char::is_whitespace) {
            Some(idx) => (&msg[..idx], msg[idx..].trim()),
            None => (msg, ""),
        };
        tracing::info!(
            "Router dispatching cmd='{}' args='{}' sender='{}'",
            cmd_preview,
            args_preview,
            message.user_id
        );

        let command = match parsing::parse(msg) {
            Ok(command) => command,
            Err(ParseError::NotACommand | ParseError::UnknownCommand(_)) => {
                return commands::chatter::handle_chatter(chat, message, &self.mention_name).await;
            }
            Err(e) => {
                tracing::warn!("Could not parse '{}' from {}: {}", msg, message.user_id, e);
                if let Some(kind) = e.command()
                    && kind.is_recorded()
                {
                    self.record_request(message, kind, None).await;
                }
                chat.send_message(crate::strings::messages::CLARIFY)
                    .await
                    .map_err(|e| anyhow::anyhow!(e))?;
                return Ok(DispatchOutcome::Clarified);
            }
        };

        match command {
            Command::Start => {
                commands::start::handle_start(self.recorder.as_ref(), chat, message).await
            }
            Command::Help => commands::help::handle_help(chat).await,
            Command::GetId => commands::misc::handle_get_id(chat, message).await,
            Command::Custom => commands::misc::handle_custom(chat).await,
            Command::DictionaryLookup { ref word } => {
                let handle = self
                    .record_request(message, command.kind(), command.args())
                    .await;
                commands::dictionary::handle_lookup(
                    self.dictionary.as_ref(),
                    self.recorder.as_ref(),
                    &self.audio,
                    chat,
                    handle,
                    word,
                )
                .await
            }
            Command::Weather(ref query) => {
                let handle = self
                    .record_request(message, command.kind(), command.args())
                    .await;
                commands::weather::handle_weather(
                    self.weather.as_ref(),
                    self.recorder.as_ref(),
                    chat,
                    handle,
                    query,
                )
                .await
            }
        }
    }

    /// Writes the audit row for a command. Storage failures are logged, never surfaced.
    async fn record_request(
        &self,
        message: &InboundMessage,
        kind: CommandKind,
        args: Option<Value>,
    ) -> Option<RequestHandle> {
        let request = NewRequest {
            user_id: message.user_id.clone(),
            text: message.text.clone(),
            command_type: kind.as_str().to_string(),
            command_args: args,
            timestamp: message.received_at,
        };
        match self.recorder.record_request(&request).await {
            Ok(handle) => Some(handle),
            Err(e) => {
                tracing::error!("Failed to record {} request: {}", kind.as_str(), e);
                None
            }
        }
    }
}
