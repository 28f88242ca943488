//! # Matrix Service Adapter
//!
//! Implements the `ChatProvider` trait for the Matrix protocol using the `matrix_sdk`,
//! and converts incoming room events into the platform-neutral `InboundMessage`.

use crate::domain::traits::ChatProvider;
use crate::domain::types::{ChatType, InboundMessage};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use matrix_sdk::attachment::AttachmentConfig;
use matrix_sdk::room::Room;
use matrix_sdk::ruma::UserId;
use matrix_sdk::ruma::events::room::message::RoomMessageEventContent;

const AUDIO_MIME: &str = "audio/mpeg";

#[derive(Clone)]
pub struct MatrixService {
    room: Room,
}

impl MatrixService {
    pub fn new(room: Room) -> Self {
        Self { room }
    }

    /// Collects what the bot knows about the sender of a text event.
    pub async fn inbound_message(
        &self,
        sender: &UserId,
        body: &str,
        received_at: DateTime<Utc>,
    ) -> InboundMessage {
        let display_name = match self.room.get_member(sender).await {
            Ok(Some(member)) => member.display_name().map(str::to_owned),
            Ok(None) => None,
            Err(e) => {
                tracing::debug!("Could not load member {}: {}", sender, e);
                None
            }
        };
        let chat_type = match self.room.is_direct().await {
            Ok(true) => ChatType::Direct,
            _ => ChatType::Group,
        };

        InboundMessage {
            text: body.to_string(),
            user_id: sender.as_str().to_string(),
            username: sender.localpart().to_string(),
            first_name: display_name,
            last_name: None,
            is_bot: false,
            language_code: None,
            chat_id: self.room_id(),
            chat_type,
            received_at,
        }
    }
}

#[async_trait]
impl ChatProvider for MatrixService {
    fn room_id(&self) -> String {
        self.room.room_id().as_str().to_string()
    }

    async fn send_message(&self, content: &str) -> Result<String, String> {
        tracing::info!("Bot sending message to {}: {}", self.room_id(), content);
        self.room
            .send(RoomMessageEventContent::text_markdown(content))
            .await
            .map(|resp| resp.event_id.to_string())
            .map_err(|e| e.to_string())
    }

    async fn send_plain(&self, content: &str) -> Result<String, String> {
        tracing::info!("Bot sending plain message to {}: {}", self.room_id(), content);
        self.room
            .send(RoomMessageEventContent::text_plain(content))
            .await
            .map(|resp| resp.event_id.to_string())
            .map_err(|e| e.to_string())
    }

    async fn send_audio(&self, file_name: &str, data: Vec<u8>) -> Result<(), String> {
        tracing::info!(
            "Bot sending audio {} ({} bytes) to {}",
            file_name,
            data.len(),
            self.room_id()
        );
        let content_type: mime::Mime = AUDIO_MIME.parse().map_err(|e| format!("{e}"))?;
        self.room
            .send_attachment(file_name, &content_type, data, AttachmentConfig::new())
            .await
            .map(|_| ())
            .map_err(|e| e.to_string())
    }
}
