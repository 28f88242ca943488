//! # Start Command
//!
//! Handles the `/start` command.
//! Registers the sender's profile on first contact and greets them.

use crate::application::router::DispatchOutcome;
use crate::domain::traits::{ChatProvider, InteractionRecorder};
use crate::domain::types::InboundMessage;
use anyhow::Result;

pub async fn handle_start(
    recorder: &dyn InteractionRecorder,
    chat: &impl ChatProvider,
    message: &InboundMessage,
) -> Result<DispatchOutcome> {
    if let Err(e) = recorder.ensure_user(&message.profile()).await {
        tracing::error!("Failed to register user {}: {}", message.user_id, e);
    }

    chat.send_message(crate::strings::messages::GREETING)
        .await
        .map_err(|e| anyhow::anyhow!(e))?;
    Ok(DispatchOutcome::Greeted)
}
