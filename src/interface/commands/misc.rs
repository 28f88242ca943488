//! # Miscellaneous Commands
//!
//! Handles `/get_id` and the `/custom` placeholder.

use crate::application::router::DispatchOutcome;
use crate::domain::traits::ChatProvider;
use crate::domain::types::InboundMessage;
use anyhow::Result;

pub async fn handle_get_id(
    chat: &impl ChatProvider,
    message: &InboundMessage,
) -> Result<DispatchOutcome> {
    let msg = crate::strings::messages::your_id(&message.user_id, &message.chat_id);
    chat.send_message(&msg).await.map_err(|e| anyhow::anyhow!(e))?;
    Ok(DispatchOutcome::Replied)
}

pub async fn handle_custom(chat: &impl ChatProvider) -> Result<DispatchOutcome> {
    chat.send_message(crate::strings::messages::CUSTOM_PLACEHOLDER)
        .await
        .map_err(|e| anyhow::anyhow!(e))?;
    Ok(DispatchOutcome::Replied)
}
