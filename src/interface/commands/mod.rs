//! # Command Handlers
//!
//! Contains specific handler functions for each supported command (e.g., /weather, /en_word).
//! These handlers are invoked by the Router.

pub mod chatter;
pub mod dictionary;
pub mod help;
pub mod misc;
pub mod start;
pub mod weather;

use crate::application::router::DispatchOutcome;
use crate::domain::traits::ChatProvider;
use anyhow::Result;

/// Replies with the generic failure message after an upstream stage failed.
pub(crate) async fn reply_failure(chat: &impl ChatProvider) -> Result<DispatchOutcome> {
    chat.send_message(crate::strings::messages::SERVER_FAILURE)
        .await
        .map_err(|e| anyhow::anyhow!(e))?;
    Ok(DispatchOutcome::Failed)
}
