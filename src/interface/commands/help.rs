//! # Help Command
//!
//! Handles the `/help` command.
//! Displays the main help menu to the user.

use crate::application::router::DispatchOutcome;
use crate::domain::traits::ChatProvider;
use anyhow::Result;

pub async fn handle_help(chat: &impl ChatProvider) -> Result<DispatchOutcome> {
    chat.send_message(crate::strings::help::MAIN)
        .await
        .map_err(|e| anyhow::anyhow!(e))?;
    Ok(DispatchOutcome::Replied)
}
