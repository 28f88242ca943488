//! # Free Text
//!
//! Anything that is not a known command gets a fixed keyword-based reply.
//! No upstream calls, no persistence.

use crate::application::router::DispatchOutcome;
use crate::domain::traits::ChatProvider;
use crate::domain::types::{ChatType, InboundMessage};
use crate::strings::messages;
use anyhow::Result;

const GREETING_KEYWORDS: [&str; 3] = ["hello", "hey", "привет"];

pub fn canned_response(text: &str) -> &'static str {
    let text = text.to_lowercase();
    if GREETING_KEYWORDS.iter().any(|k| text.contains(k)) {
        messages::HELLO_BACK
    } else {
        messages::CLARIFY
    }
}

pub async fn handle_chatter(
    chat: &impl ChatProvider,
    message: &InboundMessage,
    mention_name: &str,
) -> Result<DispatchOutcome> {
    let text = match message.chat_type {
        ChatType::Direct => message.text.trim().to_string(),
        ChatType::Group => {
            // In shared rooms only text addressed to the bot is answered.
            if mention_name.is_empty() || !message.text.contains(mention_name) {
                return Ok(DispatchOutcome::Ignored);
            }
            message.text.replace(mention_name, "").trim().to_string()
        }
    };

    chat.send_message(canned_response(&text))
        .await
        .map_err(|e| anyhow::anyhow!(e))?;
    Ok(DispatchOutcome::Chatted)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn greeting_keywords_match_anywhere_case_insensitive() {
        assert_eq!(canned_response("HELLO"), messages::HELLO_BACK);
        assert_eq!(canned_response("oh hey"), messages::HELLO_BACK);
        assert_eq!(canned_response("Привет, бот"), messages::HELLO_BACK);
    }

    #[test]
    fn other_text_asks_for_clarification() {
        assert_eq!(canned_response("what's the time"), messages::CLARIFY);
        assert_eq!(canned_response(""), messages::CLARIFY);
    }
}
