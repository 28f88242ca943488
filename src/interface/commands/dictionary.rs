//! # Dictionary Command
//!
//! Handles `/en_word <word>`: lookup, format, record each definition, reply, then attach the
//! pronunciation of the first definition when one exists.

use crate::application::composer::{self, AudioCache};
use crate::application::formatting;
use crate::application::router::DispatchOutcome;
use crate::domain::error::ServiceError;
use crate::domain::traits::{ChatProvider, DictionaryApi, InteractionRecorder};
use crate::domain::types::{RequestHandle, WordDefinition};
use crate::strings::messages;
use anyhow::Result;

pub async fn handle_lookup(
    api: &dyn DictionaryApi,
    recorder: &dyn InteractionRecorder,
    audio: &AudioCache,
    chat: &impl ChatProvider,
    handle: Option<RequestHandle>,
    word: &str,
) -> Result<DispatchOutcome> {
    let definitions = match fetch_definitions(api, word).await {
        Ok(definitions) => definitions,
        Err(e) => {
            tracing::warn!(
                "/en_word word='{}' failed (status {:?}): {}",
                word,
                e.status(),
                e
            );
            return super::reply_failure(chat).await;
        }
    };

    if let Some(handle) = handle {
        for definition in &definitions {
            if let Err(e) = recorder.record_definition(handle, definition).await {
                tracing::error!("Failed to record definition of '{}': {}", word, e);
            }
        }
    }

    chat.send_plain(&composer::compose_dictionary_message(&definitions))
        .await
        .map_err(|e| anyhow::anyhow!(e))?;

    if let Some(url) = definitions.first().and_then(|d| d.audio_url.as_deref()) {
        attach_audio(api, audio, chat, word, url).await;
    }

    Ok(DispatchOutcome::Replied)
}

async fn fetch_definitions(
    api: &dyn DictionaryApi,
    word: &str,
) -> Result<Vec<WordDefinition>, ServiceError> {
    let payload = api.lookup(word).await?;
    let definitions = formatting::format_definitions(&payload)?;
    if definitions.is_empty() {
        return Err(ServiceError::Decode("payload has no definitions".to_string()));
    }
    Ok(definitions)
}

/// Audio is best effort: failures are logged and the attachment is dropped.
async fn attach_audio(
    api: &dyn DictionaryApi,
    audio: &AudioCache,
    chat: &impl ChatProvider,
    word: &str,
    url: &str,
) {
    let bytes = match audio.fetch(word, url, api).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!("Skipping audio for '{}' from {}: {}", word, url, e);
            return;
        }
    };

    let file_name = messages::audio_file_name(&word.to_lowercase());
    if let Err(e) = chat.send_audio(&file_name, bytes).await {
        tracing::warn!("Failed to send audio {}: {}", file_name, e);
    }
}
