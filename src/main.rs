//! # Main Entry Point
//!
//! Initializes the application:
//! - Domain: Configuration and Types
//! - Infrastructure: Matrix, dictionary and weather clients, SQLite store
//! - Application: Router, Parsing, Formatting, Composer, Logging
//! - Interface: Command Handlers
//!

mod application;
mod domain;
mod infrastructure;
mod interface;
mod strings;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use matrix_sdk::{
    Client,
    config::SyncSettings,
    room::Room,
    ruma::events::room::{
        member::{MembershipState, StrippedRoomMemberEvent},
        message::{MessageType, SyncRoomMessageEvent},
    },
};
use std::sync::Arc;

use crate::application::composer::AudioCache;
use crate::application::router::CommandRouter;
use crate::domain::config::AppConfig;
use crate::infrastructure::dictionary::DictionaryClient;
use crate::infrastructure::matrix::MatrixService;
use crate::infrastructure::storage::SqliteRecorder;
use crate::infrastructure::weather::WeatherClient;
use crate::strings::logs;

const DEFAULT_CONFIG_PATH: &str = "data/config.yaml";

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Load Configuration
    let config_path =
        std::env::var("ALMANAC_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    let config = AppConfig::load(&config_path)?;

    // 2. Logging Setup
    let _guard = application::logging::init(&config.system.log_dir)?;
    tracing::info!("{}", logs::config_loaded(&config.services.matrix.username));
    tracing::info!("Starting Almanac...");

    // 3. Initialize Infrastructure
    let dictionary = Arc::new(DictionaryClient::new(&config.services.dictionary)?);
    let weather = Arc::new(WeatherClient::new(&config.services.weather)?);
    let recorder = Arc::new(
        SqliteRecorder::connect(&config.storage.database_url)
            .await
            .context("Failed to open interaction store")?,
    );
    tracing::info!("{}", logs::storage_opened(&config.storage.database_url));

    // 4. Initialize Application Components
    let router = Arc::new(CommandRouter::new(
        dictionary,
        weather,
        recorder.clone(),
        AudioCache::new(&config.system.audio_dir),
        config.services.matrix.mention_name(),
    ));

    // 5. Matrix Setup
    let client = Client::builder()
        .homeserver_url(&config.services.matrix.homeserver)
        .build()
        .await?;

    client
        .matrix_auth()
        .login_username(
            &config.services.matrix.username,
            &config.services.matrix.password,
        )
        .send()
        .await?;

    tracing::info!("{}", logs::logged_in(&config.services.matrix.username));

    // 6. Event Loop
    let start_time = std::time::SystemTime::now();
    let loop_router = router.clone();

    client.add_event_handler(move |ev: SyncRoomMessageEvent, room: Room| {
        let router = loop_router.clone();

        async move {
            let Some(original_msg) = ev.as_original() else {
                return;
            };

            // Ignore events older than start_time
            let millis: u64 = ev.origin_server_ts().get().into();
            let event_time = std::time::UNIX_EPOCH + std::time::Duration::from_millis(millis);
            if event_time < start_time {
                return;
            }

            let MessageType::Text(text_content) = &original_msg.content.msgtype else {
                return;
            };
            if original_msg.sender == room.own_user_id() {
                return;
            }

            let body = &text_content.body;
            tracing::info!("Received message from {}: \n{}", original_msg.sender, body);

            let received_at: DateTime<Utc> = event_time.into();
            let chat = MatrixService::new(room);
            let message = chat
                .inbound_message(&original_msg.sender, body, received_at)
                .await;

            // Dispatch
            match router.route(&chat, &message).await {
                Ok(outcome) => tracing::debug!("Message from {} ended as {:?}", message.user_id, outcome),
                Err(e) => tracing::error!("{}", logs::route_fail(&e.to_string())),
            }
        }
    });

    // Handle Invites
    client.add_event_handler(|ev: StrippedRoomMemberEvent, room: Room| async move {
        if ev.content.membership == MembershipState::Invite {
            tracing::info!("{}", logs::invite_received(room.room_id().as_str()));
            if let Err(e) = room.join().await {
                tracing::warn!("{}", logs::join_invite_fail(&e.to_string()));
            }
        }
    });

    // 7. Start Sync Loop
    tracing::info!("{}", logs::SYNC_LOOP_START);
    let sync_result = client.sync(SyncSettings::default()).await;

    recorder.close().await;
    if let Err(e) = sync_result {
        tracing::error!("{}", logs::sync_loop_fail(&e.to_string()));
        return Err(e.into());
    }

    Ok(())
}
