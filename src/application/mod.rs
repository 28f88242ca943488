//! # Application Layer
//!
//! Contains the core business logic and orchestration of the bot.
//! This includes command parsing, payload formatting, message composition and routing.

pub mod composer;
pub mod formatting;
pub mod logging;
pub mod parsing;
pub mod router;
