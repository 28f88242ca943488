//! # Interface Layer
//!
//! Entry points reached from the chat platform: one handler per command.

pub mod commands;
