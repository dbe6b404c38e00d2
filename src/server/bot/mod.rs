//! Discord bot integration for reading farm log channels.
//!
//! The bot listens to the channels configured for firms (plus any extra channels in
//! `MONITORED_CHANNEL_IDS`) and feeds their messages through the same ingestion
//! pipeline as the channel message webhook. It runs in its own tokio task and only
//! starts when `DISCORD_BOT_TOKEN` is set.
//!
//! # Gateway Intents
//!
//! The bot requires the following gateway intents:
//! - `GUILDS` - Receive guild availability events
//! - `GUILD_MESSAGES` - Receive events about messages in guilds
//! - `MESSAGE_CONTENT` - Read message content and embeds (privileged intent)
//!
//! Note: `MESSAGE_CONTENT` is a privileged intent and must be explicitly enabled
//! in the Discord Developer Portal for the bot application.

pub mod handler;
pub mod start;
