use crate::server::{
    data::channel_message::ChannelMessageRepository,
    error::AppError,
    model::message::{CreateChannelMessageParam, IncomingMessage, MessageAuthor, MessageEmbed},
};
use chrono::{DateTime, Duration, TimeZone, Utc};
use entity::prelude::ChannelMessage;
use test_utils::{builder::TestBuilder, factory::channel_message::ChannelMessageFactory};

mod create;
mod exists;
mod find_in_window;
mod get_recent;
mod oldest_timestamp;
mod prune;

fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 5, 12, 0, 0).unwrap()
}

fn incoming(id: &str, content: &str) -> IncomingMessage {
    IncomingMessage {
        id: id.to_string(),
        author: MessageAuthor {
            id: "42".to_string(),
            name: "Farm Logger".to_string(),
        },
        content: content.to_string(),
        embeds: Vec::new(),
        timestamp: base_time(),
    }
}
