use chrono::{DateTime, TimeZone, Utc};

use crate::server::model::message::{IncomingMessage, MessageAuthor};

mod forwarder;
mod status;

fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 5, 12, 0, 0).unwrap()
}

fn incoming(id: &str, author_id: &str, content: &str, timestamp: DateTime<Utc>) -> IncomingMessage {
    IncomingMessage {
        id: id.to_string(),
        author: MessageAuthor {
            id: author_id.to_string(),
            name: "Farm Logger".to_string(),
        },
        content: content.to_string(),
        embeds: Vec::new(),
        timestamp,
    }
}
