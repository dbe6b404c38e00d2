use crate::server::model::message::IncomingMessage;

/// Maximum number of normalized text characters kept in a dedupe key
const DEDUPE_TEXT_LEN: usize = 256;

/// Builds the content derived identity of a message.
///
/// The key is `channel_id|author_id|unix seconds|normalized text` where the text is
/// the flattened content and embeds, lower-cased, with whitespace collapsed and
/// truncated to 256 characters. Two posts of the same text by the same author in
/// the same second produce the same key even when Discord gave them distinct IDs.
pub fn create_dedupe_key(channel_id: &str, message: &IncomingMessage) -> String {
    let normalized: String = message
        .text()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .chars()
        .take(DEDUPE_TEXT_LEN)
        .collect();

    format!(
        "{}|{}|{}|{}",
        channel_id,
        message.author.id,
        message.timestamp.timestamp(),
        normalized
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::model::message::{MessageAuthor, MessageEmbed};
    use chrono::{Duration, TimeZone, Utc};

    fn message(id: &str, content: &str) -> IncomingMessage {
        IncomingMessage {
            id: id.to_string(),
            author: MessageAuthor {
                id: "42".to_string(),
                name: "Logger".to_string(),
            },
            content: content.to_string(),
            embeds: Vec::new(),
            timestamp: Utc.with_ymd_and_hms(2026, 1, 5, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn builds_key_from_channel_author_second_and_text() {
        let key = create_dedupe_key("100", &message("1", "Depositou  10x\nMilho"));

        let expected_secs = Utc
            .with_ymd_and_hms(2026, 1, 5, 12, 0, 0)
            .unwrap()
            .timestamp();
        assert_eq!(key, format!("100|42|{}|depositou 10x milho", expected_secs));
    }

    #[test]
    fn reposts_with_different_ids_share_a_key() {
        let first = create_dedupe_key("100", &message("1", "Depositou 10x Milho"));
        let second = create_dedupe_key("100", &message("2", "depositou   10x milho"));

        assert_eq!(first, second);
    }

    #[test]
    fn differs_by_channel_and_second() {
        let base = message("1", "Depositou 10x Milho");
        let mut later = base.clone();
        later.timestamp += Duration::seconds(1);

        assert_ne!(
            create_dedupe_key("100", &base),
            create_dedupe_key("200", &base)
        );
        assert_ne!(
            create_dedupe_key("100", &base),
            create_dedupe_key("100", &later)
        );
    }

    #[test]
    fn includes_embed_text_and_truncates() {
        let mut msg = message("1", "");
        msg.embeds.push(MessageEmbed {
            description: Some("x".repeat(400)),
            ..Default::default()
        });

        let key = create_dedupe_key("100", &msg);
        let text = key.rsplit('|').next().unwrap();

        assert_eq!(text.chars().count(), DEDUPE_TEXT_LEN);
    }
}
