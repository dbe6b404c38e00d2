//! Domain & parameter models for Discord channel messages
//!
//! Messages arrive either from the bot webhook as `MessageDataDto` or directly from
//! the Discord gateway as a serenity `Message`; both are normalized into
//! `IncomingMessage` before deduplication and storage.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    model::message::{
        EmbedAuthorDto, EmbedDto, EmbedFieldDto, EmbedFooterDto, MessageDataDto,
        StoredAuthorDto, StoredMessageDto,
    },
    server::{
        error::{internal::InternalError, AppError},
        model::activity::{ParsedActivity, UNKNOWN_ACTIVITY},
        service::activity::parser,
    },
};

/// Maximum length of the fallback display text of an unparsed message
const FALLBACK_DISPLAY_LEN: usize = 120;

#[derive(Debug, Clone, PartialEq)]
pub struct MessageAuthor {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
}

/// The subset of a Discord embed the dashboard cares about.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MessageEmbed {
    pub title: Option<String>,
    pub description: Option<String>,
    pub author_name: Option<String>,
    #[serde(default)]
    pub fields: Vec<EmbedField>,
    pub footer: Option<String>,
}

impl MessageEmbed {
    pub fn from_dto(dto: EmbedDto) -> Self {
        Self {
            title: dto.title,
            description: dto.description,
            author_name: dto.author.map(|a| a.name),
            fields: dto
                .fields
                .into_iter()
                .map(|f| EmbedField {
                    name: f.name,
                    value: f.value,
                })
                .collect(),
            footer: dto.footer.map(|f| f.text),
        }
    }

    pub fn from_discord(embed: &serenity::all::Embed) -> Self {
        Self {
            title: embed.title.clone(),
            description: embed.description.clone(),
            author_name: embed.author.as_ref().map(|a| a.name.clone()),
            fields: embed
                .fields
                .iter()
                .map(|f| EmbedField {
                    name: f.name.clone(),
                    value: f.value.clone(),
                })
                .collect(),
            footer: embed.footer.as_ref().map(|f| f.text.clone()),
        }
    }

    pub fn into_dto(self) -> EmbedDto {
        EmbedDto {
            title: self.title,
            description: self.description,
            fields: self
                .fields
                .into_iter()
                .map(|f| EmbedFieldDto {
                    name: f.name,
                    value: f.value,
                    inline: false,
                })
                .collect(),
            author: self.author_name.map(|name| EmbedAuthorDto { name }),
            footer: self.footer.map(|text| EmbedFooterDto { text }),
        }
    }
}

/// A Discord message normalized from either the webhook or the gateway.
#[derive(Debug, Clone, PartialEq)]
pub struct IncomingMessage {
    pub id: String,
    pub author: MessageAuthor,
    pub content: String,
    pub embeds: Vec<MessageEmbed>,
    pub timestamp: DateTime<Utc>,
}

impl IncomingMessage {
    pub fn from_dto(dto: MessageDataDto) -> Self {
        let name = dto
            .author
            .global_name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(dto.author.username);

        Self {
            id: dto.id,
            author: MessageAuthor {
                id: dto.author.id,
                name,
            },
            content: dto.content,
            embeds: dto.embeds.into_iter().map(MessageEmbed::from_dto).collect(),
            timestamp: dto.timestamp,
        }
    }

    pub fn from_discord(message: &serenity::all::Message) -> Self {
        let name = message
            .author
            .global_name
            .clone()
            .unwrap_or_else(|| message.author.name.clone());

        Self {
            id: message.id.to_string(),
            author: MessageAuthor {
                id: message.author.id.to_string(),
                name,
            },
            content: message.content.clone(),
            embeds: message.embeds.iter().map(MessageEmbed::from_discord).collect(),
            timestamp: message.timestamp.to_utc(),
        }
    }

    /// Flattened text of the message content and embeds, used for parsing
    pub fn text(&self) -> String {
        parser::message_text(&self.content, &self.embeds)
    }
}

/// A message persisted in the channel message store.
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelMessage {
    pub id: i32,
    pub message_id: String,
    pub channel_id: String,
    pub author: MessageAuthor,
    pub content: String,
    pub embeds: Vec<MessageEmbed>,
    pub dedupe_key: String,
    pub timestamp: DateTime<Utc>,
    pub received_at: DateTime<Utc>,
}

impl ChannelMessage {
    /// Converts an entity model to the channel message domain model
    ///
    /// # Arguments
    /// - `entity` - The entity model from the database
    ///
    /// # Returns
    /// - `Ok(ChannelMessage)` - The converted domain model
    /// - `Err(AppError::InternalErr(StoredJson))` - The embeds column is not valid JSON
    pub fn from_entity(entity: entity::channel_message::Model) -> Result<Self, AppError> {
        let embeds = serde_json::from_str::<Vec<MessageEmbed>>(&entity.embeds).map_err(|e| {
            InternalError::StoredJson {
                column: "channel_message.embeds",
                source: e,
            }
        })?;

        Ok(Self {
            id: entity.id,
            message_id: entity.message_id,
            channel_id: entity.channel_id,
            author: MessageAuthor {
                id: entity.author_id,
                name: entity.author_name,
            },
            content: entity.content,
            embeds,
            dedupe_key: entity.dedupe_key,
            timestamp: entity.timestamp,
            received_at: entity.received_at,
        })
    }

    pub fn text(&self) -> String {
        parser::message_text(&self.content, &self.embeds)
    }

    pub fn parse(&self) -> Option<ParsedActivity> {
        parser::parse_discord_message(&self.text())
    }

    /// Rebuilds the incoming representation, used when forwarding a stored message
    pub fn to_incoming(&self) -> IncomingMessage {
        IncomingMessage {
            id: self.message_id.clone(),
            author: self.author.clone(),
            content: self.content.clone(),
            embeds: self.embeds.clone(),
            timestamp: self.timestamp,
        }
    }

    /// Converts into the annotated DTO returned by the message listing endpoint
    pub fn into_dto(self) -> StoredMessageDto {
        let text = self.text();
        let parsed = parser::parse_discord_message(&text);

        let (parse_success, tipo, categoria, display_text) = match &parsed {
            Some(activity) => (
                true,
                activity.tipo.as_str().to_string(),
                activity.categoria.as_str().to_string(),
                activity.display_text.clone(),
            ),
            None => (
                false,
                UNKNOWN_ACTIVITY.to_string(),
                "outros".to_string(),
                fallback_display_text(&text),
            ),
        };

        StoredMessageDto {
            id: self.message_id,
            channel_id: self.channel_id,
            author: StoredAuthorDto {
                id: self.author.id,
                name: self.author.name,
            },
            content: self.content,
            embeds: self.embeds.into_iter().map(MessageEmbed::into_dto).collect(),
            timestamp: self.timestamp,
            received_at: self.received_at,
            parse_success,
            tipo,
            categoria,
            display_text,
            parsed: parsed.map(ParsedActivity::into_dto),
        }
    }
}

/// First non-empty line of the text, truncated on a character boundary to at most
/// `FALLBACK_DISPLAY_LEN` characters including the ellipsis
fn fallback_display_text(text: &str) -> String {
    let line = text
        .lines()
        .map(str::trim)
        .find(|l| !l.is_empty())
        .unwrap_or_default();

    if line.chars().count() > FALLBACK_DISPLAY_LEN {
        let truncated: String = line.chars().take(FALLBACK_DISPLAY_LEN - 1).collect();
        format!("{}…", truncated)
    } else {
        line.to_string()
    }
}

/// Parameters for storing a new channel message
#[derive(Debug, Clone)]
pub struct CreateChannelMessageParam {
    pub channel_id: String,
    pub message: IncomingMessage,
    pub dedupe_key: String,
}

/// Result of ingesting a batch of messages for one channel
#[derive(Debug, Clone, Default)]
pub struct IngestSummary {
    pub received: u64,
    pub duplicates: u64,
    /// Messages that were newly stored, in arrival order
    pub stored: Vec<ChannelMessage>,
}
