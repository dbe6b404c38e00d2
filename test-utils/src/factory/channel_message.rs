//! Channel message factory for creating stored Discord messages.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

use crate::factory::helpers::{next_id, next_snowflake};

/// Factory for creating stored channel messages with customizable fields.
///
/// The dedupe key defaults to a unique value so factory messages never collide
/// with each other.
///
/// # Example
///
/// ```rust,ignore
/// let message = ChannelMessageFactory::new(&db, "123")
///     .content("[ID]: 1 Ana\n[DEPOSITOU]: 10x Milho")
///     .timestamp(Utc::now())
///     .build()
///     .await?;
/// ```
pub struct ChannelMessageFactory<'a> {
    db: &'a DatabaseConnection,
    entity: entity::channel_message::Model,
}

impl<'a> ChannelMessageFactory<'a> {
    pub fn new(db: &'a DatabaseConnection, channel_id: impl Into<String>) -> Self {
        let id = next_id();
        let now = Utc::now();

        Self {
            db,
            entity: entity::channel_message::Model {
                id: 0,
                message_id: next_snowflake(),
                channel_id: channel_id.into(),
                author_id: "1000".to_string(),
                author_name: "Farm Logger".to_string(),
                content: format!("Message {}", id),
                embeds: "[]".to_string(),
                dedupe_key: format!("factory-{}", id),
                timestamp: now,
                received_at: now,
            },
        }
    }

    pub fn message_id(mut self, message_id: impl Into<String>) -> Self {
        self.entity.message_id = message_id.into();
        self
    }

    pub fn author(mut self, id: impl Into<String>, name: impl Into<String>) -> Self {
        self.entity.author_id = id.into();
        self.entity.author_name = name.into();
        self
    }

    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.entity.content = content.into();
        self
    }

    /// Sets the embeds column; must be a JSON array of stored embeds.
    pub fn embeds_json(mut self, embeds: serde_json::Value) -> Self {
        self.entity.embeds = embeds.to_string();
        self
    }

    pub fn dedupe_key(mut self, dedupe_key: impl Into<String>) -> Self {
        self.entity.dedupe_key = dedupe_key.into();
        self
    }

    pub fn timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.entity.timestamp = timestamp;
        self
    }

    /// Builds and inserts the message into the database.
    pub async fn build(self) -> Result<entity::channel_message::Model, DbErr> {
        entity::channel_message::ActiveModel {
            id: ActiveValue::NotSet,
            message_id: ActiveValue::Set(self.entity.message_id),
            channel_id: ActiveValue::Set(self.entity.channel_id),
            author_id: ActiveValue::Set(self.entity.author_id),
            author_name: ActiveValue::Set(self.entity.author_name),
            content: ActiveValue::Set(self.entity.content),
            embeds: ActiveValue::Set(self.entity.embeds),
            dedupe_key: ActiveValue::Set(self.entity.dedupe_key),
            timestamp: ActiveValue::Set(self.entity.timestamp),
            received_at: ActiveValue::Set(self.entity.received_at),
        }
        .insert(self.db)
        .await
    }
}

/// Creates a message with the given content in a channel.
pub async fn create_channel_message(
    db: &DatabaseConnection,
    channel_id: impl Into<String>,
    content: impl Into<String>,
) -> Result<entity::channel_message::Model, DbErr> {
    ChannelMessageFactory::new(db, channel_id)
        .content(content)
        .build()
        .await
}
