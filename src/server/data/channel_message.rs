//! Channel message data repository for database operations.
//!
//! Provides the `ChannelMessageRepository` for the retained Discord channel messages.
//! Messages are deduplicated by Discord message ID and by a content derived key, and
//! the store is pruned to a fixed number of the most recent messages.

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect,
};

use crate::server::{
    error::AppError,
    model::message::{ChannelMessage, CreateChannelMessageParam},
};

/// Repository providing database operations for stored channel messages.
pub struct ChannelMessageRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ChannelMessageRepository<'a> {
    /// Creates a new ChannelMessageRepository instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection
    ///
    /// # Returns
    /// - `ChannelMessageRepository` - New repository instance
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Stores a new channel message.
    ///
    /// # Arguments
    /// - `param` - The normalized message, its channel and dedupe key
    ///
    /// # Returns
    /// - `Ok(ChannelMessage)` - The stored message
    /// - `Err(AppError)` - Database error (including unique violations) or embed encoding error
    pub async fn create(&self, param: CreateChannelMessageParam) -> Result<ChannelMessage, AppError> {
        let embeds = serde_json::to_string(&param.message.embeds)?;

        let entity = entity::channel_message::ActiveModel {
            id: ActiveValue::NotSet,
            message_id: ActiveValue::Set(param.message.id),
            channel_id: ActiveValue::Set(param.channel_id),
            author_id: ActiveValue::Set(param.message.author.id),
            author_name: ActiveValue::Set(param.message.author.name),
            content: ActiveValue::Set(param.message.content),
            embeds: ActiveValue::Set(embeds),
            dedupe_key: ActiveValue::Set(param.dedupe_key),
            timestamp: ActiveValue::Set(param.message.timestamp),
            received_at: ActiveValue::Set(Utc::now()),
        }
        .insert(self.db)
        .await?;

        ChannelMessage::from_entity(entity)
    }

    /// Checks whether a message with the given Discord message ID is stored.
    pub async fn exists_by_message_id(&self, message_id: &str) -> Result<bool, AppError> {
        let count = entity::prelude::ChannelMessage::find()
            .filter(entity::channel_message::Column::MessageId.eq(message_id))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    /// Checks whether a message with the given dedupe key is stored.
    pub async fn exists_by_dedupe_key(&self, dedupe_key: &str) -> Result<bool, AppError> {
        let count = entity::prelude::ChannelMessage::find()
            .filter(entity::channel_message::Column::DedupeKey.eq(dedupe_key))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    /// Gets the most recent messages, newest first.
    ///
    /// # Arguments
    /// - `channel_id` - Restrict to one channel, or `None` for every channel
    /// - `limit` - Maximum number of messages to return
    ///
    /// # Returns
    /// - `Ok(Vec<ChannelMessage>)` - Messages ordered by timestamp descending
    /// - `Err(AppError)` - Database or decoding error
    pub async fn get_recent(
        &self,
        channel_id: Option<&str>,
        limit: u64,
    ) -> Result<Vec<ChannelMessage>, AppError> {
        let mut query = entity::prelude::ChannelMessage::find();

        if let Some(channel_id) = channel_id {
            query = query.filter(entity::channel_message::Column::ChannelId.eq(channel_id));
        }

        query
            .order_by_desc(entity::channel_message::Column::Timestamp)
            .order_by_desc(entity::channel_message::Column::Id)
            .limit(limit)
            .all(self.db)
            .await?
            .into_iter()
            .map(ChannelMessage::from_entity)
            .collect()
    }

    /// Counts stored messages, optionally for a single channel.
    pub async fn count(&self, channel_id: Option<&str>) -> Result<u64, AppError> {
        let mut query = entity::prelude::ChannelMessage::find();

        if let Some(channel_id) = channel_id {
            query = query.filter(entity::channel_message::Column::ChannelId.eq(channel_id));
        }

        Ok(query.count(self.db).await?)
    }

    /// Gets the timestamp of the oldest stored message, if any.
    pub async fn oldest_timestamp(&self) -> Result<Option<DateTime<Utc>>, AppError> {
        let oldest = entity::prelude::ChannelMessage::find()
            .order_by_asc(entity::channel_message::Column::Timestamp)
            .one(self.db)
            .await?;

        Ok(oldest.map(|m| m.timestamp))
    }

    /// Gets messages whose timestamp lies within `[from, to]`, oldest first.
    ///
    /// # Arguments
    /// - `channel_id` - Restrict to one channel, or `None` for every channel
    /// - `from` - Inclusive lower bound
    /// - `to` - Inclusive upper bound
    pub async fn find_in_window(
        &self,
        channel_id: Option<&str>,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<ChannelMessage>, AppError> {
        let mut query = entity::prelude::ChannelMessage::find()
            .filter(entity::channel_message::Column::Timestamp.gte(from))
            .filter(entity::channel_message::Column::Timestamp.lte(to));

        if let Some(channel_id) = channel_id {
            query = query.filter(entity::channel_message::Column::ChannelId.eq(channel_id));
        }

        query
            .order_by_asc(entity::channel_message::Column::Timestamp)
            .all(self.db)
            .await?
            .into_iter()
            .map(ChannelMessage::from_entity)
            .collect()
    }

    /// Deletes the oldest messages so that at most `keep` remain.
    ///
    /// # Returns
    /// - `Ok(u64)` - Number of deleted messages
    /// - `Err(AppError)` - Database error
    pub async fn prune(&self, keep: u64) -> Result<u64, AppError> {
        let total = entity::prelude::ChannelMessage::find().count(self.db).await?;
        if total <= keep {
            return Ok(0);
        }

        let stale_ids: Vec<i32> = entity::prelude::ChannelMessage::find()
            .select_only()
            .column(entity::channel_message::Column::Id)
            .order_by_asc(entity::channel_message::Column::Timestamp)
            .order_by_asc(entity::channel_message::Column::Id)
            .limit(total - keep)
            .into_tuple()
            .all(self.db)
            .await?;

        let result = entity::prelude::ChannelMessage::delete_many()
            .filter(entity::channel_message::Column::Id.is_in(stale_ids))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }
}
