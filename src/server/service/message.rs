//! Channel message ingestion and listing.
//!
//! Messages from the bot webhook and from the Discord gateway go through the same
//! path: deduplicate and store, prune to the retention limit, notify SSE clients
//! and forward the newly stored messages to the channel's firm endpoint.

use sea_orm::{DatabaseConnection, SqlErr};
use std::collections::HashSet;

use crate::{
    model::{
        message::{ChannelMessagesDto, StoredMessageDto},
        notification::NotificationEventDto,
    },
    server::{
        data::channel_message::ChannelMessageRepository,
        error::AppError,
        model::message::{ChannelMessage, CreateChannelMessageParam, IncomingMessage, IngestSummary},
        service::{activity::dedupe::create_dedupe_key, forwarder::MultiChannelForwarder},
        state::AppState,
    },
};

pub struct MessageService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> MessageService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Stores a batch of messages for a channel, skipping duplicates
    ///
    /// A message is a duplicate when its Discord ID or its dedupe key is already
    /// stored or appeared earlier in the same batch. After storing, the table is
    /// pruned to the `retention_limit` most recent messages.
    ///
    /// When the store is full, a message older than every retained message is
    /// skipped instead of being stored and pruned right away. Messages pruned by
    /// the same ingest are dropped from the summary. Both count as duplicates, so
    /// a redelivery of an expired message is never reported as new.
    ///
    /// # Arguments
    /// - `channel_id` - Discord channel the messages were posted in
    /// - `messages` - Normalized messages in arrival order
    /// - `retention_limit` - Number of messages kept after pruning
    ///
    /// # Returns
    /// - `Ok(IngestSummary)` - Counts and the newly stored messages
    /// - `Err(AppError)` - Database error
    pub async fn ingest(
        &self,
        channel_id: &str,
        messages: Vec<IncomingMessage>,
        retention_limit: u64,
    ) -> Result<IngestSummary, AppError> {
        let repo = ChannelMessageRepository::new(self.db);

        let mut summary = IngestSummary {
            received: messages.len() as u64,
            ..Default::default()
        };
        let mut seen_ids: HashSet<String> = HashSet::new();
        let mut seen_keys: HashSet<String> = HashSet::new();
        let mut stored_count = repo.count(None).await?;

        for message in messages {
            let dedupe_key = create_dedupe_key(channel_id, &message);

            if !seen_ids.insert(message.id.clone())
                || !seen_keys.insert(dedupe_key.clone())
                || repo.exists_by_message_id(&message.id).await?
                || repo.exists_by_dedupe_key(&dedupe_key).await?
            {
                summary.duplicates += 1;
                continue;
            }

            if stored_count >= retention_limit
                && repo
                    .oldest_timestamp()
                    .await?
                    .is_some_and(|oldest| message.timestamp < oldest)
            {
                tracing::debug!(
                    "Skipping message {} older than the retention window",
                    message.id
                );
                summary.duplicates += 1;
                continue;
            }

            let param = CreateChannelMessageParam {
                channel_id: channel_id.to_string(),
                message,
                dedupe_key,
            };

            match repo.create(param).await {
                Ok(stored) => {
                    stored_count += 1;
                    summary.stored.push(stored);
                }
                // Stored concurrently by the other ingestion path
                Err(AppError::DbErr(e))
                    if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) =>
                {
                    summary.duplicates += 1;
                }
                Err(e) => return Err(e),
            }
        }

        let pruned = repo.prune(retention_limit).await?;
        if pruned > 0 {
            tracing::debug!("Pruned {} channel messages over retention limit", pruned);

            let mut retained = Vec::with_capacity(summary.stored.len());
            for message in std::mem::take(&mut summary.stored) {
                if repo.exists_by_message_id(&message.message_id).await? {
                    retained.push(message);
                } else {
                    summary.duplicates += 1;
                }
            }
            summary.stored = retained;
        }

        Ok(summary)
    }

    /// Gets the most recent stored messages annotated with parse results
    ///
    /// # Arguments
    /// - `channel_id` - Restrict to one channel, or `None` for every channel
    /// - `limit` - Maximum number of messages
    ///
    /// # Returns
    /// - `Ok(ChannelMessagesDto)` - Newest first messages and the total stored count
    /// - `Err(AppError)` - Database error
    pub async fn list(
        &self,
        channel_id: Option<&str>,
        limit: u64,
    ) -> Result<ChannelMessagesDto, AppError> {
        let repo = ChannelMessageRepository::new(self.db);

        let messages = repo.get_recent(channel_id, limit).await?;
        let total = repo.count(channel_id).await?;

        Ok(ChannelMessagesDto {
            messages: messages
                .into_iter()
                .map(ChannelMessage::into_dto)
                .collect::<Vec<StoredMessageDto>>(),
            total,
        })
    }

    /// Deletes the oldest messages beyond the retention limit
    pub async fn prune(&self, retention_limit: u64) -> Result<u64, AppError> {
        ChannelMessageRepository::new(self.db)
            .prune(retention_limit)
            .await
    }
}

/// Runs the full ingestion pipeline for messages received from any source
///
/// Stores the messages, notifies SSE clients when anything new was stored and
/// forwards the new messages to the channel's firm in a background task.
pub async fn process_incoming(
    state: &AppState,
    channel_id: &str,
    messages: Vec<IncomingMessage>,
) -> Result<IngestSummary, AppError> {
    let summary = MessageService::new(&state.db)
        .ingest(channel_id, messages, state.config.message_retention_limit)
        .await?;

    if summary.stored.is_empty() {
        return Ok(summary);
    }

    tracing::info!(
        "Stored {} new messages from channel {} ({} duplicates)",
        summary.stored.len(),
        channel_id,
        summary.duplicates
    );

    state.notifier.notify(NotificationEventDto::NewMessages {
        channel_id: channel_id.to_string(),
        count: summary.stored.len() as u64,
    });

    let db = state.db.clone();
    let http_client = state.http_client.clone();
    let to_forward = summary.stored.clone();
    let channel_id = channel_id.to_string();
    tokio::spawn(async move {
        let forwarder = MultiChannelForwarder::new(&db, &http_client);
        for message in &to_forward {
            forwarder
                .process_message(&message.to_incoming(), &channel_id)
                .await;
        }
    });

    Ok(summary)
}
