//! Forwards channel messages to the HTTP endpoint of the channel's firm.
//!
//! Forwarding is best effort: every branch resolves to a [`ForwardOutcome`] that is
//! logged and returned, never an error.

use sea_orm::DatabaseConnection;

use crate::{
    model::message::StoredAuthorDto,
    server::{
        data::firm::FirmRepository,
        model::{
            activity::ParsedActivity,
            firm::Firm,
            forward::{ForwardOutcome, ForwardPayload},
            message::IncomingMessage,
        },
        service::activity::parser,
    },
};

/// Header identifying the firm a forwarded message belongs to
pub const FIRM_ID_HEADER: &str = "X-Firm-Id";

pub struct MultiChannelForwarder<'a> {
    db: &'a DatabaseConnection,
    http_client: &'a reqwest::Client,
}

impl<'a> MultiChannelForwarder<'a> {
    pub fn new(db: &'a DatabaseConnection, http_client: &'a reqwest::Client) -> Self {
        Self { db, http_client }
    }

    /// Forwards a message posted in `channel_id` to the firm configured for it
    ///
    /// # Returns
    /// - `NoFirm` / `Disabled` / `NoEndpoint` - Nothing was sent
    /// - `Forwarded` - The endpoint answered with a 2xx status
    /// - `Failed` - The firm lookup failed, the endpoint answered non-2xx or could not
    ///   be reached
    pub async fn process_message(
        &self,
        message: &IncomingMessage,
        channel_id: &str,
    ) -> ForwardOutcome {
        let firm = match FirmRepository::new(self.db)
            .find_by_channel_id(channel_id)
            .await
        {
            Ok(Some(firm)) => firm,
            Ok(None) => return ForwardOutcome::NoFirm,
            Err(e) => {
                tracing::error!("Failed to look up firm for channel {}: {}", channel_id, e);
                return ForwardOutcome::Failed {
                    status: None,
                    error: e.to_string(),
                };
            }
        };

        if !firm.enabled {
            tracing::debug!("Firm {} is disabled, not forwarding", firm.id);
            return ForwardOutcome::Disabled;
        }

        let Some(endpoint) = firm.endpoint_url.clone() else {
            return ForwardOutcome::NoEndpoint;
        };

        let payload = build_payload(&firm, message, channel_id);

        let outcome = match self
            .http_client
            .post(&endpoint)
            .header(FIRM_ID_HEADER, &firm.id)
            .json(&payload)
            .send()
            .await
        {
            Ok(response) if response.status().is_success() => ForwardOutcome::Forwarded {
                status: response.status().as_u16(),
            },
            Ok(response) => ForwardOutcome::Failed {
                status: Some(response.status().as_u16()),
                error: format!("Endpoint responded with {}", response.status()),
            },
            Err(e) => ForwardOutcome::Failed {
                status: None,
                error: e.to_string(),
            },
        };

        match &outcome {
            ForwardOutcome::Forwarded { status } => tracing::debug!(
                "Forwarded message {} to firm {} ({})",
                message.id,
                firm.id,
                status
            ),
            ForwardOutcome::Failed { error, .. } => tracing::warn!(
                "Failed to forward message {} to firm {}: {}",
                message.id,
                firm.id,
                error
            ),
            _ => {}
        }

        outcome
    }
}

/// Builds the normalized payload sent to a firm endpoint
pub fn build_payload(firm: &Firm, message: &IncomingMessage, channel_id: &str) -> ForwardPayload {
    let author_name = message
        .embeds
        .first()
        .and_then(|e| e.author_name.clone())
        .filter(|n| !n.trim().is_empty())
        .unwrap_or_else(|| message.author.name.clone());

    let content = if !message.content.trim().is_empty() {
        message.content.clone()
    } else if let Some(description) = message
        .embeds
        .iter()
        .filter_map(|e| e.description.as_deref())
        .find(|d| !d.trim().is_empty())
    {
        description.to_string()
    } else {
        parser::message_text("", &message.embeds)
    };

    ForwardPayload {
        firm_id: firm.id.clone(),
        firm_name: firm.name.clone(),
        channel_id: channel_id.to_string(),
        message_id: message.id.clone(),
        author: StoredAuthorDto {
            id: message.author.id.clone(),
            name: author_name,
        },
        content,
        timestamp: message.timestamp,
        parsed: parser::parse_discord_message(&message.text()).map(ParsedActivity::into_dto),
    }
}
