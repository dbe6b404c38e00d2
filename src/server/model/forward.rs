//! Models for forwarding channel messages to firm endpoints.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::model::message::{ParsedActivityDto, StoredAuthorDto};

/// Normalized payload POSTed to a firm's endpoint for every forwarded message.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ForwardPayload {
    pub firm_id: String,
    pub firm_name: String,
    pub channel_id: String,
    pub message_id: String,
    pub author: StoredAuthorDto,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    pub parsed: Option<ParsedActivityDto>,
}

/// What happened to a message handed to the forwarder.
#[derive(Debug, Clone, PartialEq)]
pub enum ForwardOutcome {
    /// No firm is configured for the channel
    NoFirm,
    /// The channel's firm is disabled
    Disabled,
    /// The channel's firm has no endpoint configured
    NoEndpoint,
    /// The endpoint accepted the payload
    Forwarded { status: u16 },
    /// The endpoint rejected the payload or could not be reached
    Failed {
        status: Option<u16>,
        error: String,
    },
}
