use chrono::{DateTime, Utc};
use serde::Serialize;

/// Events pushed to dashboard clients over the SSE stream.
///
/// Serialized as `{"type": "<variant>", ...fields}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum NotificationEventDto {
    Connected,
    Heartbeat {
        timestamp: DateTime<Utc>,
    },
    NewMessages {
        channel_id: String,
        count: u64,
    },
    ReceiptUpdated {
        receipt_id: i32,
        status: String,
    },
}
