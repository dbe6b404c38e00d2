//! Server-sent event fan-out for dashboard clients.
//!
//! `NotificationHub` wraps a tokio broadcast channel. Every SSE connection owns a
//! receiver; dropping the connection drops the receiver, which removes the client
//! from the channel.

use futures::{stream, Stream, StreamExt};
use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};
use tokio::sync::broadcast::{self, error::RecvError};

use crate::model::notification::NotificationEventDto;

/// Events buffered per client before a slow client starts losing events
const CHANNEL_CAPACITY: usize = 100;

#[derive(Clone)]
pub struct NotificationHub {
    sender: broadcast::Sender<NotificationEventDto>,
    next_client_id: Arc<AtomicU64>,
}

impl Default for NotificationHub {
    fn default() -> Self {
        Self::new()
    }
}

impl NotificationHub {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(CHANNEL_CAPACITY);

        Self {
            sender,
            next_client_id: Arc::new(AtomicU64::new(1)),
        }
    }

    /// Registers a new client
    ///
    /// The returned stream yields `connected` first and then every event broadcast
    /// after the call. The client is removed when the stream is dropped.
    pub fn subscribe(&self) -> impl Stream<Item = NotificationEventDto> + Send + 'static {
        let client = ClientGuard {
            id: self.next_client_id.fetch_add(1, Ordering::Relaxed),
            receiver: self.sender.subscribe(),
        };

        tracing::debug!(
            "SSE client {} connected ({} active)",
            client.id,
            self.client_count()
        );

        let events = stream::unfold(client, |mut client| async move {
            loop {
                match client.receiver.recv().await {
                    Ok(event) => return Some((event, client)),
                    Err(RecvError::Lagged(skipped)) => {
                        tracing::warn!("SSE client {} skipped {} events", client.id, skipped);
                    }
                    Err(RecvError::Closed) => return None,
                }
            }
        });

        stream::once(async { NotificationEventDto::Connected }).chain(events)
    }

    /// Broadcasts an event to every connected client
    ///
    /// Having no connected clients is not an error.
    pub fn notify(&self, event: NotificationEventDto) {
        if let Err(e) = self.sender.send(event) {
            tracing::debug!("No SSE clients to notify: {:?}", e.0);
        }
    }

    pub fn client_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

struct ClientGuard {
    id: u64,
    receiver: broadcast::Receiver<NotificationEventDto>,
}

impl Drop for ClientGuard {
    fn drop(&mut self) {
        tracing::debug!("SSE client {} disconnected", self.id);
    }
}
