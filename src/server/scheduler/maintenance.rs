use chrono::{Duration, Utc};
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::{
    model::notification::NotificationEventDto,
    server::{
        error::AppError,
        service::{message::MessageService, receipt::ReceiptService},
        state::AppState,
    },
};

const HEARTBEAT_SCHEDULE: &str = "*/30 * * * * *";
const RETENTION_SCHEDULE: &str = "0 0 * * * *";
const REVERIFY_SCHEDULE: &str = "0 */5 * * * *";

/// How far back pending receipts are re-verified
const REVERIFY_LOOKBACK_HOURS: i64 = 24;

/// Starts the maintenance scheduler
///
/// Jobs:
/// - every 30 seconds: SSE heartbeat
/// - hourly: prune channel messages to the retention limit
/// - every 5 minutes: re-verify pending receipts from the last 24 hours
///
/// # Arguments
/// - `state`: Shared application state
pub async fn start_scheduler(state: AppState) -> Result<JobScheduler, AppError> {
    let scheduler = JobScheduler::new().await?;

    let heartbeat_state = state.clone();
    let heartbeat = Job::new_async(HEARTBEAT_SCHEDULE, move |_uuid, _lock| {
        let state = heartbeat_state.clone();

        Box::pin(async move {
            state.notifier.notify(NotificationEventDto::Heartbeat {
                timestamp: Utc::now(),
            });
        })
    })?;

    let retention_state = state.clone();
    let retention = Job::new_async(RETENTION_SCHEDULE, move |_uuid, _lock| {
        let state = retention_state.clone();

        Box::pin(async move {
            if let Err(e) = prune_messages(&state).await {
                tracing::error!("Error pruning channel messages: {}", e);
            }
        })
    })?;

    let reverify_state = state.clone();
    let reverify = Job::new_async(REVERIFY_SCHEDULE, move |_uuid, _lock| {
        let state = reverify_state.clone();

        Box::pin(async move {
            if let Err(e) = reverify_receipts(&state).await {
                tracing::error!("Error re-verifying pending receipts: {}", e);
            }
        })
    })?;

    scheduler.add(heartbeat).await?;
    scheduler.add(retention).await?;
    scheduler.add(reverify).await?;
    scheduler.start().await?;

    tracing::info!("Maintenance scheduler started");

    Ok(scheduler)
}

async fn prune_messages(state: &AppState) -> Result<(), AppError> {
    let pruned = MessageService::new(&state.db)
        .prune(state.config.message_retention_limit)
        .await?;

    if pruned > 0 {
        tracing::info!("Pruned {} channel messages", pruned);
    }

    Ok(())
}

/// Re-verifies recent pending receipts and announces the ones that became verified
pub async fn reverify_receipts(state: &AppState) -> Result<usize, AppError> {
    let since = Utc::now() - Duration::hours(REVERIFY_LOOKBACK_HOURS);

    let verified = ReceiptService::new(&state.db)
        .reverify_pending(since)
        .await?;

    for receipt in &verified {
        state.notifier.notify(NotificationEventDto::ReceiptUpdated {
            receipt_id: receipt.id,
            status: receipt.status.as_str().to_string(),
        });
    }

    if !verified.is_empty() {
        tracing::info!("Verified {} pending receipts", verified.len());
    }

    Ok(verified.len())
}
