use serenity::all::{Context, Message};

use crate::server::{
    data::firm::FirmRepository, error::AppError, model::message::IncomingMessage,
    service::message::process_incoming, state::AppState,
};

/// Handle message creation in a channel
///
/// Messages outside guilds, from the bot itself or in unmonitored channels are
/// ignored. Errors are logged and the message dropped.
pub async fn handle_message(state: &AppState, ctx: Context, message: Message) {
    if message.guild_id.is_none() || message.author.id == ctx.cache.current_user().id {
        return;
    }

    let channel_id = message.channel_id.to_string();

    match is_monitored(state, &channel_id).await {
        Ok(true) => {}
        Ok(false) => return,
        Err(e) => {
            tracing::error!("Failed to check whether channel {} is monitored: {}", channel_id, e);
            return;
        }
    }

    let incoming = IncomingMessage::from_discord(&message);

    if let Err(e) = process_incoming(state, &channel_id, vec![incoming]).await {
        tracing::error!(
            "Failed to ingest message {} from channel {}: {}",
            message.id,
            channel_id,
            e
        );
    }
}

/// A channel is monitored when a firm is bound to it or it is listed in the configuration
async fn is_monitored(state: &AppState, channel_id: &str) -> Result<bool, AppError> {
    if state
        .config
        .monitored_channel_ids
        .iter()
        .any(|c| c == channel_id)
    {
        return Ok(true);
    }

    Ok(FirmRepository::new(&state.db)
        .find_by_channel_id(channel_id)
        .await?
        .is_some())
}
