use serenity::all::{Client, GatewayIntents};

use crate::server::{bot::handler::Handler, error::AppError, state::AppState};

/// Connects the Discord bot and processes gateway events until shutdown
///
/// # Arguments
/// - `token` - Discord bot token
/// - `state` - Shared application state used by the event handlers
///
/// # Returns
/// - `Ok(())` - The client shut down
/// - `Err(AppError::DiscordErr)` - Failed to build or run the client
pub async fn start_bot(token: &str, state: AppState) -> Result<(), AppError> {
    let intents = GatewayIntents::GUILDS
        | GatewayIntents::GUILD_MESSAGES
        | GatewayIntents::MESSAGE_CONTENT;

    let mut client = Client::builder(token, intents)
        .event_handler(Handler::new(state))
        .await?;

    tracing::info!("Starting Discord bot...");

    client.start().await?;

    Ok(())
}
