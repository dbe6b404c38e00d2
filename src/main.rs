mod model;
mod server;

use crate::server::{
    bot, config::Config, error::AppError, router, scheduler::maintenance,
    service::notification::NotificationHub, startup, state::AppState,
};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    startup::init_tracing();

    let config = Config::from_env()?;

    let db = startup::connect_to_database(&config).await?;
    let http_client = startup::setup_reqwest_client()?;
    startup::seed_firms(&db, &config).await?;

    let bind_address = config.bind_address.clone();
    let cors = router::cors_layer(&config);
    let bot_token = config.discord_bot_token.clone();

    let state = AppState::new(db, http_client, NotificationHub::new(), config);

    match bot_token {
        Some(token) => {
            let bot_state = state.clone();
            tokio::spawn(async move {
                if let Err(e) = bot::start::start_bot(&token, bot_state).await {
                    tracing::error!("Discord bot error: {}", e);
                }
            });
        }
        None => tracing::info!("DISCORD_BOT_TOKEN not set, Discord bot disabled"),
    }

    let _scheduler = maintenance::start_scheduler(state.clone()).await?;

    let app = router::router().layer(cors).with_state(state);

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    tracing::info!("Listening on {}", bind_address);

    axum::serve(listener, app).await?;

    Ok(())
}
