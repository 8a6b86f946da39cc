use std::sync::Arc;

use sea_orm::DatabaseConnection;
use serenity::{
    all::{Client, GatewayIntents},
    http::Http,
};

use crate::{
    bot::handler::Handler,
    config::Config,
    discord::client::SerenityDiscordApi,
    error::AppError,
    state::{BotSettings, BotState},
};

/// Gateway intents the bot subscribes to.
pub fn intents() -> GatewayIntents {
    GatewayIntents::GUILDS
        | GatewayIntents::GUILD_MESSAGES
        | GatewayIntents::GUILD_MEMBERS
        | GatewayIntents::GUILD_MESSAGE_REACTIONS
        | GatewayIntents::DIRECT_MESSAGES
        | GatewayIntents::MESSAGE_CONTENT
}

/// Builds the bot client and the state shared with the scheduler.
///
/// The bot's own user is fetched up front so the state can recognise the
/// bot's messages before the first gateway event arrives.
///
/// # Arguments
/// - `config` - Application configuration
/// - `db` - Database connection shared by handlers and jobs
///
/// # Returns
/// - `Ok((Client, BotState))` - Client ready to start and the shared state
/// - `Err(AppError)` - Token rejected or client construction failed
pub async fn init_bot(
    config: &Config,
    db: DatabaseConnection,
) -> Result<(Client, BotState), AppError> {
    let http = Arc::new(Http::new(&config.discord_bot_token));
    let bot_user = http.get_current_user().await?;
    tracing::info!("Authenticated as {} ({})", bot_user.name, bot_user.id);

    let discord = Arc::new(SerenityDiscordApi::new(http, bot_user.id.get()));
    let state = BotState::new(db, discord, BotSettings::from_config(config));

    let client = Client::builder(&config.discord_bot_token, intents())
        .event_handler(Handler::new(state.clone()))
        .await?;

    Ok((client, state))
}

/// Runs the bot until the gateway connection shuts down.
///
/// Should be called from within a tokio::spawn task since it blocks until
/// the client stops.
pub async fn start_bot(mut client: Client) -> Result<(), AppError> {
    tracing::info!("Starting Discord bot...");

    client.start().await?;

    Ok(())
}
