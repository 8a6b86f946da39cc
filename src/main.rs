mod bot;
mod command;
mod config;
mod data;
mod discord;
mod error;
mod gate;
mod model;
mod scheduler;
mod sequence;
mod service;
mod startup;
mod state;

use crate::{bot::start, config::Config, error::AppError};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    startup::init_tracing();

    let config = Config::from_env()?;
    let db = startup::connect_to_database(&config).await?;

    let (client, state) = start::init_bot(&config, db).await?;

    scheduler::start_scheduler(state).await?;

    if let Err(e) = start::start_bot(client).await {
        tracing::error!("Discord bot error: {}", e);
        return Err(e);
    }

    Ok(())
}
