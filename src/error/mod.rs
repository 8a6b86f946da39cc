//! Error types and chat-facing error rendering.
//!
//! `AppError` is the top-level error type returned by repositories, services,
//! flows and handlers. It wraps domain-specific errors and knows how to turn
//! itself into the text a user sees in chat via [`AppError::user_message`].

pub mod config;
pub mod gate;

use thiserror::Error;

use crate::error::{config::ConfigError, gate::GateError};

/// Text shown in chat when an internal error interrupts a command.
const GENERIC_ERROR_MESSAGE: &str = "Something went wrong while processing that, please try again.";

/// Top-level application error type.
///
/// Aggregates all possible error types that can occur in the bot. Most variants
/// use `#[from]` for automatic error conversion. User-facing problems travel as
/// `GateErr` and are shown verbatim, everything else is logged and replaced by a
/// generic message.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error during startup or environment variable loading.
    #[error(transparent)]
    ConfigErr(#[from] ConfigError),

    /// Input or state error that should be shown to the user as-is.
    #[error(transparent)]
    GateErr(#[from] GateError),

    /// Database operation error from SeaORM.
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),

    /// Discord API error from Serenity.
    ///
    /// Boxed due to large size.
    #[error(transparent)]
    DiscordErr(#[from] Box<serenity::Error>),

    /// Cron scheduler error.
    #[error(transparent)]
    SchedulerErr(#[from] tokio_cron_scheduler::JobSchedulerError),

    /// Internal error with custom message.
    ///
    /// The message is logged but never shown to users.
    #[error("{0}")]
    InternalError(String),
}

/// Manual conversion from serenity::Error to AppError.
///
/// Boxes the error to reduce the size of the AppError enum, as serenity::Error
/// is very large and would make all AppError variants larger if not boxed.
impl From<serenity::Error> for AppError {
    fn from(err: serenity::Error) -> Self {
        AppError::DiscordErr(Box::new(err))
    }
}

impl AppError {
    /// Text to post in chat for this error.
    ///
    /// Gate errors are rendered verbatim. Any other variant is logged at error
    /// level with full details and a generic message is returned instead, so
    /// database or Discord internals never leak into a channel.
    pub fn user_message(&self) -> String {
        match self {
            Self::GateErr(err) => err.to_string(),
            err => {
                tracing::error!("Internal error: {}", err);
                GENERIC_ERROR_MESSAGE.to_string()
            }
        }
    }

    /// Whether this error is a user-facing gate error.
    pub fn is_user_facing(&self) -> bool {
        matches!(self, Self::GateErr(_))
    }
}
