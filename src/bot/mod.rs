//! Discord gateway integration.
//!
//! The bot connects to the gateway, converts serenity events into the plain
//! event structs of [`crate::model::event`] and hands them to the word filter,
//! the sequence engine, the command dispatcher and the member gate.
//!
//! # Gateway Intents
//!
//! The bot requires the following gateway intents:
//! - `GUILDS` - Guild and role data
//! - `GUILD_MESSAGES` - Commands and sequence input in guild channels
//! - `GUILD_MEMBERS` - Member joins, leaves and role changes (privileged intent)
//! - `GUILD_MESSAGE_REACTIONS` - Review reactions
//! - `DIRECT_MESSAGES` - Help requested in private chat
//! - `MESSAGE_CONTENT` - Reading message text (privileged intent)
//!
//! Note: `GUILD_MEMBERS` and `MESSAGE_CONTENT` are privileged intents and must
//! be explicitly enabled in the Discord Developer Portal for the bot application.

pub mod handler;
pub mod start;
