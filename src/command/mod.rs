//! Prefix command dispatch.
//!
//! A command is the configured prefix followed by an alias and optional
//! arguments, e.g. `!review 1234`. Aliases match case-insensitively. Every
//! alias belongs to a [`CommandModule`], which is also what the help listing
//! enumerates.

pub mod help;
pub mod word_blacklist;

use std::time::Duration;

use crate::{
    discord::{outbound, GatePermission},
    error::AppError,
    gate::MemberGate,
    model::event::IncomingMessage,
    state::BotState,
};

/// Lifetime of error replies to commands.
const ERROR_REPLY_LIFETIME: Duration = Duration::from_secs(60);

/// A group of related commands as presented in the help listing.
#[derive(Debug, Clone, Copy)]
pub struct CommandModule {
    pub aliases: &'static [&'static str],
    pub argument_syntax: Option<&'static str>,
    pub description: Option<&'static str>,
    pub required_permissions: &'static [GatePermission],
}

pub const HELP_MODULE: CommandModule = CommandModule {
    aliases: &["Help"],
    argument_syntax: None,
    description: Some("Show a list of commands"),
    required_permissions: &[],
};

pub const MEMBER_GATE_MODULE: CommandModule = CommandModule {
    aliases: &["gateConfig", "join", "review"],
    argument_syntax: None,
    description: None,
    required_permissions: &[],
};

pub const WORD_BLACKLIST_MODULE: CommandModule = CommandModule {
    aliases: &["WordBlacklist"],
    argument_syntax: Some("<word> <EXACT|CONTAINS|STARTS_WITH|ENDS_WITH>"),
    description: Some("Deletes messages containing the word, compared per word of the message using the filter method."),
    required_permissions: &[GatePermission::ManageMessages],
};

/// Every registered module, in help order.
pub const MODULES: &[CommandModule] = &[HELP_MODULE, MEMBER_GATE_MODULE, WORD_BLACKLIST_MODULE];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Help,
    GateConfig,
    Join,
    Review,
    WordBlacklist,
}

impl Command {
    fn from_alias(alias: &str) -> Option<Self> {
        match alias.to_lowercase().as_str() {
            "help" => Some(Self::Help),
            "gateconfig" => Some(Self::GateConfig),
            "join" => Some(Self::Join),
            "review" => Some(Self::Review),
            "wordblacklist" => Some(Self::WordBlacklist),
            _ => None,
        }
    }
}

/// Splits a message into a command and its arguments.
///
/// # Returns
/// - `Some((command, arguments))`: The message invokes a known command;
///   arguments are trimmed and may be empty
/// - `None`: The message is not a command
pub fn parse<'a>(prefix: &str, content: &'a str) -> Option<(Command, &'a str)> {
    let invocation = content.trim_start().strip_prefix(prefix)?;
    let (alias, arguments) = match invocation.split_once(char::is_whitespace) {
        Some((alias, arguments)) => (alias, arguments.trim()),
        None => (invocation.trim_end(), ""),
    };

    Command::from_alias(alias).map(|command| (command, arguments))
}

/// Runs the command a message invokes, if any.
///
/// User-facing failures are posted back into the channel and deleted after a
/// minute; internal ones are logged.
///
/// # Returns
/// - `true` when the message was a command
pub async fn dispatch(state: &BotState, message: &IncomingMessage) -> bool {
    if message.author_is_bot {
        return false;
    }
    let Some((command, arguments)) = parse(&state.settings.command_prefix, &message.content) else {
        return false;
    };
    tracing::debug!(
        "User {} invoked {:?} in channel {}",
        message.author_id,
        command,
        message.channel_id
    );

    let gate = MemberGate::new(state);
    let result = match command {
        Command::Help => help::execute(state, message).await,
        Command::GateConfig => gate.configure(message).await,
        Command::Join => gate.join(message).await,
        Command::Review => gate.review(message, arguments).await,
        Command::WordBlacklist => word_blacklist::execute(state, message, arguments).await,
    };

    if let Err(e) = result {
        report(state, message.channel_id, &e).await;
    }

    true
}

async fn report(state: &BotState, channel_id: u64, error: &AppError) {
    outbound::send_expiring(
        &state.discord,
        channel_id,
        &error.user_message(),
        ERROR_REPLY_LIFETIME,
    )
    .await;
}
