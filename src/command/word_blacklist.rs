use crate::{
    discord::GatePermission,
    error::{gate::GateError, AppError},
    model::{blacklisted_word::FilterMethod, event::IncomingMessage},
    service::word_filter::WordFilterService,
    state::BotState,
};

/// `!WordBlacklist <word> <method>`: adds a word to the guild's filter.
///
/// Silently ignored outside guilds and for members without Manage Messages.
pub async fn execute(
    state: &BotState,
    message: &IncomingMessage,
    arguments: &str,
) -> Result<(), AppError> {
    let Some(guild_id) = message.guild_id else {
        return Ok(());
    };
    if !state
        .discord
        .has_permission(guild_id, message.author_id, GatePermission::ManageMessages)
        .await?
    {
        return Ok(());
    }

    let mut parts = arguments.split(' ').filter(|part| !part.is_empty());
    let (Some(word), Some(method)) = (parts.next(), parts.next()) else {
        return Err(GateError::MissingArguments(format!(
            "{} <word> <method>",
            state.command("WordBlacklist")
        ))
        .into());
    };
    let method: FilterMethod = method.parse()?;

    WordFilterService::new(state)
        .add_word(guild_id, word, method)
        .await?;
    tracing::info!(
        "User {} blacklisted \"{}\" ({}) in guild {}",
        message.author_id,
        word,
        method,
        guild_id
    );

    Ok(())
}
