use crate::{
    command::{CommandModule, MODULES},
    discord::{outbound, GatePermission, OutgoingEmbed},
    error::{gate::GateError, AppError},
    model::event::IncomingMessage,
    state::BotState,
};

/// Discord's limit of fields per embed.
const MAX_FIELDS_PER_EMBED: usize = 25;

/// `!help`: lists every command module.
///
/// Allowed in private chat, or in a guild channel for members with Manage
/// Messages.
pub async fn execute(state: &BotState, message: &IncomingMessage) -> Result<(), AppError> {
    if let Some(guild_id) = message.guild_id {
        let allowed = state
            .discord
            .has_permission(guild_id, message.author_id, GatePermission::ManageMessages)
            .await?;
        if !allowed {
            return Err(GateError::HelpOutsidePrivateChat.into());
        }
    }

    for embed in help_embeds(MODULES) {
        outbound::send_embed(&state.discord, message.channel_id, None, &embed).await;
    }

    Ok(())
}

/// Builds the help embeds, starting a new part every 25 modules.
pub fn help_embeds(modules: &[CommandModule]) -> Vec<OutgoingEmbed> {
    let mut embeds: Vec<OutgoingEmbed> = Vec::new();

    for (i, chunk) in modules.chunks(MAX_FIELDS_PER_EMBED).enumerate() {
        let title = if i == 0 {
            "Help".to_string()
        } else {
            format!("Help part {}", i + 1)
        };

        embeds.push(OutgoingEmbed {
            title: Some(title),
            fields: chunk.iter().map(|m| (field_name(m), field_value(m), false)).collect(),
            ..Default::default()
        });
    }

    if embeds.is_empty() {
        embeds.push(OutgoingEmbed {
            title: Some("Help".to_string()),
            ..Default::default()
        });
    }

    embeds
}

fn field_name(module: &CommandModule) -> String {
    let aliases = module.aliases.join(", ");
    match module.argument_syntax {
        Some(syntax) => format!("{} {}", aliases, syntax),
        None => aliases,
    }
}

fn field_value(module: &CommandModule) -> String {
    let description = module.description.unwrap_or("No description available.");
    if module.required_permissions.is_empty() {
        return description.to_string();
    }

    let permissions: Vec<&str> = module
        .required_permissions
        .iter()
        .map(GatePermission::label)
        .collect();
    format!(
        "{}\nRequires server permissions: {}",
        description,
        permissions.join(", ")
    )
}
