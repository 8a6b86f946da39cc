//! Menu-driven configuration dialogue for moderators (`!gateConfig`).

use std::time::Duration;

use url::Url;

use crate::{
    discord::{mention_user, outbound, split_message, MESSAGE_LIMIT},
    error::{gate::GateError, AppError},
    model::{
        event::IncomingMessage,
        member_gate::{GateChannel, GateTimer},
        welcome_message::{CreateWelcomeMessageParam, WelcomeMessage},
    },
    sequence::{self, Flow, Session, SessionCore},
    service::{member_gate::MemberGateService, welcome_message::WelcomeMessageService},
    state::BotState,
};

/// Lifetime of confirmation replies.
const CONFIRMATION_LIFETIME: Duration = Duration::from_secs(60);

const MENU: &str = "Welcome to the member gate configuration sequences.

Select an action to perform:
0. add a question
1. remove a question
2. add welcome message
3. remove welcome message
4. change welcome channel
5. change member gate channel
6. change member role
7. change rules channel
8. Disable member approval gate
9. Disable welcome messages
10. Wipe member gate module settings
11. Set auto purge time in hours
12. Disable auto purge
13. Set entry reminder time in hours
14. Disable entry reminder

To enable the member gate you need to set at least the member gate channel and the member role
To enable welcome messages you need to set at least a welcome message and the welcome channel";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigureStep {
    Menu,
    AwaitQuestion,
    /// Questions as listed to the moderator.
    AwaitQuestionRemoval(Vec<String>),
    AwaitWelcomeImage,
    AwaitWelcomeText {
        image_url: String,
    },
    /// Welcome messages as listed to the moderator.
    AwaitWelcomeRemoval(Vec<WelcomeMessage>),
    AwaitChannel(GateChannel),
    AwaitRole,
    AwaitHours(GateTimer),
}

#[derive(Debug)]
pub struct ConfigureFlow {
    step: ConfigureStep,
}

impl ConfigureFlow {
    pub fn new() -> Self {
        Self {
            step: ConfigureStep::Menu,
        }
    }

    #[cfg(test)]
    pub fn step(&self) -> &ConfigureStep {
        &self.step
    }
}

impl Default for ConfigureFlow {
    fn default() -> Self {
        Self::new()
    }
}

/// Posts the configuration menu and starts the dialogue.
pub async fn start(
    state: &BotState,
    user_id: u64,
    channel_id: u64,
    guild_id: u64,
) -> Result<(), AppError> {
    let mut session = Session::new(
        user_id,
        channel_id,
        Some(guild_id),
        Flow::Configure(ConfigureFlow::new()),
    );

    let menu = format!("{} {}", mention_user(user_id), MENU);
    if let Some(id) = outbound::send(&state.discord, channel_id, &menu).await {
        session.core.add_message_to_cleaner(id);
    }

    sequence::register(state, session).await;
    tracing::debug!("Started configure sequence for user {} in guild {}", user_id, guild_id);

    Ok(())
}

pub(crate) async fn on_message(
    state: &BotState,
    core: &mut SessionCore,
    flow: &mut ConfigureFlow,
    message: &IncomingMessage,
) -> Result<(), AppError> {
    if !core.accepts(message.author_id, message.channel_id) {
        return Ok(());
    }
    core.add_message_to_cleaner(message.message_id);

    let guild_id = core.require_guild_id()?;
    let content = message.content.trim();
    let service = MemberGateService::new(&state.db);

    match &flow.step {
        ConfigureStep::Menu => {
            // Unknown choices leave the menu up
            let Ok(choice) = content.parse::<u8>() else {
                return Ok(());
            };
            if let Some(step) = select(state, core, guild_id, choice).await? {
                flow.step = step;
            }
        }
        ConfigureStep::AwaitQuestion => {
            service.add_question(guild_id, content).await?;
            tracing::info!("Added gate question in guild {}", guild_id);
            let reply = format!("{} Question added.", mention_user(core.user_id()));
            confirm(state, core, &reply).await;
        }
        ConfigureStep::AwaitQuestionRemoval(questions) => {
            let question = pick(questions, content)?.clone();
            service.remove_question(guild_id, &question).await?;
            tracing::info!("Removed gate question in guild {}", guild_id);
            confirm(state, core, &format!("The question \"{}\" was removed.", question)).await;
        }
        ConfigureStep::AwaitWelcomeImage => {
            let image_url = parse_image_url(content)?;
            prompt(state, core, "Please enter a welcome message.").await;
            flow.step = ConfigureStep::AwaitWelcomeText { image_url };
        }
        ConfigureStep::AwaitWelcomeText { image_url } => {
            WelcomeMessageService::new(&state.db)
                .add_welcome_message(CreateWelcomeMessageParam {
                    guild_id,
                    image_url: image_url.clone(),
                    message: message.content.clone(),
                })
                .await?;
            tracing::info!("Added welcome message in guild {}", guild_id);
            confirm(state, core, "The new welcome message has been added.").await;
        }
        ConfigureStep::AwaitWelcomeRemoval(messages) => {
            let welcome = pick(messages, content)?.clone();
            WelcomeMessageService::new(&state.db)
                .remove_welcome_message(welcome.id)
                .await?;
            tracing::info!("Removed welcome message {} in guild {}", welcome.id, guild_id);
            confirm(state, core, &format!("\"{}\" has been deleted.", welcome.message)).await;
        }
        ConfigureStep::AwaitChannel(slot) => {
            let channel_id = message
                .mentioned_channel_ids
                .first()
                .copied()
                .ok_or(GateError::NeedChannelMention)?;
            service.set_channel(guild_id, *slot, channel_id).await?;
            tracing::info!("Set {:?} channel of guild {} to {}", slot, guild_id, channel_id);
            confirm(state, core, "Channel set").await;
        }
        ConfigureStep::AwaitRole => {
            let roles = state.discord.roles_by_name(guild_id, content).await?;
            let role_id = match roles.as_slice() {
                [] => return Err(GateError::RoleNotFound.into()),
                [role_id] => *role_id,
                _ => return Err(GateError::AmbiguousRole.into()),
            };
            service.set_member_role(guild_id, role_id).await?;
            tracing::info!("Set member role of guild {} to {}", guild_id, role_id);
            confirm(state, core, "Role set").await;
        }
        ConfigureStep::AwaitHours(timer) => {
            let hours = parse_hours(content)?;
            service.set_timer(guild_id, *timer, Some(hours)).await?;
            tracing::info!("Set {:?} timer of guild {} to {} hour(s)", timer, guild_id, hours);
            let reply = match timer {
                GateTimer::Purge => "Purge time set",
                GateTimer::Reminder => "Reminder time set",
            };
            confirm(state, core, reply).await;
        }
    }

    Ok(())
}

/// Handles a menu choice.
///
/// # Returns
/// - `Ok(Some(step))`: The choice needs more input, continue with `step`
/// - `Ok(None)`: The choice was performed or unknown
async fn select(
    state: &BotState,
    core: &mut SessionCore,
    guild_id: u64,
    choice: u8,
) -> Result<Option<ConfigureStep>, AppError> {
    let service = MemberGateService::new(&state.db);

    let next = match choice {
        0 => {
            prompt(state, core, "Please send the question to add:\n").await;
            ConfigureStep::AwaitQuestion
        }
        1 => {
            let questions = service.get_questions(guild_id).await?;
            let listing = numbered(questions.iter().map(String::as_str));
            list(
                state,
                core,
                &listing,
                "Respond with the question number to remove it.",
            )
            .await;
            ConfigureStep::AwaitQuestionRemoval(questions)
        }
        2 => {
            prompt(
                state,
                core,
                "Please send a url (that will stay online) to an image to be used as welcome image.",
            )
            .await;
            ConfigureStep::AwaitWelcomeImage
        }
        3 => {
            let messages = WelcomeMessageService::new(&state.db)
                .get_welcome_messages(guild_id)
                .await?;
            let listing = numbered(messages.iter().map(|m| m.message.as_str()));
            list(
                state,
                core,
                &listing,
                "Respond with the welcome message number to remove it.",
            )
            .await;
            ConfigureStep::AwaitWelcomeRemoval(messages)
        }
        4 | 5 | 7 => {
            prompt(state, core, "Please mention the channel you want to set.").await;
            ConfigureStep::AwaitChannel(match choice {
                4 => GateChannel::Welcome,
                5 => GateChannel::Gate,
                _ => GateChannel::Rules,
            })
        }
        6 => {
            prompt(
                state,
                core,
                "Please type the exact role name you want to set (please make sure the role name is unique).",
            )
            .await;
            ConfigureStep::AwaitRole
        }
        8 => {
            service.reset_gate_settings(guild_id).await?;
            tracing::info!("Disabled member gate of guild {}", guild_id);
            confirm(state, core, "Member approval gate settings wiped and disabled.").await;
            return Ok(None);
        }
        9 => {
            service.reset_welcome_settings(guild_id).await?;
            tracing::info!("Disabled welcome messages of guild {}", guild_id);
            confirm(state, core, "Welcome settings wiped and disabled.").await;
            return Ok(None);
        }
        10 => {
            service.reset_all_settings(guild_id).await?;
            tracing::info!("Wiped member gate settings of guild {}", guild_id);
            confirm(state, core, "Member gate module settings wiped and disabled.").await;
            return Ok(None);
        }
        11 => {
            prompt(
                state,
                core,
                "Please enter the amount of hour(s) a user has to complete the joining process",
            )
            .await;
            ConfigureStep::AwaitHours(GateTimer::Purge)
        }
        12 => {
            service.set_timer(guild_id, GateTimer::Purge, None).await?;
            confirm(state, core, "Auto purge disabled.").await;
            return Ok(None);
        }
        13 => {
            prompt(
                state,
                core,
                "Please enter the amount of hour(s) before the user receives a reminder",
            )
            .await;
            ConfigureStep::AwaitHours(GateTimer::Reminder)
        }
        14 => {
            service.set_timer(guild_id, GateTimer::Reminder, None).await?;
            confirm(state, core, "Entry reminder disabled.").await;
            return Ok(None);
        }
        _ => return Ok(None),
    };

    Ok(Some(next))
}

/// Renders `0. first\n1. second\n...`.
fn numbered<'a>(items: impl Iterator<Item = &'a str>) -> String {
    items
        .enumerate()
        .map(|(i, item)| format!("{}. {}\n", i, item))
        .collect()
}

/// Looks up a listed entry by the number the moderator typed.
fn pick<'a, T>(items: &'a [T], content: &str) -> Result<&'a T, GateError> {
    let index = content
        .parse::<usize>()
        .map_err(|_| GateError::InvalidNumber(content.to_string()))?;

    items.get(index).ok_or(GateError::NoSuchEntry(index))
}

fn parse_hours(content: &str) -> Result<u64, GateError> {
    match content.parse::<u64>() {
        Ok(hours) if hours > 0 => Ok(hours),
        _ => Err(GateError::InvalidNumber(content.to_string())),
    }
}

fn parse_image_url(content: &str) -> Result<String, GateError> {
    match Url::parse(content) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(content.to_string()),
        _ => Err(GateError::InvalidImageUrl(content.to_string())),
    }
}

async fn prompt(state: &BotState, core: &mut SessionCore, text: &str) {
    if let Some(id) = outbound::send(&state.discord, core.channel_id(), text).await {
        core.add_message_to_cleaner(id);
    }
}

/// Posts a listing split to fit into messages, followed by the instruction.
async fn list(state: &BotState, core: &mut SessionCore, listing: &str, instruction: &str) {
    let text = format!("{}\n{}", listing, instruction);
    for part in split_message(&text, MESSAGE_LIMIT) {
        prompt(state, core, &part).await;
    }
}

/// Ends the dialogue with a short-lived confirmation.
async fn confirm(state: &BotState, core: &mut SessionCore, text: &str) {
    sequence::finish(state, core).await;
    outbound::send_expiring(&state.discord, core.channel_id(), text, CONFIRMATION_LIFETIME).await;
}
