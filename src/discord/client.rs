use std::sync::Arc;

use chrono::{Duration, Utc};
use serenity::{
    all::{
        ChannelId, CreateEmbed, CreateMessage, GetMessages, GuildId, Message, MessageId,
        Permissions, ReactionType, RoleId, UserId,
    },
    async_trait,
    http::Http,
};

use crate::{
    discord::{DiscordApi, FetchedMessage, GatePermission, OutgoingEmbed},
    error::AppError,
    model::event::MemberSnapshot,
};

/// Discord allows bulk deletion of at most this many messages per request.
const BULK_DELETE_LIMIT: usize = 100;
/// Bulk deletion rejects messages older than this.
const BULK_DELETE_MAX_AGE_DAYS: i64 = 14;
/// Page size for channel history requests.
const MESSAGE_PAGE_SIZE: usize = 100;
/// Page size for member list requests.
const MEMBER_PAGE_SIZE: u64 = 1000;

/// [`DiscordApi`] implementation backed by serenity's HTTP client.
pub struct SerenityDiscordApi {
    http: Arc<Http>,
    bot_user_id: u64,
}

impl SerenityDiscordApi {
    /// Creates the API over the bot's shared HTTP client.
    ///
    /// # Arguments
    /// - `http` - HTTP client taken from the serenity `Client`
    /// - `bot_user_id` - Id of the bot's own user, used to recognise its messages
    pub fn new(http: Arc<Http>, bot_user_id: u64) -> Self {
        Self { http, bot_user_id }
    }
}

fn to_fetched(message: Message) -> FetchedMessage {
    FetchedMessage {
        id: message.id.get(),
        channel_id: message.channel_id.get(),
        author_id: message.author.id.get(),
        mentioned_user_ids: message.mentions.iter().map(|u| u.id.get()).collect(),
        created_at: message.timestamp.to_utc(),
        content: message.content,
    }
}

fn is_not_found(err: &serenity::Error) -> bool {
    matches!(
        err,
        serenity::Error::Http(http) if http.status_code().map(|s| s.as_u16()) == Some(404)
    )
}

fn build_embed(embed: &OutgoingEmbed) -> CreateEmbed {
    let mut builder = CreateEmbed::new();
    if let Some(title) = &embed.title {
        builder = builder.title(title);
    }
    if let Some(description) = &embed.description {
        builder = builder.description(description);
    }
    if let Some(image_url) = &embed.image_url {
        builder = builder.image(image_url);
    }
    for (name, value, inline) in &embed.fields {
        builder = builder.field(name, value, *inline);
    }
    builder
}

#[async_trait]
impl DiscordApi for SerenityDiscordApi {
    fn bot_user_id(&self) -> u64 {
        self.bot_user_id
    }

    async fn send_message(&self, channel_id: u64, content: &str) -> Result<u64, AppError> {
        let message = ChannelId::new(channel_id)
            .send_message(&self.http, CreateMessage::new().content(content))
            .await?;

        Ok(message.id.get())
    }

    async fn send_embed(
        &self,
        channel_id: u64,
        content: Option<&str>,
        embed: &OutgoingEmbed,
    ) -> Result<u64, AppError> {
        let mut builder = CreateMessage::new().embed(build_embed(embed));
        if let Some(content) = content {
            builder = builder.content(content);
        }

        let message = ChannelId::new(channel_id)
            .send_message(&self.http, builder)
            .await?;

        Ok(message.id.get())
    }

    async fn delete_message(&self, channel_id: u64, message_id: u64) -> Result<(), AppError> {
        ChannelId::new(channel_id)
            .delete_message(&self.http, MessageId::new(message_id))
            .await?;

        Ok(())
    }

    async fn delete_messages(&self, channel_id: u64, message_ids: &[u64]) -> Result<(), AppError> {
        let channel = ChannelId::new(channel_id);
        let cutoff = (Utc::now() - Duration::days(BULK_DELETE_MAX_AGE_DAYS)).timestamp();

        let (recent, old): (Vec<MessageId>, Vec<MessageId>) = message_ids
            .iter()
            .map(|id| MessageId::new(*id))
            .partition(|id| id.created_at().unix_timestamp() > cutoff);

        for chunk in recent.chunks(BULK_DELETE_LIMIT) {
            if let [single] = chunk {
                channel.delete_message(&self.http, *single).await?;
            } else {
                channel.delete_messages(&self.http, chunk).await?;
            }
        }

        for id in old {
            channel.delete_message(&self.http, id).await?;
        }

        Ok(())
    }

    async fn add_reaction(
        &self,
        channel_id: u64,
        message_id: u64,
        emoji: &str,
    ) -> Result<(), AppError> {
        ChannelId::new(channel_id)
            .create_reaction(
                &self.http,
                MessageId::new(message_id),
                ReactionType::Unicode(emoji.to_string()),
            )
            .await?;

        Ok(())
    }

    async fn get_message(&self, channel_id: u64, message_id: u64) -> Result<FetchedMessage, AppError> {
        let message = ChannelId::new(channel_id)
            .message(&self.http, MessageId::new(message_id))
            .await?;

        Ok(to_fetched(message))
    }

    async fn recent_messages(
        &self,
        channel_id: u64,
        limit: usize,
    ) -> Result<Vec<FetchedMessage>, AppError> {
        let channel = ChannelId::new(channel_id);
        let mut fetched = Vec::with_capacity(limit);
        let mut before: Option<MessageId> = None;

        while fetched.len() < limit {
            let page = (limit - fetched.len()).min(MESSAGE_PAGE_SIZE);
            let mut request = GetMessages::new().limit(page as u8);
            if let Some(before) = before {
                request = request.before(before);
            }

            let batch = channel.messages(&self.http, request).await?;
            let received = batch.len();
            before = batch.last().map(|m| m.id);
            fetched.extend(batch.into_iter().map(to_fetched));

            if received < page {
                break;
            }
        }

        Ok(fetched)
    }

    async fn member(&self, guild_id: u64, user_id: u64) -> Result<Option<MemberSnapshot>, AppError> {
        match GuildId::new(guild_id)
            .member(&self.http, UserId::new(user_id))
            .await
        {
            Ok(member) => Ok(Some(MemberSnapshot::from_member(&member))),
            Err(e) if is_not_found(&e) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn members(&self, guild_id: u64) -> Result<Vec<MemberSnapshot>, AppError> {
        let guild = GuildId::new(guild_id);
        let mut members = Vec::new();
        let mut after: Option<UserId> = None;

        loop {
            let batch = guild
                .members(&self.http, Some(MEMBER_PAGE_SIZE), after)
                .await?;
            let received = batch.len();
            after = batch.last().map(|m| m.user.id);
            members.extend(batch.iter().map(MemberSnapshot::from_member));

            if (received as u64) < MEMBER_PAGE_SIZE {
                break;
            }
        }

        Ok(members)
    }

    async fn has_permission(
        &self,
        guild_id: u64,
        user_id: u64,
        permission: GatePermission,
    ) -> Result<bool, AppError> {
        let guild = GuildId::new(guild_id).to_partial_guild(&self.http).await?;
        if guild.owner_id.get() == user_id {
            return Ok(true);
        }

        let Some(member) = self.member(guild_id, user_id).await? else {
            return Ok(false);
        };

        // @everyone shares the guild's id
        let mut granted = guild
            .roles
            .get(&RoleId::new(guild_id))
            .map(|role| role.permissions)
            .unwrap_or_else(Permissions::empty);
        for role_id in member.role_ids {
            if let Some(role) = guild.roles.get(&RoleId::new(role_id)) {
                granted |= role.permissions;
            }
        }

        let required = match permission {
            GatePermission::ManageRoles => Permissions::MANAGE_ROLES,
            GatePermission::ManageMessages => Permissions::MANAGE_MESSAGES,
        };

        Ok(granted.contains(Permissions::ADMINISTRATOR) || granted.contains(required))
    }

    async fn roles_by_name(&self, guild_id: u64, name: &str) -> Result<Vec<u64>, AppError> {
        let wanted = name.to_lowercase();
        let roles = GuildId::new(guild_id).roles(&self.http).await?;

        Ok(roles
            .values()
            .filter(|role| role.name.to_lowercase() == wanted)
            .map(|role| role.id.get())
            .collect())
    }

    async fn add_role(
        &self,
        guild_id: u64,
        user_id: u64,
        role_id: u64,
        reason: &str,
    ) -> Result<(), AppError> {
        self.http
            .add_member_role(
                GuildId::new(guild_id),
                UserId::new(user_id),
                RoleId::new(role_id),
                Some(reason),
            )
            .await?;

        Ok(())
    }

    async fn kick(&self, guild_id: u64, user_id: u64, reason: &str) -> Result<(), AppError> {
        GuildId::new(guild_id)
            .kick_with_reason(&self.http, UserId::new(user_id), reason)
            .await?;

        Ok(())
    }
}
