//! Telegram implementation of [`RoleClient`] over the Bot API.

use anyhow::Result;
use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::{ChatId, ChatMember, ChatMemberKind, UserId};
use tracing::debug;

use super::{AdminRights, Role, RoleClient};

/// Role resolver backed by a live [`Bot`].
#[derive(Clone)]
pub struct TelegramClient {
    bot: Bot,
}

impl TelegramClient {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }

    fn role_of(member: &ChatMember) -> Role {
        match &member.kind {
            ChatMemberKind::Owner(_) => Role::Creator,
            ChatMemberKind::Administrator(admin) => Role::Admin(AdminRights {
                add_admins: admin.can_promote_members,
                change_info: admin.can_change_info,
                ban_users: admin.can_restrict_members,
                delete_messages: admin.can_delete_messages,
                pin_messages: admin.can_pin_messages,
                invite_users: admin.can_invite_users,
                post_messages: admin.can_post_messages,
            }),
            kind if kind.is_left() || kind.is_banned() => Role::NonMember,
            _ => Role::Member,
        }
    }
}

#[async_trait]
impl RoleClient for TelegramClient {
    async fn self_id(&self) -> Result<UserId> {
        let me = self.bot.get_me().await?;
        Ok(me.user.id)
    }

    async fn own_chat_role(&self, chat: ChatId) -> Result<Role> {
        let me = self.bot.get_me().await?;
        let member = self.bot.get_chat_member(chat, me.user.id).await?;
        Ok(Self::role_of(&member))
    }

    async fn participant_role(&self, chat: ChatId, user: UserId) -> Result<Role> {
        let member = self.bot.get_chat_member(chat, user).await?;
        Ok(Self::role_of(&member))
    }

    async fn legacy_participant_role(
        &self,
        chat: ChatId,
        user: UserId,
    ) -> Result<Option<Role>> {
        // The Bot API exposes no full participant list for basic groups;
        // the administrator list is the authoritative subset we need, and
        // anyone not on it resolves through get_chat_member.
        let admins = self.bot.get_chat_administrators(chat).await?;
        if let Some(member) = admins.iter().find(|m| m.user.id == user) {
            return Ok(Some(Self::role_of(member)));
        }

        debug!(chat = chat.0, user = user.0, "not in admin list, resolving membership");
        let member = self.bot.get_chat_member(chat, user).await?;
        Ok(match Self::role_of(&member) {
            Role::NonMember => None,
            role => Some(role),
        })
    }
}
