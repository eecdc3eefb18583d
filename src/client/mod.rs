//! Host chat service boundary.
//!
//! The engine never talks to Telegram directly; it resolves roles through
//! [`RoleClient`]. Lookup faults are not retried or swallowed here — they
//! surface to the dispatch layer unchanged.

mod role;
pub mod telegram;

pub use role::{AdminRights, Role};
pub use telegram::TelegramClient;

use anyhow::Result;
use async_trait::async_trait;
use teloxide::types::{ChatId, UserId};

/// Role lookups against the host chat service.
#[async_trait]
pub trait RoleClient: Send + Sync {
    /// Identity of the account this process runs as.
    async fn self_id(&self) -> Result<UserId>;

    /// The bot's own standing in a chat. Used to decide whether a channel
    /// grants us posting rights at all.
    async fn own_chat_role(&self, chat: ChatId) -> Result<Role>;

    /// A participant's standing in a supergroup or channel.
    async fn participant_role(&self, chat: ChatId, user: UserId) -> Result<Role>;

    /// Participant lookup for basic groups, via the full chat info.
    ///
    /// `None` means the chat has no participant record for the user.
    async fn legacy_participant_role(
        &self,
        chat: ChatId,
        user: UserId,
    ) -> Result<Option<Role>>;
}
