//! Message context consumed by permission checks.

use teloxide::types::{ChatId, UserId};

/// What kind of chat a message arrived in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatKind {
    /// One-on-one conversation.
    Private,
    /// Basic (legacy) group.
    Group,
    /// Channel-backed group.
    Supergroup,
    /// Broadcast channel.
    Channel,
}

/// The slice of an incoming message the engine needs to authorize it.
///
/// The dispatch layer builds one of these per inbound message; the engine
/// never sees the message body.
#[derive(Debug, Clone)]
pub struct MessageContext {
    pub chat_id: ChatId,
    /// Sender, when the host platform attributes one.
    pub sender: Option<UserId>,
    /// Sent by our own account.
    pub outgoing: bool,
    /// The message was edited after sending.
    pub edited: bool,
    pub kind: ChatKind,
}

impl MessageContext {
    pub fn new(chat_id: ChatId, kind: ChatKind) -> Self {
        Self {
            chat_id,
            sender: None,
            outgoing: false,
            edited: false,
            kind,
        }
    }

    #[must_use]
    pub fn from_user(mut self, user: UserId) -> Self {
        self.sender = Some(user);
        self
    }

    #[must_use]
    pub fn outgoing(mut self) -> Self {
        self.outgoing = true;
        self
    }

    #[must_use]
    pub fn edited(mut self) -> Self {
        self.edited = true;
        self
    }

    /// Group semantics: basic groups and supergroups.
    pub fn is_group(&self) -> bool {
        matches!(self.kind, ChatKind::Group | ChatKind::Supergroup)
    }

    /// Channel semantics: broadcast channels and supergroups.
    pub fn is_channel(&self) -> bool {
        matches!(self.kind, ChatKind::Supergroup | ChatKind::Channel)
    }

    pub fn is_private(&self) -> bool {
        self.kind == ChatKind::Private
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_predicates() {
        let ctx = |kind| MessageContext::new(ChatId(-1), kind);

        assert!(ctx(ChatKind::Private).is_private());
        assert!(!ctx(ChatKind::Private).is_group());
        assert!(!ctx(ChatKind::Private).is_channel());

        assert!(ctx(ChatKind::Group).is_group());
        assert!(!ctx(ChatKind::Group).is_channel());

        assert!(ctx(ChatKind::Supergroup).is_group());
        assert!(ctx(ChatKind::Supergroup).is_channel());

        assert!(ctx(ChatKind::Channel).is_channel());
        assert!(!ctx(ChatKind::Channel).is_group());
    }
}
