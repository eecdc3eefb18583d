//! Role vocabulary returned by chat role lookups.

use crate::security::bits;

/// Named admin rights as exposed by the host chat service.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AdminRights {
    pub add_admins: bool,
    pub change_info: bool,
    pub ban_users: bool,
    pub delete_messages: bool,
    pub pin_messages: bool,
    pub invite_users: bool,
    pub post_messages: bool,
}

impl AdminRights {
    /// Every right granted.
    pub const fn full() -> Self {
        Self {
            add_admins: true,
            change_info: true,
            ban_users: true,
            delete_messages: true,
            pin_messages: true,
            invite_users: true,
            post_messages: true,
        }
    }

    /// Whether this set of rights satisfies one specific admin-right bit.
    ///
    /// Returns `false` for anything outside
    /// [`bits::SPECIFIC_ADMIN_RIGHTS`].
    pub fn satisfies(&self, bit: u32) -> bool {
        match bit {
            bits::GROUP_ADMIN_ADD_ADMINS => self.add_admins,
            bits::GROUP_ADMIN_CHANGE_INFO => self.change_info,
            bits::GROUP_ADMIN_BAN_USERS => self.ban_users,
            bits::GROUP_ADMIN_DELETE_MESSAGES => self.delete_messages,
            bits::GROUP_ADMIN_PIN_MESSAGES => self.pin_messages,
            bits::GROUP_ADMIN_INVITE_USERS => self.invite_users,
            _ => false,
        }
    }
}

/// Resolved standing of a user (or of the bot itself) in a chat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Created the chat. Holds every right.
    Creator,
    /// Promoted admin with a specific set of rights.
    Admin(AdminRights),
    /// Ordinary participant.
    Member,
    /// No standing in the chat.
    NonMember,
}

impl Role {
    /// Whether this role may post in a broadcast channel.
    pub fn can_post(&self) -> bool {
        match self {
            Role::Creator => true,
            Role::Admin(rights) => rights.post_messages,
            Role::Member | Role::NonMember => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn satisfies_maps_each_specific_bit() {
        let rights = AdminRights {
            ban_users: true,
            pin_messages: true,
            ..Default::default()
        };

        assert!(rights.satisfies(bits::GROUP_ADMIN_BAN_USERS));
        assert!(rights.satisfies(bits::GROUP_ADMIN_PIN_MESSAGES));
        assert!(!rights.satisfies(bits::GROUP_ADMIN_ADD_ADMINS));
        assert!(!rights.satisfies(bits::GROUP_ADMIN_INVITE_USERS));
        // The generic admin bit is not a specific right.
        assert!(!rights.satisfies(bits::GROUP_ADMIN));
    }

    #[test]
    fn posting_rights() {
        assert!(Role::Creator.can_post());
        assert!(Role::Admin(AdminRights::full()).can_post());
        assert!(!Role::Admin(AdminRights::default()).can_post());
        assert!(!Role::Member.can_post());
        assert!(!Role::NonMember.can_post());
    }
}
