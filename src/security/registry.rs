//! Handler permission annotations.

use dashmap::DashMap;

use super::bits;

/// Side table of handler name → statically annotated permission mask.
///
/// Handlers are annotated under a stable fully-qualified name at
/// registration time, instead of carrying metadata on the callable itself.
/// Annotations on the same name OR together, and [`bits::OWNER`] is always
/// included, so the account owner can run every handler.
#[derive(Debug, Default)]
pub struct HandlerRegistry {
    masks: DashMap<String, u32>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// OR `flags | OWNER` into the handler's accumulated mask.
    pub fn annotate(&self, handler: &str, flags: u32) -> &Self {
        *self.masks.entry(handler.to_string()).or_insert(0) |= bits::OWNER | flags;
        self
    }

    /// The accumulated static mask, if the handler was ever annotated.
    pub fn static_mask(&self, handler: &str) -> Option<u32> {
        self.masks.get(handler).map(|mask| *mask)
    }

    // One convenience annotator per permission bit. All of them except
    // `owner` also grant SUDO, so sudo users can run anything below owner
    // level without per-handler configuration.

    pub fn owner(&self, handler: &str) -> &Self {
        self.annotate(handler, bits::OWNER)
    }

    pub fn sudo(&self, handler: &str) -> &Self {
        self.annotate(handler, bits::SUDO)
    }

    pub fn support(&self, handler: &str) -> &Self {
        self.annotate(handler, bits::SUDO | bits::SUPPORT)
    }

    pub fn group_owner(&self, handler: &str) -> &Self {
        self.annotate(handler, bits::SUDO | bits::GROUP_OWNER)
    }

    pub fn group_admin_add_admins(&self, handler: &str) -> &Self {
        self.annotate(handler, bits::SUDO | bits::GROUP_ADMIN_ADD_ADMINS)
    }

    pub fn group_admin_change_info(&self, handler: &str) -> &Self {
        self.annotate(handler, bits::SUDO | bits::GROUP_ADMIN_CHANGE_INFO)
    }

    pub fn group_admin_ban_users(&self, handler: &str) -> &Self {
        self.annotate(handler, bits::SUDO | bits::GROUP_ADMIN_BAN_USERS)
    }

    pub fn group_admin_delete_messages(&self, handler: &str) -> &Self {
        self.annotate(handler, bits::SUDO | bits::GROUP_ADMIN_DELETE_MESSAGES)
    }

    pub fn group_admin_pin_messages(&self, handler: &str) -> &Self {
        self.annotate(handler, bits::SUDO | bits::GROUP_ADMIN_PIN_MESSAGES)
    }

    pub fn group_admin_invite_users(&self, handler: &str) -> &Self {
        self.annotate(handler, bits::SUDO | bits::GROUP_ADMIN_INVITE_USERS)
    }

    pub fn group_admin(&self, handler: &str) -> &Self {
        self.annotate(handler, bits::SUDO | bits::GROUP_ADMIN)
    }

    pub fn group_member(&self, handler: &str) -> &Self {
        self.annotate(handler, bits::SUDO | bits::GROUP_MEMBER)
    }

    pub fn pm(&self, handler: &str) -> &Self {
        self.annotate(handler, bits::SUDO | bits::PM)
    }

    /// No restriction at all: every defined bit.
    pub fn unrestricted(&self, handler: &str) -> &Self {
        self.annotate(handler, bits::ALL)
    }

    /// Anyone, including pre-message contexts such as inline queries.
    pub fn inline_everyone(&self, handler: &str) -> &Self {
        self.annotate(handler, bits::EVERYONE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn owner_bit_is_always_included() {
        let registry = HandlerRegistry::new();
        registry.annotate("mod.cmd", bits::GROUP_MEMBER);
        let mask = registry.static_mask("mod.cmd").unwrap();
        assert_eq!(mask & bits::OWNER, bits::OWNER);

        registry.inline_everyone("mod.inline");
        let mask = registry.static_mask("mod.inline").unwrap();
        assert_eq!(mask, bits::OWNER | bits::EVERYONE);
    }

    #[test]
    fn repeated_annotations_stack() {
        let registry = HandlerRegistry::new();
        registry.group_admin("mod.cmd").pm("mod.cmd");
        let mask = registry.static_mask("mod.cmd").unwrap();
        assert_eq!(mask, bits::OWNER | bits::SUDO | bits::GROUP_ADMIN | bits::PM);
    }

    #[test]
    fn convenience_annotators_grant_sudo() {
        let registry = HandlerRegistry::new();
        registry.group_owner("a");
        registry.group_admin_ban_users("b");
        registry.support("c");

        assert_eq!(
            registry.static_mask("a"),
            Some(bits::OWNER | bits::SUDO | bits::GROUP_OWNER)
        );
        assert_eq!(
            registry.static_mask("b"),
            Some(bits::OWNER | bits::SUDO | bits::GROUP_ADMIN_BAN_USERS)
        );
        assert_eq!(
            registry.static_mask("c"),
            Some(bits::OWNER | bits::SUDO | bits::SUPPORT)
        );
    }

    #[test]
    fn owner_annotator_does_not_grant_sudo() {
        let registry = HandlerRegistry::new();
        registry.owner("mod.cmd");
        assert_eq!(registry.static_mask("mod.cmd"), Some(bits::OWNER));
    }

    #[test]
    fn unannotated_handlers_have_no_mask() {
        let registry = HandlerRegistry::new();
        assert_eq!(registry.static_mask("mod.unknown"), None);
    }
}
