//! The permission decision engine.

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Result;
use teloxide::types::{ChatId, UserId};
use tracing::{debug, error};

use crate::cache::{CacheConfig, TypedCache};
use crate::client::{Role, RoleClient};
use crate::store::{self, NS_CORE, NS_SECURITY, PolicyStore};

use super::bits;
use super::context::MessageContext;
use super::registry::HandlerRegistry;

/// What a check resolves permissions for: a registered handler name, or a
/// raw mask for context-free checks such as inline queries.
#[derive(Debug, Clone, Copy)]
pub enum Target<'a> {
    Handler(&'a str),
    Mask(u32),
}

impl<'a> From<&'a str> for Target<'a> {
    fn from(handler: &'a str) -> Self {
        Target::Handler(handler)
    }
}

impl From<u32> for Target<'_> {
    fn from(mask: u32) -> Self {
        Target::Mask(mask)
    }
}

/// Fresh allow-list snapshot, taken at the start of every check so
/// administrative changes apply on the very next message.
struct Rights {
    owner: Vec<u64>,
    sudo: Vec<u64>,
    support: Vec<u64>,
}

/// Decides whether an actor may invoke a handler.
///
/// Safe to clone and share across concurrent checks: allow-lists are read
/// as per-check snapshots and the role caches tolerate racing misses.
#[derive(Clone)]
pub struct SecurityManager {
    store: Arc<dyn PolicyStore>,
    client: Arc<dyn RoleClient>,
    registry: Arc<HandlerRegistry>,
    me: UserId,
    any_admin: bool,
    default_mask: u32,
    /// Our own standing per chat, for channel posting-rights checks.
    chat_roles: TypedCache<i64, Role>,
    /// Participant standing per (chat, user). `None` records a successful
    /// lookup that found no participant; lookup faults are never cached.
    participants: TypedCache<(i64, u64), Option<Role>>,
}

impl SecurityManager {
    /// Build the manager. Must complete before any [`check`](Self::check):
    /// it captures our own account id for the self-message bypass and for
    /// inclusion in the owner list.
    pub async fn init(
        store: Arc<dyn PolicyStore>,
        client: Arc<dyn RoleClient>,
        registry: Arc<HandlerRegistry>,
    ) -> Result<Self> {
        Self::init_with_cache(store, client, registry, CacheConfig::role_lookup()).await
    }

    /// [`init`](Self::init) with custom role-cache tuning.
    pub async fn init_with_cache(
        store: Arc<dyn PolicyStore>,
        client: Arc<dyn RoleClient>,
        registry: Arc<HandlerRegistry>,
        cache: CacheConfig,
    ) -> Result<Self> {
        let me = client.self_id().await?;
        let any_admin = store::get_or(store.as_ref(), NS_SECURITY, "any_admin", false).await;
        let default_mask = store::get_or(
            store.as_ref(),
            NS_SECURITY,
            "default",
            bits::DEFAULT_PERMISSIONS,
        )
        .await;

        debug!(me = me.0, any_admin, "security manager initialized");

        Ok(Self {
            store,
            client,
            registry,
            me,
            any_admin,
            default_mask,
            chat_roles: TypedCache::new("chat_roles", cache.clone()),
            participants: TypedCache::new("participant_roles", cache),
        })
    }

    /// The account id this process runs as.
    pub fn me(&self) -> UserId {
        self.me
    }

    /// Effective required mask for a target.
    ///
    /// Stored per-handler overrides replace static annotations entirely;
    /// unannotated handlers fall back to the process-wide default. A mask
    /// with bits outside [`bits::ALL`] that does not carry
    /// [`bits::EVERYONE`] is a configuration error and resolves to 0,
    /// denying everything. The result is capped by the global bounding
    /// mask.
    pub async fn resolve_required_mask(&self, target: Target<'_>) -> u32 {
        let candidate = match target {
            Target::Mask(mask) => mask,
            Target::Handler(name) => {
                // Overrides are consulted on every resolution so permission
                // changes apply without a restart.
                let overrides: HashMap<String, u32> =
                    store::get_or(self.store.as_ref(), NS_SECURITY, "masks", HashMap::new())
                        .await;
                match overrides.get(name) {
                    Some(mask) => *mask,
                    None => self
                        .registry
                        .static_mask(name)
                        .unwrap_or(self.default_mask),
                }
            }
        };

        if candidate & !bits::ALL != 0 && candidate & bits::EVERYONE == 0 {
            error!(mask = candidate, "permission mask contains unknown bits");
            return 0;
        }

        let bounding: u32 = store::get_or(
            self.store.as_ref(),
            NS_SECURITY,
            "bounding_mask",
            bits::DEFAULT_PERMISSIONS,
        )
        .await;

        candidate & bounding
    }

    /// Decide whether `user` (defaulting to the message sender) may invoke
    /// `target` in the context of `message`.
    ///
    /// `message` is `None` for pre-message contexts such as inline
    /// queries; only [`bits::EVERYONE`] targets pass there.
    ///
    /// # Errors
    /// Role lookup faults from the host chat service propagate unchanged.
    /// Every denial is a plain `Ok(false)`.
    pub async fn check<'a>(
        &self,
        message: Option<&MessageContext>,
        target: impl Into<Target<'a>>,
        user: Option<UserId>,
    ) -> Result<bool> {
        let rights = self.reload_rights().await;

        let config = self.resolve_required_mask(target.into()).await;
        if config == 0 {
            return Ok(false);
        }

        let user = user.or_else(|| message.and_then(|m| m.sender));

        if user == Some(self.me) || message.is_some_and(|m| m.outgoing) {
            return Ok(true);
        }

        debug!(mask = config, names = ?bits::mask_names(config), "checking security match");

        let f_owner = config & bits::OWNER != 0;
        let f_sudo = config & bits::SUDO != 0;
        let f_support = config & bits::SUPPORT != 0;
        let f_group_owner = config & bits::GROUP_OWNER != 0;
        let f_group_admin = config & bits::GROUP_ADMIN != 0;
        let f_group_member = config & bits::GROUP_MEMBER != 0;
        let f_pm = config & bits::PM != 0;
        let f_group_admin_any = config & bits::GROUP_ADMIN_ANY != 0;

        if let Some(user) = user {
            if f_owner && rights.owner.contains(&user.0)
                || f_sudo && rights.sudo.contains(&user.0)
                || f_support && rights.support.contains(&user.0)
            {
                return Ok(true);
            }

            // Checked after the allow-lists, so owner/sudo/support stay
            // immune to blacklisting.
            let blacklist: Vec<u64> =
                store::get_or(self.store.as_ref(), NS_CORE, "blacklist_users", Vec::new())
                    .await;
            if blacklist.contains(&user.0) {
                return Ok(false);
            }
        }

        let Some(message) = message else {
            return Ok(config & bits::EVERYONE != 0);
        };

        if f_group_member && message.is_group() || f_pm && message.is_private() {
            return Ok(true);
        }

        if message.is_channel() {
            if !message.is_group() {
                // Edited channel posts are never re-authorized; editing
                // must not re-trigger actions.
                if message.edited {
                    return Ok(false);
                }

                if !self.own_chat_role(message.chat_id).await?.can_post() {
                    return Ok(false);
                }

                if self.any_admin && f_group_admin_any || f_group_admin {
                    return Ok(true);
                }
            } else if f_group_admin_any || f_group_owner {
                if let Some(user) = user {
                    match self.participant_role(message.chat_id, user).await? {
                        Some(Role::Creator) => return Ok(true),
                        Some(Role::Admin(admin)) => {
                            let allowed = self.any_admin && f_group_admin_any
                                || f_group_admin
                                || bits::SPECIFIC_ADMIN_RIGHTS
                                    .iter()
                                    .any(|&bit| config & bit != 0 && admin.satisfies(bit));
                            if allowed {
                                return Ok(true);
                            }
                        }
                        _ => {}
                    }
                }
            }
            return Ok(false);
        }

        if message.is_group() && (f_group_admin_any || f_group_owner) {
            let Some(user) = user else {
                return Ok(false);
            };

            // No participant record resolves to an explicit deny.
            let Some(role) = self.legacy_role(message.chat_id, user).await? else {
                return Ok(false);
            };

            match role {
                Role::Creator => return Ok(true),
                Role::Admin(_) if f_group_admin_any => return Ok(true),
                _ => {}
            }
        }

        Ok(false)
    }

    /// Re-read the owner/sudo/support lists. Deliberately uncached: one
    /// extra store read per check buys immediate effect for administrative
    /// permission changes.
    async fn reload_rights(&self) -> Rights {
        let mut owner: Vec<u64> =
            store::get_or(self.store.as_ref(), NS_SECURITY, "owner", Vec::new()).await;
        if !owner.contains(&self.me.0) {
            owner.push(self.me.0);
        }

        Rights {
            owner,
            sudo: store::get_or(self.store.as_ref(), NS_SECURITY, "sudo", Vec::new()).await,
            support: store::get_or(self.store.as_ref(), NS_SECURITY, "support", Vec::new())
                .await,
        }
    }

    async fn own_chat_role(&self, chat: ChatId) -> Result<Role> {
        if let Some(role) = self.chat_roles.get(&chat.0) {
            debug!(chat = chat.0, "chat role cache hit");
            return Ok(role);
        }

        let role = self.client.own_chat_role(chat).await?;
        self.chat_roles.insert(chat.0, role);
        Ok(role)
    }

    async fn participant_role(&self, chat: ChatId, user: UserId) -> Result<Option<Role>> {
        let key = (chat.0, user.0);
        if let Some(cached) = self.participants.get(&key) {
            debug!(chat = chat.0, user = user.0, "participant cache hit");
            return Ok(cached);
        }

        let role = self.client.participant_role(chat, user).await?;
        self.participants.insert(key, Some(role));
        Ok(Some(role))
    }

    async fn legacy_role(&self, chat: ChatId, user: UserId) -> Result<Option<Role>> {
        let key = (chat.0, user.0);
        if let Some(cached) = self.participants.get(&key) {
            debug!(chat = chat.0, user = user.0, "participant cache hit");
            return Ok(cached);
        }

        let role = self.client.legacy_participant_role(chat, user).await?;
        self.participants.insert(key, role);
        Ok(role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_conversions() {
        assert!(matches!(Target::from("mod.cmd"), Target::Handler("mod.cmd")));
        assert!(matches!(Target::from(bits::EVERYONE), Target::Mask(m) if m == bits::EVERYONE));
    }
}
