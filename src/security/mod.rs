//! Command authorization.
//!
//! Every command dispatch asks [`SecurityManager::check`] whether the
//! invoking identity may run the handler. A handler's requirement is a
//! bitmask over [`bits`]: its static annotation from the
//! [`HandlerRegistry`], possibly replaced by a stored override, capped by
//! the global bounding mask.
//!
//! ## Usage
//!
//! ```rust,no_run
//! # use std::sync::Arc;
//! # use cerberus::security::{HandlerRegistry, MessageContext, SecurityManager};
//! # async fn wire(store: Arc<dyn cerberus::store::PolicyStore>,
//! #               client: Arc<dyn cerberus::client::RoleClient>,
//! #               message: MessageContext) -> anyhow::Result<()> {
//! let registry = Arc::new(HandlerRegistry::new());
//! registry.group_admin_ban_users("moderation.ban");
//!
//! let security = SecurityManager::init(store, client, registry).await?;
//! if security.check(Some(&message), "moderation.ban", None).await? {
//!     // dispatch the handler
//! }
//! # Ok(())
//! # }
//! ```

pub mod bits;
mod context;
mod manager;
mod registry;

pub use context::{ChatKind, MessageContext};
pub use manager::{SecurityManager, Target};
pub use registry::HandlerRegistry;
