//! TTL caching for role lookups.
//!
//! A thin typed wrapper over Moka, reused for both role-cache key shapes
//! (chat id, and chat id + user id). Entries expire on their TTL; an
//! expired entry reads as a miss and the caller refetches.

mod config;
mod typed;

pub use config::CacheConfig;
pub use typed::TypedCache;
