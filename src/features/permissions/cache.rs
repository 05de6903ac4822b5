//! # Feature: Permission Cache
//!
//! Memoizes per-(guild, user, command) permission decisions for a fixed TTL so
//! repeated invocations skip resolving member permissions.
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.0.0: TTL cache with all-of permission semantics

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use serenity::model::permissions::Permissions;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

use crate::core::MAX_WINDOW;

/// Composite key: (guild_id, user_id, command_name)
type PermissionKey = (String, String, String);

#[derive(Debug, Clone, Copy)]
struct CachedDecision {
    has_permission: bool,
    expires_at: Instant,
}

/// Shared handle; clones see the same entries
#[derive(Clone)]
pub struct PermissionCache {
    decisions: Arc<DashMap<PermissionKey, CachedDecision>>,
    ttl: Duration,
}

impl PermissionCache {
    /// A `ttl` longer than [`MAX_WINDOW`] is shortened to it
    pub fn new(ttl: Duration) -> Self {
        PermissionCache {
            decisions: Arc::new(DashMap::new()),
            ttl: ttl.min(MAX_WINDOW),
        }
    }

    fn make_key(guild_id: &str, user_id: &str, command_name: &str) -> PermissionKey {
        (
            guild_id.to_string(),
            user_id.to_string(),
            command_name.to_string(),
        )
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Whether the member holds every flag in `required`
    ///
    /// `held` is only called when no live decision is cached. An empty
    /// `required` set always passes and never touches the cache.
    pub fn check<F>(
        &self,
        guild_id: &str,
        user_id: &str,
        command_name: &str,
        required: Permissions,
        held: F,
    ) -> bool
    where
        F: FnOnce() -> Permissions,
    {
        if required.is_empty() {
            return true;
        }

        let now = Instant::now();
        match self
            .decisions
            .entry(Self::make_key(guild_id, user_id, command_name))
        {
            Entry::Occupied(mut entry) => {
                if now < entry.get().expires_at {
                    return entry.get().has_permission;
                }
                let decision = self.decide(required, held(), now);
                entry.insert(decision);
                decision.has_permission
            }
            Entry::Vacant(entry) => {
                let decision = self.decide(required, held(), now);
                entry.insert(decision);
                decision.has_permission
            }
        }
    }

    fn decide(&self, required: Permissions, held: Permissions, now: Instant) -> CachedDecision {
        CachedDecision {
            has_permission: held.contains(required),
            expires_at: now + self.ttl,
        }
    }

    /// Cached decision for a key, if still live
    pub fn cached(&self, guild_id: &str, user_id: &str, command_name: &str) -> Option<bool> {
        let now = Instant::now();
        self.decisions
            .get(&Self::make_key(guild_id, user_id, command_name))
            .filter(|decision| now < decision.expires_at)
            .map(|decision| decision.has_permission)
    }

    /// Forget all decisions for one member of a guild
    pub fn invalidate_member(&self, guild_id: &str, user_id: &str) -> usize {
        let before = self.decisions.len();
        self.decisions
            .retain(|(guild, user, _), _| !(guild == guild_id && user == user_id));
        before.saturating_sub(self.decisions.len())
    }

    /// Forget all decisions made in a guild
    pub fn invalidate_guild(&self, guild_id: &str) -> usize {
        let before = self.decisions.len();
        self.decisions.retain(|(guild, _, _), _| guild != guild_id);
        before.saturating_sub(self.decisions.len())
    }

    /// Drop decisions past their TTL; returns how many were removed
    pub fn sweep_expired(&self) -> usize {
        let now = Instant::now();
        let before = self.decisions.len();
        self.decisions.retain(|_, decision| now < decision.expires_at);
        before.saturating_sub(self.decisions.len())
    }

    pub fn len(&self) -> usize {
        self.decisions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decisions.is_empty()
    }
}
