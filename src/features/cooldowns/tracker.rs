//! # Feature: Command Cooldowns
//!
//! Enforces a minimum interval between two invocations of the same command by
//! the same user. Uses DashMap so the expiry check and the write happen under a
//! single entry lock.
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.0.0: Per-(user, command) fixed cooldown with expired-entry sweep

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

use crate::core::MAX_WINDOW;

/// Composite key for cooldowns: (user_id, command_name)
type CooldownKey = (String, String);

/// Outcome of a cooldown gate check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CooldownCheck {
    Allowed,
    /// Still cooling down; nothing was written
    Rejected { remaining: Duration },
}

impl CooldownCheck {
    pub fn is_allowed(&self) -> bool {
        matches!(self, CooldownCheck::Allowed)
    }
}

/// Shared handle; clones see the same entries
#[derive(Clone, Default)]
pub struct CooldownTracker {
    expirations: Arc<DashMap<CooldownKey, Instant>>,
}

impl CooldownTracker {
    pub fn new() -> Self {
        Self::default()
    }

    fn make_key(user_id: &str, command_name: &str) -> CooldownKey {
        (user_id.to_string(), command_name.to_string())
    }

    /// Check and, when allowed, start a new cooldown window
    ///
    /// A rejected attempt leaves the existing expiry untouched, so spamming
    /// a command never pushes the window back.
    /// Windows longer than [`MAX_WINDOW`] are shortened to it.
    pub fn check(&self, user_id: &str, command_name: &str, cooldown: Duration) -> CooldownCheck {
        let cooldown = cooldown.min(MAX_WINDOW);
        let now = Instant::now();
        match self.expirations.entry(Self::make_key(user_id, command_name)) {
            Entry::Occupied(mut entry) => {
                let expires_at = *entry.get();
                if now < expires_at {
                    return CooldownCheck::Rejected {
                        remaining: expires_at - now,
                    };
                }
                entry.insert(now + cooldown);
            }
            Entry::Vacant(entry) => {
                entry.insert(now + cooldown);
            }
        }
        CooldownCheck::Allowed
    }

    /// Time left before `user_id` may run `command_name` again
    pub fn remaining(&self, user_id: &str, command_name: &str) -> Option<Duration> {
        let now = Instant::now();
        self.expirations
            .get(&Self::make_key(user_id, command_name))
            .and_then(|expires_at| expires_at.checked_duration_since(now))
            .filter(|remaining| !remaining.is_zero())
    }

    /// Forget the cooldown of one command for one user
    pub fn invalidate(&self, user_id: &str, command_name: &str) -> bool {
        self.expirations
            .remove(&Self::make_key(user_id, command_name))
            .is_some()
    }

    /// Forget every cooldown of a user
    pub fn invalidate_user(&self, user_id: &str) -> usize {
        let before = self.expirations.len();
        self.expirations.retain(|(user, _), _| user != user_id);
        before.saturating_sub(self.expirations.len())
    }

    /// Drop entries whose window has closed; returns how many were removed
    pub fn sweep_expired(&self) -> usize {
        let now = Instant::now();
        let before = self.expirations.len();
        self.expirations.retain(|_, expires_at| now < *expires_at);
        before.saturating_sub(self.expirations.len())
    }

    /// Number of stored entries, live or stale
    pub fn len(&self) -> usize {
        self.expirations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expirations.is_empty()
    }
}
