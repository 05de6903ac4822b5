//! # Cache Sweep Feature
//!
//! Periodically purges expired cooldown and permission entries. Both caches
//! only overwrite entries on the next access, so without a sweep a long-running
//! bot keeps one entry for every user and command it has ever seen.
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0
//! - **Toggleable**: false

use log::debug;
use std::time::Duration;

use crate::features::cooldowns::CooldownTracker;
use crate::features::permissions::PermissionCache;

/// Entries removed by one sweep pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepStats {
    pub cooldowns: usize,
    pub permissions: usize,
}

/// Run one sweep over both caches
pub fn sweep_once(cooldowns: &CooldownTracker, permissions: &PermissionCache) -> SweepStats {
    SweepStats {
        cooldowns: cooldowns.sweep_expired(),
        permissions: permissions.sweep_expired(),
    }
}

/// Sweep both caches every `interval`, forever
pub async fn cache_sweep_loop(
    cooldowns: CooldownTracker,
    permissions: PermissionCache,
    interval: Duration,
) {
    let mut ticker = tokio::time::interval(interval);
    // The first tick completes immediately
    ticker.tick().await;

    loop {
        ticker.tick().await;
        let stats = sweep_once(&cooldowns, &permissions);
        if stats != SweepStats::default() {
            debug!(
                "🧹 Cache sweep removed {} cooldown and {} permission entries ({} / {} remain)",
                stats.cooldowns,
                stats.permissions,
                cooldowns.len(),
                permissions.len()
            );
        }
    }
}
