//! Shared context for command handlers
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0

use std::sync::Arc;
use std::time::{Duration, Instant};

use super::registry::{CommandRegistry, CommandSummary};

/// Shared context for all command handlers
///
/// Read-only state handlers may need: the command catalog (for help output
/// and autocomplete), the default cooldown and the bot start time.
#[derive(Clone)]
pub struct CommandContext {
    pub catalog: Arc<Vec<CommandSummary>>,
    pub default_cooldown: Duration,
    pub start_time: Instant,
}

impl CommandContext {
    /// Build a context describing everything in `registry`
    pub fn new(registry: &CommandRegistry, default_cooldown: Duration) -> Self {
        Self {
            catalog: Arc::new(registry.summaries()),
            default_cooldown,
            start_time: Instant::now(),
        }
    }

    /// Catalog entry for a command name
    pub fn command(&self, name: &str) -> Option<&CommandSummary> {
        self.catalog.iter().find(|summary| summary.name == name)
    }

    /// Effective cooldown of a catalog entry
    pub fn cooldown_for(&self, summary: &CommandSummary) -> Duration {
        summary.cooldown.unwrap_or(self.default_cooldown)
    }
}
