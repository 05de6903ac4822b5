//! Command handler trait
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.0.0: Handler trait with permission, cooldown and autocomplete metadata

use anyhow::Result;
use async_trait::async_trait;
use serenity::model::permissions::Permissions;
use std::sync::Arc;
use std::time::Duration;

use super::context::CommandContext;
use crate::interactions::{AutocompleteInteraction, CommandInteraction};

/// Trait for slash and context-menu command handlers
///
/// Each handler processes one or more commands. Handlers are registered with a
/// `CommandRegistry` and invoked by the `Dispatcher` after the cooldown and
/// permission gates pass. A handler is responsible for its own reply on
/// success; on error the dispatcher sends the generic failure reply.
///
/// # Example
///
/// ```ignore
/// pub struct PingHandler;
///
/// #[async_trait]
/// impl SlashCommandHandler for PingHandler {
///     fn command_names(&self) -> &'static [&'static str] {
///         &["ping"]
///     }
///
///     async fn handle(
///         &self,
///         _ctx: Arc<CommandContext>,
///         interaction: &CommandInteraction,
///     ) -> Result<()> {
///         interaction.reply("Pong!").await
///     }
/// }
/// ```
#[async_trait]
pub trait SlashCommandHandler: Send + Sync {
    /// Command name(s) this handler processes
    fn command_names(&self) -> &'static [&'static str];

    /// Every flag the invoking member must hold
    fn required_permissions(&self) -> Permissions {
        Permissions::empty()
    }

    /// Overrides the dispatcher's default cooldown
    fn cooldown(&self) -> Option<Duration> {
        None
    }

    /// Whether [`Self::autocomplete`] should receive autocomplete requests
    fn supports_autocomplete(&self) -> bool {
        false
    }

    /// Handle the command
    async fn handle(&self, ctx: Arc<CommandContext>, interaction: &CommandInteraction)
        -> Result<()>;

    /// Suggest option values while the user is typing
    async fn autocomplete(
        &self,
        _ctx: Arc<CommandContext>,
        _interaction: &AutocompleteInteraction,
    ) -> Result<()> {
        Ok(())
    }
}
