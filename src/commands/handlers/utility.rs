//! Utility command handlers
//!
//! Handles: ping, help, uptime
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0

use anyhow::Result;
use async_trait::async_trait;
use log::info;
use std::sync::Arc;
use std::time::Duration;

use crate::commands::context::CommandContext;
use crate::commands::handler::SlashCommandHandler;
use crate::commands::registry::CommandSummary;
use crate::core::truncate_for_message;
use crate::interactions::{AutocompleteInteraction, CommandInteraction};

/// Handler for utility commands: ping, help, uptime
pub struct UtilityHandler;

#[async_trait]
impl SlashCommandHandler for UtilityHandler {
    fn command_names(&self) -> &'static [&'static str] {
        &["ping", "help", "uptime"]
    }

    fn supports_autocomplete(&self) -> bool {
        true
    }

    async fn handle(
        &self,
        ctx: Arc<CommandContext>,
        interaction: &CommandInteraction,
    ) -> Result<()> {
        match interaction.command_name.as_str() {
            "ping" => self.handle_ping(interaction).await,
            "help" => self.handle_help(&ctx, interaction).await,
            "uptime" => self.handle_uptime(&ctx, interaction).await,
            _ => Ok(()),
        }
    }

    /// Suggest command names for `/help command:`
    async fn autocomplete(
        &self,
        ctx: Arc<CommandContext>,
        interaction: &AutocompleteInteraction,
    ) -> Result<()> {
        if interaction.command_name != "help" {
            return Ok(());
        }

        let typed = interaction.focused_value.to_lowercase();
        let choices = ctx
            .catalog
            .iter()
            .filter(|summary| summary.name.to_lowercase().starts_with(&typed))
            .map(|summary| (summary.name.to_string(), summary.name.to_string()))
            .collect();

        interaction.respond(choices).await
    }
}

impl UtilityHandler {
    /// Handle /ping command
    async fn handle_ping(&self, interaction: &CommandInteraction) -> Result<()> {
        interaction.reply("Pong!").await?;
        info!("Ping command completed for user {}", interaction.user_id);
        Ok(())
    }

    /// Handle /help command, optionally for a single command
    async fn handle_help(
        &self,
        ctx: &CommandContext,
        interaction: &CommandInteraction,
    ) -> Result<()> {
        let text = match interaction.string_option("command") {
            Some(name) => match ctx.command(name) {
                Some(summary) => describe_command(ctx, summary),
                None => format!("Unknown command `{name}`. Use `/help` to list commands."),
            },
            None => list_commands(ctx),
        };

        interaction
            .reply_ephemeral(&truncate_for_message(&text))
            .await
    }

    /// Handle /uptime command
    async fn handle_uptime(
        &self,
        ctx: &CommandContext,
        interaction: &CommandInteraction,
    ) -> Result<()> {
        let response = format!("⏱️ Uptime: {}", format_uptime(ctx.start_time.elapsed()));
        interaction.reply(&response).await?;
        info!("Uptime command completed for user {}", interaction.user_id);
        Ok(())
    }
}

fn list_commands(ctx: &CommandContext) -> String {
    let mut output = String::from("**Available Commands:**\n");
    for summary in ctx.catalog.iter() {
        let lock = if summary.required_permissions.is_empty() {
            ""
        } else {
            " 🔒"
        };
        output.push_str(&format!("• `{}`{lock}\n", summary.name));
    }
    output.push_str("\nUse `/help command:<name>` for details.");
    output
}

fn describe_command(ctx: &CommandContext, summary: &CommandSummary) -> String {
    let permissions = if summary.required_permissions.is_empty() {
        "none".to_string()
    } else {
        summary.required_permissions.get_permission_names().join(", ")
    };
    let cooldown = ctx.cooldown_for(summary);

    format!(
        "**{}**\nRequired permissions: {}\nCooldown: {}",
        summary.name,
        permissions,
        format_cooldown(cooldown)
    )
}

fn format_cooldown(cooldown: Duration) -> String {
    if cooldown.is_zero() {
        "none".to_string()
    } else if cooldown.subsec_millis() == 0 {
        format!("{}s", cooldown.as_secs())
    } else {
        format!("{:.1}s", cooldown.as_secs_f64())
    }
}

fn format_uptime(uptime: Duration) -> String {
    let days = uptime.as_secs() / 86400;
    let hours = (uptime.as_secs() % 86400) / 3600;
    let minutes = (uptime.as_secs() % 3600) / 60;
    let seconds = uptime.as_secs() % 60;

    if days > 0 {
        format!("{days}d {hours}h {minutes}m {seconds}s")
    } else if hours > 0 {
        format!("{hours}h {minutes}m {seconds}s")
    } else if minutes > 0 {
        format!("{minutes}m {seconds}s")
    } else {
        format!("{seconds}s")
    }
}
