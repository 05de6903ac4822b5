//! Moderation command handler
//!
//! Handles: say
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0

use anyhow::{Context as _, Result};
use async_trait::async_trait;
use log::info;
use serenity::model::permissions::Permissions;
use std::sync::Arc;
use std::time::Duration;

use crate::commands::context::CommandContext;
use crate::commands::handler::SlashCommandHandler;
use crate::core::truncate_for_message;
use crate::interactions::CommandInteraction;

pub const SAY_COOLDOWN: Duration = Duration::from_secs(10);

/// Handler for `/say`: repeats text into the channel as the bot
///
/// Gated on Manage Messages since it posts arbitrary content under the bot's
/// name.
pub struct ModerationHandler;

#[async_trait]
impl SlashCommandHandler for ModerationHandler {
    fn command_names(&self) -> &'static [&'static str] {
        &["say"]
    }

    fn required_permissions(&self) -> Permissions {
        Permissions::MANAGE_MESSAGES
    }

    fn cooldown(&self) -> Option<Duration> {
        Some(SAY_COOLDOWN)
    }

    async fn handle(
        &self,
        _ctx: Arc<CommandContext>,
        interaction: &CommandInteraction,
    ) -> Result<()> {
        let text = interaction
            .string_option("text")
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .context("Missing required option 'text'")?;

        interaction.reply(&truncate_for_message(text)).await?;
        info!(
            "📢 /say used by {} in guild {}",
            interaction.user_tag,
            interaction.guild_id.as_deref().unwrap_or("DM")
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::registry::CommandRegistry;
    use crate::core::MESSAGE_LIMIT;
    use crate::testing::{test_command, ResponderCall};
    use serde_json::json;

    fn context() -> Arc<CommandContext> {
        Arc::new(CommandContext::new(
            &CommandRegistry::new(),
            Duration::from_secs(3),
        ))
    }

    #[test]
    fn test_say_metadata() {
        assert_eq!(ModerationHandler.command_names(), &["say"]);
        assert_eq!(
            ModerationHandler.required_permissions(),
            Permissions::MANAGE_MESSAGES
        );
        assert_eq!(ModerationHandler.cooldown(), Some(SAY_COOLDOWN));
    }

    #[tokio::test]
    async fn test_say_echoes_publicly() {
        let (interaction, responder) = test_command("say")
            .guild("9")
            .option("text", json!("  hello there "))
            .build();

        ModerationHandler.handle(context(), &interaction).await.unwrap();

        assert_eq!(
            responder.calls(),
            vec![ResponderCall::Reply {
                content: "hello there".to_string(),
                ephemeral: false
            }]
        );
    }

    #[tokio::test]
    async fn test_say_truncates_long_text() {
        let (interaction, responder) = test_command("say")
            .option("text", json!("x".repeat(MESSAGE_LIMIT + 50)))
            .build();

        ModerationHandler.handle(context(), &interaction).await.unwrap();

        let ResponderCall::Reply { content, .. } = &responder.calls()[0] else {
            panic!("expected a reply");
        };
        assert!(content.chars().count() <= MESSAGE_LIMIT);
    }

    #[tokio::test]
    async fn test_say_without_text_is_an_error() {
        let (interaction, responder) = test_command("say")
            .option("text", json!("   "))
            .build();

        let err = ModerationHandler
            .handle(context(), &interaction)
            .await
            .unwrap_err();

        assert!(err.to_string().contains("text"));
        assert!(responder.calls().is_empty());
    }
}
