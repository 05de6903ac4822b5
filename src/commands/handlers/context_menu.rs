//! Context menu command handler
//!
//! Handles: User Info
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0

use anyhow::{Context as _, Result};
use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use log::info;
use std::sync::Arc;

use crate::commands::context::CommandContext;
use crate::commands::handler::SlashCommandHandler;
use crate::interactions::CommandInteraction;

/// Milliseconds between the Unix epoch and the first second of 2015
const DISCORD_EPOCH_MS: u64 = 1_420_070_400_000;

/// Handler for the user context menu command "User Info"
pub struct ContextMenuHandler;

#[async_trait]
impl SlashCommandHandler for ContextMenuHandler {
    fn command_names(&self) -> &'static [&'static str] {
        &["User Info"]
    }

    async fn handle(
        &self,
        _ctx: Arc<CommandContext>,
        interaction: &CommandInteraction,
    ) -> Result<()> {
        let target = interaction
            .target_id
            .as_deref()
            .context("User Info invoked without a target user")?;
        let snowflake: u64 = target
            .parse()
            .with_context(|| format!("Invalid user id '{target}'"))?;

        interaction.defer(true).await?;

        let created = account_created_unix(snowflake);
        let response = format!(
            "👤 <@{snowflake}>\nID: `{snowflake}`\nAccount created: <t:{created}:F> (<t:{created}:R>)"
        );
        interaction.edit_reply(&response).await?;

        info!(
            "User Info for {snowflake} requested by {}",
            interaction.user_id
        );
        Ok(())
    }
}

/// Unix seconds at which a snowflake id was minted
fn account_created_unix(snowflake: u64) -> i64 {
    let millis = (snowflake >> 22) + DISCORD_EPOCH_MS;
    Utc.timestamp_millis_opt(millis as i64)
        .single()
        .map(|time| time.timestamp())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::registry::CommandRegistry;
    use crate::testing::{test_command, ResponderCall};
    use std::time::Duration;

    fn context() -> Arc<CommandContext> {
        Arc::new(CommandContext::new(
            &CommandRegistry::new(),
            Duration::from_secs(3),
        ))
    }

    #[test]
    fn test_account_created_from_snowflake() {
        // Example id from Discord's snowflake documentation
        assert_eq!(account_created_unix(175928847299117063), 1462015105);
        assert_eq!(account_created_unix(0), 1420070400);
    }

    #[tokio::test]
    async fn test_user_info_defers_then_edits() {
        let (interaction, responder) = test_command("User Info")
            .context_menu()
            .guild("9")
            .target("175928847299117063")
            .build();

        ContextMenuHandler
            .handle(context(), &interaction)
            .await
            .unwrap();

        let calls = responder.calls();
        assert_eq!(calls[0], ResponderCall::Defer { ephemeral: true });
        let ResponderCall::Edit { content } = &calls[1] else {
            panic!("expected an edit");
        };
        assert!(content.contains("<@175928847299117063>"));
        assert!(content.contains("<t:1462015105:R>"));
    }

    #[tokio::test]
    async fn test_user_info_without_target_fails_before_replying() {
        let (interaction, responder) = test_command("User Info").context_menu().build();

        assert!(ContextMenuHandler
            .handle(context(), &interaction)
            .await
            .is_err());
        assert!(responder.calls().is_empty());
    }
}
