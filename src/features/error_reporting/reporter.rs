//! Handler failure reporting
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.0.0: Log, track and answer failed command interactions

use log::error;
use uuid::Uuid;

use super::tracker::{ErrorContext, ErrorTracker};
use crate::core::GENERIC_FAILURE_MESSAGE;
use crate::interactions::CommandInteraction;

/// Terminal path for every failed command handler
///
/// Logs the failure, hands it to the tracker and makes sure the user sees
/// the generic failure message. Never returns an error.
#[derive(Clone)]
pub struct ErrorReporter {
    tracker: ErrorTracker,
}

impl ErrorReporter {
    pub fn new(tracker: ErrorTracker) -> Self {
        ErrorReporter { tracker }
    }

    pub async fn report(
        &self,
        error: &anyhow::Error,
        interaction: &CommandInteraction,
        request_id: Uuid,
    ) {
        error!(
            "[{request_id}] ❌ Command '{}' failed | User: {} ({}) | Guild: {} | {error:#}",
            interaction.command_name,
            interaction.user_tag,
            interaction.user_id,
            interaction.guild_id.as_deref().unwrap_or("DM"),
        );

        let context = Self::context_for(interaction, request_id);
        self.tracker.capture(error, context.clone());

        // New ephemeral reply, edit of a deferral, or follow-up
        if let Err(send_error) = interaction.send(GENERIC_FAILURE_MESSAGE, true).await {
            error!(
                "[{request_id}] ❌ Failed to send failure reply for '{}' ({:?}): {send_error:#}",
                interaction.command_name,
                interaction.reply_state(),
            );
            self.tracker.capture(
                &send_error,
                ErrorContext {
                    original_error: Some(format!("{error:#}")),
                    ..context
                },
            );
        }
    }

    fn context_for(interaction: &CommandInteraction, request_id: Uuid) -> ErrorContext {
        ErrorContext {
            request_id: Some(request_id),
            interaction_id: Some(interaction.id.clone()),
            command_name: Some(interaction.command_name.clone()),
            user_id: Some(interaction.user_id.clone()),
            user_tag: Some(interaction.user_tag.clone()),
            guild_id: interaction.guild_id.clone(),
            original_error: None,
        }
    }
}
