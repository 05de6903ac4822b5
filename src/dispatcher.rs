//! # Interaction Dispatcher
//!
//! Single entry point for every inbound interaction. Routes commands through
//! the cooldown and permission gates to their handler and makes sure each
//! interaction ends with exactly one user-visible answer: the handler's own
//! reply, a gate rejection, or the generic failure reply.
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.0.0: Cooldown gate, cached permission gate, autocomplete routing, panic isolation

use anyhow::anyhow;
use log::{debug, info, warn};
use serenity::model::permissions::Permissions;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

use crate::commands::context::CommandContext;
use crate::commands::registry::{CommandDescriptor, CommandRegistry};
use crate::core::{cooldown_message, permission_denied_message};
use crate::features::cooldowns::{CooldownCheck, CooldownTracker};
use crate::features::error_reporting::ErrorReporter;
use crate::features::permissions::PermissionCache;
use crate::interactions::{
    AutocompleteInteraction, CommandInteraction, InteractionEvent, InteractionKind,
};

/// How a command interaction ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// No handler registered; nothing was sent
    UnknownCommand,
    CoolingDown,
    PermissionDenied,
    Completed,
    /// Handler errored or panicked; the error reporter took over
    Failed,
}

pub struct Dispatcher {
    registry: CommandRegistry,
    context: Arc<CommandContext>,
    cooldowns: CooldownTracker,
    permissions: PermissionCache,
    reporter: ErrorReporter,
}

impl Dispatcher {
    pub fn new(
        registry: CommandRegistry,
        cooldowns: CooldownTracker,
        permissions: PermissionCache,
        reporter: ErrorReporter,
        default_cooldown: Duration,
    ) -> Self {
        let context = Arc::new(CommandContext::new(&registry, default_cooldown));
        Dispatcher {
            registry,
            context,
            cooldowns,
            permissions,
            reporter,
        }
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    pub fn context(&self) -> Arc<CommandContext> {
        Arc::clone(&self.context)
    }

    pub fn cooldowns(&self) -> &CooldownTracker {
        &self.cooldowns
    }

    pub fn permissions(&self) -> &PermissionCache {
        &self.permissions
    }

    /// Route any interaction event
    pub async fn dispatch(&self, event: InteractionEvent) {
        match event {
            InteractionEvent::Command(interaction) => {
                self.dispatch_command(interaction).await;
            }
            InteractionEvent::Autocomplete(interaction) => {
                self.dispatch_autocomplete(interaction).await;
            }
        }
    }

    /// Run a chat-input or context-menu command through the gates and its handler
    pub async fn dispatch_command(&self, interaction: CommandInteraction) -> DispatchOutcome {
        let request_id = Uuid::new_v4();

        info!(
            "[{}] 📥 Command received | Command: {} | Kind: {:?} | User: {} | Guild: {}",
            request_id,
            interaction.command_name,
            interaction.kind,
            interaction.user_id,
            interaction.guild_id.as_deref().unwrap_or("DM")
        );

        let Some(descriptor) = self.registry.get(&interaction.command_name) else {
            warn!(
                "[{}] ❓ No handler registered for command: {}",
                request_id, interaction.command_name
            );
            return DispatchOutcome::UnknownCommand;
        };

        if !self.cooldown_gate(descriptor, &interaction, request_id).await {
            return DispatchOutcome::CoolingDown;
        }
        if !self.permission_gate(descriptor, &interaction, request_id).await {
            return DispatchOutcome::PermissionDenied;
        }

        debug!("[{request_id}] 🎯 Invoking handler for {}", descriptor.name);
        let interaction = Arc::new(interaction);
        let handler = Arc::clone(&descriptor.handler);
        let ctx = Arc::clone(&self.context);
        let task_interaction = Arc::clone(&interaction);

        // Own task so a panicking handler is reported like a failing one
        let joined =
            tokio::spawn(async move { handler.handle(ctx, &task_interaction).await }).await;
        let result = match joined {
            Ok(result) => result,
            Err(join_error) if join_error.is_panic() => {
                let payload = join_error.into_panic();
                let detail = payload
                    .downcast_ref::<&str>()
                    .map(|s| s.to_string())
                    .or_else(|| payload.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "unknown panic".to_string());
                Err(anyhow!("command handler panicked: {detail}"))
            }
            Err(join_error) => Err(anyhow!("command handler task failed: {join_error}")),
        };

        match result {
            Ok(()) => {
                if !interaction.is_acknowledged() {
                    warn!(
                        "[{request_id}] ⚠️ Handler for {} finished without replying",
                        descriptor.name
                    );
                }
                info!("[{request_id}] ✅ Command {} completed", descriptor.name);
                DispatchOutcome::Completed
            }
            Err(e) => {
                self.reporter.report(&e, &interaction, request_id).await;
                DispatchOutcome::Failed
            }
        }
    }

    /// Forward an autocomplete request; failures are logged, never shown
    pub async fn dispatch_autocomplete(&self, interaction: AutocompleteInteraction) {
        let Some(descriptor) = self.registry.get(&interaction.command_name) else {
            warn!(
                "Autocomplete for unregistered command: {}",
                interaction.command_name
            );
            return;
        };

        if !descriptor.handler.supports_autocomplete() {
            debug!(
                "Command {} has no autocomplete; ignoring request {}",
                descriptor.name, interaction.id
            );
            return;
        }

        if let Err(e) = descriptor
            .handler
            .autocomplete(Arc::clone(&self.context), &interaction)
            .await
        {
            warn!(
                "Autocomplete for {} failed (user {}): {e:#}",
                descriptor.name, interaction.user_id
            );
        }
    }

    /// Decide and record in one step, then reply if rejected
    async fn cooldown_gate(
        &self,
        descriptor: &CommandDescriptor,
        interaction: &CommandInteraction,
        request_id: Uuid,
    ) -> bool {
        let cooldown = descriptor
            .cooldown
            .unwrap_or(self.context.default_cooldown);

        let CooldownCheck::Rejected { remaining } =
            self.cooldowns
                .check(&interaction.user_id, descriptor.name, cooldown)
        else {
            return true;
        };

        info!(
            "[{request_id}] ⏳ {} on cooldown for user {} ({}ms left)",
            descriptor.name,
            interaction.user_id,
            remaining.as_millis()
        );
        let message = cooldown_message(&display_name(interaction), remaining);
        if let Err(e) = interaction.send(&message, true).await {
            warn!("[{request_id}] Failed to send cooldown reply: {e:#}");
        }
        false
    }

    async fn permission_gate(
        &self,
        descriptor: &CommandDescriptor,
        interaction: &CommandInteraction,
        request_id: Uuid,
    ) -> bool {
        let required = descriptor.required_permissions;
        if required.is_empty() {
            return true;
        }

        let allowed = match interaction.guild_id.as_deref() {
            Some(guild_id) => self.permissions.check(
                guild_id,
                &interaction.user_id,
                descriptor.name,
                required,
                || interaction.member_permissions.unwrap_or_else(Permissions::empty),
            ),
            // Direct messages have no member permissions to check
            None => false,
        };
        if allowed {
            return true;
        }

        info!(
            "[{request_id}] 🚫 User {} lacks {:?} for {}",
            interaction.user_id,
            required.get_permission_names(),
            descriptor.name
        );
        let message = permission_denied_message(&display_name(interaction));
        if let Err(e) = interaction.send(&message, true).await {
            warn!("[{request_id}] Failed to send permission reply: {e:#}");
        }
        false
    }
}

/// How users see the command: `/name` for slash commands, the menu label otherwise
fn display_name(interaction: &CommandInteraction) -> String {
    match interaction.kind {
        InteractionKind::ChatInput => format!("/{}", interaction.command_name),
        InteractionKind::ContextMenu => interaction.command_name.clone(),
    }
}
