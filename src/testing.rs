//! Test doubles for interactions and error sinks

use anyhow::{bail, Result};
use async_trait::async_trait;
use serde_json::Value;
use serenity::model::permissions::Permissions;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

use crate::features::error_reporting::{ErrorReport, ErrorSink};
use crate::interactions::{
    AutocompleteResponder, CommandInteraction, CommandOption, InteractionKind, Responder,
};

/// One transport call made through a [`RecordingResponder`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponderCall {
    Reply { content: String, ephemeral: bool },
    Defer { ephemeral: bool },
    Edit { content: String },
    FollowUp { content: String, ephemeral: bool },
}

/// Records every call; optionally fails them all after recording
#[derive(Default)]
pub struct RecordingResponder {
    calls: Mutex<Vec<ResponderCall>>,
    failing: AtomicBool,
    pending_failures: AtomicUsize,
}

impl RecordingResponder {
    pub fn calls(&self) -> Vec<ResponderCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Make every later call return an error, as with an expired token
    pub fn fail_all(&self) {
        self.failing.store(true, Ordering::SeqCst);
    }

    /// Make only the next call return an error
    pub fn fail_next(&self) {
        self.pending_failures.fetch_add(1, Ordering::SeqCst);
    }

    fn record(&self, call: ResponderCall) -> Result<()> {
        self.calls.lock().unwrap().push(call);
        if self.failing.load(Ordering::SeqCst) {
            bail!("Unknown interaction");
        }
        let consumed = self
            .pending_failures
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if consumed {
            bail!("Service unavailable");
        }
        Ok(())
    }
}

#[async_trait]
impl Responder for RecordingResponder {
    async fn create_response(&self, content: &str, ephemeral: bool) -> Result<()> {
        self.record(ResponderCall::Reply {
            content: content.to_string(),
            ephemeral,
        })
    }

    async fn defer(&self, ephemeral: bool) -> Result<()> {
        self.record(ResponderCall::Defer { ephemeral })
    }

    async fn edit_response(&self, content: &str) -> Result<()> {
        self.record(ResponderCall::Edit {
            content: content.to_string(),
        })
    }

    async fn create_followup(&self, content: &str, ephemeral: bool) -> Result<()> {
        self.record(ResponderCall::FollowUp {
            content: content.to_string(),
            ephemeral,
        })
    }
}

#[derive(Default)]
pub struct RecordingAutocomplete {
    suggestions: Mutex<Vec<Vec<(String, String)>>>,
}

impl RecordingAutocomplete {
    pub fn suggestions(&self) -> Vec<Vec<(String, String)>> {
        self.suggestions.lock().unwrap().clone()
    }
}

#[async_trait]
impl AutocompleteResponder for RecordingAutocomplete {
    async fn suggest(&self, choices: &[(String, String)]) -> Result<()> {
        self.suggestions.lock().unwrap().push(choices.to_vec());
        Ok(())
    }
}

/// Forwards delivered reports to a channel the test can await
pub struct ChannelSink {
    sender: mpsc::UnboundedSender<ErrorReport>,
}

impl ChannelSink {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<ErrorReport>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (ChannelSink { sender }, receiver)
    }
}

#[async_trait]
impl ErrorSink for ChannelSink {
    async fn send(&self, report: &ErrorReport) -> Result<()> {
        self.sender.send(report.clone())?;
        Ok(())
    }
}

pub struct TestCommandBuilder {
    name: String,
    kind: InteractionKind,
    user_id: String,
    guild_id: Option<String>,
    permissions: Option<Permissions>,
    target_id: Option<String>,
    options: Vec<CommandOption>,
}

/// Start building a chat-input interaction for `name`
pub fn test_command(name: &str) -> TestCommandBuilder {
    TestCommandBuilder {
        name: name.to_string(),
        kind: InteractionKind::ChatInput,
        user_id: "100".to_string(),
        guild_id: None,
        permissions: None,
        target_id: None,
        options: Vec::new(),
    }
}

impl TestCommandBuilder {
    pub fn user(mut self, user_id: &str) -> Self {
        self.user_id = user_id.to_string();
        self
    }

    pub fn guild(mut self, guild_id: &str) -> Self {
        self.guild_id = Some(guild_id.to_string());
        self
    }

    pub fn permissions(mut self, permissions: Permissions) -> Self {
        self.permissions = Some(permissions);
        self
    }

    pub fn context_menu(mut self) -> Self {
        self.kind = InteractionKind::ContextMenu;
        self
    }

    pub fn target(mut self, target_id: &str) -> Self {
        self.target_id = Some(target_id.to_string());
        self
    }

    pub fn option(mut self, name: &str, value: Value) -> Self {
        self.options.push(CommandOption {
            name: name.to_string(),
            value,
        });
        self
    }

    pub fn build(self) -> (CommandInteraction, Arc<RecordingResponder>) {
        let responder = Arc::new(RecordingResponder::default());
        let mut interaction = CommandInteraction::new(
            format!("interaction-{}-{}", self.name, self.user_id),
            self.kind,
            self.name,
            self.user_id.clone(),
            format!("tester{}#0001", self.user_id),
            responder.clone(),
        )
        .with_options(self.options);

        if let Some(guild_id) = self.guild_id {
            interaction = interaction.with_guild(guild_id, self.permissions);
        }
        if let Some(target_id) = self.target_id {
            interaction = interaction.with_target(target_id);
        }
        (interaction, responder)
    }
}
