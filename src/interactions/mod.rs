//! # Interactions
//!
//! Transport-neutral view of inbound Discord interactions. A
//! [`CommandInteraction`] carries the invocation metadata and tracks whether it
//! has been answered, so every reply goes through one place that knows the
//! current state.
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0
//! - **Toggleable**: false

pub mod gateway;
pub mod responder;

pub use responder::{AutocompleteResponder, Responder};

use crate::core::AUTOCOMPLETE_LIMIT;
use anyhow::{bail, Result};
use serde_json::Value;
use serenity::model::permissions::Permissions;
use std::fmt;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

/// How the command was invoked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionKind {
    /// `/name` typed in the chat box
    ChatInput,
    /// Right-click menu on a user or message
    ContextMenu,
}

/// Acknowledgement state of a command interaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyState {
    NotReplied,
    /// Acknowledged; the message still has to be filled in with an edit
    Deferred,
    Replied,
}

impl ReplyState {
    fn as_u8(self) -> u8 {
        match self {
            ReplyState::NotReplied => 0,
            ReplyState::Deferred => 1,
            ReplyState::Replied => 2,
        }
    }

    fn from_u8(value: u8) -> Self {
        match value {
            0 => ReplyState::NotReplied,
            1 => ReplyState::Deferred,
            _ => ReplyState::Replied,
        }
    }
}

/// A top-level option value supplied with a command
#[derive(Debug, Clone, PartialEq)]
pub struct CommandOption {
    pub name: String,
    pub value: Value,
}

/// Inbound interaction routed by the dispatcher
pub enum InteractionEvent {
    Command(CommandInteraction),
    Autocomplete(AutocompleteInteraction),
}

/// A chat-input or context-menu command invocation
pub struct CommandInteraction {
    pub id: String,
    pub kind: InteractionKind,
    pub command_name: String,
    pub user_id: String,
    /// `name#discriminator`, used in logs and error reports
    pub user_tag: String,
    /// `None` for direct messages
    pub guild_id: Option<String>,
    /// Permissions of the invoking member in the invoking channel
    pub member_permissions: Option<Permissions>,
    /// Target user or message of a context-menu command
    pub target_id: Option<String>,
    pub options: Vec<CommandOption>,
    responder: Arc<dyn Responder>,
    state: AtomicU8,
}

impl CommandInteraction {
    pub fn new(
        id: impl Into<String>,
        kind: InteractionKind,
        command_name: impl Into<String>,
        user_id: impl Into<String>,
        user_tag: impl Into<String>,
        responder: Arc<dyn Responder>,
    ) -> Self {
        Self {
            id: id.into(),
            kind,
            command_name: command_name.into(),
            user_id: user_id.into(),
            user_tag: user_tag.into(),
            guild_id: None,
            member_permissions: None,
            target_id: None,
            options: Vec::new(),
            responder,
            state: AtomicU8::new(ReplyState::NotReplied.as_u8()),
        }
    }

    /// Attach the guild and the member's resolved permissions
    pub fn with_guild(
        mut self,
        guild_id: impl Into<String>,
        permissions: Option<Permissions>,
    ) -> Self {
        self.guild_id = Some(guild_id.into());
        self.member_permissions = permissions;
        self
    }

    pub fn with_target(mut self, target_id: impl Into<String>) -> Self {
        self.target_id = Some(target_id.into());
        self
    }

    pub fn with_options(mut self, options: Vec<CommandOption>) -> Self {
        self.options = options;
        self
    }

    pub fn reply_state(&self) -> ReplyState {
        ReplyState::from_u8(self.state.load(Ordering::Acquire))
    }

    /// Whether a reply or a deferral has already been sent
    pub fn is_acknowledged(&self) -> bool {
        self.reply_state() != ReplyState::NotReplied
    }

    /// String value of a top-level option
    pub fn string_option(&self, name: &str) -> Option<&str> {
        self.options
            .iter()
            .find(|opt| opt.name == name)
            .and_then(|opt| opt.value.as_str())
    }

    /// Public initial reply
    pub async fn reply(&self, content: &str) -> Result<()> {
        self.create_response(content, false).await
    }

    /// Initial reply only the invoking user can see
    pub async fn reply_ephemeral(&self, content: &str) -> Result<()> {
        self.create_response(content, true).await
    }

    /// Acknowledge now and fill the message in later with [`Self::edit_reply`]
    pub async fn defer(&self, ephemeral: bool) -> Result<()> {
        self.claim(ReplyState::Deferred)?;
        let result = self.responder.defer(ephemeral).await;
        if result.is_err() {
            self.restore(ReplyState::Deferred, ReplyState::NotReplied);
        }
        result
    }

    /// Replace the original response, completing a deferral
    pub async fn edit_reply(&self, content: &str) -> Result<()> {
        if !self.is_acknowledged() {
            bail!("interaction {} has no response to edit", self.id);
        }
        let completes_deferral = self
            .state
            .compare_exchange(
                ReplyState::Deferred.as_u8(),
                ReplyState::Replied.as_u8(),
                Ordering::AcqRel,
                Ordering::Acquire,
            )
            .is_ok();
        let result = self.responder.edit_response(content).await;
        if result.is_err() && completes_deferral {
            self.restore(ReplyState::Replied, ReplyState::Deferred);
        }
        result
    }

    /// Extra message after the initial response
    pub async fn follow_up(&self, content: &str, ephemeral: bool) -> Result<()> {
        if !self.is_acknowledged() {
            bail!("interaction {} must be answered before a follow-up", self.id);
        }
        self.responder.create_followup(content, ephemeral).await
    }

    /// Deliver a message using whichever call the current state allows:
    /// a new reply, the edit that completes a deferral, or a follow-up.
    pub async fn send(&self, content: &str, ephemeral: bool) -> Result<()> {
        match self.reply_state() {
            ReplyState::NotReplied => self.create_response(content, ephemeral).await,
            ReplyState::Deferred => self.edit_reply(content).await,
            ReplyState::Replied => self.follow_up(content, ephemeral).await,
        }
    }

    async fn create_response(&self, content: &str, ephemeral: bool) -> Result<()> {
        self.claim(ReplyState::Replied)?;
        let result = self.responder.create_response(content, ephemeral).await;
        if result.is_err() {
            self.restore(ReplyState::Replied, ReplyState::NotReplied);
        }
        result
    }

    /// Move out of `NotReplied` before the transport call, so two concurrent
    /// initial responses cannot both be attempted.
    fn claim(&self, next: ReplyState) -> Result<()> {
        match self.state.compare_exchange(
            ReplyState::NotReplied.as_u8(),
            next.as_u8(),
            Ordering::AcqRel,
            Ordering::Acquire,
        ) {
            Ok(_) => Ok(()),
            Err(current) => bail!(
                "interaction {} was already acknowledged ({:?})",
                self.id,
                ReplyState::from_u8(current)
            ),
        }
    }

    /// Undo a transition whose transport call failed; Discord saw nothing
    fn restore(&self, claimed: ReplyState, previous: ReplyState) {
        let _ = self.state.compare_exchange(
            claimed.as_u8(),
            previous.as_u8(),
            Ordering::AcqRel,
            Ordering::Acquire,
        );
    }
}

impl fmt::Debug for CommandInteraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandInteraction")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .field("command_name", &self.command_name)
            .field("user_id", &self.user_id)
            .field("guild_id", &self.guild_id)
            .field("reply_state", &self.reply_state())
            .finish()
    }
}

/// Request for option suggestions while the user is typing
pub struct AutocompleteInteraction {
    pub id: String,
    pub command_name: String,
    pub user_id: String,
    pub guild_id: Option<String>,
    /// Name of the option being typed
    pub focused_option: Option<String>,
    /// Partial input of the focused option
    pub focused_value: String,
    responder: Arc<dyn AutocompleteResponder>,
}

impl AutocompleteInteraction {
    pub fn new(
        id: impl Into<String>,
        command_name: impl Into<String>,
        user_id: impl Into<String>,
        responder: Arc<dyn AutocompleteResponder>,
    ) -> Self {
        Self {
            id: id.into(),
            command_name: command_name.into(),
            user_id: user_id.into(),
            guild_id: None,
            focused_option: None,
            focused_value: String::new(),
            responder,
        }
    }

    pub fn with_guild(mut self, guild_id: impl Into<String>) -> Self {
        self.guild_id = Some(guild_id.into());
        self
    }

    pub fn with_focus(mut self, option: impl Into<String>, value: impl Into<String>) -> Self {
        self.focused_option = Some(option.into());
        self.focused_value = value.into();
        self
    }

    /// Send `(name, value)` choices, keeping at most the first 25
    pub async fn respond(&self, mut choices: Vec<(String, String)>) -> Result<()> {
        choices.truncate(AUTOCOMPLETE_LIMIT);
        self.responder.suggest(&choices).await
    }
}
