//! Outbound side of an interaction
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0

use anyhow::Result;
use async_trait::async_trait;

/// Sends responses for one command interaction
///
/// Implementations only perform the transport call. Reply-state bookkeeping
/// lives in [`super::CommandInteraction`].
#[async_trait]
pub trait Responder: Send + Sync {
    /// Initial response with a message
    async fn create_response(&self, content: &str, ephemeral: bool) -> Result<()>;

    /// Initial acknowledgement; the message is supplied later by `edit_response`
    async fn defer(&self, ephemeral: bool) -> Result<()>;

    /// Replace the original response (or fill in a deferred one)
    async fn edit_response(&self, content: &str) -> Result<()>;

    /// Additional message after the initial response
    async fn create_followup(&self, content: &str, ephemeral: bool) -> Result<()>;
}

/// Sends choices for one autocomplete request
#[async_trait]
pub trait AutocompleteResponder: Send + Sync {
    /// `choices` are `(display name, value)` pairs
    async fn suggest(&self, choices: &[(String, String)]) -> Result<()>;
}
