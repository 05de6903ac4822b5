//! # Core Module
//!
//! Configuration and shared reply texts for the bot.
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0
//! - **Toggleable**: false

pub mod config;
pub mod response;

// Re-export commonly used items
pub use config::{Config, MAX_WINDOW};
pub use response::{
    cooldown_message, permission_denied_message, truncate_for_message, AUTOCOMPLETE_LIMIT,
    GENERIC_FAILURE_MESSAGE, MESSAGE_LIMIT,
};
