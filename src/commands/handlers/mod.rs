//! Per-command handler implementations
//!
//! - **Version**: 1.1.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.1.0: Add ContextMenuHandler (User Info)
//! - 1.0.0: UtilityHandler (ping, help, uptime) and ModerationHandler (say)

pub mod context_menu;
pub mod moderation;
pub mod utility;

use std::sync::Arc;

use super::handler::SlashCommandHandler;

/// Create all registered command handlers
///
/// Returns a vector of handlers ready to be registered with CommandRegistry.
pub fn create_all_handlers() -> Vec<Arc<dyn SlashCommandHandler>> {
    vec![
        Arc::new(utility::UtilityHandler),
        Arc::new(moderation::ModerationHandler),
        Arc::new(context_menu::ContextMenuHandler),
    ]
}
