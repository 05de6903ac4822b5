//! # Command System
//!
//! Slash (/) and context menu command handling for Discord interactions.
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.0.0: Handler trait, context, registry and command definitions

pub mod context;
pub mod handler;
pub mod handlers;
pub mod registry;
pub mod slash;

// Re-export handler infrastructure
pub use context::CommandContext;
pub use handler::SlashCommandHandler;
pub use handlers::create_all_handlers;
pub use registry::{CommandDescriptor, CommandRegistry, CommandSummary};

// Re-export commonly used items from submodules
pub use slash::{
    create_context_menu_commands, create_slash_commands, register_global_commands,
    register_guild_commands,
};
