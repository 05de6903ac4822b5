// Core layer - configuration and shared reply texts
pub mod core;

// Interaction layer - transport-neutral interactions and the serenity adapter
pub mod interactions;

// Features layer - cooldowns, permission cache, error reporting, cache sweep
pub mod features;

// Application layer
pub mod commands;
pub mod dispatcher;

#[cfg(test)]
pub(crate) mod testing;

pub use core::Config;

pub use commands::{CommandContext, CommandRegistry, SlashCommandHandler};
pub use dispatcher::{DispatchOutcome, Dispatcher};
pub use features::{
    cache_sweep_loop, CooldownCheck, CooldownTracker, ErrorContext, ErrorReport, ErrorReporter,
    ErrorSink, ErrorTracker, PermissionCache,
};
pub use interactions::{
    AutocompleteInteraction, CommandInteraction, InteractionEvent, InteractionKind, ReplyState,
};
