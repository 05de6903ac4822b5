//! # Cooldowns Feature
//!
//! Per-user, per-command reinvocation limits.
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0
//! - **Toggleable**: false

pub mod tracker;

pub use tracker::{CooldownCheck, CooldownTracker};
