//! # Features
//!
//! Gates and reporting used by the interaction dispatcher.
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0

pub mod cache_sweep;
pub mod cooldowns;
pub mod error_reporting;
pub mod permissions;

pub use cache_sweep::{cache_sweep_loop, sweep_once, SweepStats};
pub use cooldowns::{CooldownCheck, CooldownTracker};
pub use error_reporting::{ErrorContext, ErrorReport, ErrorReporter, ErrorSink, ErrorTracker};
pub use permissions::PermissionCache;
