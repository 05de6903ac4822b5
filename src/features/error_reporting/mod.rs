//! # Error Reporting Feature
//!
//! Captures handler failures, forwards them to an external tracker and sends
//! the user a generic failure reply.
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0
//! - **Toggleable**: false

pub mod reporter;
pub mod tracker;

pub use reporter::ErrorReporter;
pub use tracker::{ErrorContext, ErrorReport, ErrorSink, ErrorTracker, LogSink, WebhookSink};
