//! # Permissions Feature
//!
//! Cached permission gating for commands that declare required permissions.
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0
//! - **Toggleable**: false

pub mod cache;

pub use cache::PermissionCache;
