//! User-facing reply texts and Discord message limits
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.0.0: Gate and fallback reply texts, message truncation

use std::time::Duration;

/// Discord message content limit
pub const MESSAGE_LIMIT: usize = 2000;
/// Maximum number of choices Discord accepts in one autocomplete response
pub const AUTOCOMPLETE_LIMIT: usize = 25;

/// Sent when a handler fails. Never includes error details.
pub const GENERIC_FAILURE_MESSAGE: &str =
    "❌ Sorry, something went wrong while running that command. Please try again later.";

/// Whole seconds left on a cooldown, rounded up
pub fn remaining_seconds(remaining: Duration) -> u64 {
    let millis = remaining.as_millis();
    let secs = millis.div_ceil(1000);
    u64::try_from(secs).unwrap_or(u64::MAX)
}

/// Reply for an invocation rejected by the cooldown gate
pub fn cooldown_message(command_name: &str, remaining: Duration) -> String {
    let secs = remaining_seconds(remaining);
    let unit = if secs == 1 { "second" } else { "seconds" };
    format!("⏳ Please wait {secs} more {unit} before using `{command_name}` again.")
}

/// Reply for an invocation rejected by the permission gate
pub fn permission_denied_message(command_name: &str) -> String {
    format!("🚫 You don't have permission to use `{command_name}`.")
}

/// Truncate text to fit message limit, adding ellipsis if needed
pub fn truncate_for_message(text: &str) -> String {
    if text.len() <= MESSAGE_LIMIT {
        text.to_string()
    } else {
        // Find a safe UTF-8 boundary
        let mut end = MESSAGE_LIMIT - 3; // Room for "..."
        while !text.is_char_boundary(end) && end > 0 {
            end -= 1;
        }
        format!("{}...", &text[..end])
    }
}
