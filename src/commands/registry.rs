//! Command registry
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.0.0: Name-keyed command descriptors

use log::warn;
use serenity::model::permissions::Permissions;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use super::handler::SlashCommandHandler;

/// Registered metadata and handler for one command name
#[derive(Clone)]
pub struct CommandDescriptor {
    pub name: &'static str,
    pub handler: Arc<dyn SlashCommandHandler>,
    pub required_permissions: Permissions,
    /// `None` uses the dispatcher's default
    pub cooldown: Option<Duration>,
}

/// Handler-free view of a descriptor, for help output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSummary {
    pub name: &'static str,
    pub required_permissions: Permissions,
    pub cooldown: Option<Duration>,
}

/// Registry mapping command names to descriptors
///
/// Filled once at startup and read-only afterwards. Multiple command names
/// can map to the same handler if they share logic.
///
/// # Example
///
/// ```ignore
/// let mut registry = CommandRegistry::new();
/// registry.register(Arc::new(UtilityHandler));
///
/// if let Some(descriptor) = registry.get("ping") {
///     descriptor.handler.handle(ctx, &interaction).await?;
/// }
/// ```
#[derive(Clone)]
pub struct CommandRegistry {
    descriptors: HashMap<&'static str, CommandDescriptor>,
}

impl CommandRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            descriptors: HashMap::new(),
        }
    }

    /// Register a handler for its declared command names
    ///
    /// A name registered twice keeps the later handler.
    pub fn register(&mut self, handler: Arc<dyn SlashCommandHandler>) {
        let required_permissions = handler.required_permissions();
        let cooldown = handler.cooldown();

        for &name in handler.command_names() {
            let descriptor = CommandDescriptor {
                name,
                handler: Arc::clone(&handler),
                required_permissions,
                cooldown,
            };
            if self.descriptors.insert(name, descriptor).is_some() {
                warn!("Command '{name}' registered twice; keeping the latest handler");
            }
        }
    }

    /// Get descriptor for a command name
    pub fn get(&self, name: &str) -> Option<&CommandDescriptor> {
        self.descriptors.get(name)
    }

    /// Check if a command is registered
    pub fn contains(&self, name: &str) -> bool {
        self.descriptors.contains_key(name)
    }

    /// Number of registered command names
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// Summaries of every registered command, sorted by name
    pub fn summaries(&self) -> Vec<CommandSummary> {
        let mut summaries: Vec<CommandSummary> = self
            .descriptors
            .values()
            .map(|d| CommandSummary {
                name: d.name,
                required_permissions: d.required_permissions,
                cooldown: d.cooldown,
            })
            .collect();
        summaries.sort_by(|a, b| a.name.cmp(b.name));
        summaries
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::context::CommandContext;
    use crate::interactions::CommandInteraction;
    use anyhow::Result;
    use async_trait::async_trait;

    // Mock handler for testing
    struct MockHandler {
        names: &'static [&'static str],
        permissions: Permissions,
        cooldown: Option<Duration>,
    }

    impl MockHandler {
        fn named(names: &'static [&'static str]) -> Self {
            MockHandler {
                names,
                permissions: Permissions::empty(),
                cooldown: None,
            }
        }
    }

    #[async_trait]
    impl SlashCommandHandler for MockHandler {
        fn command_names(&self) -> &'static [&'static str] {
            self.names
        }

        fn required_permissions(&self) -> Permissions {
            self.permissions
        }

        fn cooldown(&self) -> Option<Duration> {
            self.cooldown
        }

        async fn handle(
            &self,
            _ctx: Arc<CommandContext>,
            _interaction: &CommandInteraction,
        ) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_registry_new_is_empty() {
        let registry = CommandRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);
    }

    #[test]
    fn test_registry_register_single() {
        let mut registry = CommandRegistry::new();
        registry.register(Arc::new(MockHandler::named(&["ping"])));

        assert_eq!(registry.len(), 1);
        assert!(registry.contains("ping"));
        assert!(!registry.contains("pong"));
    }

    #[test]
    fn test_registry_register_multiple_names_share_metadata() {
        let mut registry = CommandRegistry::new();
        registry.register(Arc::new(MockHandler {
            names: &["kick", "ban"],
            permissions: Permissions::KICK_MEMBERS | Permissions::BAN_MEMBERS,
            cooldown: Some(Duration::from_secs(5)),
        }));

        assert_eq!(registry.len(), 2);
        for name in ["kick", "ban"] {
            let descriptor = registry.get(name).unwrap();
            assert_eq!(descriptor.name, name);
            assert_eq!(
                descriptor.required_permissions,
                Permissions::KICK_MEMBERS | Permissions::BAN_MEMBERS
            );
            assert_eq!(descriptor.cooldown, Some(Duration::from_secs(5)));
        }
    }

    #[test]
    fn test_registry_duplicate_name_keeps_latest() {
        let mut registry = CommandRegistry::new();
        registry.register(Arc::new(MockHandler::named(&["ping"])));
        registry.register(Arc::new(MockHandler {
            names: &["ping"],
            permissions: Permissions::ADMINISTRATOR,
            cooldown: None,
        }));

        assert_eq!(registry.len(), 1);
        assert_eq!(
            registry.get("ping").unwrap().required_permissions,
            Permissions::ADMINISTRATOR
        );
    }

    #[test]
    fn test_registry_get_missing() {
        let registry = CommandRegistry::default();
        assert!(registry.get("missing").is_none());
    }

    #[test]
    fn test_summaries_sorted() {
        let mut registry = CommandRegistry::new();
        registry.register(Arc::new(MockHandler::named(&["uptime", "help", "ping"])));

        let names: Vec<&str> = registry.summaries().iter().map(|s| s.name).collect();
        assert_eq!(names, vec!["help", "ping", "uptime"]);
    }
}
