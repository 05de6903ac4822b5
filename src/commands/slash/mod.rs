//! # Slash Commands (/)
//!
//! Discord application command definitions and their registration.
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.0.0: Utility, moderation and context menu definitions

mod context_menu;
mod moderation;
mod utility;

use anyhow::Result;
use log::info;
use serenity::builder::CreateApplicationCommand;
use serenity::http::Http;
use serenity::model::application::command::Command;
use serenity::model::id::GuildId;

/// Creates all slash command definitions
pub fn create_slash_commands() -> Vec<CreateApplicationCommand> {
    let mut commands = Vec::new();

    // Utility commands
    commands.extend(utility::create_commands());

    // Moderation commands
    commands.extend(moderation::create_commands());

    commands
}

/// Creates all context menu commands
pub fn create_context_menu_commands() -> Vec<CreateApplicationCommand> {
    context_menu::create_commands()
}

/// Registers all commands globally (can take up to an hour to propagate)
pub async fn register_global_commands(http: &Http) -> Result<()> {
    let slash_commands = create_slash_commands();
    let context_commands = create_context_menu_commands();
    let total = slash_commands.len() + context_commands.len();

    Command::set_global_application_commands(http, |commands| {
        for command in slash_commands {
            commands.add_application_command(command);
        }
        for command in context_commands {
            commands.add_application_command(command);
        }
        commands
    })
    .await?;

    info!("✅ Global application commands registered ({total} commands)");
    Ok(())
}

/// Registers all commands for a specific guild (faster for testing)
pub async fn register_guild_commands(http: &Http, guild_id: GuildId) -> Result<()> {
    let slash_commands = create_slash_commands();
    let context_commands = create_context_menu_commands();
    let total = slash_commands.len() + context_commands.len();

    guild_id
        .set_application_commands(http, |commands| {
            for command in slash_commands {
                commands.add_application_command(command);
            }
            for command in context_commands {
                commands.add_application_command(command);
            }
            commands
        })
        .await?;

    info!("✅ Guild application commands registered for guild {guild_id} ({total} commands)");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::handlers::create_all_handlers;
    use crate::commands::registry::CommandRegistry;
    use serenity::model::permissions::Permissions;

    fn name_of(cmd: &CreateApplicationCommand) -> String {
        cmd.0.get("name").unwrap().as_str().unwrap().to_string()
    }

    #[test]
    fn test_create_slash_commands() {
        let command_names: Vec<String> = create_slash_commands().iter().map(name_of).collect();
        assert_eq!(command_names, vec!["ping", "help", "uptime", "say"]);
    }

    #[test]
    fn test_create_context_menu_commands() {
        let commands = create_context_menu_commands();
        assert_eq!(commands.len(), 1, "Should have 1 context menu command");
        assert_eq!(name_of(&commands[0]), "User Info");
        // CommandType::User
        assert_eq!(commands[0].0.get("type").unwrap().as_u64(), Some(2));
    }

    #[test]
    fn test_every_definition_has_a_handler() {
        let mut registry = CommandRegistry::new();
        for handler in create_all_handlers() {
            registry.register(handler);
        }

        let definitions = create_slash_commands()
            .into_iter()
            .chain(create_context_menu_commands());
        for definition in definitions {
            let name = name_of(&definition);
            assert!(registry.contains(&name), "No handler for {name}");
        }
    }

    #[test]
    fn test_say_hidden_from_members_without_manage_messages() {
        let say = create_slash_commands()
            .into_iter()
            .find(|cmd| name_of(cmd) == "say")
            .unwrap();
        assert_eq!(
            say.0.get("default_member_permissions").unwrap().as_str(),
            Some(Permissions::MANAGE_MESSAGES.bits().to_string().as_str())
        );
    }
}
