//! Utility slash commands: /ping, /help, /uptime

use serenity::builder::CreateApplicationCommand;
use serenity::model::application::command::CommandOptionType;

/// Creates utility commands
pub fn create_commands() -> Vec<CreateApplicationCommand> {
    vec![
        create_ping_command(),
        create_help_command(),
        create_uptime_command(),
    ]
}

/// Creates the ping command
fn create_ping_command() -> CreateApplicationCommand {
    CreateApplicationCommand::default()
        .name("ping")
        .description("Test bot responsiveness")
        .to_owned()
}

/// Creates the help command
fn create_help_command() -> CreateApplicationCommand {
    CreateApplicationCommand::default()
        .name("help")
        .description("List commands, or show details for one")
        .create_option(|option| {
            option
                .name("command")
                .description("Command to describe")
                .kind(CommandOptionType::String)
                .required(false)
                .set_autocomplete(true)
        })
        .to_owned()
}

/// Creates the uptime command
fn create_uptime_command() -> CreateApplicationCommand {
    CreateApplicationCommand::default()
        .name("uptime")
        .description("Show how long the bot has been running")
        .to_owned()
}
