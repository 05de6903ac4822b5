//! Moderation slash commands: /say

use serenity::builder::CreateApplicationCommand;
use serenity::model::application::command::CommandOptionType;
use serenity::model::permissions::Permissions;

/// Creates moderation commands
pub fn create_commands() -> Vec<CreateApplicationCommand> {
    vec![create_say_command()]
}

/// Creates the say command
///
/// The member permission default only hides the command in the client; the
/// dispatcher still checks permissions on every invocation.
fn create_say_command() -> CreateApplicationCommand {
    CreateApplicationCommand::default()
        .name("say")
        .description("Post a message as the bot")
        .default_member_permissions(Permissions::MANAGE_MESSAGES)
        .dm_permission(false)
        .create_option(|option| {
            option
                .name("text")
                .description("What to say")
                .kind(CommandOptionType::String)
                .required(true)
        })
        .to_owned()
}
