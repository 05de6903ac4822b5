//! Context menu commands: right-click "User Info"

use serenity::builder::CreateApplicationCommand;
use serenity::model::application::command::CommandType;

/// Creates context menu commands
pub fn create_commands() -> Vec<CreateApplicationCommand> {
    vec![create_user_info_command()]
}

/// Creates the "User Info" user context menu command
fn create_user_info_command() -> CreateApplicationCommand {
    CreateApplicationCommand::default()
        .name("User Info")
        .kind(CommandType::User)
        .to_owned()
}
