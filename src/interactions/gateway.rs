//! Serenity-backed interactions
//!
//! Converts serenity interaction payloads into [`CommandInteraction`] and
//! [`AutocompleteInteraction`] and answers them over the Discord HTTP API.
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0

use anyhow::Result;
use async_trait::async_trait;
use serenity::http::Http;
use serenity::model::application::command::CommandType;
use serenity::model::application::interaction::application_command::{
    ApplicationCommandInteraction, CommandDataOption,
};
use serenity::model::application::interaction::autocomplete::AutocompleteInteraction as SerenityAutocomplete;
use serenity::model::application::interaction::InteractionResponseType;
use std::sync::Arc;

use super::{
    AutocompleteInteraction, AutocompleteResponder, CommandInteraction, CommandOption,
    InteractionKind, Responder,
};

/// Answers an application command through the interaction webhook
pub struct SerenityResponder {
    http: Arc<Http>,
    command: ApplicationCommandInteraction,
}

#[async_trait]
impl Responder for SerenityResponder {
    async fn create_response(&self, content: &str, ephemeral: bool) -> Result<()> {
        self.command
            .create_interaction_response(&self.http, |response| {
                response
                    .kind(InteractionResponseType::ChannelMessageWithSource)
                    .interaction_response_data(|message| {
                        message.content(content).ephemeral(ephemeral)
                    })
            })
            .await?;
        Ok(())
    }

    async fn defer(&self, ephemeral: bool) -> Result<()> {
        self.command
            .create_interaction_response(&self.http, |response| {
                response
                    .kind(InteractionResponseType::DeferredChannelMessageWithSource)
                    .interaction_response_data(|data| data.ephemeral(ephemeral))
            })
            .await?;
        Ok(())
    }

    async fn edit_response(&self, content: &str) -> Result<()> {
        self.command
            .edit_original_interaction_response(&self.http, |response| response.content(content))
            .await?;
        Ok(())
    }

    async fn create_followup(&self, content: &str, ephemeral: bool) -> Result<()> {
        self.command
            .create_followup_message(&self.http, |followup| {
                followup.content(content).ephemeral(ephemeral)
            })
            .await?;
        Ok(())
    }
}

/// Answers an autocomplete request
pub struct SerenityAutocompleteResponder {
    http: Arc<Http>,
    autocomplete: SerenityAutocomplete,
}

#[async_trait]
impl AutocompleteResponder for SerenityAutocompleteResponder {
    async fn suggest(&self, choices: &[(String, String)]) -> Result<()> {
        self.autocomplete
            .create_autocomplete_response(&self.http, |response| {
                for (name, value) in choices {
                    response.add_string_choice(name, value);
                }
                response
            })
            .await?;
        Ok(())
    }
}

/// Wrap a serenity application command for the dispatcher
pub fn command_interaction(
    http: Arc<Http>,
    command: ApplicationCommandInteraction,
) -> CommandInteraction {
    let kind = match command.data.kind {
        CommandType::User | CommandType::Message => InteractionKind::ContextMenu,
        _ => InteractionKind::ChatInput,
    };

    let mut interaction = CommandInteraction::new(
        command.id.to_string(),
        kind,
        command.data.name.clone(),
        command.user.id.to_string(),
        command.user.tag(),
        Arc::new(SerenityResponder {
            http: Arc::clone(&http),
            command: command.clone(),
        }),
    )
    .with_options(top_level_options(&command.data.options));

    if let Some(guild_id) = command.guild_id {
        let permissions = command.member.as_ref().and_then(|m| m.permissions);
        interaction = interaction.with_guild(guild_id.to_string(), permissions);
    }
    if let Some(target_id) = command.data.target_id {
        interaction = interaction.with_target(target_id.0.to_string());
    }

    interaction
}

/// Wrap a serenity autocomplete request for the dispatcher
pub fn autocomplete_interaction(
    http: Arc<Http>,
    autocomplete: SerenityAutocomplete,
) -> AutocompleteInteraction {
    let focused = autocomplete.data.options.iter().find(|opt| opt.focused);
    let focused_name = focused.map(|opt| opt.name.clone());
    let focused_value = focused
        .and_then(|opt| opt.value.as_ref())
        .and_then(|value| value.as_str())
        .unwrap_or("")
        .to_string();
    let guild_id = autocomplete.guild_id.map(|id| id.to_string());

    let mut interaction = AutocompleteInteraction::new(
        autocomplete.id.to_string(),
        autocomplete.data.name.clone(),
        autocomplete.user.id.to_string(),
        Arc::new(SerenityAutocompleteResponder {
            http,
            autocomplete: autocomplete.clone(),
        }),
    );
    if let Some(guild_id) = guild_id {
        interaction = interaction.with_guild(guild_id);
    }
    if let Some(name) = focused_name {
        interaction = interaction.with_focus(name, focused_value);
    }
    interaction
}

fn top_level_options(options: &[CommandDataOption]) -> Vec<CommandOption> {
    options
        .iter()
        .filter_map(|opt| {
            opt.value.as_ref().map(|value| CommandOption {
                name: opt.name.clone(),
                value: value.clone(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};
    use serenity::model::permissions::Permissions;

    fn http() -> Arc<Http> {
        Arc::new(Http::new("test-token"))
    }

    fn user(id: &str, name: &str) -> Value {
        json!({
            "id": id,
            "username": name,
            "discriminator": "0001",
            "avatar": null,
            "public_flags": 0
        })
    }

    fn member(id: &str, name: &str, permissions: &str) -> Value {
        json!({
            "user": user(id, name),
            "nick": null,
            "roles": [],
            "joined_at": "2021-01-01T00:00:00.000000+00:00",
            "premium_since": null,
            "deaf": false,
            "mute": false,
            "pending": false,
            "permissions": permissions
        })
    }

    #[test]
    fn test_guild_slash_command_conversion() {
        let payload = json!({
            "id": "1000",
            "application_id": "2000",
            "type": 2,
            "guild_id": "3000",
            "channel_id": "4000",
            "member": member("42", "alice", "8192"),
            "token": "interaction-token",
            "version": 1,
            "locale": "en-US",
            "guild_locale": "en-US",
            "data": {
                "id": "5000",
                "name": "say",
                "type": 1,
                "options": [
                    { "name": "text", "type": 3, "value": "hello" },
                    { "name": "sub", "type": 1, "options": [] }
                ]
            }
        });
        let command: ApplicationCommandInteraction = serde_json::from_value(payload).unwrap();

        let interaction = command_interaction(http(), command);

        assert_eq!(interaction.id, "1000");
        assert_eq!(interaction.kind, InteractionKind::ChatInput);
        assert_eq!(interaction.command_name, "say");
        assert_eq!(interaction.user_id, "42");
        assert_eq!(interaction.user_tag, "alice#0001");
        assert_eq!(interaction.guild_id.as_deref(), Some("3000"));
        assert_eq!(
            interaction.member_permissions,
            Some(Permissions::MANAGE_MESSAGES)
        );
        assert_eq!(interaction.target_id, None);
        assert_eq!(
            interaction.options,
            vec![CommandOption {
                name: "text".to_string(),
                value: json!("hello")
            }]
        );
        assert!(!interaction.is_acknowledged());
    }

    #[test]
    fn test_dm_user_context_menu_conversion() {
        let payload = json!({
            "id": "1001",
            "application_id": "2000",
            "type": 2,
            "channel_id": "4001",
            "user": user("42", "alice"),
            "token": "interaction-token",
            "version": 1,
            "locale": "en-US",
            "data": {
                "id": "5001",
                "name": "User Info",
                "type": 2,
                "target_id": "555",
                "resolved": { "users": { "555": user("555", "bob") } }
            }
        });
        let command: ApplicationCommandInteraction = serde_json::from_value(payload).unwrap();

        let interaction = command_interaction(http(), command);

        assert_eq!(interaction.kind, InteractionKind::ContextMenu);
        assert_eq!(interaction.command_name, "User Info");
        assert_eq!(interaction.user_id, "42");
        assert_eq!(interaction.guild_id, None);
        assert_eq!(interaction.member_permissions, None);
        assert_eq!(interaction.target_id.as_deref(), Some("555"));
        assert!(interaction.options.is_empty());
    }

    #[test]
    fn test_autocomplete_focused_option_conversion() {
        let payload = json!({
            "id": "1002",
            "application_id": "2000",
            "type": 4,
            "guild_id": "3000",
            "channel_id": "4000",
            "member": member("42", "alice", "0"),
            "token": "interaction-token",
            "version": 1,
            "locale": "en-US",
            "data": {
                "id": "5002",
                "name": "help",
                "type": 1,
                "options": [
                    { "name": "command", "type": 3, "value": "pi", "focused": true }
                ]
            }
        });
        let autocomplete: SerenityAutocomplete = serde_json::from_value(payload).unwrap();

        let interaction = autocomplete_interaction(http(), autocomplete);

        assert_eq!(interaction.id, "1002");
        assert_eq!(interaction.command_name, "help");
        assert_eq!(interaction.user_id, "42");
        assert_eq!(interaction.guild_id.as_deref(), Some("3000"));
        assert_eq!(interaction.focused_option.as_deref(), Some("command"));
        assert_eq!(interaction.focused_value, "pi");
    }

    #[test]
    fn test_top_level_options_skip_valueless_entries() {
        let options: Vec<CommandDataOption> = serde_json::from_value(json!([
            { "name": "count", "type": 4, "value": 3 },
            { "name": "group", "type": 2, "options": [] }
        ]))
        .unwrap();

        assert_eq!(
            top_level_options(&options),
            vec![CommandOption {
                name: "count".to_string(),
                value: json!(3)
            }]
        );
    }
}
