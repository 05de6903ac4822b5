use anyhow::Result;
use dotenvy::dotenv;
use log::{debug, error, info, warn};
use serenity::async_trait;
use serenity::model::application::interaction::Interaction;
use serenity::model::gateway::Ready;
use serenity::model::id::GuildId;
use serenity::prelude::*;
use std::sync::Arc;

use switchboard::commands::{
    create_all_handlers, register_global_commands, register_guild_commands, CommandRegistry,
};
use switchboard::core::Config;
use switchboard::dispatcher::Dispatcher;
use switchboard::features::error_reporting::{
    ErrorReporter, ErrorSink, ErrorTracker, LogSink, WebhookSink,
};
use switchboard::features::{cache_sweep_loop, CooldownTracker, PermissionCache};
use switchboard::interactions::gateway::{autocomplete_interaction, command_interaction};
use switchboard::interactions::InteractionEvent;

struct Handler {
    dispatcher: Arc<Dispatcher>,
    guild_id: Option<GuildId>,
}

#[async_trait]
impl EventHandler for Handler {
    async fn ready(&self, ctx: Context, ready: Ready) {
        info!("🎉 {} is connected and ready!", ready.user.name);
        info!("📡 Connected to {} guilds", ready.guilds.len());
        info!("🤖 Bot ID: {}", ready.user.id);

        if let Some(shard) = ready.shard {
            info!("⚡ Shard: {}/{}", shard[0] + 1, shard[1]);
        }

        // Guild registration is instant; global registration can take an hour
        let registered = match self.guild_id {
            Some(guild_id) => register_guild_commands(&ctx.http, guild_id).await,
            None => register_global_commands(&ctx.http).await,
        };
        if let Err(e) = registered {
            error!("❌ Failed to register application commands: {e:#}");
        }

        info!(
            "🧭 Dispatcher ready with {} commands",
            self.dispatcher.registry().len()
        );
    }

    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        let event = match interaction {
            Interaction::ApplicationCommand(command) => {
                InteractionEvent::Command(command_interaction(ctx.http.clone(), command))
            }
            Interaction::Autocomplete(autocomplete) => InteractionEvent::Autocomplete(
                autocomplete_interaction(ctx.http.clone(), autocomplete),
            ),
            other => {
                debug!("Ignoring interaction of kind {:?}", other.kind());
                return;
            }
        };

        self.dispatcher.dispatch(event).await;
    }
}

fn error_sink(config: &Config) -> Arc<dyn ErrorSink> {
    match &config.error_webhook_url {
        Some(url) => match WebhookSink::new(url.clone()) {
            Ok(sink) => {
                info!("📮 Error reports will be posted to the configured webhook");
                Arc::new(sink)
            }
            Err(e) => {
                warn!("Failed to create error webhook client: {e:#}. Falling back to log output.");
                Arc::new(LogSink)
            }
        },
        None => Arc::new(LogSink),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv().ok();

    let config = Config::from_env()?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.log_level))
        .init();

    info!("Starting Switchboard Discord Bot...");

    let mut registry = CommandRegistry::new();
    for handler in create_all_handlers() {
        registry.register(handler);
    }
    info!("📋 Registered {} commands", registry.len());

    let cooldowns = CooldownTracker::new();
    let permissions = PermissionCache::new(config.permission_cache_ttl);
    let reporter = ErrorReporter::new(ErrorTracker::new(error_sink(&config)));

    tokio::spawn(cache_sweep_loop(
        cooldowns.clone(),
        permissions.clone(),
        config.cache_sweep_interval,
    ));

    let dispatcher = Dispatcher::new(
        registry,
        cooldowns,
        permissions,
        reporter,
        config.command_cooldown,
    );

    let handler = Handler {
        dispatcher: Arc::new(dispatcher),
        guild_id: config.discord_guild_id.map(GuildId),
    };

    // Interactions arrive regardless of intents; GUILDS keeps the guild list current
    let intents = GatewayIntents::GUILDS;

    let mut client = Client::builder(&config.discord_token, intents)
        .event_handler(handler)
        .await
        .map_err(|e| {
            error!("Failed to create Discord client: {e}");
            error!("This could indicate:");
            error!("  - Invalid bot token format");
            error!("  - Network issues reaching Discord API");
            anyhow::anyhow!("Client creation failed: {}", e)
        })?;

    info!("Bot configured successfully. Connecting to Discord gateway...");
    info!("Gateway intents: {intents:?}");

    if let Err(why) = client.start().await {
        error!("Client error: {why:?}");
        return Err(anyhow::anyhow!("Discord client failed: {}", why));
    }

    Ok(())
}
