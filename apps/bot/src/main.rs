use std::sync::Arc;

use anyhow::{Context, Result};
use bot::{
    Data,
    broadcast::run_broadcast,
    command::{bot_commands, handle_message},
    config::Config,
    subscribers::SubscriberRegistry,
    transport::Messenger,
};
use market::{PriceClient, PriceSource};
use teloxide::{prelude::*, types::BotCommand};
use tokio_cron_scheduler::{Job, JobScheduler};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;

    let prices: Arc<dyn PriceSource> =
        Arc::new(PriceClient::from_env().context("init price client failed")?);
    let subscribers = Arc::new(SubscriberRegistry::new());

    let bot = Bot::new(&config.telegram_token);
    let me = bot
        .get_me()
        .await
        .context("telegram rejected the bot token")?;
    info!("{} [{}] connected successfully!", me.username(), me.id);

    if let Err(e) = register_bot_commands(&bot).await {
        warn!(error = %e, "failed to register bot commands");
    }

    let sched = JobScheduler::new()
        .await
        .context("failed to create job scheduler")?;

    let messenger_job: Arc<dyn Messenger> = Arc::new(bot.clone());
    let prices_job = Arc::clone(&prices);
    let subscribers_job = Arc::clone(&subscribers);

    sched
        .add(Job::new_async_tz(
            config.broadcast_cron.as_str(),
            config.broadcast_tz,
            move |_uuid, _l| {
                let messenger = Arc::clone(&messenger_job);
                let prices = Arc::clone(&prices_job);
                let subscribers = Arc::clone(&subscribers_job);

                Box::pin(async move {
                    if let Err(e) = run_broadcast(messenger, prices, subscribers).await {
                        error!("run_broadcast failed: {:?}", e);
                    }
                })
            },
        )?)
        .await?;

    sched.shutdown_on_ctrl_c();
    sched.start().await?;
    info!(
        cron = %config.broadcast_cron,
        tz = %config.broadcast_tz,
        "price broadcast scheduled"
    );

    let data = Arc::new(Data {
        subscribers,
        prices,
    });

    tokio::spawn(async move {
        teloxide::repl(bot, move |bot: Bot, msg: Message| {
            let data = Arc::clone(&data);
            async move {
                if let Err(e) = handle_message(&data, &bot, msg.chat.id, msg.text()).await {
                    error!(chat_id = msg.chat.id.0, error = ?e, "failed to answer message");
                }
                respond(())
            }
        })
        .await;
    });

    shutdown_signal().await;

    info!("Shutdown complete.");
    Ok(())
}

async fn register_bot_commands(bot: &Bot) -> Result<(), teloxide::RequestError> {
    let commands: Vec<BotCommand> = bot_commands()
        .into_iter()
        .map(|(cmd, desc)| BotCommand::new(cmd, desc))
        .collect();

    bot.set_my_commands(commands).await?;
    info!("registered bot commands");
    Ok(())
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::{
            select,
            signal::unix::{SignalKind, signal},
        };
        let mut sigterm =
            signal(SignalKind::terminate()).expect("failed to install SIGTERM handler");
        let mut sigint = signal(SignalKind::interrupt()).expect("failed to install SIGINT handler");
        select! {
            _ = sigterm.recv() => {},
            _ = sigint.recv()  => {},
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}
