//! Routing of inbound chat text to the bot's behaviours.
//!
//! Commands are matched in a fixed priority order and the first match wins.
//! Anything unrecognised, including messages without text, gets no reply.

mod price;
mod subscription;

use std::sync::LazyLock;

use anyhow::Result;
use market::Chain;
use regex::Regex;
use teloxide::types::ChatId;
use tracing::{debug, trace};

use crate::{Data, transport::Messenger};

static START: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"/start").expect("valid regex"));
static STOP: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"/stop").expect("valid regex"));
static AVAX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"/avax").expect("valid regex"));
static PRICE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"/price (avalanche|ethereum|solana|bitcoin)").expect("valid regex")
});
static PRICES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"/prices").expect("valid regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    Stop,
    Avax,
    Price(Chain),
    Prices,
    /// Bare chain name, e.g. a keyboard button press.
    Plain(Chain),
}

impl Command {
    pub fn parse(text: &str) -> Option<Self> {
        if START.is_match(text) {
            return Some(Command::Start);
        }
        if STOP.is_match(text) {
            return Some(Command::Stop);
        }
        if AVAX.is_match(text) {
            return Some(Command::Avax);
        }
        if let Some(caps) = PRICE.captures(text) {
            return caps[1].parse().ok().map(Command::Price);
        }
        if PRICES.is_match(text) {
            return Some(Command::Prices);
        }
        Chain::from_text(text).map(Command::Plain)
    }
}

/// Command menu shown by Telegram clients.
pub fn bot_commands() -> Vec<(&'static str, &'static str)> {
    vec![
        ("start", "Subscribe to hourly prices notifications."),
        ("stop", "Stop receiving price notifications."),
        (
            "prices",
            "Choose from options which chain price you want to receive.",
        ),
        (
            "price",
            "Type chain name and receive price (avalanche, solana, bitcoin, ethereum).",
        ),
    ]
}

pub async fn handle_message(
    data: &Data,
    messenger: &dyn Messenger,
    chat: ChatId,
    text: Option<&str>,
) -> Result<()> {
    let Some(text) = text else {
        trace!(chat_id = chat.0, "ignoring message without text");
        return Ok(());
    };

    let Some(command) = Command::parse(text) else {
        trace!(chat_id = chat.0, "no command matched");
        return Ok(());
    };

    debug!(chat_id = chat.0, ?command, "dispatching");

    match command {
        Command::Start => subscription::start(data, messenger, chat).await,
        Command::Stop => subscription::stop(data, messenger, chat).await,
        Command::Avax => price::single(data, messenger, chat, Chain::Avalanche).await,
        Command::Price(chain) | Command::Plain(chain) => {
            price::single(data, messenger, chat, chain).await
        }
        Command::Prices => price::menu(messenger, chat).await,
    }
}
