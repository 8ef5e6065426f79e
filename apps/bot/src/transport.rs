use anyhow::Result;
use async_trait::async_trait;
use market::Chain;
use teloxide::{
    prelude::*,
    types::{KeyboardButton, KeyboardMarkup, ParseMode},
};

/// Outbound message, independent of the chat backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Text(String),
    Html(String),
    /// Prompt plus the two-per-row chain keyboard.
    ChainMenu { prompt: String },
}

#[async_trait]
pub trait Messenger: Send + Sync {
    async fn send(&self, chat: ChatId, reply: Reply) -> Result<()>;
}

pub fn chain_keyboard() -> KeyboardMarkup {
    let rows: Vec<Vec<KeyboardButton>> = Chain::ALL
        .chunks(2)
        .map(|pair| {
            pair.iter()
                .map(|chain| KeyboardButton::new(chain.label()))
                .collect()
        })
        .collect();

    KeyboardMarkup::new(rows)
        .resize_keyboard()
        .one_time_keyboard()
}

#[async_trait]
impl Messenger for Bot {
    async fn send(&self, chat: ChatId, reply: Reply) -> Result<()> {
        match reply {
            Reply::Text(text) => {
                self.send_message(chat, text).await?;
            }
            Reply::Html(html) => {
                self.send_message(chat, html)
                    .parse_mode(ParseMode::Html)
                    .await?;
            }
            Reply::ChainMenu { prompt } => {
                self.send_message(chat, prompt)
                    .reply_markup(chain_keyboard())
                    .await?;
            }
        }
        Ok(())
    }
}
