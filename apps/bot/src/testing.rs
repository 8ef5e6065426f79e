//! In-memory doubles for the chat backend and the quote API.

use std::sync::Mutex;

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use market::{Chain, PriceSource, Quote};
use teloxide::types::ChatId;

use crate::transport::{Messenger, Reply};

pub fn quote(symbol: &str, price: f64, change: f64) -> Quote {
    Quote {
        symbol: symbol.into(),
        price,
        percent_change_24h: change,
    }
}

#[derive(Default)]
pub struct RecordingMessenger {
    sent: Mutex<Vec<(ChatId, Reply)>>,
    fail_for: Vec<ChatId>,
}

impl RecordingMessenger {
    /// Sends to any of `chats` fail without being recorded.
    pub fn failing_for(chats: Vec<ChatId>) -> Self {
        Self {
            sent: Mutex::default(),
            fail_for: chats,
        }
    }

    pub fn sent(&self) -> Vec<(ChatId, Reply)> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Messenger for RecordingMessenger {
    async fn send(&self, chat: ChatId, reply: Reply) -> Result<()> {
        if self.fail_for.contains(&chat) {
            return Err(anyhow!("chat {} blocked the bot", chat.0));
        }
        self.sent.lock().unwrap().push((chat, reply));
        Ok(())
    }
}

#[derive(Default)]
pub struct StaticPrices {
    quotes: Vec<Quote>,
    fail: bool,
    requests: Mutex<Vec<Vec<Chain>>>,
}

impl StaticPrices {
    pub fn new(quotes: Vec<Quote>) -> Self {
        Self {
            quotes,
            ..Default::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn requests(&self) -> Vec<Vec<Chain>> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl PriceSource for StaticPrices {
    async fn fetch_quotes(&self, chains: &[Chain]) -> Result<Vec<Quote>> {
        self.requests.lock().unwrap().push(chains.to_vec());
        if self.fail {
            return Err(anyhow!("quote API: request failed"));
        }
        Ok(self.quotes.clone())
    }
}
