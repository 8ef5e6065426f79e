use anyhow::Result;
use market::Chain;
use teloxide::types::ChatId;
use tracing::{error, info};

use crate::{
    Data,
    transport::{Messenger, Reply},
};

const MENU_PROMPT: &str = "Please select chain:";
const FETCH_FAILED: &str = "Could not fetch prices right now, please try again later.";

pub async fn single(
    data: &Data,
    messenger: &dyn Messenger,
    chat: ChatId,
    chain: Chain,
) -> Result<()> {
    info!(chat_id = chat.0, %chain, "price requested");

    let reply = match data.prices.prices(&[chain]).await {
        Ok(message) => Reply::Html(message),
        Err(e) => {
            error!(chat_id = chat.0, %chain, error = ?e, "fetch prices failed");
            Reply::Text(FETCH_FAILED.into())
        }
    };

    messenger.send(chat, reply).await
}

pub async fn menu(messenger: &dyn Messenger, chat: ChatId) -> Result<()> {
    messenger
        .send(
            chat,
            Reply::ChainMenu {
                prompt: MENU_PROMPT.into(),
            },
        )
        .await
}
