use anyhow::Result;
use teloxide::types::ChatId;
use tracing::info;

use crate::{
    Data,
    transport::{Messenger, Reply},
};

const SUBSCRIBED: &str = "You have successfully subscribed to CryptoPriceFetch bot!";
const UNSUBSCRIBED: &str = "You have successfully unsubscribed from CryptoPriceFetch bot!";

pub async fn start(data: &Data, messenger: &dyn Messenger, chat: ChatId) -> Result<()> {
    data.subscribers.set_subscribed(chat, true);
    info!(chat_id = chat.0, "subscribed");

    messenger.send(chat, Reply::Text(SUBSCRIBED.into())).await
}

pub async fn stop(data: &Data, messenger: &dyn Messenger, chat: ChatId) -> Result<()> {
    data.subscribers.set_subscribed(chat, false);
    info!(chat_id = chat.0, "unsubscribed");

    messenger.send(chat, Reply::Text(UNSUBSCRIBED.into())).await
}
