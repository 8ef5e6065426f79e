use std::sync::Arc;

use anyhow::{Context, Result};
use futures::{StreamExt, stream};
use market::{Chain, PriceSource};
use tracing::{debug, info, instrument, warn};
use tracing_futures::Instrument;

use crate::{
    subscribers::SubscriberRegistry,
    transport::{Messenger, Reply},
};

const CONCURRENCY: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BroadcastReport {
    pub recipients: usize,
    pub delivered: usize,
    pub failed: usize,
}

/// Fetch every supported chain once and push the result to all active chats.
///
/// A failed fetch aborts the run before anything is sent. A failed send only
/// skips that chat.
#[instrument(name = "run_broadcast", skip_all)]
pub async fn run_broadcast(
    messenger: Arc<dyn Messenger>,
    prices: Arc<dyn PriceSource>,
    subscribers: Arc<SubscriberRegistry>,
) -> Result<BroadcastReport> {
    let message = prices
        .prices(&Chain::ALL)
        .await
        .context("fetch broadcast prices")?;

    let recipients = subscribers.active();
    info!(
        recipients = recipients.len(),
        known = subscribers.len(),
        "broadcasting prices"
    );

    let mut report = BroadcastReport {
        recipients: recipients.len(),
        ..Default::default()
    };

    let mut sends = stream::iter(recipients)
        .map(|chat| {
            let messenger = Arc::clone(&messenger);
            let reply = Reply::Html(message.clone());
            let span = tracing::info_span!("broadcast_chat", chat_id = chat.0);

            async move {
                let res = messenger.send(chat, reply).await;
                if let Err(e) = &res {
                    warn!(error = ?e, "send failed");
                } else {
                    debug!("sent");
                }
                res
            }
            .instrument(span)
        })
        .buffer_unordered(CONCURRENCY);

    while let Some(res) = sends.next().await {
        match res {
            Ok(()) => report.delivered += 1,
            Err(_) => report.failed += 1,
        }
    }

    info!(
        delivered = report.delivered,
        failed = report.failed,
        "completed broadcast"
    );

    Ok(report)
}
