use std::sync::Arc;

use market::PriceSource;
use subscribers::SubscriberRegistry;

pub mod broadcast;
pub mod command;
pub mod config;
pub mod subscribers;
pub mod transport;

#[cfg(test)]
mod testing;

pub struct Data {
    pub subscribers: Arc<SubscriberRegistry>,
    pub prices: Arc<dyn PriceSource>,
}
