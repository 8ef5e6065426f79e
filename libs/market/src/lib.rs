mod chain;
mod price_client;
mod quote;

pub use chain::{Chain, join_slugs};
pub use price_client::{DEFAULT_QUOTES_URL, PriceClient, PriceSource};
pub use quote::{Quote, QuotesResponse, format_prices};
