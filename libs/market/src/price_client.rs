use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use reqwest::{
    Client,
    header::{HeaderMap, HeaderValue},
};
use tracing::debug;

use crate::{
    chain::{Chain, join_slugs},
    quote::{Quote, QuotesResponse, format_prices},
};

pub const DEFAULT_QUOTES_URL: &str =
    "https://pro-api.coinmarketcap.com/v2/cryptocurrency/quotes/latest";

/// Anything that can turn a set of chains into quotes.
#[async_trait]
pub trait PriceSource: Send + Sync {
    async fn fetch_quotes(&self, chains: &[Chain]) -> Result<Vec<Quote>>;

    /// Fetch and render as the HTML price message.
    async fn prices(&self, chains: &[Chain]) -> Result<String> {
        let quotes = self.fetch_quotes(chains).await?;
        Ok(format_prices(&quotes))
    }
}

#[derive(Clone)]
pub struct PriceClient {
    client: Client,
    endpoint: String,
}

impl PriceClient {
    pub fn new(endpoint: String, api_key: &str) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            "X-CMC_PRO_API_KEY",
            HeaderValue::from_str(api_key).context("invalid quote API key")?,
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self { client, endpoint })
    }

    /// Expects COINMARKETCAP_API_KEY; COINMARKETCAP_API_URL overrides the endpoint.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("COINMARKETCAP_API_KEY").unwrap_or_default();
        if api_key.trim().is_empty() {
            bail!("COINMARKETCAP_API_KEY environment variable not set");
        }
        let endpoint = std::env::var("COINMARKETCAP_API_URL")
            .ok()
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_QUOTES_URL.to_string());

        Self::new(endpoint, api_key.trim())
    }
}

#[async_trait]
impl PriceSource for PriceClient {
    async fn fetch_quotes(&self, chains: &[Chain]) -> Result<Vec<Quote>> {
        let slugs = join_slugs(chains);
        debug!(slug = %slugs, "requesting quotes");

        let res: QuotesResponse = self
            .client
            .get(&self.endpoint)
            .query(&[("slug", slugs.as_str())])
            .send()
            .await
            .context("quote API: request failed")?
            .error_for_status()
            .context("quote API: non-success status")?
            .json()
            .await
            .context("quote API: unexpected response body")?;

        debug!(quotes = res.data.len(), "received quotes");
        Ok(res.data)
    }
}
