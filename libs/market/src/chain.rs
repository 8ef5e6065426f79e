use std::{fmt, str::FromStr};

use anyhow::{Error, bail};

/// Supported chains, identified by their CoinMarketCap slug.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Chain {
    Avalanche,
    Ethereum,
    Solana,
    Bitcoin,
}

impl Chain {
    /// Broadcast set, in keyboard order.
    pub const ALL: [Chain; 4] = [
        Chain::Avalanche,
        Chain::Solana,
        Chain::Bitcoin,
        Chain::Ethereum,
    ];

    pub fn slug(&self) -> &'static str {
        match self {
            Chain::Avalanche => "avalanche",
            Chain::Ethereum => "ethereum",
            Chain::Solana => "solana",
            Chain::Bitcoin => "bitcoin",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Chain::Avalanche => "Avalanche",
            Chain::Ethereum => "Ethereum",
            Chain::Solana => "Solana",
            Chain::Bitcoin => "Bitcoin",
        }
    }

    /// Case-insensitive match of a whole message against a slug.
    pub fn from_text(text: &str) -> Option<Self> {
        text.to_lowercase().parse().ok()
    }
}

impl FromStr for Chain {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "avalanche" => Ok(Chain::Avalanche),
            "ethereum" => Ok(Chain::Ethereum),
            "solana" => Ok(Chain::Solana),
            "bitcoin" => Ok(Chain::Bitcoin),
            other => bail!("unsupported chain: {other}"),
        }
    }
}

impl fmt::Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

/// Comma-joined slugs for the `slug` query parameter. Duplicates are kept.
pub fn join_slugs(chains: &[Chain]) -> String {
    chains
        .iter()
        .map(Chain::slug)
        .collect::<Vec<_>>()
        .join(",")
}
