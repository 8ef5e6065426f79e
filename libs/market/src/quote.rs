use std::fmt::{self, Write};

use serde::{
    Deserialize, Deserializer,
    de::{IgnoredAny, MapAccess, Visitor},
};

const HEADER: &str = "<u><b>Prices:</b></u>\n\n";

/// One asset's latest USD quote.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "RawQuote")]
pub struct Quote {
    pub symbol: String,
    pub price: f64,
    pub percent_change_24h: f64,
}

//
// Match CoinMarketCap quotes/latest JSON
// https://coinmarketcap.com/api/documentation/v1/#operation/getV2CryptocurrencyQuotesLatest
//
#[derive(Debug, Deserialize)]
pub struct QuotesResponse {
    #[serde(deserialize_with = "values_in_order")]
    pub data: Vec<Quote>,
}

#[derive(Deserialize)]
struct RawQuote {
    symbol: String,
    quote: RawCurrencies,
}

#[derive(Deserialize)]
struct RawCurrencies {
    #[serde(rename = "USD")]
    usd: UsdQuote,
}

#[derive(Deserialize)]
struct UsdQuote {
    price: f64,
    percent_change_24h: f64,
}

impl From<RawQuote> for Quote {
    fn from(raw: RawQuote) -> Self {
        Self {
            symbol: raw.symbol,
            price: raw.quote.usd.price,
            percent_change_24h: raw.quote.usd.percent_change_24h,
        }
    }
}

/// `data` is an object keyed by id; keep its values in document order.
fn values_in_order<'de, D>(deserializer: D) -> Result<Vec<Quote>, D::Error>
where
    D: Deserializer<'de>,
{
    struct Values;

    impl<'de> Visitor<'de> for Values {
        type Value = Vec<Quote>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("an object of quote records")
        }

        fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut quotes = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some((_, quote)) = map.next_entry::<IgnoredAny, Quote>()? {
                quotes.push(quote);
            }
            Ok(quotes)
        }
    }

    deserializer.deserialize_map(Values)
}

/// Render quotes as a Telegram HTML message.
pub fn format_prices(quotes: &[Quote]) -> String {
    let mut message = String::from(HEADER);
    for quote in quotes {
        let _ = writeln!(
            message,
            "<b>{}:</b> {} (24h change: {}%)",
            quote.symbol,
            to_fixed_2(quote.price),
            to_fixed_2(quote.percent_change_24h)
        );
    }
    message
}

/// Two decimals, exact ties rounded away from zero, `-0` shown as `0.00`.
fn to_fixed_2(x: f64) -> String {
    if x.is_nan() {
        return "NaN".into();
    }
    if x.is_infinite() {
        return if x > 0.0 { "Infinity" } else { "-Infinity" }.into();
    }

    let sign = if x < 0.0 { "-" } else { "" };
    let abs = x.abs();

    // Only odd multiples of 1/8 land exactly halfway between two hundredths.
    let tie = (abs * 8.0).fract() == 0.0 && (abs * 4.0).fract() != 0.0;
    if tie {
        let eighths = (abs * 8.0) as u128;
        let hundredths = eighths * 25 / 2 + 1;
        format!("{sign}{}.{:02}", hundredths / 100, hundredths % 100)
    } else {
        format!("{sign}{abs:.2}")
    }
}
