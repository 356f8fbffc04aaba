//! charge amounts are written with a leading currency symbol and two
//! decimal places, e.g. `$3.25`.
use rust_decimal::Decimal;
use serde::{de::Error, Deserialize, Deserializer, Serializer};
use std::str::FromStr;

pub const CURRENCY_SYMBOL: &str = "$";

pub fn format_currency(amount: &Decimal) -> String {
    let mut rounded = amount.round_dp(2);
    rounded.rescale(2);
    format!("{CURRENCY_SYMBOL}{rounded}")
}

pub fn parse_currency(value: &str) -> Result<Decimal, rust_decimal::Error> {
    let trimmed = value.trim();
    let digits = trimmed.strip_prefix(CURRENCY_SYMBOL).unwrap_or(trimmed);
    Decimal::from_str(digits.trim())
}

pub fn serialize_currency<S>(amount: &Decimal, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format_currency(amount))
}

pub fn deserialize_currency<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let amount_str: String = String::deserialize(deserializer)?;
    parse_currency(&amount_str)
        .map_err(|e| D::Error::custom(format!("Invalid charge amount '{amount_str}': {e}")))
}
