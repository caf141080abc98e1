//! Serde helpers for monetary amounts.
//!
//! The backend serializes decimal columns as strings (`"1250.00"`), older endpoints as
//! JSON numbers, and nullable columns as `null`. All three land in an `f64`.

use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum RawAmount {
    Number(f64),
    Text(String),
}

fn parse<E: serde::de::Error>(raw: RawAmount) -> Result<f64, E> {
    match raw {
        RawAmount::Number(value) => Ok(value),
        RawAmount::Text(text) if text.trim().is_empty() => Ok(0.0),
        RawAmount::Text(text) => text
            .trim()
            .parse::<f64>()
            .map_err(|e| E::custom(format!("invalid decimal amount '{text}': {e}"))),
    }
}

/// Deserializes a required amount; `null` becomes `0.0`.
pub fn deserialize<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<RawAmount>::deserialize(deserializer)?.map_or(Ok(0.0), parse::<D::Error>)
}

/// Deserializes an optional amount, keeping `null` as `None`.
pub fn deserialize_option<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<RawAmount>::deserialize(deserializer)?
        .map(parse::<D::Error>)
        .transpose()
}
