//! serde helpers for timestamps in tap and trip files, which use
//! dd-mm-yyyy HH:MM:SS format.
use chrono::NaiveDateTime;
use serde::{de::Error, Deserialize, Deserializer, Serializer};

pub const TAP_DATETIME_FORMAT: &str = "%d-%m-%Y %H:%M:%S";

pub fn parse_naive_datetime(value: &str) -> Result<NaiveDateTime, chrono::ParseError> {
    NaiveDateTime::parse_from_str(value.trim(), TAP_DATETIME_FORMAT)
}

pub fn deserialize_naive_datetime<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let datetime_str: String = String::deserialize(deserializer)?;
    parse_naive_datetime(&datetime_str)
        .map_err(|e| D::Error::custom(format!("Invalid datetime '{datetime_str}': {e}")))
}

pub fn deserialize_optional_naive_datetime<'de, D>(
    deserializer: D,
) -> Result<Option<NaiveDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    let datetime_str: String = String::deserialize(deserializer)?;
    if datetime_str.trim().is_empty() {
        return Ok(None);
    }
    parse_naive_datetime(&datetime_str)
        .map(Some)
        .map_err(|e| D::Error::custom(format!("Invalid datetime '{datetime_str}': {e}")))
}

pub fn serialize_naive_datetime<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&value.format(TAP_DATETIME_FORMAT).to_string())
}

pub fn serialize_optional_naive_datetime<S>(
    value: &Option<NaiveDateTime>,
    serializer: S,
) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some(datetime) => serialize_naive_datetime(datetime, serializer),
        None => serializer.serialize_none(),
    }
}
