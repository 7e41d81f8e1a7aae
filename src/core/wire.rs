use serde::Deserialize;
use serde_json::Value;

use super::models::Record;

/// Body shape shared by every REST endpoint: `{result, message, data: [...], params: {...}}`.
/// Only `data` is consumed on success.
#[derive(Debug, Deserialize)]
pub(crate) struct Envelope {
    pub(crate) data: Option<Vec<Record>>,
}

/// Lenient view of an error body. Missing or null fields become `None`; non-string
/// values are kept as their JSON text.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default, deserialize_with = "string_or_none")]
    pub(crate) result: Option<String>,
    #[serde(default, deserialize_with = "string_or_none")]
    pub(crate) message: Option<String>,
}

fn string_or_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    })
}
