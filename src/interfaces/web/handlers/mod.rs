pub(crate) mod channels;
pub(crate) mod sessions;
pub(crate) mod status;

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Channel references arrive as either JSON numbers or strings; the
/// store keeps them as strings and normalization happens at poll time.
pub(crate) fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number, got {other}"
        ))),
    }
}
