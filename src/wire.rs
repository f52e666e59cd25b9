use serde::{Deserialize, Deserializer};
use serde_json::Value as JsonValue;

/// Error body shape used by the backend: `{"detail": ...}`.
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    /// `Some` whenever the key is present, including `"detail": null`.
    #[serde(default, deserialize_with = "present")]
    pub detail: Option<JsonValue>,
}

impl ErrorBody {
    /// Parses an error body, yielding `None` when it is not a JSON object.
    pub fn parse(body: &str) -> Option<Self> {
        serde_json::from_str(body).ok()
    }
}

fn present<'de, D>(deserializer: D) -> Result<Option<JsonValue>, D::Error>
where
    D: Deserializer<'de>,
{
    JsonValue::deserialize(deserializer).map(Some)
}
