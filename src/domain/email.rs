use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Inbound message fields as received on stdin. Every field is optional and
/// coerced to text; nothing here is validated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct EmailInput {
    #[serde(default, deserialize_with = "lenient_string")]
    pub subject: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub body: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub sender: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DraftRequest {
    #[serde(default, deserialize_with = "lenient_string")]
    pub body: String,
    #[serde(default = "default_priority_label", deserialize_with = "lenient_label")]
    pub priority: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct FeedbackRequest {
    #[serde(default, deserialize_with = "lenient_strings")]
    pub texts: Vec<String>,
    #[serde(default, deserialize_with = "lenient_strings")]
    pub labels: Vec<String>,
}

impl Default for DraftRequest {
    fn default() -> Self {
        Self {
            body: String::new(),
            priority: default_priority_label(),
        }
    }
}

fn default_priority_label() -> String {
    "normal".to_string()
}

fn coerce(value: Value) -> String {
    match value {
        Value::String(text) => text,
        Value::Number(number) => number.to_string(),
        Value::Bool(flag) => flag.to_string(),
        _ => String::new(),
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(coerce(Value::deserialize(deserializer)?))
}

fn lenient_label<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(default_priority_label()),
        other => Ok(coerce(other)),
    }
}

fn lenient_strings<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Array(items) => Ok(items.into_iter().map(coerce).collect()),
        _ => Ok(Vec::new()),
    }
}

/// Parses a request body, treating anything that is not a JSON object as `{}`.
pub fn parse_request<T>(raw: &str) -> T
where
    T: for<'de> Deserialize<'de> + Default,
{
    let value = match serde_json::from_str::<Value>(raw) {
        Ok(value @ Value::Object(_)) => value,
        Ok(_) => {
            tracing::warn!(target: "input", "request is not a JSON object; using defaults");
            return T::default();
        }
        Err(err) => {
            tracing::warn!(target: "input", error = %err, "malformed request JSON; using defaults");
            return T::default();
        }
    };

    serde_json::from_value(value).unwrap_or_else(|err| {
        tracing::warn!(target: "input", error = %err, "request fields rejected; using defaults");
        T::default()
    })
}
