use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Unit id used when a question does not carry one.
pub const UNKNOWN_UNIT: &str = "unknown";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    #[serde(
        default,
        deserialize_with = "optional_identifier",
        skip_serializing_if = "Option::is_none"
    )]
    pub unit: Option<String>,
    #[serde(default, deserialize_with = "text_or_empty")]
    pub question: String,
    #[serde(rename = "bloomsLevel", default, deserialize_with = "text_or_empty")]
    pub blooms_level: String,
    #[serde(default, deserialize_with = "text_or_empty")]
    pub answer: String,
}

impl Question {
    pub fn unit_id(&self) -> &str {
        self.unit.as_deref().unwrap_or(UNKNOWN_UNIT)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unit {
    #[serde(default, deserialize_with = "text_or_empty")]
    pub unit: String,
    #[serde(default, deserialize_with = "list_or_empty")]
    pub questions: Vec<Question>,
}

/// Response body of the backend `view` endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuredData {
    #[serde(rename = "structuredData", default, deserialize_with = "list_or_empty")]
    pub structured_data: Vec<Unit>,
}

impl StructuredData {
    /// Accepts either the `{ "structuredData": [...] }` envelope or a bare unit list.
    pub fn from_json_slice(bytes: &[u8]) -> serde_json::Result<Vec<Unit>> {
        let value: Value = serde_json::from_slice(bytes)?;
        if value.is_array() {
            return serde_json::from_value(value);
        }

        let envelope: StructuredData = serde_json::from_value(value)?;
        Ok(envelope.structured_data)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Partition {
    #[serde(rename = "partA")]
    pub part_a: Vec<Question>,
    #[serde(rename = "partB")]
    pub part_b: Vec<Question>,
}

impl Partition {
    pub fn sections(&self) -> [(&'static str, &[Question]); 2] {
        [
            ("Part A:", self.part_a.as_slice()),
            ("Part B:", self.part_b.as_slice()),
        ]
    }

    pub fn is_empty(&self) -> bool {
        self.part_a.is_empty() && self.part_b.is_empty()
    }
}

/// Anything other than a JSON array (missing, `null`, `false`, a string, an object)
/// reads as an empty list.
fn list_or_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    match Option::<Value>::deserialize(deserializer)? {
        Some(items @ Value::Array(_)) => serde_json::from_value(items).map_err(D::Error::custom),
        _ => Ok(Vec::new()),
    }
}

fn text_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(optional_identifier(deserializer)?.unwrap_or_default())
}

fn optional_identifier<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => None,
        Some(Value::String(text)) => Some(text),
        Some(other) => Some(other.to_string()),
    })
}
