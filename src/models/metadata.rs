//! Represents a metadata record as served by the `/metadata` resource, plus the
//! write-only shapes sent back to it.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Status code the backend uses for records in the active set.
pub const STATUS_ACTIVE: &str = "A";
/// Status code the backend uses for records in the inactive set.
pub const STATUS_INACTIVE: &str = "I";

/// One analyzed content item.
///
/// `feeds` and `authors` are held as serialized JSON text. The backend may send
/// them either as strings or as JSON arrays; both land here as text.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct MetadataRecord {
    /// Backend-assigned identifier.
    pub id: i64,

    #[serde(default)]
    pub title: String,

    /// Combined date and time, e.g. `2024-05-01T10:30` or `2024-05-01T10:30:00`.
    #[serde(default)]
    pub publication_date: String,

    #[serde(default)]
    pub image_url: String,

    /// Serialized list of `{link, ...}` entries.
    #[serde(default, deserialize_with = "text_or_json")]
    pub feeds: String,

    /// Serialized list of `{name, ...}` entries.
    #[serde(default, deserialize_with = "text_or_json")]
    pub authors: String,

    /// Status short code (`"A"` or `"I"`).
    #[serde(default)]
    pub active: String,
}

impl MetadataRecord {
    pub fn is_active(&self) -> bool {
        self.active.eq_ignore_ascii_case(STATUS_ACTIVE)
    }
}

/// Body of `POST /analyze`.
///
/// The backend derives the full record from `url`; `features` is always sent
/// as an empty metadata bag.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct CreateMetadataRequest {
    pub url: String,
    pub features: Features,
}

impl CreateMetadataRequest {
    pub fn for_url(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            features: Features::default(),
        }
    }
}

/// Feature bag requested from the analyzer.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
pub struct Features {
    #[serde(default)]
    pub metadata: Map<String, Value>,
}

/// A single entry of a record's `feeds` list.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct FeedEntry {
    pub link: String,

    /// Any other fields the backend attached; sent back untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A single entry of a record's `authors` list.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct AuthorEntry {
    #[serde(default)]
    pub name: String,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Body of `PUT /{id}`: the full record with its lists in structured form.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MetadataUpdate {
    pub id: i64,
    pub title: String,
    pub publication_date: String,
    pub image_url: String,
    pub feeds: Vec<FeedEntry>,
    pub authors: Vec<AuthorEntry>,
    pub active: String,
}

/// Accept either a JSON string or any other JSON value, keeping the latter as
/// its compact serialized text.
fn text_or_json<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(String::new()),
        Value::String(text) => Ok(text),
        other => Ok(other.to_string()),
    }
}
