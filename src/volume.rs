//! Raw volume payloads as the catalog provider sends them.
//!
//! Every field is optional and decoded leniently: a field of the wrong JSON
//! type is read as absent instead of failing the whole document.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RawCatalogItem {
    #[serde(default, deserialize_with = "lenient")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub volume_info: Option<VolumeInfo>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VolumeInfo {
    #[serde(default, deserialize_with = "lenient")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "string_list")]
    pub authors: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient")]
    pub published_date: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub image_links: Option<ImageLinks>,
    #[serde(default, deserialize_with = "lenient")]
    pub average_rating: Option<f64>,
    #[serde(default, deserialize_with = "count")]
    pub ratings_count: Option<u64>,
    #[serde(default, deserialize_with = "count")]
    pub page_count: Option<u64>,
    #[serde(default, deserialize_with = "string_list")]
    pub categories: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient")]
    pub publisher: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub language: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub preview_link: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub info_link: Option<String>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ImageLinks {
    #[serde(default, deserialize_with = "lenient")]
    pub small_thumbnail: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub thumbnail: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub small: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub medium: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub large: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub extra_large: Option<String>,
}

/// Body of a volume search. Elements that are not objects stay `None` so the
/// result keeps one entry per upstream element.
#[derive(Deserialize, Debug, Default)]
pub struct VolumeList {
    #[serde(default, deserialize_with = "item_list")]
    pub items: Vec<Option<RawCatalogItem>>,
}

impl RawCatalogItem {
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(_) => serde_json::from_value(value).ok(),
            _ => None,
        }
    }
}

fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| serde_json::from_value(v).ok()))
}

/// Non-negative JSON number, whole or not; fractions are truncated.
fn count<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let n = match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(n)) => n,
        _ => return Ok(None),
    };
    Ok(n.as_u64().or_else(|| {
        n.as_f64()
            .filter(|f| f.is_finite() && *f >= 0.0)
            .map(|f| f.trunc() as u64)
    }))
}

fn string_list<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let list = match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Array(values)) => values
            .into_iter()
            .filter_map(|v| match v {
                Value::String(s) => Some(s),
                _ => None,
            })
            .collect(),
        _ => return Ok(None),
    };
    Ok(Some(list))
}

fn item_list<'de, D>(deserializer: D) -> Result<Vec<Option<RawCatalogItem>>, D::Error>
where
    D: Deserializer<'de>,
{
    let items = match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Array(values)) => values.into_iter().map(RawCatalogItem::from_value).collect(),
        _ => vec![],
    };
    Ok(items)
}
