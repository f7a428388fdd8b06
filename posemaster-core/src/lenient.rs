//! Defend-and-default reading of persisted store documents.
//!
//! Store documents are read field by field. A document that is not a JSON
//! object is discarded whole; otherwise each field is decoded on its own and
//! falls back to its documented default when missing or ill-typed. Inside
//! mappings and lists, bad entries are dropped one at a time so a single
//! corrupt record does not take the rest of the document with it.

use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};

/// A decoded top-level JSON object.
pub(crate) type Document = Map<String, Value>;

/// Parse `json` as an object, logging and returning `None` otherwise.
pub(crate) fn parse_document(json: &str, kind: &str) -> Option<Document> {
    match serde_json::from_str::<Value>(json) {
        Ok(Value::Object(object)) => Some(object),
        Ok(_) => {
            tracing::warn!("{kind} document is not a JSON object, using defaults");
            None
        }
        Err(e) => {
            tracing::warn!("Failed to parse {kind} document, using defaults: {e}");
            None
        }
    }
}

/// Decode `key`, or fall back when it is missing or ill-typed.
pub(crate) fn field<T, F>(doc: &Document, key: &str, fallback: F) -> T
where
    T: DeserializeOwned,
    F: FnOnce() -> T,
{
    let Some(value) = doc.get(key) else {
        tracing::debug!("Field {key} missing, using default");
        return fallback();
    };
    match T::deserialize(value) {
        Ok(decoded) => decoded,
        Err(e) => {
            tracing::warn!("Field {key} is invalid, using default: {e}");
            fallback()
        }
    }
}

/// Decode an object-valued `key` entry by entry, dropping bad entries.
pub(crate) fn entries<T>(doc: &Document, key: &str) -> IndexMap<String, T>
where
    T: DeserializeOwned,
{
    match doc.get(key) {
        None => IndexMap::new(),
        Some(Value::Object(object)) => object
            .iter()
            .filter_map(|(name, value)| match T::deserialize(value) {
                Ok(decoded) => Some((name.clone(), decoded)),
                Err(e) => {
                    tracing::warn!("Dropping invalid {key} entry {name}: {e}");
                    None
                }
            })
            .collect(),
        Some(_) => {
            tracing::warn!("Field {key} is not an object, using default");
            IndexMap::new()
        }
    }
}

/// Decode an array-valued `key` item by item, dropping bad items.
pub(crate) fn list<T>(doc: &Document, key: &str) -> Vec<T>
where
    T: DeserializeOwned,
{
    match doc.get(key) {
        None => Vec::new(),
        Some(Value::Array(items)) => items
            .iter()
            .enumerate()
            .filter_map(|(i, value)| match T::deserialize(value) {
                Ok(decoded) => Some(decoded),
                Err(e) => {
                    tracing::warn!("Dropping invalid {key} item {i}: {e}");
                    None
                }
            })
            .collect(),
        Some(_) => {
            tracing::warn!("Field {key} is not an array, using default");
            Vec::new()
        }
    }
}
