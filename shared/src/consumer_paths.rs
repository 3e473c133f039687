//! Codec for the multiplex query parameter.
//!
//! The paths of all non-primary consumers are carried in a single query
//! parameter of the root location, encoded as a JSON object literal mapping
//! consumer id to path string. Key order is insertion order: existing keys
//! keep their position, new keys are appended at the end.

use serde_json::{Map, Value};

use crate::location::ConsumerId;

/// Returns the path stored for the given consumer, if any.
///
/// Malformed input and non-string entries are treated as absent.
pub fn get_consumer_path(consumer_paths: &str, consumer_id: &ConsumerId) -> Option<String> {
    parse(Some(consumer_paths))
        .get(consumer_id.as_str())
        .and_then(Value::as_str)
        .map(str::to_owned)
}

/// Sets or overwrites the path stored for the given consumer and
/// re-serializes the map.
pub fn add_consumer_path(
    consumer_paths: Option<&str>,
    consumer_id: &ConsumerId,
    path: &str,
) -> String {
    let mut paths = parse(consumer_paths);
    paths.insert(
        consumer_id.as_str().to_owned(),
        Value::String(path.to_owned()),
    );

    serialize(paths)
}

/// Removes the entry for the given consumer. Returns `None` when the
/// resulting map is empty, signalling that no parameter is needed at all.
pub fn remove_consumer_path(
    consumer_paths: Option<&str>,
    consumer_id: &ConsumerId,
) -> Option<String> {
    let mut paths = parse(consumer_paths);
    paths.shift_remove(consumer_id.as_str());

    if paths.is_empty() {
        None
    } else {
        Some(serialize(paths))
    }
}

fn parse(consumer_paths: Option<&str>) -> Map<String, Value> {
    consumer_paths
        .filter(|raw| !raw.is_empty())
        .and_then(|raw| serde_json::from_str(raw).ok())
        .unwrap_or_default()
}

fn serialize(paths: Map<String, Value>) -> String {
    Value::Object(paths).to_string()
}
