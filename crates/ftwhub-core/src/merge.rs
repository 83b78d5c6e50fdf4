//! Recursive structural merge of mappings.
//!
//! [`merge`] combines an ordered list of mappings into a new one. Sources
//! later in the list take precedence:
//! - nested mappings are merged key by key, recursively
//! - sequences are concatenated in source order
//! - everything else is taken from the highest-precedence source
//!
//! The same function combines loaded data files into one dataset and lays
//! series defaults under individual events.
//!
//! # Example
//!
//! ```
//! use ftwhub_core::merge::merge;
//! use ftwhub_core::value::Value;
//!
//! let defaults = Value::from_yaml_str("links: {homepage: 'https://a.example'}\nsocial: false").unwrap();
//! let event = Value::from_yaml_str("links: {fb.event: 'https://b.example'}\nsocial: true").unwrap();
//!
//! let merged = merge(&[defaults.as_mapping().unwrap(), event.as_mapping().unwrap()]);
//! assert_eq!(merged.get("social"), Some(&Value::Bool(true)));
//! assert_eq!(merged["links"].as_mapping().unwrap().len(), 2);
//! ```

use crate::value::{Map, Value};

/// Merges `sources` into a new mapping, the last source winning.
///
/// Keys are resolved once, scanning from the highest-precedence source
/// backward. The type of the winning value decides how lower-precedence
/// values for the same key are treated: mappings recurse over every mapping
/// value, sequences concatenate every sequence value, and any other value is
/// copied as-is. Values of a different kind than the winner are ignored.
///
/// Keys of the highest-precedence source come first in the result, followed
/// by keys only found in lower-precedence sources.
pub fn merge(sources: &[&Map]) -> Map {
    let mut merged = Map::new();

    for (idx, source) in sources.iter().enumerate().rev() {
        let lower = &sources[..idx];
        for (key, value) in source.iter() {
            if merged.contains_key(key) {
                continue;
            }
            let resolved = match value {
                Value::Mapping(top) => {
                    let mut key_sources: Vec<&Map> = lower
                        .iter()
                        .filter_map(|s| s.get(key).and_then(Value::as_mapping))
                        .collect();
                    key_sources.push(top);
                    Value::Mapping(merge(&key_sources))
                }
                Value::Sequence(top) => {
                    let mut items: Vec<Value> = lower
                        .iter()
                        .filter_map(|s| s.get(key).and_then(Value::as_sequence))
                        .flatten()
                        .cloned()
                        .collect();
                    items.extend(top.iter().cloned());
                    Value::Sequence(items)
                }
                other => other.clone(),
            };
            merged.insert(key.clone(), resolved);
        }
    }

    merged
}
