// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! JSON normalisation.
//!
//! Serialized argument documents are compared semantically: whitespace and
//! key order never count as a change.

use serde_json::{Map, Value};

/// Rebuild `value` with every object's keys in sorted order.
///
/// Sorting is done here rather than relying on the map type so the output
/// does not depend on serde_json's `preserve_order` feature.
pub fn canonicalize(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = map.into_iter().collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            let mut sorted = Map::new();
            for (k, v) in entries {
                sorted.insert(k, canonicalize(v));
            }
            Value::Object(sorted)
        }
        Value::Array(items) => Value::Array(items.into_iter().map(canonicalize).collect()),
        other => other,
    }
}

/// Compact, key-sorted form of a JSON document. The empty string stays empty.
pub fn normalize_json(raw: &str) -> Result<String, serde_json::Error> {
    if raw.is_empty() {
        return Ok(String::new());
    }
    let value: Value = serde_json::from_str(raw)?;
    serde_json::to_string(&canonicalize(value))
}

/// True when both documents parse and describe the same value
pub fn json_equivalent(a: &str, b: &str) -> bool {
    match (normalize_json(a), normalize_json(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
