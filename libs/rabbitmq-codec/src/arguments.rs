// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Argument bundles attached to queues and bindings.
//!
//! Operators can describe arguments either as a flat `arguments` map, which
//! only holds strings, or as an `arguments_json` document, which can hold any
//! JSON value (`x-max-length = 10` needs a number). The two inputs are
//! mutually exclusive.
//!
//! On read the remote bundle must land back in the field the operator used,
//! otherwise every refresh would look like a change. The rule is: use the
//! serialized form when the resource was created from `arguments_json` or
//! when the broker reports any non-string value (the flat map cannot hold
//! it); use the flat map otherwise.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::error::ArgumentsError;
use crate::json::canonicalize;

/// Arguments as sent to and received from the broker.
///
/// Keys are kept sorted so serialisation is byte-stable.
pub type ArgumentBundle = BTreeMap<String, Value>;

/// The string-only `arguments` representation
pub type StructuredArguments = BTreeMap<String, String>;

pub const STRUCTURED_FIELD: &str = "arguments";
pub const SERIALIZED_FIELD: &str = "arguments_json";

/// Representation chosen for writing a remote bundle back into state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgumentsRepresentation {
    /// Populate `arguments`
    Structured(StructuredArguments),
    /// Populate `arguments_json`
    Serialized(String),
}

/// Build the bundle to send to the broker from the two optional inputs.
///
/// An empty map and an empty string both count as unset.
pub fn resolve_input(
    structured: Option<&StructuredArguments>,
    serialized: Option<&str>,
) -> Result<ArgumentBundle, ArgumentsError> {
    let structured = structured.filter(|m| !m.is_empty());
    let serialized = serialized.filter(|s| !s.is_empty());

    match (structured, serialized) {
        (Some(_), Some(_)) => Err(ArgumentsError::MutuallyExclusive {
            structured: STRUCTURED_FIELD,
            serialized: SERIALIZED_FIELD,
        }),
        (_, Some(raw)) => {
            serde_json::from_str::<ArgumentBundle>(raw).map_err(|source| {
                ArgumentsError::InvalidJson {
                    raw: raw.to_string(),
                    source,
                }
            })
        }
        (Some(map), None) => Ok(map
            .iter()
            .map(|(k, v)| (k.clone(), Value::String(v.clone())))
            .collect()),
        (None, None) => Ok(ArgumentBundle::new()),
    }
}

/// True when any value in `bundle` is not a JSON string
pub fn has_non_string_values(bundle: &ArgumentBundle) -> bool {
    bundle.values().any(|v| !v.is_string())
}

/// Pick the representation used to write `remote` back into state.
pub fn choose_read_representation(
    remote: &ArgumentBundle,
    used_serialized_on_create: bool,
) -> Result<ArgumentsRepresentation, ArgumentsError> {
    if used_serialized_on_create || has_non_string_values(remote) {
        let value = serde_json::to_value(remote).map_err(ArgumentsError::Encode)?;
        let encoded =
            serde_json::to_string(&canonicalize(value)).map_err(ArgumentsError::Encode)?;
        return Ok(ArgumentsRepresentation::Serialized(encoded));
    }

    Ok(ArgumentsRepresentation::Structured(
        remote
            .iter()
            .filter_map(|(k, v)| v.as_str().map(|s| (k.clone(), s.to_string())))
            .collect(),
    ))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn bundle(v: Value) -> ArgumentBundle {
        serde_json::from_value(v).unwrap()
    }

    fn structured(pairs: &[(&str, &str)]) -> StructuredArguments {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn both_inputs_conflict() {
        let map = structured(&[("x", "1")]);
        let err = resolve_input(Some(&map), Some(r#"{"x":1}"#)).unwrap_err();
        assert!(matches!(err, ArgumentsError::MutuallyExclusive { .. }));
        assert!(err.to_string().contains("mutually exclusive fields set"));
    }

    #[test]
    fn empty_inputs_do_not_conflict() {
        let empty = StructuredArguments::new();
        let got = resolve_input(Some(&empty), Some(r#"{"x-max-length":10}"#)).unwrap();
        assert_eq!(got, bundle(json!({"x-max-length": 10})));

        let map = structured(&[("x", "1")]);
        let got = resolve_input(Some(&map), Some("")).unwrap();
        assert_eq!(got, bundle(json!({"x": "1"})));
    }

    #[test]
    fn nothing_configured_is_empty() {
        assert!(resolve_input(None, None).unwrap().is_empty());
    }

    #[test]
    fn malformed_json_keeps_raw_input() {
        let err = resolve_input(None, Some("{\"x\": ")).unwrap_err();
        match err {
            ArgumentsError::InvalidJson { raw, .. } => assert_eq!(raw, "{\"x\": "),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn non_object_json_is_rejected() {
        assert!(matches!(
            resolve_input(None, Some("[1, 2]")),
            Err(ArgumentsError::InvalidJson { .. })
        ));
    }

    #[test]
    fn non_string_value_forces_serialized() {
        let remote = bundle(json!({"x-match": "all", "ttl": 5000}));
        let repr = choose_read_representation(&remote, false).unwrap();
        let ArgumentsRepresentation::Serialized(s) = repr else {
            panic!("expected serialized form");
        };
        assert_eq!(s, r#"{"ttl":5000,"x-match":"all"}"#);
        assert_eq!(serde_json::from_str::<ArgumentBundle>(&s).unwrap(), remote);
    }

    #[test]
    fn string_values_stay_structured() {
        let remote = bundle(json!({"key1": "value1", "key2": "value2"}));
        let repr = choose_read_representation(&remote, false).unwrap();
        assert_eq!(
            repr,
            ArgumentsRepresentation::Structured(structured(&[
                ("key1", "value1"),
                ("key2", "value2"),
            ]))
        );
    }

    #[test]
    fn serialized_on_create_is_sticky() {
        let remote = bundle(json!({"key1": "value1"}));
        assert_eq!(
            choose_read_representation(&remote, true).unwrap(),
            ArgumentsRepresentation::Serialized(r#"{"key1":"value1"}"#.to_string())
        );
    }

    #[test]
    fn empty_remote_bundle() {
        assert_eq!(
            choose_read_representation(&ArgumentBundle::new(), false).unwrap(),
            ArgumentsRepresentation::Structured(StructuredArguments::new())
        );
        assert_eq!(
            choose_read_representation(&ArgumentBundle::new(), true).unwrap(),
            ArgumentsRepresentation::Serialized("{}".to_string())
        );
    }

    #[test]
    fn repeated_reads_are_byte_identical() {
        let remote = bundle(json!({
            "z": [1, 2, {"b": true, "a": null}],
            "a": "x",
            "m": {"y": 1, "x": 2}
        }));
        let first = choose_read_representation(&remote, false).unwrap();
        let second = choose_read_representation(&remote, false).unwrap();
        assert_eq!(first, second);
        assert_eq!(
            first,
            ArgumentsRepresentation::Serialized(
                r#"{"a":"x","m":{"x":2,"y":1},"z":[1,2,{"a":null,"b":true}]}"#.to_string()
            )
        );
    }
}
