// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Composite resource identifiers.
//!
//! Identifiers are persisted by the configuration engine and must stay
//! parseable by every later release. Two-field identifiers are joined with
//! `@` (`name@vhost`); identifiers with three or more fields are joined with
//! `/` (`vhost/source/destination/type/properties_key`).
//!
//! Within each field `%` is escaped as `%25` before the separator is
//! escaped (`%40` for `@`, `%2F` for `/`). Decoding reverses the two steps in
//! the opposite order. Identifiers written before escaping existed decode to
//! the same fields as long as they contain no escape sequences. Binding
//! identifiers from those releases escaped only the vhost, so their other
//! fields may still carry the broker's own `%2F` and `%25` sequences; see
//! [`BindingId::readings`].

use std::fmt;
use std::str::FromStr;

use crate::error::IdentifierError;

const ESCAPE: &str = "%";
const ESCAPED_ESCAPE: &str = "%25";

/// Character joining the fields of a composite identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Separator {
    /// `@`, used by two-field identifiers
    At,
    /// `/`, used by identifiers with three or more fields
    Slash,
}

impl Separator {
    /// Separator used for identifiers made of `count` fields
    pub fn for_field_count(count: usize) -> Self {
        if count <= 2 { Self::At } else { Self::Slash }
    }

    pub fn as_char(self) -> char {
        match self {
            Self::At => '@',
            Self::Slash => '/',
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::At => "@",
            Self::Slash => "/",
        }
    }

    fn escaped(self) -> &'static str {
        match self {
            Self::At => "%40",
            Self::Slash => "%2F",
        }
    }

    fn escape(self, field: &str) -> String {
        field
            .replace(ESCAPE, ESCAPED_ESCAPE)
            .replace(self.as_str(), self.escaped())
    }

    fn unescape(self, field: &str) -> String {
        field
            .replace(self.escaped(), self.as_str())
            .replace(ESCAPED_ESCAPE, ESCAPE)
    }
}

/// Join `fields` into a single identifier, escaping each field first.
pub fn encode<S: AsRef<str>>(fields: &[S]) -> String {
    let separator = Separator::for_field_count(fields.len());
    fields
        .iter()
        .map(|field| separator.escape(field.as_ref()))
        .collect::<Vec<_>>()
        .join(separator.as_str())
}

/// Split an identifier produced by [`encode`] back into exactly
/// `expected` fields.
pub fn decode(id: &str, expected: usize) -> Result<Vec<String>, IdentifierError> {
    if expected == 0 {
        return Err(IdentifierError::UnsupportedFieldCount(expected));
    }

    let separator = Separator::for_field_count(expected);
    let parts: Vec<&str> = id.split(separator.as_char()).collect();
    if parts.len() != expected {
        return Err(IdentifierError::FieldCountMismatch {
            id: id.to_string(),
            got: parts.len(),
            want: expected,
        });
    }

    Ok(parts.into_iter().map(|p| separator.unescape(p)).collect())
}

/// Identifier of objects keyed by a name within a vhost (`name@vhost`).
///
/// Queues, exchanges, policies, shovels and federation upstreams use the
/// object name; permissions and topic permissions use the user name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NameVhostId {
    pub name: String,
    pub vhost: String,
}

impl NameVhostId {
    pub fn new(name: impl Into<String>, vhost: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            vhost: vhost.into(),
        }
    }
}

impl fmt::Display for NameVhostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&encode(&[&self.name, &self.vhost]))
    }
}

impl FromStr for NameVhostId {
    type Err = IdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut fields = decode(s, 2)?.into_iter();
        match (fields.next(), fields.next()) {
            (Some(name), Some(vhost)) => Ok(Self { name, vhost }),
            _ => Err(IdentifierError::FieldCountMismatch {
                id: s.to_string(),
                got: 0,
                want: 2,
            }),
        }
    }
}

/// Identifier of a binding.
///
/// The properties key is assigned by the broker when the binding is declared
/// and is the only way to tell apart two bindings between the same source
/// and destination.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BindingId {
    pub vhost: String,
    pub source: String,
    pub destination: String,
    pub destination_type: String,
    pub properties_key: String,
}

impl BindingId {
    pub const FIELDS: usize = 5;

    /// Parse an identifier in the form written by releases that escaped only
    /// `/` in the vhost and kept every other field verbatim.
    pub fn parse_legacy(s: &str) -> Result<Self, IdentifierError> {
        let parts: Vec<&str> = s.split('/').collect();
        let [vhost, source, destination, destination_type, properties_key] = parts[..] else {
            return Err(IdentifierError::FieldCountMismatch {
                id: s.to_string(),
                got: parts.len(),
                want: Self::FIELDS,
            });
        };
        Ok(Self {
            vhost: vhost.replace("%2F", "/"),
            source: source.to_string(),
            destination: destination.to_string(),
            destination_type: destination_type.to_string(),
            properties_key: properties_key.to_string(),
        })
    }

    /// Every plausible reading of `s`, current format first.
    ///
    /// The legacy reading is included only when it differs, which happens
    /// when a field other than the vhost contains `%2F` or `%25`.
    pub fn readings(s: &str) -> Result<Vec<Self>, IdentifierError> {
        let current: Self = s.parse()?;
        let legacy = Self::parse_legacy(s)?;
        if legacy == current {
            Ok(vec![current])
        } else {
            Ok(vec![current, legacy])
        }
    }
}

impl fmt::Display for BindingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&encode(&[
            &self.vhost,
            &self.source,
            &self.destination,
            &self.destination_type,
            &self.properties_key,
        ]))
    }
}

impl FromStr for BindingId {
    type Err = IdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fields: [String; Self::FIELDS] =
            decode(s, Self::FIELDS)?
                .try_into()
                .map_err(|v: Vec<String>| IdentifierError::FieldCountMismatch {
                    id: s.to_string(),
                    got: v.len(),
                    want: Self::FIELDS,
                })?;
        let [vhost, source, destination, destination_type, properties_key] = fields;
        Ok(Self {
            vhost,
            source,
            destination,
            destination_type,
            properties_key,
        })
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    #[test_case(""; "empty")]
    #[test_case("foo/test"; "wrong separator")]
    #[test_case("footest"; "no separator")]
    #[test_case("foo@bar@test"; "too many fields")]
    fn name_vhost_rejects(input: &str) {
        assert!(input.parse::<NameVhostId>().is_err());
    }

    #[test_case("foo@test", "foo", "test")]
    #[test_case("foo@/", "foo", "/")]
    #[test_case("foo/bar/baz@/", "foo/bar/baz", "/")]
    fn name_vhost_accepts(input: &str, name: &str, vhost: &str) {
        let id: NameVhostId = input.parse().unwrap();
        assert_eq!(id, NameVhostId::new(name, vhost));
    }

    #[test]
    fn too_many_fields_reports_counts() {
        let err = decode("foo@bar@test", 2).unwrap_err();
        assert_eq!(
            err,
            IdentifierError::FieldCountMismatch {
                id: "foo@bar@test".to_string(),
                got: 3,
                want: 2,
            }
        );
        assert_eq!(err.reason(), "field count mismatch");
    }

    #[test]
    fn two_field_ids_keep_slashes_readable() {
        assert_eq!(encode(&["a/b", "c"]), "a/b@c");
        assert_eq!(decode("a/b@c", 2).unwrap(), vec!["a/b", "c"]);
    }

    #[test]
    fn at_signs_are_escaped_in_two_field_ids() {
        let id = NameVhostId::new("user@example.com", "/");
        assert_eq!(id.to_string(), "user%40example.com@/");
        assert_eq!(id.to_string().parse::<NameVhostId>().unwrap(), id);
    }

    #[test]
    fn binding_id_escapes_vhost_slash() {
        let id = BindingId {
            vhost: "/".to_string(),
            source: "amq.direct".to_string(),
            destination: "jobs".to_string(),
            destination_type: "queue".to_string(),
            properties_key: "~".to_string(),
        };
        assert_eq!(id.to_string(), "%2F/amq.direct/jobs/queue/~");
        assert_eq!(id.to_string().parse::<BindingId>().unwrap(), id);
    }

    #[test]
    fn binding_id_legacy_format() {
        // vhost was the only escaped field in identifiers written by earlier releases
        let id: BindingId = "a%2Fb%25c/src/dst/exchange/key".parse().unwrap();
        assert_eq!(id.vhost, "a/b%c");
        assert_eq!(id.source, "src");
        assert_eq!(id.properties_key, "key");
    }

    #[test]
    fn broker_escapes_in_properties_key_give_two_readings() {
        // broker stores routing key `a/b` as properties key `a%2Fb`
        let readings = BindingId::readings("dev/events/jobs/queue/a%2Fb").unwrap();
        assert_eq!(readings.len(), 2);
        assert_eq!(readings[0].properties_key, "a/b");
        assert_eq!(readings[1].properties_key, "a%2Fb");
        assert_eq!(readings[1].vhost, "dev");
    }

    #[test]
    fn legacy_reading_decodes_only_vhost_slashes() {
        let id = BindingId::parse_legacy("%2Fapps/ex%25/dst/queue/k%2Fey").unwrap();
        assert_eq!(id.vhost, "/apps");
        assert_eq!(id.source, "ex%25");
        assert_eq!(id.properties_key, "k%2Fey");
    }

    #[test]
    fn plain_binding_id_has_one_reading() {
        let readings = BindingId::readings("%2F/amq.direct/jobs/queue/~").unwrap();
        assert_eq!(readings.len(), 1);
        assert_eq!(readings[0].vhost, "/");
    }

    #[test]
    fn current_format_round_trips_through_readings() {
        let id = BindingId {
            vhost: "/".to_string(),
            source: "events".to_string(),
            destination: "jobs".to_string(),
            destination_type: "queue".to_string(),
            properties_key: "a%2Fb".to_string(),
        };
        let encoded = id.to_string();
        assert_eq!(encoded, "%2F/events/jobs/queue/a%252Fb");
        assert_eq!(BindingId::readings(&encoded).unwrap()[0], id);
    }

    #[test]
    fn binding_id_needs_five_fields() {
        let err = "%2F/src/dst/queue".parse::<BindingId>().unwrap_err();
        assert_eq!(
            err,
            IdentifierError::FieldCountMismatch {
                id: "%2F/src/dst/queue".to_string(),
                got: 4,
                want: 5,
            }
        );
    }

    #[test]
    fn escape_introducer_is_escaped_first() {
        let fields = vec!["%2F".to_string(), "%".to_string(), "/%/".to_string()];
        let encoded = encode(&fields);
        assert_eq!(encoded, "%252F/%25/%2F%25%2F");
        assert_eq!(decode(&encoded, 3).unwrap(), fields);
    }

    #[test]
    fn empty_and_separator_only_fields_round_trip() {
        let fields = ["", "@@"];
        assert_eq!(decode(&encode(&fields), 2).unwrap(), fields);

        let fields = ["///", "", "x", "", ""];
        assert_eq!(decode(&encode(&fields), 5).unwrap(), fields);
    }

    #[test]
    fn zero_fields_is_unsupported() {
        assert_eq!(
            decode("", 0).unwrap_err(),
            IdentifierError::UnsupportedFieldCount(0)
        );
    }
}
