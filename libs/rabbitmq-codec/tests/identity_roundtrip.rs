// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

// Allow expect/unwrap in tests - they provide clear panic messages on failure
#![allow(clippy::expect_used, clippy::unwrap_used)]

//! Property tests for composite identifier encoding.

use quickcheck::{Arbitrary, Gen, QuickCheck, TestResult};
use rabbitmq_codec::{BindingId, NameVhostId, decode, encode};

/// A field drawn mostly from characters that interact with escaping.
#[derive(Debug, Clone)]
struct Field(String);

impl Arbitrary for Field {
    fn arbitrary(g: &mut Gen) -> Self {
        const ALPHABET: &[char] = &['a', 'z', '/', '@', '%', '2', '5', 'F', 'f', '4', '0', '~'];
        let len = usize::arbitrary(g) % 8;
        Field(
            (0..len)
                .map(|_| *g.choose(ALPHABET).unwrap_or(&'a'))
                .collect(),
        )
    }
}

fn fields_round_trip(fields: Vec<Field>) -> TestResult {
    if fields.is_empty() {
        return TestResult::discard();
    }
    let fields: Vec<String> = fields.into_iter().map(|f| f.0).collect();
    let decoded = decode(&encode(&fields), fields.len());
    TestResult::from_bool(decoded.as_ref() == Ok(&fields))
}

fn arbitrary_strings_round_trip(fields: Vec<String>) -> TestResult {
    if fields.is_empty() {
        return TestResult::discard();
    }
    let decoded = decode(&encode(&fields), fields.len());
    TestResult::from_bool(decoded.as_ref() == Ok(&fields))
}

fn wrong_count_is_rejected(fields: Vec<Field>) -> TestResult {
    if fields.len() < 3 {
        return TestResult::discard();
    }
    let fields: Vec<String> = fields.into_iter().map(|f| f.0).collect();
    TestResult::from_bool(decode(&encode(&fields), fields.len() + 1).is_err())
}

#[test]
fn escaping_alphabet_round_trips() {
    QuickCheck::new()
        .tests(2000)
        .quickcheck(fields_round_trip as fn(Vec<Field>) -> TestResult);
}

#[test]
fn unicode_strings_round_trip() {
    QuickCheck::new().quickcheck(arbitrary_strings_round_trip as fn(Vec<String>) -> TestResult);
}

#[test]
fn field_count_is_checked() {
    QuickCheck::new().quickcheck(wrong_count_is_rejected as fn(Vec<Field>) -> TestResult);
}

#[test]
fn slash_in_first_field_survives() {
    let encoded = encode(&["a/b", "c"]);
    assert_eq!(decode(&encoded, 2).unwrap(), vec!["a/b", "c"]);
}

#[test]
fn name_vhost_and_binding_ids_are_stable() {
    // These strings are persisted in state files; the format must not drift.
    assert_eq!(NameVhostId::new("test", "/").to_string(), "test@/");
    assert_eq!(
        BindingId {
            vhost: "test".to_string(),
            source: "ex".to_string(),
            destination: "q".to_string(),
            destination_type: "queue".to_string(),
            properties_key: "foo%2Fbar".to_string(),
        }
        .to_string(),
        "test/ex/q/queue/foo%252Fbar"
    );
}
