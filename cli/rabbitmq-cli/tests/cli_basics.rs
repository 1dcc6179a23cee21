// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Basic CLI tests - help, version, schema output and argument errors

// Allow deprecated - cargo_bin is standard for CLI testing
#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;

fn declare_cmd() -> Command {
    let mut cmd = Command::cargo_bin("rabbitmq-declare").expect("Failed to find rabbitmq-declare binary");
    for var in [
        "RABBITMQ_ENDPOINT",
        "RABBITMQ_USERNAME",
        "RABBITMQ_PASSWORD",
        "RABBITMQ_INSECURE",
        "RUST_LOG",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

#[test]
fn test_version() {
    declare_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("rabbitmq-declare"));
}

#[test]
fn test_help_lists_subcommands() {
    declare_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("create"))
        .stdout(predicate::str::contains("import"))
        .stdout(predicate::str::contains("--endpoint"));
}

#[test]
fn test_kinds_lists_every_kind() {
    declare_cmd()
        .arg("kinds")
        .assert()
        .success()
        .stdout(predicate::str::contains("topic_permissions"))
        .stdout(predicate::str::contains("federation_upstream"))
        .stdout(predicate::str::contains("vhost/source/destination/destination_type/properties_key"));
}

#[test]
fn test_schema_table() {
    declare_cmd()
        .args(["schema", "queue"])
        .assert()
        .success()
        .stdout(predicate::str::contains("settings.arguments_json"))
        .stdout(predicate::str::contains("conflicts with settings.arguments"));
}

#[test]
fn test_schema_json_includes_json_schema() {
    let output = declare_cmd()
        .args(["schema", "shovel", "--json"])
        .output()
        .expect("Failed to run rabbitmq-declare");
    assert!(output.status.success());

    let doc: serde_json::Value = serde_json::from_slice(&output.stdout).expect("JSON output");
    assert_eq!(doc["kind"], "shovel");
    assert_eq!(doc["updatable"], false);
    assert!(doc["json_schema"]["properties"]["info"].is_object());
}

#[test]
fn test_unknown_kind_is_rejected() {
    declare_cmd()
        .args(["schema", "exchanges"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown resource kind 'exchanges'"));
}

#[test]
fn test_bad_identifier_fails_before_connecting() {
    // No endpoint is configured; the identifier error must come first.
    declare_cmd()
        .args(["delete", "binding", "only/three/fields"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("as a binding identifier"));
}

#[test]
fn test_missing_endpoint_is_reported() {
    declare_cmd()
        .args(["delete", "queue", "jobs@/"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("endpoint must not be an empty string"));
}
