// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

// Allow expect/unwrap in tests - they provide clear panic messages on failure
// Allow deprecated - cargo_bin is standard for CLI testing
#![allow(clippy::expect_used, clippy::unwrap_used, deprecated)]

//! End-to-end CLI runs against a mock management API.

use std::io::Write;

use assert_cmd::Command;
use predicates::prelude::*;
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn declare_cmd(server: &MockServer) -> Command {
    let mut cmd = Command::cargo_bin("rabbitmq-declare").expect("Failed to find rabbitmq-declare binary");
    cmd.env_remove("RUST_LOG")
        .env("RABBITMQ_ENDPOINT", server.uri())
        .env("RABBITMQ_USERNAME", "guest")
        .env("RABBITMQ_PASSWORD", "guest");
    cmd
}

#[tokio::test]
async fn create_vhost_from_yaml() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/vhosts/dev"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/vhosts/dev"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"name": "dev"})))
        .mount(&server)
        .await;

    let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
    writeln!(file, "name: dev").unwrap();

    let output = declare_cmd(&server)
        .args(["create", "vhost", "-f"])
        .arg(file.path())
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let printed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(printed, json!({"id": "dev", "state": {"name": "dev"}}));
}

#[tokio::test]
async fn create_exchange_sends_settings() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/exchanges/%2F/events"))
        .and(body_json(json!({"type": "topic", "durable": true, "auto_delete": false})))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/exchanges/%2F/events"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "events",
            "vhost": "/",
            "type": "topic",
            "durable": true,
            "auto_delete": false,
            "internal": false,
            "arguments": {}
        })))
        .mount(&server)
        .await;

    let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    write!(file, r#"{{"name": "events", "settings": {{"type": "topic", "durable": true}}}}"#).unwrap();

    declare_cmd(&server)
        .args(["create", "exchange", "--file"])
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""id": "events@/""#));
}

#[tokio::test]
async fn delete_of_missing_queue_succeeds() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/queues/%2F/gone"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"error": "Object Not Found"})))
        .expect(1)
        .mount(&server)
        .await;

    declare_cmd(&server)
        .args(["delete", "queue", "gone@/"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted queue gone@/"));
}

#[tokio::test]
async fn read_of_missing_resource_prints_null_state() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/policies/dev/ha"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let output = declare_cmd(&server)
        .args(["read", "policy", "ha@dev"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let printed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(printed, json!({"id": "ha@dev", "state": null}));
}

#[tokio::test]
async fn import_of_missing_resource_fails() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/users/ghost"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    declare_cmd(&server)
        .args(["import", "user", "ghost"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not exist"));
}

#[tokio::test]
async fn update_of_immutable_kind_fails() {
    let server = MockServer::start().await;
    let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    write!(file, r#"{{"name": "jobs", "settings": {{}}}}"#).unwrap();

    declare_cmd(&server)
        .args(["update", "queue", "jobs@/", "-f"])
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("queue has no updatable fields"));
}
