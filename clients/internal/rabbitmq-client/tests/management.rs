// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

// Allow expect/unwrap in tests - they provide clear panic messages on failure
#![allow(clippy::expect_used, clippy::unwrap_used)]

//! Management client against a mock management API.

use pretty_assertions::assert_eq;
use rabbitmq_api::{BindingRequest, DestinationType, QueueSettings, UserSettings};
use rabbitmq_client::{
    ClientError, HttpBrokerClient, HttpClientConfig, ManagementClient, StatusCode,
};
use secrecy::SecretString;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// base64("guest:guest")
const GUEST_AUTH: &str = "Basic Z3Vlc3Q6Z3Vlc3Q=";

async fn client(server: &MockServer) -> ManagementClient {
    let config = HttpClientConfig::new(server.uri(), "guest", SecretString::from("guest"));
    ManagementClient::new(HttpBrokerClient::new(config).expect("client"))
}

#[tokio::test]
async fn get_queue_escapes_default_vhost() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/queues/%2F/jobs"))
        .and(header("authorization", GUEST_AUTH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "jobs",
            "vhost": "/",
            "durable": true,
            "auto_delete": false,
            "arguments": {"x-max-length": 10},
            "messages": 0
        })))
        .expect(1)
        .mount(&server)
        .await;

    let queue = client(&server).await.get_queue("/", "jobs").await.unwrap();
    assert_eq!(queue.name, "jobs");
    assert!(queue.durable);
    assert_eq!(queue.arguments["x-max-length"], json!(10));
}

#[tokio::test]
async fn get_missing_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/vhosts/gone"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "error": "Object Not Found",
            "reason": "Not Found"
        })))
        .mount(&server)
        .await;

    let err = client(&server).await.get_vhost("gone").await.unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
}

#[tokio::test]
async fn get_server_error_keeps_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/users/bob"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let err = client(&server).await.get_user("bob").await.unwrap_err();
    match err {
        ClientError::Status { status, body, .. } => {
            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(body, "boom");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn undecodable_body_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/overview"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
        .mount(&server)
        .await;

    let err = client(&server).await.overview().await.unwrap_err();
    assert!(matches!(err, ClientError::Decode { .. }));
}

#[tokio::test]
async fn declare_queue_sends_settings() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/queues/dev/jobs"))
        .and(body_json(json!({
            "durable": true,
            "auto_delete": false,
            "arguments": {"x-message-ttl": 5000}
        })))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let settings = QueueSettings {
        durable: true,
        auto_delete: false,
        arguments: [("x-message-ttl".to_string(), json!(5000))].into(),
    };
    let response = client(&server)
        .await
        .declare_queue("dev", "jobs", &settings)
        .await
        .unwrap();
    assert_eq!(response.status, StatusCode::CREATED);
}

#[tokio::test]
async fn write_errors_are_returned_raw() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/users/bob"))
        .respond_with(ResponseTemplate::new(400).set_body_string("bad tags"))
        .mount(&server)
        .await;

    let response = client(&server)
        .await
        .put_user("bob", &UserSettings::new("secret", &[]))
        .await
        .unwrap();
    assert!(!response.is_success());
    assert_eq!(response.status_text(), "400 Bad Request");
    assert_eq!(response.body, "bad tags");
}

#[tokio::test]
async fn declare_binding_exposes_location() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/bindings/%2F/e/amq.topic/q/jobs"))
        .and(body_json(json!({"routing_key": "a.#", "arguments": {}})))
        .respond_with(
            ResponseTemplate::new(201)
                .insert_header("location", "bindings/%2F/e/amq.topic/q/jobs/a.%2523"),
        )
        .mount(&server)
        .await;

    let request = BindingRequest {
        routing_key: "a.#".to_string(),
        ..Default::default()
    };
    let response = client(&server)
        .await
        .declare_binding("/", "amq.topic", DestinationType::Queue, "jobs", &request)
        .await
        .unwrap();
    assert_eq!(
        response.location.as_deref(),
        Some("bindings/%2F/e/amq.topic/q/jobs/a.%2523")
    );
}

#[tokio::test]
async fn delete_binding_escapes_properties_key() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/bindings/%2F/e/src/e/dst/a.%2523"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let response = client(&server)
        .await
        .delete_binding("/", "src", DestinationType::Exchange, "dst", "a.%23")
        .await
        .unwrap();
    assert!(response.is_success());
}

#[tokio::test]
async fn topic_permissions_are_listed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/topic-permissions/%2F/bob"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"user": "bob", "vhost": "/", "exchange": "amq.topic", "write": ".*", "read": ".*"}
        ])))
        .mount(&server)
        .await;

    let list = client(&server)
        .await
        .get_topic_permissions_in("/", "bob")
        .await
        .unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0].exchange, "amq.topic");
}
