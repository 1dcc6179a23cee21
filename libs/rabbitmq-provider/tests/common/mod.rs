// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

// Allow expect/unwrap in tests - they provide clear panic messages on failure
#![allow(clippy::expect_used, clippy::unwrap_used, dead_code)]

//! Shared helpers for handler tests against a mock management API.

use rabbitmq_client::{HttpBrokerClient, HttpClientConfig, ManagementClient};
use secrecy::SecretString;
use serde_json::Value;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub async fn client(server: &MockServer) -> ManagementClient {
    let config = HttpClientConfig::new(server.uri(), "guest", SecretString::from("guest"));
    ManagementClient::new(HttpBrokerClient::new(config).expect("client"))
}

/// Answer `verb route` with `status` and an optional JSON body.
pub async fn respond(
    server: &MockServer,
    verb: &str,
    route: &str,
    status: u16,
    body: Option<Value>,
) {
    let mut response = ResponseTemplate::new(status);
    if let Some(body) = body {
        response = response.set_body_json(body);
    }
    Mock::given(method(verb))
        .and(path(route))
        .respond_with(response)
        .mount(server)
        .await;
}

/// A 404 the way the management API reports it
pub fn not_found() -> Value {
    serde_json::json!({"error": "Object Not Found", "reason": "Not Found"})
}
