// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Federation upstream types

use serde::{Deserialize, Serialize};

use super::common::{AckMode, RuntimeParameter};

/// Value of a `federation-upstream` runtime parameter
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct FederationDefinition {
    pub uri: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefetch_count: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reconnect_delay: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ack_mode: Option<AckMode>,
    #[serde(default)]
    pub trust_user_id: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exchange: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_hops: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_ttl: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub queue: Option<String>,
}

/// Federation upstream as returned by
/// `GET /api/parameters/federation-upstream/{vhost}/{name}`
pub type FederationUpstreamInfo = RuntimeParameter<FederationDefinition>;

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;
    use serde_json::json;

    #[test]
    fn kebab_case_on_the_wire() {
        let def = FederationDefinition {
            uri: "amqp://server-name".to_string(),
            prefetch_count: Some(1000),
            reconnect_delay: Some(5),
            ack_mode: Some(AckMode::OnConfirm),
            max_hops: Some(1),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(RuntimeParameter::body(def)).unwrap(),
            json!({"value": {
                "uri": "amqp://server-name",
                "prefetch-count": 1000,
                "reconnect-delay": 5,
                "ack-mode": "on-confirm",
                "trust-user-id": false,
                "max-hops": 1
            }})
        );
    }
}
