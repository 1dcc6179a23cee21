// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Common types used across the management API

use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum::{Display, EnumString, VariantNames};

/// Optional protocol arguments attached to exchanges, queues and bindings
pub type Arguments = BTreeMap<String, Value>;

/// Error body returned by the management API on 4xx/5xx responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Short error class (e.g. "not_found", "bad_request")
    pub error: String,
    /// Human-readable reason
    #[serde(default)]
    pub reason: String,
}

/// Acknowledgement mode used by shovels and federation links
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    JsonSchema,
    Display,
    EnumString,
    VariantNames,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum AckMode {
    /// Acknowledge after the destination confirms
    #[default]
    OnConfirm,
    /// Acknowledge once the message has been re-published
    OnPublish,
    /// Never acknowledge
    NoAck,
}

/// Runtime parameter component names
pub const FEDERATION_UPSTREAM_COMPONENT: &str = "federation-upstream";
pub const SHOVEL_COMPONENT: &str = "shovel";

/// Envelope used by `/api/parameters/{component}/{vhost}/{name}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuntimeParameter<T> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vhost: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component: Option<String>,
    pub value: T,
}

impl<T> RuntimeParameter<T> {
    /// Request body for a PUT; the path carries the rest.
    pub fn body(value: T) -> Self {
        Self {
            name: None,
            vhost: None,
            component: None,
            value,
        }
    }
}
