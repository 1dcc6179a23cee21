// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Dynamic shovel types

use serde::{Deserialize, Serialize};

use super::common::{AckMode, RuntimeParameter};

/// Value of a `shovel` runtime parameter
///
/// `add-forward-headers`, `delete-after` and `prefetch-count` are the
/// pre-3.7 spellings of their `dest-`/`src-` prefixed replacements.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ShovelDefinition {
    pub src_uri: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src_protocol: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src_queue: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src_exchange: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src_exchange_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src_prefetch_count: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src_delete_after: Option<String>,

    pub dest_uri: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dest_protocol: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dest_queue: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dest_exchange: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dest_exchange_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dest_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dest_add_forward_headers: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dest_add_timestamp_header: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dest_application_properties: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dest_properties: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dest_publish_properties: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ack_mode: Option<AckMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reconnect_delay: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub add_forward_headers: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delete_after: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefetch_count: Option<i64>,
}

/// Shovel as returned by `GET /api/parameters/shovel/{vhost}/{name}`
pub type ShovelInfo = RuntimeParameter<ShovelDefinition>;
