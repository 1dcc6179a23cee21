// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Queue types

use serde::{Deserialize, Serialize};

use super::common::Arguments;

/// Queue as returned by `GET /api/queues/{vhost}/{name}`
///
/// Statistics fields are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueueInfo {
    pub name: String,
    pub vhost: String,
    #[serde(default)]
    pub durable: bool,
    #[serde(default)]
    pub auto_delete: bool,
    #[serde(default)]
    pub arguments: Arguments,
}

/// Body of `PUT /api/queues/{vhost}/{name}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueueSettings {
    pub durable: bool,
    pub auto_delete: bool,
    #[serde(default, skip_serializing_if = "Arguments::is_empty")]
    pub arguments: Arguments,
}
