// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Virtual host types

use serde::{Deserialize, Serialize};

/// Virtual host as returned by `GET /api/vhosts/{name}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VhostInfo {
    pub name: String,
    #[serde(default)]
    pub tracing: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Body of `PUT /api/vhosts/{name}`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VhostSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tracing: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}
