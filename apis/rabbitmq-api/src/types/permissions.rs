// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Permission and topic permission types

use serde::{Deserialize, Serialize};

/// Permissions as returned by `GET /api/permissions/{vhost}/{user}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PermissionInfo {
    pub user: String,
    pub vhost: String,
    pub configure: String,
    pub write: String,
    pub read: String,
}

/// Body of `PUT /api/permissions/{vhost}/{user}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permissions {
    pub configure: String,
    pub write: String,
    pub read: String,
}

/// One entry of `GET /api/topic-permissions/{vhost}/{user}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopicPermissionInfo {
    pub user: String,
    pub vhost: String,
    pub exchange: String,
    pub write: String,
    pub read: String,
}

/// Body of `PUT /api/topic-permissions/{vhost}/{user}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicPermissions {
    pub exchange: String,
    pub write: String,
    pub read: String,
}
