// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! CLI commands

pub mod document;
pub mod lifecycle;
pub mod schema;

use rabbitmq_provider::ResourceKind;
use strum::VariantNames;

/// clap value parser for resource kinds
pub fn parse_kind(s: &str) -> Result<ResourceKind, String> {
    s.parse().map_err(|_| {
        format!(
            "unknown resource kind '{s}' (expected one of: {})",
            ResourceKind::VARIANTS.join(", ")
        )
    })
}
