// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Binding types

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, VariantNames};

use super::common::Arguments;

/// Kind of object a binding routes to
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    JsonSchema,
    Display,
    EnumString,
    VariantNames,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum DestinationType {
    Queue,
    Exchange,
}

impl DestinationType {
    /// Single-letter path segment used by `/api/bindings/{vhost}/e/{source}/{q|e}/{dest}`
    pub fn path_segment(self) -> &'static str {
        match self {
            Self::Queue => "q",
            Self::Exchange => "e",
        }
    }
}

/// Binding as listed by `GET /api/bindings/{vhost}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BindingInfo {
    /// Source exchange; empty for the default exchange
    pub source: String,
    pub vhost: String,
    pub destination: String,
    pub destination_type: DestinationType,
    #[serde(default)]
    pub routing_key: String,
    #[serde(default)]
    pub arguments: Arguments,
    /// Broker-assigned key distinguishing bindings between the same pair
    pub properties_key: String,
}

/// Body of `POST /api/bindings/{vhost}/e/{source}/{q|e}/{destination}`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BindingRequest {
    pub routing_key: String,
    #[serde(default)]
    pub arguments: Arguments,
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;
    use serde_json::json;

    #[test]
    fn parses_listing_entry() {
        let b: BindingInfo = serde_json::from_value(json!({
            "source": "amq.topic",
            "vhost": "/",
            "destination": "events",
            "destination_type": "queue",
            "routing_key": "a.#",
            "arguments": {"x-match": "all"},
            "properties_key": "a.%23"
        }))
        .unwrap();
        assert_eq!(b.destination_type, DestinationType::Queue);
        assert_eq!(b.destination_type.path_segment(), "q");
        assert_eq!(b.properties_key, "a.%23");
    }

    #[test]
    fn destination_type_strings() {
        assert_eq!(DestinationType::Exchange.to_string(), "exchange");
        assert_eq!(
            "queue".parse::<DestinationType>().unwrap(),
            DestinationType::Queue
        );
        assert!("topic".parse::<DestinationType>().is_err());
    }
}
