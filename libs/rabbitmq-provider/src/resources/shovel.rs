// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Dynamic shovels, stored as `shovel` runtime parameters.
//!
//! Every field forces replacement. Three settings were renamed upstream;
//! the old names are still accepted but cannot be combined with the new
//! ones.

use async_trait::async_trait;
use rabbitmq_api::{AckMode, ShovelDefinition};
use rabbitmq_client::{BrokerClient, ManagementClient};
use rabbitmq_codec::NameVhostId;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{check_delete, check_write, parse_name_vhost, present_or_absent, require_non_empty};
use crate::error::ProviderError;
use crate::lifecycle::{Applied, ReadOutcome, ResourceHandler, ResourceKind, read_back};
use crate::schema::{FieldSchema, FieldType, ResourceSchema};

pub const DEFAULT_PROTOCOL: &str = "amqp091";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ShovelConfig {
    pub name: String,
    pub vhost: String,
    pub info: ShovelInfoConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ShovelInfoConfig {
    pub source_uri: String,
    #[serde(default = "default_protocol")]
    pub source_protocol: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_queue: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_exchange: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_exchange_key: Option<String>,
    /// AMQP 1.0 source address
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_prefetch_count: Option<i64>,
    /// `never`, `queue-length` or a message count
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_delete_after: Option<String>,

    pub destination_uri: String,
    #[serde(default = "default_protocol")]
    pub destination_protocol: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination_queue: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination_exchange: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination_exchange_key: Option<String>,
    /// AMQP 1.0 destination address
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination_add_forward_headers: Option<bool>,
    #[serde(default)]
    pub destination_add_timestamp_header: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination_application_properties: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination_properties: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination_publish_properties: Option<String>,

    #[serde(default)]
    pub ack_mode: AckMode,
    /// Seconds
    #[serde(default = "default_reconnect_delay")]
    pub reconnect_delay: i64,

    /// Deprecated: use `destination_add_forward_headers`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub add_forward_headers: Option<bool>,
    /// Deprecated: use `source_delete_after`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delete_after: Option<String>,
    /// Deprecated: use `source_prefetch_count`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefetch_count: Option<i64>,
}

fn default_protocol() -> String {
    DEFAULT_PROTOCOL.to_string()
}

fn default_reconnect_delay() -> i64 {
    1
}

fn set(value: &Option<String>) -> Option<String> {
    value.clone().filter(|s| !s.is_empty())
}

fn conflict(a: &str, b: &str) -> ProviderError {
    ProviderError::config(format!("conflicting fields set: info.{a} and info.{b}"))
}

impl ShovelInfoConfig {
    /// Reject settings the broker would refuse or silently ignore.
    pub fn validate(&self) -> Result<(), ProviderError> {
        require_non_empty("info.source_uri", &self.source_uri)?;
        require_non_empty("info.destination_uri", &self.destination_uri)?;

        if set(&self.source_queue).is_some() && set(&self.source_exchange).is_some() {
            return Err(conflict("source_queue", "source_exchange"));
        }
        if set(&self.destination_queue).is_some() && set(&self.destination_exchange).is_some() {
            return Err(conflict("destination_queue", "destination_exchange"));
        }
        if self.add_forward_headers.is_some() && self.destination_add_forward_headers.is_some() {
            return Err(conflict("add_forward_headers", "destination_add_forward_headers"));
        }
        if set(&self.delete_after).is_some() && set(&self.source_delete_after).is_some() {
            return Err(conflict("delete_after", "source_delete_after"));
        }
        if self.prefetch_count.is_some() && self.source_prefetch_count.is_some() {
            return Err(conflict("prefetch_count", "source_prefetch_count"));
        }

        for (old, new, value) in [
            ("add_forward_headers", "destination_add_forward_headers", self.add_forward_headers.is_some()),
            ("delete_after", "source_delete_after", set(&self.delete_after).is_some()),
            ("prefetch_count", "source_prefetch_count", self.prefetch_count.is_some()),
        ] {
            if value {
                tracing::warn!(field = old, replacement = new, "deprecated shovel setting");
            }
        }
        Ok(())
    }

    fn definition(&self) -> ShovelDefinition {
        ShovelDefinition {
            src_uri: self.source_uri.clone(),
            src_protocol: Some(self.source_protocol.clone()),
            src_queue: set(&self.source_queue),
            src_exchange: set(&self.source_exchange),
            src_exchange_key: set(&self.source_exchange_key),
            src_address: set(&self.source_address),
            src_prefetch_count: self.source_prefetch_count,
            src_delete_after: set(&self.source_delete_after),
            dest_uri: self.destination_uri.clone(),
            dest_protocol: Some(self.destination_protocol.clone()),
            dest_queue: set(&self.destination_queue),
            dest_exchange: set(&self.destination_exchange),
            dest_exchange_key: set(&self.destination_exchange_key),
            dest_address: set(&self.destination_address),
            dest_add_forward_headers: self.destination_add_forward_headers,
            dest_add_timestamp_header: Some(self.destination_add_timestamp_header),
            dest_application_properties: set(&self.destination_application_properties),
            dest_properties: set(&self.destination_properties),
            dest_publish_properties: set(&self.destination_publish_properties),
            ack_mode: Some(self.ack_mode),
            reconnect_delay: Some(self.reconnect_delay),
            add_forward_headers: self.add_forward_headers,
            delete_after: set(&self.delete_after),
            prefetch_count: self.prefetch_count,
        }
    }
}

impl From<ShovelDefinition> for ShovelInfoConfig {
    fn from(d: ShovelDefinition) -> Self {
        Self {
            source_uri: d.src_uri,
            source_protocol: d.src_protocol.unwrap_or_else(default_protocol),
            source_queue: d.src_queue,
            source_exchange: d.src_exchange,
            source_exchange_key: d.src_exchange_key,
            source_address: d.src_address,
            source_prefetch_count: d.src_prefetch_count,
            source_delete_after: d.src_delete_after,
            destination_uri: d.dest_uri,
            destination_protocol: d.dest_protocol.unwrap_or_else(default_protocol),
            destination_queue: d.dest_queue,
            destination_exchange: d.dest_exchange,
            destination_exchange_key: d.dest_exchange_key,
            destination_address: d.dest_address,
            destination_add_forward_headers: d.dest_add_forward_headers,
            destination_add_timestamp_header: d.dest_add_timestamp_header.unwrap_or(false),
            destination_application_properties: d.dest_application_properties,
            destination_properties: d.dest_properties,
            destination_publish_properties: d.dest_publish_properties,
            ack_mode: d.ack_mode.unwrap_or_default(),
            reconnect_delay: d.reconnect_delay.unwrap_or_else(default_reconnect_delay),
            add_forward_headers: d.add_forward_headers,
            delete_after: d.delete_after,
            prefetch_count: d.prefetch_count,
        }
    }
}

pub struct ShovelResource;

#[async_trait]
impl ResourceHandler for ShovelResource {
    type Config = ShovelConfig;

    const KIND: ResourceKind = ResourceKind::Shovel;

    fn schema(&self) -> ResourceSchema {
        let field = |path, ty| FieldSchema::new(path, ty).force_new();
        ResourceSchema {
            kind: Self::KIND,
            id_format: "name@vhost",
            updatable: false,
            fields: vec![
                field("name", FieldType::String).required(),
                field("vhost", FieldType::String).required(),
                field("info", FieldType::Block).required(),
                field("info.source_uri", FieldType::String).required().sensitive(),
                field("info.source_protocol", FieldType::String).default(DEFAULT_PROTOCOL),
                field("info.source_queue", FieldType::String)
                    .conflicts_with(&["info.source_exchange"]),
                field("info.source_exchange", FieldType::String)
                    .conflicts_with(&["info.source_queue"]),
                field("info.source_exchange_key", FieldType::String),
                field("info.source_address", FieldType::String),
                field("info.source_prefetch_count", FieldType::Int)
                    .conflicts_with(&["info.prefetch_count"]),
                field("info.source_delete_after", FieldType::String)
                    .conflicts_with(&["info.delete_after"]),
                field("info.destination_uri", FieldType::String)
                    .required()
                    .sensitive(),
                field("info.destination_protocol", FieldType::String).default(DEFAULT_PROTOCOL),
                field("info.destination_queue", FieldType::String)
                    .conflicts_with(&["info.destination_exchange"]),
                field("info.destination_exchange", FieldType::String)
                    .conflicts_with(&["info.destination_queue"]),
                field("info.destination_exchange_key", FieldType::String),
                field("info.destination_address", FieldType::String),
                field("info.destination_add_forward_headers", FieldType::Bool)
                    .conflicts_with(&["info.add_forward_headers"]),
                field("info.destination_add_timestamp_header", FieldType::Bool).default(false),
                field("info.destination_application_properties", FieldType::String),
                field("info.destination_properties", FieldType::String),
                field("info.destination_publish_properties", FieldType::String),
                field("info.ack_mode", FieldType::String).default("on-confirm"),
                field("info.reconnect_delay", FieldType::Int).default(1),
                field("info.add_forward_headers", FieldType::Bool)
                    .conflicts_with(&["info.destination_add_forward_headers"])
                    .deprecated("use destination_add_forward_headers instead"),
                field("info.delete_after", FieldType::String)
                    .conflicts_with(&["info.source_delete_after"])
                    .deprecated("use source_delete_after instead"),
                field("info.prefetch_count", FieldType::Int)
                    .conflicts_with(&["info.source_prefetch_count"])
                    .deprecated("use source_prefetch_count instead"),
            ],
        }
    }

    async fn create<C: BrokerClient>(
        &self,
        client: &ManagementClient<C>,
        config: &ShovelConfig,
    ) -> Result<Applied<ShovelConfig>, ProviderError> {
        require_non_empty("name", &config.name)?;
        require_non_empty("vhost", &config.vhost)?;
        config.info.validate()?;

        // uris are left out; they may embed credentials
        tracing::debug!(shovel = %config.name, vhost = %config.vhost, "declaring shovel");
        let response = client
            .declare_shovel(&config.vhost, &config.name, config.info.definition())
            .await?;
        check_write(&response, Self::KIND, "declaring")?;

        let id = NameVhostId::new(&config.name, &config.vhost).to_string();
        read_back(self, client, id, config).await
    }

    async fn read<C: BrokerClient>(
        &self,
        client: &ManagementClient<C>,
        id: &str,
        _prior: Option<&ShovelConfig>,
    ) -> Result<ReadOutcome<ShovelConfig>, ProviderError> {
        let key = parse_name_vhost(Self::KIND, id)?;
        let outcome = present_or_absent(
            client.get_shovel(&key.vhost, &key.name).await,
            Self::KIND,
            id,
        )?;

        Ok(outcome.map(|param| ShovelConfig {
            name: param.name.unwrap_or(key.name),
            vhost: param.vhost.unwrap_or(key.vhost),
            info: param.value.into(),
        }))
    }

    async fn delete<C: BrokerClient>(
        &self,
        client: &ManagementClient<C>,
        id: &str,
    ) -> Result<(), ProviderError> {
        let key = parse_name_vhost(Self::KIND, id)?;
        tracing::debug!(shovel = %key.name, vhost = %key.vhost, "deleting shovel");
        let response = client.delete_shovel(&key.vhost, &key.name).await?;
        check_delete(&response, Self::KIND)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use test_case::test_case;

    fn info(extra: serde_json::Value) -> ShovelInfoConfig {
        let mut base = json!({
            "source_uri": "amqp://src",
            "destination_uri": "amqp://dst"
        });
        if let (Some(base), Some(extra)) = (base.as_object_mut(), extra.as_object()) {
            base.extend(extra.clone());
        }
        serde_json::from_value(base).unwrap()
    }

    #[test]
    fn defaults_apply() {
        let i = info(json!({}));
        assert_eq!(i.source_protocol, "amqp091");
        assert_eq!(i.destination_protocol, "amqp091");
        assert_eq!(i.reconnect_delay, 1);
        assert_eq!(i.ack_mode, AckMode::OnConfirm);
        assert!(!i.destination_add_timestamp_header);
        i.validate().unwrap();
    }

    #[test_case(json!({"source_queue": "q", "source_exchange": "e"}); "source queue and exchange")]
    #[test_case(json!({"destination_queue": "q", "destination_exchange": "e"}); "destination queue and exchange")]
    #[test_case(json!({"add_forward_headers": true, "destination_add_forward_headers": false}); "forward headers alias")]
    #[test_case(json!({"delete_after": "never", "source_delete_after": "never"}); "delete after alias")]
    #[test_case(json!({"prefetch_count": 10, "source_prefetch_count": 10}); "prefetch alias")]
    fn conflicting_fields_are_rejected(extra: serde_json::Value) {
        let err = info(extra).validate().unwrap_err();
        assert!(err.to_string().contains("conflicting fields set"));
    }

    #[test]
    fn empty_strings_do_not_conflict() {
        info(json!({"source_queue": "q", "source_exchange": ""}))
            .validate()
            .unwrap();
    }

    #[test]
    fn definition_uses_wire_names() {
        let wire = serde_json::to_value(
            info(json!({"source_queue": "jobs", "destination_exchange": "archive"})).definition(),
        )
        .unwrap();
        assert_eq!(wire["src-uri"], json!("amqp://src"));
        assert_eq!(wire["src-queue"], json!("jobs"));
        assert_eq!(wire["dest-exchange"], json!("archive"));
        assert_eq!(wire["ack-mode"], json!("on-confirm"));
        assert_eq!(wire["reconnect-delay"], json!(1));
        assert!(wire.get("src-exchange").is_none());
    }
}
