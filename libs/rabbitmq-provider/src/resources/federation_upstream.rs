// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Federation upstreams, stored as `federation-upstream` runtime parameters.

use async_trait::async_trait;
use rabbitmq_api::{AckMode, FEDERATION_UPSTREAM_COMPONENT, FederationDefinition};
use rabbitmq_client::{BrokerClient, ManagementClient};
use rabbitmq_codec::NameVhostId;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{
    check_delete, check_write, parse_name_vhost, present_or_absent, require_non_empty,
};
use crate::error::ProviderError;
use crate::lifecycle::{Applied, ReadOutcome, ResourceHandler, ResourceKind, read_back};
use crate::schema::{FieldSchema, FieldType, ResourceSchema};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FederationUpstreamConfig {
    pub name: String,
    pub vhost: String,
    /// Always `federation-upstream`; set by the broker
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component: Option<String>,
    pub definition: FederationDefinitionConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FederationDefinitionConfig {
    /// AMQP URI of the upstream; may carry credentials
    pub uri: String,
    #[serde(default = "default_prefetch_count")]
    pub prefetch_count: i64,
    /// Seconds between reconnection attempts
    #[serde(default = "default_reconnect_delay")]
    pub reconnect_delay: i64,
    #[serde(default)]
    pub ack_mode: AckMode,
    #[serde(default)]
    pub trust_user_id: bool,

    // federated exchanges only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exchange: Option<String>,
    #[serde(default = "default_max_hops")]
    pub max_hops: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_ttl: Option<i64>,

    // federated queues only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub queue: Option<String>,
}

fn default_prefetch_count() -> i64 {
    1000
}

fn default_reconnect_delay() -> i64 {
    5
}

fn default_max_hops() -> i64 {
    1
}

impl From<&FederationDefinitionConfig> for FederationDefinition {
    fn from(c: &FederationDefinitionConfig) -> Self {
        Self {
            uri: c.uri.clone(),
            prefetch_count: Some(c.prefetch_count),
            reconnect_delay: Some(c.reconnect_delay),
            ack_mode: Some(c.ack_mode),
            trust_user_id: c.trust_user_id,
            exchange: c.exchange.clone().filter(|s| !s.is_empty()),
            max_hops: Some(c.max_hops),
            expires: c.expires,
            message_ttl: c.message_ttl,
            queue: c.queue.clone().filter(|s| !s.is_empty()),
        }
    }
}

impl From<FederationDefinition> for FederationDefinitionConfig {
    fn from(d: FederationDefinition) -> Self {
        Self {
            uri: d.uri,
            prefetch_count: d.prefetch_count.unwrap_or_else(default_prefetch_count),
            reconnect_delay: d.reconnect_delay.unwrap_or_else(default_reconnect_delay),
            ack_mode: d.ack_mode.unwrap_or_default(),
            trust_user_id: d.trust_user_id,
            exchange: d.exchange,
            max_hops: d.max_hops.unwrap_or_else(default_max_hops),
            expires: d.expires,
            message_ttl: d.message_ttl,
            queue: d.queue,
        }
    }
}

pub struct FederationUpstreamResource;

impl FederationUpstreamResource {
    async fn put<C: BrokerClient>(
        client: &ManagementClient<C>,
        vhost: &str,
        name: &str,
        definition: &FederationDefinitionConfig,
        action: &'static str,
    ) -> Result<(), ProviderError> {
        require_non_empty("definition.uri", &definition.uri)?;
        // the uri is left out; it may embed credentials
        tracing::debug!(
            upstream = name,
            vhost,
            prefetch_count = definition.prefetch_count,
            ack_mode = %definition.ack_mode,
            "putting federation upstream"
        );
        let response = client
            .put_federation_upstream(vhost, name, definition.into())
            .await?;
        check_write(&response, Self::KIND, action)
    }
}

#[async_trait]
impl ResourceHandler for FederationUpstreamResource {
    type Config = FederationUpstreamConfig;

    const KIND: ResourceKind = ResourceKind::FederationUpstream;

    fn schema(&self) -> ResourceSchema {
        ResourceSchema {
            kind: Self::KIND,
            id_format: "name@vhost",
            updatable: true,
            fields: vec![
                FieldSchema::new("name", FieldType::String).required().force_new(),
                FieldSchema::new("vhost", FieldType::String).required().force_new(),
                FieldSchema::new("component", FieldType::String).computed(),
                FieldSchema::new("definition", FieldType::Block).required(),
                FieldSchema::new("definition.uri", FieldType::String)
                    .required()
                    .sensitive(),
                FieldSchema::new("definition.prefetch_count", FieldType::Int).default(1000),
                FieldSchema::new("definition.reconnect_delay", FieldType::Int).default(5),
                FieldSchema::new("definition.ack_mode", FieldType::String).default("on-confirm"),
                FieldSchema::new("definition.trust_user_id", FieldType::Bool).default(false),
                FieldSchema::new("definition.exchange", FieldType::String),
                FieldSchema::new("definition.max_hops", FieldType::Int).default(1),
                FieldSchema::new("definition.expires", FieldType::Int),
                FieldSchema::new("definition.message_ttl", FieldType::Int),
                FieldSchema::new("definition.queue", FieldType::String),
            ],
        }
    }

    async fn create<C: BrokerClient>(
        &self,
        client: &ManagementClient<C>,
        config: &FederationUpstreamConfig,
    ) -> Result<Applied<FederationUpstreamConfig>, ProviderError> {
        require_non_empty("name", &config.name)?;
        require_non_empty("vhost", &config.vhost)?;
        Self::put(
            client,
            &config.vhost,
            &config.name,
            &config.definition,
            "creating",
        )
        .await?;

        let id = NameVhostId::new(&config.name, &config.vhost).to_string();
        read_back(self, client, id, config).await
    }

    async fn read<C: BrokerClient>(
        &self,
        client: &ManagementClient<C>,
        id: &str,
        _prior: Option<&FederationUpstreamConfig>,
    ) -> Result<ReadOutcome<FederationUpstreamConfig>, ProviderError> {
        let key = parse_name_vhost(Self::KIND, id)?;
        let outcome = present_or_absent(
            client.get_federation_upstream(&key.vhost, &key.name).await,
            Self::KIND,
            id,
        )?;

        Ok(outcome.map(|param| FederationUpstreamConfig {
            name: param.name.unwrap_or(key.name),
            vhost: param.vhost.unwrap_or(key.vhost),
            component: Some(
                param
                    .component
                    .unwrap_or_else(|| FEDERATION_UPSTREAM_COMPONENT.to_string()),
            ),
            definition: param.value.into(),
        }))
    }

    async fn update<C: BrokerClient>(
        &self,
        client: &ManagementClient<C>,
        id: &str,
        config: &FederationUpstreamConfig,
    ) -> Result<Applied<FederationUpstreamConfig>, ProviderError> {
        let key = parse_name_vhost(Self::KIND, id)?;
        Self::put(client, &key.vhost, &key.name, &config.definition, "updating").await?;
        read_back(self, client, id.to_string(), config).await
    }

    async fn delete<C: BrokerClient>(
        &self,
        client: &ManagementClient<C>,
        id: &str,
    ) -> Result<(), ProviderError> {
        let key = parse_name_vhost(Self::KIND, id)?;
        tracing::debug!(upstream = %key.name, vhost = %key.vhost, "deleting federation upstream");
        let response = client
            .delete_federation_upstream(&key.vhost, &key.name)
            .await?;
        check_delete(&response, Self::KIND)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn defaults_apply() {
        let config: FederationDefinitionConfig =
            serde_json::from_value(json!({"uri": "amqp://upstream"})).unwrap();
        assert_eq!(config.prefetch_count, 1000);
        assert_eq!(config.reconnect_delay, 5);
        assert_eq!(config.ack_mode, AckMode::OnConfirm);
        assert_eq!(config.max_hops, 1);
        assert!(!config.trust_user_id);
    }

    #[test]
    fn unknown_ack_mode_is_rejected() {
        let result = serde_json::from_value::<FederationDefinitionConfig>(
            json!({"uri": "amqp://upstream", "ack_mode": "sometimes"}),
        );
        assert!(result.is_err());
    }

    #[test]
    fn wire_definition_round_trips() {
        let config: FederationDefinitionConfig = serde_json::from_value(json!({
            "uri": "amqp://upstream",
            "ack_mode": "no-ack",
            "exchange": "",
            "queue": "q1",
            "message_ttl": 60000
        }))
        .unwrap();

        let wire = FederationDefinition::from(&config);
        assert_eq!(wire.exchange, None);
        assert_eq!(wire.queue.as_deref(), Some("q1"));
        assert_eq!(
            serde_json::to_value(&wire).unwrap()["ack-mode"],
            json!("no-ack")
        );

        let back = FederationDefinitionConfig::from(wire);
        assert_eq!(back.message_ttl, Some(60000));
        assert_eq!(back.ack_mode, AckMode::NoAck);
    }
}
