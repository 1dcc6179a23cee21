// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

use async_trait::async_trait;
use rabbitmq_api::{Arguments, ExchangeSettings};
use rabbitmq_client::{BrokerClient, ManagementClient};
use rabbitmq_codec::NameVhostId;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{
    check_delete, check_write, default_vhost, parse_name_vhost, present_or_absent,
    require_non_empty,
};
use crate::error::ProviderError;
use crate::lifecycle::{Applied, ReadOutcome, ResourceHandler, ResourceKind, read_back};
use crate::schema::{FieldSchema, FieldType, ResourceSchema};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ExchangeConfig {
    pub name: String,
    #[serde(default = "default_vhost")]
    pub vhost: String,
    pub settings: ExchangeSettingsConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ExchangeSettingsConfig {
    /// `direct`, `fanout`, `topic`, `headers` or a plugin-provided type
    #[serde(rename = "type")]
    pub exchange_type: String,
    #[serde(default)]
    pub durable: bool,
    #[serde(default)]
    pub auto_delete: bool,
    #[serde(default, skip_serializing_if = "Arguments::is_empty")]
    pub arguments: Arguments,
}

pub struct ExchangeResource;

#[async_trait]
impl ResourceHandler for ExchangeResource {
    type Config = ExchangeConfig;

    const KIND: ResourceKind = ResourceKind::Exchange;

    fn schema(&self) -> ResourceSchema {
        ResourceSchema {
            kind: Self::KIND,
            id_format: "name@vhost",
            updatable: false,
            fields: vec![
                FieldSchema::new("name", FieldType::String).required().force_new(),
                FieldSchema::new("vhost", FieldType::String).force_new().default("/"),
                FieldSchema::new("settings", FieldType::Block).required().force_new(),
                FieldSchema::new("settings.type", FieldType::String)
                    .required()
                    .force_new(),
                FieldSchema::new("settings.durable", FieldType::Bool)
                    .force_new()
                    .default(false),
                FieldSchema::new("settings.auto_delete", FieldType::Bool)
                    .force_new()
                    .default(false),
                FieldSchema::new("settings.arguments", FieldType::Map).force_new(),
            ],
        }
    }

    async fn create<C: BrokerClient>(
        &self,
        client: &ManagementClient<C>,
        config: &ExchangeConfig,
    ) -> Result<Applied<ExchangeConfig>, ProviderError> {
        require_non_empty("name", &config.name)?;
        require_non_empty("settings.type", &config.settings.exchange_type)?;

        let settings = ExchangeSettings {
            exchange_type: config.settings.exchange_type.clone(),
            durable: config.settings.durable,
            auto_delete: config.settings.auto_delete,
            arguments: config.settings.arguments.clone(),
        };

        tracing::debug!(
            exchange = %config.name,
            vhost = %config.vhost,
            exchange_type = %settings.exchange_type,
            "declaring exchange"
        );
        let response = client
            .declare_exchange(&config.vhost, &config.name, &settings)
            .await?;
        check_write(&response, Self::KIND, "declaring")?;

        let id = NameVhostId::new(&config.name, &config.vhost).to_string();
        read_back(self, client, id, config).await
    }

    async fn read<C: BrokerClient>(
        &self,
        client: &ManagementClient<C>,
        id: &str,
        _prior: Option<&ExchangeConfig>,
    ) -> Result<ReadOutcome<ExchangeConfig>, ProviderError> {
        let key = parse_name_vhost(Self::KIND, id)?;
        let outcome = present_or_absent(
            client.get_exchange(&key.vhost, &key.name).await,
            Self::KIND,
            id,
        )?;

        Ok(outcome.map(|info| ExchangeConfig {
            name: info.name,
            vhost: info.vhost,
            settings: ExchangeSettingsConfig {
                exchange_type: info.exchange_type,
                durable: info.durable,
                auto_delete: info.auto_delete,
                arguments: info.arguments,
            },
        }))
    }

    async fn delete<C: BrokerClient>(
        &self,
        client: &ManagementClient<C>,
        id: &str,
    ) -> Result<(), ProviderError> {
        let key = parse_name_vhost(Self::KIND, id)?;
        tracing::debug!(exchange = %key.name, vhost = %key.vhost, "deleting exchange");
        let response = client.delete_exchange(&key.vhost, &key.name).await?;
        check_delete(&response, Self::KIND)
    }
}
