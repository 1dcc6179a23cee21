// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

use async_trait::async_trait;
use rabbitmq_api::QueueSettings;
use rabbitmq_client::{BrokerClient, ManagementClient};
use rabbitmq_codec::{ArgumentBundle, NameVhostId, StructuredArguments, resolve_input};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::arguments::read_back_arguments;
use super::{
    check_delete, check_write, default_vhost, parse_name_vhost, present_or_absent,
    require_non_empty,
};
use crate::error::ProviderError;
use crate::lifecycle::{Applied, ReadOutcome, ResourceHandler, ResourceKind, read_back};
use crate::schema::{FieldSchema, FieldType, ResourceSchema};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct QueueConfig {
    pub name: String,
    #[serde(default = "default_vhost")]
    pub vhost: String,
    pub settings: QueueSettingsConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct QueueSettingsConfig {
    #[serde(default)]
    pub durable: bool,
    #[serde(default)]
    pub auto_delete: bool,
    /// String-valued arguments; conflicts with `arguments_json`
    #[serde(default, skip_serializing_if = "StructuredArguments::is_empty")]
    pub arguments: StructuredArguments,
    /// Arguments as a JSON object, for values that are not strings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arguments_json: Option<String>,
}

pub struct QueueResource;

#[async_trait]
impl ResourceHandler for QueueResource {
    type Config = QueueConfig;

    const KIND: ResourceKind = ResourceKind::Queue;

    fn schema(&self) -> ResourceSchema {
        ResourceSchema {
            kind: Self::KIND,
            id_format: "name@vhost",
            updatable: false,
            fields: vec![
                FieldSchema::new("name", FieldType::String).required().force_new(),
                FieldSchema::new("vhost", FieldType::String).force_new().default("/"),
                FieldSchema::new("settings", FieldType::Block).required().force_new(),
                FieldSchema::new("settings.durable", FieldType::Bool)
                    .force_new()
                    .default(false),
                FieldSchema::new("settings.auto_delete", FieldType::Bool)
                    .force_new()
                    .default(false),
                FieldSchema::new("settings.arguments", FieldType::Map)
                    .force_new()
                    .conflicts_with(&["settings.arguments_json"]),
                FieldSchema::new("settings.arguments_json", FieldType::Json)
                    .force_new()
                    .conflicts_with(&["settings.arguments"]),
            ],
        }
    }

    async fn create<C: BrokerClient>(
        &self,
        client: &ManagementClient<C>,
        config: &QueueConfig,
    ) -> Result<Applied<QueueConfig>, ProviderError> {
        require_non_empty("name", &config.name)?;
        let arguments: ArgumentBundle = resolve_input(
            Some(&config.settings.arguments),
            config.settings.arguments_json.as_deref(),
        )?;

        let settings = QueueSettings {
            durable: config.settings.durable,
            auto_delete: config.settings.auto_delete,
            arguments,
        };

        tracing::debug!(
            queue = %config.name,
            vhost = %config.vhost,
            durable = settings.durable,
            auto_delete = settings.auto_delete,
            "declaring queue"
        );
        let response = client
            .declare_queue(&config.vhost, &config.name, &settings)
            .await?;
        check_write(&response, Self::KIND, "declaring")?;

        let id = NameVhostId::new(&config.name, &config.vhost).to_string();
        read_back(self, client, id, config).await
    }

    async fn read<C: BrokerClient>(
        &self,
        client: &ManagementClient<C>,
        id: &str,
        prior: Option<&QueueConfig>,
    ) -> Result<ReadOutcome<QueueConfig>, ProviderError> {
        let key = parse_name_vhost(Self::KIND, id)?;
        let outcome = present_or_absent(
            client.get_queue(&key.vhost, &key.name).await,
            Self::KIND,
            id,
        )?;
        let ReadOutcome::Present(info) = outcome else {
            return Ok(ReadOutcome::Absent);
        };

        let prior_json = prior.and_then(|p| p.settings.arguments_json.as_deref());
        let (arguments, arguments_json) = read_back_arguments(&info.arguments, prior_json)?;
        tracing::trace!(
            queue = %info.name,
            serialized = arguments_json.is_some(),
            "queue arguments read back"
        );

        Ok(ReadOutcome::Present(QueueConfig {
            name: info.name,
            vhost: info.vhost,
            settings: QueueSettingsConfig {
                durable: info.durable,
                auto_delete: info.auto_delete,
                arguments,
                arguments_json,
            },
        }))
    }

    async fn delete<C: BrokerClient>(
        &self,
        client: &ManagementClient<C>,
        id: &str,
    ) -> Result<(), ProviderError> {
        let key = parse_name_vhost(Self::KIND, id)?;
        tracing::debug!(queue = %key.name, vhost = %key.vhost, "deleting queue");
        let response = client.delete_queue(&key.vhost, &key.name).await?;
        check_delete(&response, Self::KIND)
    }
}
