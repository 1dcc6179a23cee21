// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Per-exchange topic permissions of a user in a vhost.
//!
//! Topic permissions only exist on RabbitMQ 3.7 and later. When a write is
//! rejected the broker version is checked so an old broker produces a
//! useful error instead of a bare status code.

use async_trait::async_trait;
use rabbitmq_api::{TopicPermissionInfo, TopicPermissions};
use rabbitmq_client::{BrokerClient, BrokerResponse, ManagementClient};
use rabbitmq_codec::NameVhostId;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{
    api_error, check_delete, default_vhost, parse_name_vhost, present_or_absent, require_non_empty,
};
use crate::error::ProviderError;
use crate::lifecycle::{Applied, ReadOutcome, ResourceHandler, ResourceKind, read_back};
use crate::schema::{FieldSchema, FieldType, ResourceSchema};

/// First release with topic permissions
const MIN_VERSION: (u32, u32) = (3, 7);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TopicPermissionsConfig {
    pub user: String,
    #[serde(default = "default_vhost")]
    pub vhost: String,
    /// One entry per exchange; order is not significant
    pub permissions: Vec<TopicPermissionSpec>,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, JsonSchema)]
pub struct TopicPermissionSpec {
    pub exchange: String,
    pub write: String,
    pub read: String,
}

impl From<TopicPermissionInfo> for TopicPermissionSpec {
    fn from(info: TopicPermissionInfo) -> Self {
        Self {
            exchange: info.exchange,
            write: info.write,
            read: info.read,
        }
    }
}

pub struct TopicPermissionsResource;

impl TopicPermissionsResource {
    /// Error for a rejected write, preferring a version mismatch when the
    /// broker is too old to know about topic permissions.
    async fn rejected<C: BrokerClient>(
        client: &ManagementClient<C>,
        response: &BrokerResponse,
        action: &'static str,
    ) -> ProviderError {
        match client.overview().await {
            Ok(overview) => match overview.version() {
                Some(version) if version < MIN_VERSION => {
                    return ProviderError::UnsupportedVersion {
                        version: overview.rabbitmq_version,
                    };
                }
                Some(_) => {}
                None => tracing::debug!(
                    version = %overview.rabbitmq_version,
                    "unparseable broker version"
                ),
            },
            Err(e) => tracing::debug!(error = %e, "failed to fetch broker overview"),
        }
        api_error(response, Self::KIND, action)
    }

    async fn put_all<C: BrokerClient>(
        client: &ManagementClient<C>,
        vhost: &str,
        user: &str,
        permissions: &[TopicPermissionSpec],
        action: &'static str,
    ) -> Result<(), ProviderError> {
        for spec in permissions {
            let body = TopicPermissions {
                exchange: spec.exchange.clone(),
                write: spec.write.clone(),
                read: spec.read.clone(),
            };
            tracing::debug!(user, vhost, exchange = %body.exchange, "setting topic permissions");
            let response = client
                .update_topic_permissions_in(vhost, user, &body)
                .await?;
            if response.status.as_u16() >= 400 {
                return Err(Self::rejected(client, &response, action).await);
            }
        }
        Ok(())
    }

    /// An empty list would read back as absent.
    fn require_permissions(config: &TopicPermissionsConfig) -> Result<(), ProviderError> {
        if config.permissions.is_empty() {
            return Err(ProviderError::config(
                "permissions must list at least one exchange",
            ));
        }
        Ok(())
    }

    async fn clear<C: BrokerClient>(
        client: &ManagementClient<C>,
        vhost: &str,
        user: &str,
    ) -> Result<(), ProviderError> {
        tracing::debug!(user, vhost, "clearing topic permissions");
        let response = client.clear_topic_permissions_in(vhost, user).await?;
        if response.status.as_u16() >= 400 && response.status.as_u16() != 404 {
            return Err(Self::rejected(client, &response, "deleting").await);
        }
        check_delete(&response, Self::KIND)
    }
}

#[async_trait]
impl ResourceHandler for TopicPermissionsResource {
    type Config = TopicPermissionsConfig;

    const KIND: ResourceKind = ResourceKind::TopicPermissions;

    fn schema(&self) -> ResourceSchema {
        ResourceSchema {
            kind: Self::KIND,
            id_format: "user@vhost",
            updatable: true,
            fields: vec![
                FieldSchema::new("user", FieldType::String).required().force_new(),
                FieldSchema::new("vhost", FieldType::String).force_new().default("/"),
                FieldSchema::new("permissions", FieldType::Set).required(),
                FieldSchema::new("permissions.exchange", FieldType::String).required(),
                FieldSchema::new("permissions.write", FieldType::String).required(),
                FieldSchema::new("permissions.read", FieldType::String).required(),
            ],
        }
    }

    async fn create<C: BrokerClient>(
        &self,
        client: &ManagementClient<C>,
        config: &TopicPermissionsConfig,
    ) -> Result<Applied<TopicPermissionsConfig>, ProviderError> {
        require_non_empty("user", &config.user)?;
        Self::require_permissions(config)?;
        Self::put_all(
            client,
            &config.vhost,
            &config.user,
            &config.permissions,
            "setting",
        )
        .await?;

        let id = NameVhostId::new(&config.user, &config.vhost).to_string();
        read_back(self, client, id, config).await
    }

    async fn read<C: BrokerClient>(
        &self,
        client: &ManagementClient<C>,
        id: &str,
        _prior: Option<&TopicPermissionsConfig>,
    ) -> Result<ReadOutcome<TopicPermissionsConfig>, ProviderError> {
        let key = parse_name_vhost(Self::KIND, id)?;
        let ReadOutcome::Present(list) = present_or_absent(
            client.get_topic_permissions_in(&key.vhost, &key.name).await,
            Self::KIND,
            id,
        )?
        else {
            return Ok(ReadOutcome::Absent);
        };

        if list.is_empty() {
            tracing::warn!(kind = %Self::KIND, id, "no topic permissions left, dropping from state");
            return Ok(ReadOutcome::Absent);
        }

        let mut permissions: Vec<TopicPermissionSpec> =
            list.into_iter().map(TopicPermissionSpec::from).collect();
        permissions.sort();

        Ok(ReadOutcome::Present(TopicPermissionsConfig {
            user: key.name,
            vhost: key.vhost,
            permissions,
        }))
    }

    /// Clear every exchange, then set the configured ones. Exchanges dropped
    /// from the configuration lose their permissions.
    async fn update<C: BrokerClient>(
        &self,
        client: &ManagementClient<C>,
        id: &str,
        config: &TopicPermissionsConfig,
    ) -> Result<Applied<TopicPermissionsConfig>, ProviderError> {
        let key = parse_name_vhost(Self::KIND, id)?;
        Self::require_permissions(config)?;
        Self::clear(client, &key.vhost, &key.name).await?;
        Self::put_all(
            client,
            &key.vhost,
            &key.name,
            &config.permissions,
            "updating",
        )
        .await?;

        let config = TopicPermissionsConfig {
            user: key.name,
            vhost: key.vhost,
            permissions: config.permissions.clone(),
        };
        read_back(self, client, id.to_string(), &config).await
    }

    async fn delete<C: BrokerClient>(
        &self,
        client: &ManagementClient<C>,
        id: &str,
    ) -> Result<(), ProviderError> {
        let key = parse_name_vhost(Self::KIND, id)?;
        Self::clear(client, &key.vhost, &key.name).await
    }
}
