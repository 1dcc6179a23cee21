// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

use async_trait::async_trait;
use rabbitmq_api::Permissions;
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

/// A user's configure/write/read patterns in one vhost.
///
/// Identified by `user@vhost`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PermissionsConfig {
    pub user: String,
    #[serde(default = "default_vhost")]
    pub vhost: String,
    pub permissions: PermissionsSpec,
}

/// Regular expressions matched against resource names
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct PermissionsSpec {
    pub configure: String,
    pub write: String,
    pub read: String,
}

pub struct PermissionsResource;

impl PermissionsResource {
    async fn put<C: BrokerClient>(
        client: &ManagementClient<C>,
        config: &PermissionsConfig,
        action: &'static str,
    ) -> Result<(), ProviderError> {
        require_non_empty("user", &config.user)?;
        let permissions = Permissions {
            configure: config.permissions.configure.clone(),
            write: config.permissions.write.clone(),
            read: config.permissions.read.clone(),
        };
        tracing::debug!(
            user = %config.user,
            vhost = %config.vhost,
            ?permissions,
            "setting permissions"
        );
        let response = client
            .update_permissions_in(&config.vhost, &config.user, &permissions)
            .await?;
        check_write(&response, Self::KIND, action)
    }
}

#[async_trait]
impl ResourceHandler for PermissionsResource {
    type Config = PermissionsConfig;

    const KIND: ResourceKind = ResourceKind::Permissions;

    fn schema(&self) -> ResourceSchema {
        ResourceSchema {
            kind: Self::KIND,
            id_format: "user@vhost",
            updatable: true,
            fields: vec![
                FieldSchema::new("user", FieldType::String).required().force_new(),
                FieldSchema::new("vhost", FieldType::String).force_new().default("/"),
                FieldSchema::new("permissions", FieldType::Block).required(),
                FieldSchema::new("permissions.configure", FieldType::String).required(),
                FieldSchema::new("permissions.write", FieldType::String).required(),
                FieldSchema::new("permissions.read", FieldType::String).required(),
            ],
        }
    }

    async fn create<C: BrokerClient>(
        &self,
        client: &ManagementClient<C>,
        config: &PermissionsConfig,
    ) -> Result<Applied<PermissionsConfig>, ProviderError> {
        Self::put(client, config, "setting").await?;
        let id = NameVhostId::new(&config.user, &config.vhost).to_string();
        read_back(self, client, id, config).await
    }

    async fn read<C: BrokerClient>(
        &self,
        client: &ManagementClient<C>,
        id: &str,
        _prior: Option<&PermissionsConfig>,
    ) -> Result<ReadOutcome<PermissionsConfig>, ProviderError> {
        let key = parse_name_vhost(Self::KIND, id)?;
        let outcome = present_or_absent(
            client.get_permissions_in(&key.vhost, &key.name).await,
            Self::KIND,
            id,
        )?;

        Ok(outcome.map(|info| PermissionsConfig {
            user: info.user,
            vhost: info.vhost,
            permissions: PermissionsSpec {
                configure: info.configure,
                write: info.write,
                read: info.read,
            },
        }))
    }

    async fn update<C: BrokerClient>(
        &self,
        client: &ManagementClient<C>,
        id: &str,
        config: &PermissionsConfig,
    ) -> Result<Applied<PermissionsConfig>, ProviderError> {
        let key = parse_name_vhost(Self::KIND, id)?;
        // user and vhost come from the identifier; they are ForceNew
        let config = PermissionsConfig {
            user: key.name,
            vhost: key.vhost,
            permissions: config.permissions.clone(),
        };
        Self::put(client, &config, "updating").await?;
        read_back(self, client, id.to_string(), &config).await
    }

    async fn delete<C: BrokerClient>(
        &self,
        client: &ManagementClient<C>,
        id: &str,
    ) -> Result<(), ProviderError> {
        let key = parse_name_vhost(Self::KIND, id)?;
        tracing::debug!(user = %key.name, vhost = %key.vhost, "clearing permissions");
        let response = client.clear_permissions_in(&key.vhost, &key.name).await?;
        check_delete(&response, Self::KIND)
    }
}
