// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

use async_trait::async_trait;
use rabbitmq_api::VhostSettings;
use rabbitmq_client::{BrokerClient, ManagementClient};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{check_delete, check_write, parse_name, present_or_absent, require_non_empty};
use crate::error::ProviderError;
use crate::lifecycle::{Applied, ReadOutcome, ResourceHandler, ResourceKind, read_back};
use crate::schema::{FieldSchema, FieldType, ResourceSchema};

/// Virtual host; identified by its name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct VhostConfig {
    pub name: String,
}

pub struct VhostResource;

#[async_trait]
impl ResourceHandler for VhostResource {
    type Config = VhostConfig;

    const KIND: ResourceKind = ResourceKind::Vhost;

    fn schema(&self) -> ResourceSchema {
        ResourceSchema {
            kind: Self::KIND,
            id_format: "name",
            updatable: false,
            fields: vec![FieldSchema::new("name", FieldType::String).required().force_new()],
        }
    }

    async fn create<C: BrokerClient>(
        &self,
        client: &ManagementClient<C>,
        config: &VhostConfig,
    ) -> Result<Applied<VhostConfig>, ProviderError> {
        require_non_empty("name", &config.name)?;

        tracing::debug!(vhost = %config.name, "declaring vhost");
        let response = client
            .put_vhost(&config.name, &VhostSettings::default())
            .await?;
        check_write(&response, Self::KIND, "creating")?;

        read_back(self, client, config.name.clone(), config).await
    }

    async fn read<C: BrokerClient>(
        &self,
        client: &ManagementClient<C>,
        id: &str,
        _prior: Option<&VhostConfig>,
    ) -> Result<ReadOutcome<VhostConfig>, ProviderError> {
        let name = parse_name(Self::KIND, id)?;
        let outcome = present_or_absent(client.get_vhost(&name).await, Self::KIND, id)?;
        Ok(outcome.map(|info| VhostConfig { name: info.name }))
    }

    async fn delete<C: BrokerClient>(
        &self,
        client: &ManagementClient<C>,
        id: &str,
    ) -> Result<(), ProviderError> {
        let name = parse_name(Self::KIND, id)?;
        tracing::debug!(vhost = %name, "deleting vhost");
        let response = client.delete_vhost(&name).await?;
        check_delete(&response, Self::KIND)
    }
}
