// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Broker users.
//!
//! The management API never returns a password, so the state keeps the one
//! it was given. An imported user has an empty password until the next
//! update sets one.

use async_trait::async_trait;
use rabbitmq_api::UserSettings;
use rabbitmq_client::{BrokerClient, ManagementClient};
use schemars::JsonSchema;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Deserializer, Serialize};

use super::{check_delete, check_write, parse_name, present_or_absent, require_non_empty};
use crate::error::ProviderError;
use crate::lifecycle::{Applied, ReadOutcome, ResourceHandler, ResourceKind, read_back};
use crate::schema::{FieldSchema, FieldType, ResourceSchema};

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct UserConfig {
    pub name: String,
    /// Never serialized
    #[serde(
        default = "empty_password",
        deserialize_with = "deserialize_password",
        skip_serializing
    )]
    #[schemars(with = "String")]
    pub password: SecretString,
    /// For example `administrator`, `monitoring` or `management`
    #[serde(default)]
    pub tags: Vec<String>,
}

impl UserConfig {
    pub fn new(name: impl Into<String>, password: impl Into<String>, tags: Vec<String>) -> Self {
        Self {
            name: name.into(),
            password: SecretString::from(password.into()),
            tags,
        }
    }

    fn settings(&self) -> UserSettings {
        UserSettings::new(self.password.expose_secret(), &self.tags)
    }
}

impl PartialEq for UserConfig {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.tags == other.tags
            && self.password.expose_secret() == other.password.expose_secret()
    }
}

fn empty_password() -> SecretString {
    SecretString::from(String::new())
}

fn deserialize_password<'de, D>(deserializer: D) -> Result<SecretString, D::Error>
where
    D: Deserializer<'de>,
{
    String::deserialize(deserializer).map(SecretString::from)
}

pub struct UserResource;

impl UserResource {
    async fn put<C: BrokerClient>(
        client: &ManagementClient<C>,
        config: &UserConfig,
        action: &'static str,
    ) -> Result<(), ProviderError> {
        require_non_empty("name", &config.name)?;
        tracing::debug!(user = %config.name, tags = ?config.tags, action, "writing user");
        let response = client.put_user(&config.name, &config.settings()).await?;
        check_write(&response, Self::KIND, action)
    }
}

#[async_trait]
impl ResourceHandler for UserResource {
    type Config = UserConfig;

    const KIND: ResourceKind = ResourceKind::User;

    fn schema(&self) -> ResourceSchema {
        ResourceSchema {
            kind: Self::KIND,
            id_format: "name",
            updatable: true,
            fields: vec![
                FieldSchema::new("name", FieldType::String).required().force_new(),
                FieldSchema::new("password", FieldType::String)
                    .required()
                    .sensitive(),
                FieldSchema::new("tags", FieldType::List),
            ],
        }
    }

    async fn create<C: BrokerClient>(
        &self,
        client: &ManagementClient<C>,
        config: &UserConfig,
    ) -> Result<Applied<UserConfig>, ProviderError> {
        Self::put(client, config, "creating").await?;
        read_back(self, client, config.name.clone(), config).await
    }

    async fn read<C: BrokerClient>(
        &self,
        client: &ManagementClient<C>,
        id: &str,
        prior: Option<&UserConfig>,
    ) -> Result<ReadOutcome<UserConfig>, ProviderError> {
        let name = parse_name(Self::KIND, id)?;
        let outcome = present_or_absent(client.get_user(&name).await, Self::KIND, id)?;

        Ok(outcome.map(|info| UserConfig {
            name: info.name,
            password: prior
                .map(|p| SecretString::from(p.password.expose_secret().to_owned()))
                .unwrap_or_else(empty_password),
            tags: info.tags,
        }))
    }

    async fn update<C: BrokerClient>(
        &self,
        client: &ManagementClient<C>,
        id: &str,
        config: &UserConfig,
    ) -> Result<Applied<UserConfig>, ProviderError> {
        let name = parse_name(Self::KIND, id)?;
        if name != config.name {
            return Err(ProviderError::config(format!(
                "user name cannot change in place ({name:?} -> {:?})",
                config.name
            )));
        }
        Self::put(client, config, "updating").await?;
        read_back(self, client, name, config).await
    }

    async fn delete<C: BrokerClient>(
        &self,
        client: &ManagementClient<C>,
        id: &str,
    ) -> Result<(), ProviderError> {
        let name = parse_name(Self::KIND, id)?;
        tracing::debug!(user = %name, "deleting user");
        let response = client.delete_user(&name).await?;
        check_delete(&response, Self::KIND)
    }
}
