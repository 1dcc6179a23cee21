// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Kind-erased entry points.
//!
//! Callers that only learn the kind at runtime (the CLI, a configuration
//! engine reading a plan) work with `serde_json::Value` documents. These
//! functions decode the document into the kind's typed configuration, run
//! the handler and encode the resulting state back to JSON.

use rabbitmq_client::{BrokerClient, ManagementClient};
use rabbitmq_codec::NameVhostId;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

use crate::error::ProviderError;
use crate::lifecycle::{Applied, ReadOutcome, ResourceHandler, ResourceKind};
use crate::resources::{
    BindingResource, ExchangeResource, FederationUpstreamResource, PermissionsResource,
    PolicyResource, QueueResource, ShovelResource, TopicPermissionsResource, UserResource,
    VhostResource, parse_binding_id, parse_name, parse_name_vhost,
};
use crate::schema::ResourceSchema;

/// Bind `$handler` to the handler for `$kind` and evaluate `$body`.
macro_rules! with_handler {
    ($kind:expr, |$handler:ident| $body:expr) => {
        match $kind {
            ResourceKind::Vhost => {
                let $handler = VhostResource;
                $body
            }
            ResourceKind::Exchange => {
                let $handler = ExchangeResource;
                $body
            }
            ResourceKind::Queue => {
                let $handler = QueueResource;
                $body
            }
            ResourceKind::Binding => {
                let $handler = BindingResource;
                $body
            }
            ResourceKind::User => {
                let $handler = UserResource;
                $body
            }
            ResourceKind::Permissions => {
                let $handler = PermissionsResource;
                $body
            }
            ResourceKind::TopicPermissions => {
                let $handler = TopicPermissionsResource;
                $body
            }
            ResourceKind::FederationUpstream => {
                let $handler = FederationUpstreamResource;
                $body
            }
            ResourceKind::Shovel => {
                let $handler = ShovelResource;
                $body
            }
            ResourceKind::Policy => {
                let $handler = PolicyResource;
                $body
            }
        }
    };
}

fn decode<T: DeserializeOwned>(kind: ResourceKind, doc: Value) -> Result<T, ProviderError> {
    serde_json::from_value(doc).map_err(|source| ProviderError::Decode { kind, source })
}

fn encode<T: Serialize>(kind: ResourceKind, state: &T) -> Result<Value, ProviderError> {
    serde_json::to_value(state).map_err(|source| ProviderError::Encode { kind, source })
}

fn encode_applied<T: Serialize>(
    kind: ResourceKind,
    applied: Applied<T>,
) -> Result<Applied<Value>, ProviderError> {
    Ok(Applied {
        state: encode(kind, &applied.state)?,
        id: applied.id,
    })
}

fn encode_outcome<T: Serialize>(
    kind: ResourceKind,
    outcome: ReadOutcome<T>,
) -> Result<ReadOutcome<Value>, ProviderError> {
    match outcome {
        ReadOutcome::Present(state) => Ok(ReadOutcome::Present(encode(kind, &state)?)),
        ReadOutcome::Absent => Ok(ReadOutcome::Absent),
    }
}

fn json_schema_of<H: ResourceHandler>(_handler: &H) -> Value {
    let schema = schemars::schema_for!(H::Config);
    serde_json::to_value(schema).unwrap_or(Value::Null)
}

async fn create_with<H, C>(
    handler: &H,
    client: &ManagementClient<C>,
    doc: Value,
) -> Result<Applied<Value>, ProviderError>
where
    H: ResourceHandler,
    C: BrokerClient,
{
    let config: H::Config = decode(H::KIND, doc)?;
    encode_applied(H::KIND, handler.create(client, &config).await?)
}

async fn read_with<H, C>(
    handler: &H,
    client: &ManagementClient<C>,
    id: &str,
    prior: Option<Value>,
) -> Result<ReadOutcome<Value>, ProviderError>
where
    H: ResourceHandler,
    C: BrokerClient,
{
    let prior: Option<H::Config> = prior.map(|doc| decode(H::KIND, doc)).transpose()?;
    encode_outcome(H::KIND, handler.read(client, id, prior.as_ref()).await?)
}

async fn update_with<H, C>(
    handler: &H,
    client: &ManagementClient<C>,
    id: &str,
    doc: Value,
) -> Result<Applied<Value>, ProviderError>
where
    H: ResourceHandler,
    C: BrokerClient,
{
    let config: H::Config = decode(H::KIND, doc)?;
    encode_applied(H::KIND, handler.update(client, id, &config).await?)
}

async fn import_with<H, C>(
    handler: &H,
    client: &ManagementClient<C>,
    id: &str,
) -> Result<ReadOutcome<Value>, ProviderError>
where
    H: ResourceHandler,
    C: BrokerClient,
{
    encode_outcome(H::KIND, handler.import(client, id).await?)
}

impl ResourceKind {
    /// Field metadata for this kind
    pub fn schema(self) -> ResourceSchema {
        with_handler!(self, |handler| handler.schema())
    }

    /// JSON Schema of the configuration document
    pub fn json_schema(self) -> Value {
        with_handler!(self, |handler| json_schema_of(&handler))
    }

    /// Split an identifier into its named fields without touching the broker.
    pub fn parse_id(self, id: &str) -> Result<Value, ProviderError> {
        match self {
            Self::Vhost | Self::User => Ok(json!({ "name": parse_name(self, id)? })),
            Self::Permissions | Self::TopicPermissions => {
                let NameVhostId { name, vhost } = parse_name_vhost(self, id)?;
                Ok(json!({ "user": name, "vhost": vhost }))
            }
            Self::Binding => {
                let (key, destination_type) = parse_binding_id(id)?;
                Ok(json!({
                    "vhost": key.vhost,
                    "source": key.source,
                    "destination": key.destination,
                    "destination_type": destination_type,
                    "properties_key": key.properties_key,
                }))
            }
            Self::Exchange
            | Self::Queue
            | Self::FederationUpstream
            | Self::Shovel
            | Self::Policy => {
                let NameVhostId { name, vhost } = parse_name_vhost(self, id)?;
                Ok(json!({ "name": name, "vhost": vhost }))
            }
        }
    }

    pub async fn create<C: BrokerClient>(
        self,
        client: &ManagementClient<C>,
        doc: Value,
    ) -> Result<Applied<Value>, ProviderError> {
        tracing::debug!(kind = %self, "create");
        with_handler!(self, |handler| create_with(&handler, client, doc).await)
    }

    pub async fn read<C: BrokerClient>(
        self,
        client: &ManagementClient<C>,
        id: &str,
        prior: Option<Value>,
    ) -> Result<ReadOutcome<Value>, ProviderError> {
        tracing::debug!(kind = %self, id, "read");
        with_handler!(self, |handler| read_with(&handler, client, id, prior).await)
    }

    pub async fn update<C: BrokerClient>(
        self,
        client: &ManagementClient<C>,
        id: &str,
        doc: Value,
    ) -> Result<Applied<Value>, ProviderError> {
        tracing::debug!(kind = %self, id, "update");
        with_handler!(self, |handler| update_with(&handler, client, id, doc).await)
    }

    pub async fn delete<C: BrokerClient>(
        self,
        client: &ManagementClient<C>,
        id: &str,
    ) -> Result<(), ProviderError> {
        tracing::debug!(kind = %self, id, "delete");
        with_handler!(self, |handler| handler.delete(client, id).await)
    }

    pub async fn import<C: BrokerClient>(
        self,
        client: &ManagementClient<C>,
        id: &str,
    ) -> Result<ReadOutcome<Value>, ProviderError> {
        tracing::debug!(kind = %self, id, "import");
        with_handler!(self, |handler| import_with(&handler, client, id).await)
    }
}
