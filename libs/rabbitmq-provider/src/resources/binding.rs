// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Bindings between an exchange and a queue or another exchange.
//!
//! The broker has no name for a binding. It is addressed by the pair it
//! connects plus a properties key derived from its routing key and
//! arguments, which the broker hands back in the `Location` header on
//! declaration. All five parts go into the identifier.
//!
//! Identifiers written by earlier releases escaped only the vhost, and the
//! broker's properties keys routinely contain `%2F` and `%25`. Read and
//! delete try the current reading of an identifier first and fall back to
//! the legacy one.

use async_trait::async_trait;
use rabbitmq_api::{BindingRequest, DestinationType};
use rabbitmq_client::{BrokerClient, ManagementClient, StatusCode};
use rabbitmq_codec::{BindingId, StructuredArguments, resolve_input};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::arguments::read_back_arguments;
use super::{check_delete, check_write, present_or_absent, require_non_empty};
use crate::error::ProviderError;
use crate::lifecycle::{Applied, ReadOutcome, ResourceHandler, ResourceKind, read_back};
use crate::schema::{FieldSchema, FieldType, ResourceSchema};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct BindingConfig {
    /// Source exchange
    pub source: String,
    pub vhost: String,
    pub destination: String,
    pub destination_type: DestinationType,
    #[serde(default)]
    pub routing_key: String,
    #[serde(default, skip_serializing_if = "StructuredArguments::is_empty")]
    pub arguments: StructuredArguments,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arguments_json: Option<String>,
    /// Assigned by the broker
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties_key: Option<String>,
}

pub struct BindingResource;

/// Last path segment of a `Location` header, percent-decoded once.
fn properties_key_from_location(location: &str) -> Result<String, ProviderError> {
    let segment = location.rsplit('/').next().unwrap_or_default();
    if segment.is_empty() {
        return Err(ProviderError::MissingPropertiesKey);
    }
    urlencoding::decode(segment)
        .map(|key| key.into_owned())
        .map_err(|_| ProviderError::MissingPropertiesKey)
}

fn destination_type_of(id: &str, key: &BindingId) -> Result<DestinationType, ProviderError> {
    key.destination_type.parse().map_err(|_| {
        ProviderError::config(format!(
            "binding identifier {id:?} has unknown destination type {:?}",
            key.destination_type
        ))
    })
}

pub(crate) fn parse_id(id: &str) -> Result<(BindingId, DestinationType), ProviderError> {
    let key: BindingId = id
        .parse()
        .map_err(ProviderError::identifier(ResourceKind::Binding))?;
    let destination_type = destination_type_of(id, &key)?;
    Ok((key, destination_type))
}

/// Current and legacy readings of `id`, current first.
fn parse_readings(id: &str) -> Result<Vec<(BindingId, DestinationType)>, ProviderError> {
    BindingId::readings(id)
        .map_err(ProviderError::identifier(ResourceKind::Binding))?
        .into_iter()
        .map(|key| {
            let destination_type = destination_type_of(id, &key)?;
            Ok((key, destination_type))
        })
        .collect()
}

#[async_trait]
impl ResourceHandler for BindingResource {
    type Config = BindingConfig;

    const KIND: ResourceKind = ResourceKind::Binding;

    fn schema(&self) -> ResourceSchema {
        ResourceSchema {
            kind: Self::KIND,
            id_format: "vhost/source/destination/destination_type/properties_key",
            updatable: false,
            fields: vec![
                FieldSchema::new("source", FieldType::String).required().force_new(),
                FieldSchema::new("vhost", FieldType::String).required().force_new(),
                FieldSchema::new("destination", FieldType::String)
                    .required()
                    .force_new(),
                FieldSchema::new("destination_type", FieldType::String)
                    .required()
                    .force_new(),
                FieldSchema::new("routing_key", FieldType::String).force_new(),
                FieldSchema::new("arguments", FieldType::Map)
                    .force_new()
                    .conflicts_with(&["arguments_json"]),
                FieldSchema::new("arguments_json", FieldType::Json)
                    .force_new()
                    .conflicts_with(&["arguments"]),
                FieldSchema::new("properties_key", FieldType::String).computed(),
            ],
        }
    }

    async fn create<C: BrokerClient>(
        &self,
        client: &ManagementClient<C>,
        config: &BindingConfig,
    ) -> Result<Applied<BindingConfig>, ProviderError> {
        require_non_empty("vhost", &config.vhost)?;
        require_non_empty("destination", &config.destination)?;
        let arguments = resolve_input(Some(&config.arguments), config.arguments_json.as_deref())?;

        let request = BindingRequest {
            routing_key: config.routing_key.clone(),
            arguments,
        };

        tracing::debug!(
            vhost = %config.vhost,
            source = %config.source,
            destination = %config.destination,
            destination_type = %config.destination_type,
            "declaring binding"
        );
        let response = client
            .declare_binding(
                &config.vhost,
                &config.source,
                config.destination_type,
                &config.destination,
                &request,
            )
            .await?;
        check_write(&response, Self::KIND, "declaring")?;

        let location = response
            .location
            .as_deref()
            .ok_or(ProviderError::MissingPropertiesKey)?;
        let properties_key = properties_key_from_location(location)?;
        tracing::debug!(%properties_key, "binding properties key");

        let id = BindingId {
            vhost: config.vhost.clone(),
            source: config.source.clone(),
            destination: config.destination.clone(),
            destination_type: config.destination_type.to_string(),
            properties_key,
        }
        .to_string();
        read_back(self, client, id, config).await
    }

    async fn read<C: BrokerClient>(
        &self,
        client: &ManagementClient<C>,
        id: &str,
        prior: Option<&BindingConfig>,
    ) -> Result<ReadOutcome<BindingConfig>, ProviderError> {
        let mut found = None;
        for (key, destination_type) in parse_readings(id)? {
            tracing::debug!(
                vhost = %key.vhost,
                source = %key.source,
                destination = %key.destination,
                %destination_type,
                properties_key = %key.properties_key,
                "looking up binding"
            );
            let ReadOutcome::Present(bindings) =
                present_or_absent(client.list_bindings_in(&key.vhost).await, Self::KIND, id)?
            else {
                continue;
            };
            found = bindings.into_iter().find(|b| {
                b.source == key.source
                    && b.destination == key.destination
                    && b.destination_type == destination_type
                    && b.properties_key == key.properties_key
            });
            if found.is_some() {
                break;
            }
        }

        let Some(found) = found else {
            tracing::warn!(kind = %Self::KIND, id, "not found on the broker, dropping from state");
            return Ok(ReadOutcome::Absent);
        };

        let prior_json = prior.and_then(|p| p.arguments_json.as_deref());
        let (arguments, arguments_json) = read_back_arguments(&found.arguments, prior_json)?;

        Ok(ReadOutcome::Present(BindingConfig {
            source: found.source,
            vhost: found.vhost,
            destination: found.destination,
            destination_type: found.destination_type,
            routing_key: found.routing_key,
            arguments,
            arguments_json,
            properties_key: Some(found.properties_key),
        }))
    }

    async fn delete<C: BrokerClient>(
        &self,
        client: &ManagementClient<C>,
        id: &str,
    ) -> Result<(), ProviderError> {
        for (key, destination_type) in parse_readings(id)? {
            tracing::debug!(
                vhost = %key.vhost,
                source = %key.source,
                destination = %key.destination,
                %destination_type,
                properties_key = %key.properties_key,
                "deleting binding"
            );
            let response = client
                .delete_binding(
                    &key.vhost,
                    &key.source,
                    destination_type,
                    &key.destination,
                    &key.properties_key,
                )
                .await?;
            if response.status != StatusCode::NOT_FOUND {
                return check_delete(&response, Self::KIND);
            }
        }
        tracing::debug!(kind = %Self::KIND, id, "already deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;
    use test_case::test_case;

    #[test_case("bindings/%2F/e/ex/q/jobs/~", "~"; "default properties key")]
    #[test_case("bindings/%2F/e/ex/q/jobs/a.%2523", "a.%23"; "escaped once more by the broker")]
    #[test_case("/api/bindings/v/e/ex/e/dst/key~Zm9v", "key~Zm9v"; "absolute path")]
    fn location_yields_properties_key(location: &str, want: &str) {
        assert_eq!(properties_key_from_location(location).unwrap(), want);
    }

    #[test]
    fn empty_location_is_an_error() {
        assert!(matches!(
            properties_key_from_location("bindings/%2F/e/ex/q/jobs/"),
            Err(ProviderError::MissingPropertiesKey)
        ));
    }

    #[test]
    fn id_with_unknown_destination_type_is_rejected() {
        let err = parse_id("%2F/ex/dst/topic/~").unwrap_err();
        assert!(err.to_string().contains("unknown destination type"));
    }

    #[test]
    fn short_id_is_rejected() {
        let err = parse_id("%2F/ex/dst/queue").unwrap_err();
        assert!(matches!(err, ProviderError::Identifier { .. }));
    }
}
