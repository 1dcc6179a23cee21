// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! One [`ResourceHandler`](crate::ResourceHandler) per broker object kind.

mod arguments;
mod binding;
mod exchange;
mod federation_upstream;
mod permissions;
mod policy;
mod queue;
mod shovel;
mod topic_permissions;
mod user;
mod vhost;

pub use binding::{BindingConfig, BindingResource};
pub use exchange::{ExchangeConfig, ExchangeResource, ExchangeSettingsConfig};
pub use federation_upstream::{
    FederationDefinitionConfig, FederationUpstreamConfig, FederationUpstreamResource,
};
pub use permissions::{PermissionsConfig, PermissionsResource, PermissionsSpec};
pub use policy::{PolicyConfig, PolicyResource, PolicySpec};
pub use queue::{QueueConfig, QueueResource, QueueSettingsConfig};
pub use shovel::{ShovelConfig, ShovelInfoConfig, ShovelResource};
pub use topic_permissions::{TopicPermissionSpec, TopicPermissionsConfig, TopicPermissionsResource};
pub use user::{UserConfig, UserResource};
pub use vhost::{VhostConfig, VhostResource};

pub(crate) use binding::parse_id as parse_binding_id;

use rabbitmq_client::{BrokerResponse, ClientError, StatusCode};
use rabbitmq_codec::NameVhostId;

use crate::error::ProviderError;
use crate::lifecycle::{ReadOutcome, ResourceKind};

pub(crate) fn default_vhost() -> String {
    "/".to_string()
}

/// Fail when the broker rejected a write.
pub(crate) fn check_write(
    response: &BrokerResponse,
    kind: ResourceKind,
    action: &'static str,
) -> Result<(), ProviderError> {
    if response.status.as_u16() >= 400 {
        return Err(api_error(response, kind, action));
    }
    Ok(())
}

/// Like [`check_write`], but an object that is already gone counts as
/// deleted.
pub(crate) fn check_delete(
    response: &BrokerResponse,
    kind: ResourceKind,
) -> Result<(), ProviderError> {
    if response.status == StatusCode::NOT_FOUND {
        tracing::debug!(%kind, "already deleted");
        return Ok(());
    }
    check_write(response, kind, "deleting")
}

pub(crate) fn api_error(
    response: &BrokerResponse,
    kind: ResourceKind,
    action: &'static str,
) -> ProviderError {
    tracing::warn!(%kind, action, status = %response.status, "management API rejected request");
    ProviderError::Api {
        kind,
        action,
        status: response.status_text(),
        body: response.body.clone(),
    }
}

/// Map a GET result onto a read outcome: 404 means the object is gone.
pub(crate) fn present_or_absent<T>(
    result: Result<T, ClientError>,
    kind: ResourceKind,
    id: &str,
) -> Result<ReadOutcome<T>, ProviderError> {
    match result {
        Ok(found) => Ok(ReadOutcome::Present(found)),
        Err(ClientError::NotFound { .. }) => {
            tracing::warn!(%kind, id, "not found on the broker, dropping from state");
            Ok(ReadOutcome::Absent)
        }
        Err(e) => Err(e.into()),
    }
}

pub(crate) fn parse_name_vhost(kind: ResourceKind, id: &str) -> Result<NameVhostId, ProviderError> {
    id.parse().map_err(ProviderError::identifier(kind))
}

/// Single-field identifiers (vhost and user names) are used verbatim.
pub(crate) fn parse_name(kind: ResourceKind, id: &str) -> Result<String, ProviderError> {
    if id.is_empty() {
        return Err(ProviderError::config(format!("{kind} identifier must not be empty")));
    }
    Ok(id.to_string())
}

pub(crate) fn require_non_empty(field: &str, value: &str) -> Result<(), ProviderError> {
    if value.is_empty() {
        return Err(ProviderError::config(format!("{field} must not be empty")));
    }
    Ok(())
}
