// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Create/read/update/delete/import contract shared by every resource kind.
//!
//! The configuration engine drives a handler through this lifecycle and
//! persists the identifier and state it hands back. Identifiers are part of
//! the persisted state and must stay parseable across releases, see
//! [`rabbitmq_codec::identity`].

use std::fmt::Debug;

use async_trait::async_trait;
use rabbitmq_client::{BrokerClient, ManagementClient};
use schemars::JsonSchema;
use serde::Serialize;
use serde::de::DeserializeOwned;
use strum::{Display, EnumIter, EnumString, VariantNames};

use crate::error::ProviderError;
use crate::schema::ResourceSchema;

/// Broker object kinds managed by this crate
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Display,
    EnumIter,
    EnumString,
    VariantNames,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ResourceKind {
    Vhost,
    Exchange,
    Queue,
    Binding,
    User,
    Permissions,
    TopicPermissions,
    FederationUpstream,
    Shovel,
    Policy,
}

/// Result of a read.
#[derive(Debug, Clone, PartialEq)]
pub enum ReadOutcome<T> {
    /// The object exists; the state reflects what the broker reports
    Present(T),
    /// The object is gone; the engine must drop its local record
    Absent,
}

impl<T> ReadOutcome<T> {
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    pub fn present(self) -> Option<T> {
        match self {
            Self::Present(state) => Some(state),
            Self::Absent => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ReadOutcome<U> {
        match self {
            Self::Present(state) => ReadOutcome::Present(f(state)),
            Self::Absent => ReadOutcome::Absent,
        }
    }
}

/// Identifier and state returned by create and update
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Applied<T> {
    pub id: String,
    pub state: T,
}

/// Lifecycle of one broker object kind.
///
/// Implementations never retry and never hold state between calls.
/// Configuration errors are reported before any request is sent.
#[async_trait]
pub trait ResourceHandler: Send + Sync {
    /// Typed configuration, which doubles as the state written back on read
    type Config: Serialize + DeserializeOwned + JsonSchema + Debug + Send + Sync;

    const KIND: ResourceKind;

    /// Field metadata: types, defaults, ForceNew and conflict markers
    fn schema(&self) -> ResourceSchema;

    /// Declare the object and read it back.
    async fn create<C: BrokerClient>(
        &self,
        client: &ManagementClient<C>,
        config: &Self::Config,
    ) -> Result<Applied<Self::Config>, ProviderError>;

    /// Fetch the object behind `id`.
    ///
    /// `prior` is the last known state, if any. It decides which of two
    /// equivalent representations a field is written back in, and supplies
    /// values the broker never returns (passwords).
    async fn read<C: BrokerClient>(
        &self,
        client: &ManagementClient<C>,
        id: &str,
        prior: Option<&Self::Config>,
    ) -> Result<ReadOutcome<Self::Config>, ProviderError>;

    /// Apply changes to updatable fields.
    ///
    /// Kinds whose fields all force replacement keep this default.
    async fn update<C: BrokerClient>(
        &self,
        _client: &ManagementClient<C>,
        _id: &str,
        _config: &Self::Config,
    ) -> Result<Applied<Self::Config>, ProviderError> {
        Err(ProviderError::ImmutableResource { kind: Self::KIND })
    }

    /// Remove the object. An object that is already gone is not an error.
    async fn delete<C: BrokerClient>(
        &self,
        client: &ManagementClient<C>,
        id: &str,
    ) -> Result<(), ProviderError>;

    /// Adopt an existing object: a read with no prior state.
    async fn import<C: BrokerClient>(
        &self,
        client: &ManagementClient<C>,
        id: &str,
    ) -> Result<ReadOutcome<Self::Config>, ProviderError> {
        self.read(client, id, None).await
    }
}

/// Read back what was just written, for create and update.
pub(crate) async fn read_back<H, C>(
    handler: &H,
    client: &ManagementClient<C>,
    id: String,
    prior: &H::Config,
) -> Result<Applied<H::Config>, ProviderError>
where
    H: ResourceHandler,
    C: BrokerClient,
{
    match handler.read(client, &id, Some(prior)).await? {
        ReadOutcome::Present(state) => Ok(Applied { id, state }),
        ReadOutcome::Absent => Err(ProviderError::Vanished { kind: H::KIND, id }),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn kind_names_round_trip() {
        for kind in ResourceKind::iter() {
            let name = kind.to_string();
            assert_eq!(name.parse::<ResourceKind>().unwrap(), kind);
        }
        assert_eq!(ResourceKind::TopicPermissions.to_string(), "topic_permissions");
        assert_eq!(ResourceKind::VARIANTS.len(), 10);
    }

    #[test]
    fn unknown_kind_is_rejected() {
        assert!("exchanges".parse::<ResourceKind>().is_err());
    }

    #[test]
    fn read_outcome_helpers() {
        assert!(ReadOutcome::<u8>::Absent.is_absent());
        assert_eq!(ReadOutcome::Present(2).map(|v| v * 2).present(), Some(4));
    }
}
