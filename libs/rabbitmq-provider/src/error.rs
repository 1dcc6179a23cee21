// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

use std::path::PathBuf;

use rabbitmq_client::ClientError;
use rabbitmq_codec::{ArgumentsError, IdentifierError};
use thiserror::Error;

use crate::lifecycle::ResourceKind;

/// Resource handler errors
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("invalid {kind} identifier: {source}")]
    Identifier {
        kind: ResourceKind,
        #[source]
        source: IdentifierError,
    },

    #[error(transparent)]
    Arguments(#[from] ArgumentsError),

    #[error(transparent)]
    Client(#[from] ClientError),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("invalid {kind} configuration: {source}")]
    Decode {
        kind: ResourceKind,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode {kind} state: {source}")]
    Encode {
        kind: ResourceKind,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The broker answered a write with a status >= 400
    #[error("error {action} RabbitMQ {kind}: {status}")]
    Api {
        kind: ResourceKind,
        action: &'static str,
        status: String,
        body: String,
    },

    #[error("{kind} has no updatable fields; every change requires replacement")]
    ImmutableResource { kind: ResourceKind },

    #[error("{kind} {id} was not found right after being written")]
    Vanished { kind: ResourceKind, id: String },

    #[error("binding declaration returned no properties key")]
    MissingPropertiesKey,

    #[error("topic permissions were added in RabbitMQ 3.7, connected to {version}")]
    UnsupportedVersion { version: String },
}

impl ProviderError {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub(crate) fn identifier(kind: ResourceKind) -> impl FnOnce(IdentifierError) -> Self {
        move |source| Self::Identifier { kind, source }
    }
}
