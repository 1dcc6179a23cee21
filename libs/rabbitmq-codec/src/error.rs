// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Error types for rabbitmq-codec

use thiserror::Error;

/// Errors raised while parsing a persisted resource identifier
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IdentifierError {
    /// The identifier did not split into the number of fields its kind uses
    #[error("field count mismatch in identifier {id:?}: got {got}, want {want}")]
    FieldCountMismatch {
        id: String,
        got: usize,
        want: usize,
    },

    /// Identifier kinds are built from at least two fields
    #[error("unsupported identifier field count: {0}")]
    UnsupportedFieldCount(usize),
}

impl IdentifierError {
    /// Short machine-readable reason, stable across releases
    pub fn reason(&self) -> &'static str {
        match self {
            Self::FieldCountMismatch { .. } => "field count mismatch",
            Self::UnsupportedFieldCount(_) => "unsupported field count",
        }
    }
}

/// Errors raised while resolving or re-encoding argument bundles
#[derive(Error, Debug)]
pub enum ArgumentsError {
    /// Both `arguments` and `arguments_json` were configured
    #[error("mutually exclusive fields set: {structured} and {serialized}")]
    MutuallyExclusive {
        structured: &'static str,
        serialized: &'static str,
    },

    /// `arguments_json` is not a JSON object
    #[error("invalid JSON in arguments {raw:?}: {source}")]
    InvalidJson {
        raw: String,
        #[source]
        source: serde_json::Error,
    },

    /// The remote bundle could not be re-encoded
    #[error("could not encode arguments as JSON: {0}")]
    Encode(#[source] serde_json::Error),
}
