// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Argument read-back shared by queues and bindings

use rabbitmq_codec::{
    ArgumentBundle, ArgumentsRepresentation, StructuredArguments, choose_read_representation,
    json_equivalent,
};

use crate::error::ProviderError;

/// Split a remote bundle into the `(arguments, arguments_json)` pair written
/// back into state.
///
/// `prior_json` is the `arguments_json` text of the last known state. When
/// the broker reports the same document, that text is kept as-is so
/// formatting differences never show up as a change.
pub(crate) fn read_back_arguments(
    remote: &ArgumentBundle,
    prior_json: Option<&str>,
) -> Result<(StructuredArguments, Option<String>), ProviderError> {
    let prior_json = prior_json.filter(|s| !s.is_empty());

    match choose_read_representation(remote, prior_json.is_some())? {
        ArgumentsRepresentation::Structured(map) => Ok((map, None)),
        ArgumentsRepresentation::Serialized(encoded) => {
            let text = match prior_json {
                Some(raw) if json_equivalent(raw, &encoded) => raw.to_string(),
                _ => encoded,
            };
            Ok((StructuredArguments::new(), Some(text)))
        }
    }
}
