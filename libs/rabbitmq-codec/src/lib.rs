// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Identity and argument codec for RabbitMQ resources.
//!
//! Every declared broker object is tracked by a single string handle that
//! packs its natural key (for example `name@vhost`, or the five fields of a
//! binding). This crate owns that string format and the reconciliation of
//! queue and binding argument bundles, which can be configured either as a
//! flat string map or as a serialized JSON document.
//!
//! # Modules
//!
//! - [`identity`] - composite identifier encoding and decoding
//! - [`arguments`] - argument bundle input resolution and read-back representation
//! - [`json`] - JSON normalisation used for diff suppression

pub mod arguments;
pub mod error;
pub mod identity;
pub mod json;

pub use arguments::{
    ArgumentBundle, ArgumentsRepresentation, StructuredArguments, choose_read_representation,
    has_non_string_values, resolve_input,
};
pub use error::{ArgumentsError, IdentifierError};
pub use identity::{BindingId, NameVhostId, Separator, decode, encode};
pub use json::{canonicalize, json_equivalent, normalize_json};
