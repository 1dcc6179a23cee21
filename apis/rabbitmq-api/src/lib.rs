// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! RabbitMQ management API types
//!
//! Request and response bodies for the subset of the `/api` HTTP surface
//! used to declare broker objects. Field names follow the broker's JSON
//! exactly (snake_case for core objects, kebab-case inside runtime
//! parameters and policies).

pub mod types;

pub use types::*;
