// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Declarative lifecycle handlers for RabbitMQ broker objects.
//!
//! Each broker object kind (vhost, exchange, queue, binding, user,
//! permissions, topic permissions, federation upstream, shovel, policy) has
//! a [`ResourceHandler`] that turns a typed configuration into management
//! API calls and turns the broker's answer back into configuration state.
//!
//! Handlers hold no state of their own. The [`ManagementClient`] is passed
//! into every call, so independent resources can be driven concurrently
//! from the same client.
//!
//! ```ignore
//! use rabbitmq_provider::{ProviderConfig, ResourceHandler, resources::QueueResource};
//!
//! let client = ProviderConfig::from_env()?.connect()?;
//! let config = serde_json::from_str(r#"{"name": "jobs", "settings": {"durable": true}}"#)?;
//! let applied = QueueResource.create(&client, &config).await?;
//! println!("created {}", applied.id);
//! ```
//!
//! [`ManagementClient`]: rabbitmq_client::ManagementClient

pub mod config;
pub mod dispatch;
pub mod error;
pub mod lifecycle;
pub mod resources;
pub mod schema;

pub use config::ProviderConfig;
pub use error::ProviderError;
pub use lifecycle::{Applied, ReadOutcome, ResourceHandler, ResourceKind};
pub use schema::{FieldSchema, FieldType, ResourceSchema};
