// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Client for the RabbitMQ HTTP management API.
//!
//! Two layers:
//!
//! - [`BrokerClient`] is the raw transport: one authenticated request in,
//!   status, `Location` header and body out. [`HttpBrokerClient`] is the
//!   reqwest implementation; tests substitute their own.
//! - [`ManagementClient`] wraps any transport with one method per endpoint
//!   and takes care of path escaping and response decoding.
//!
//! Reads (`GET`) translate 404 into [`ClientError::NotFound`] and any other
//! non-2xx status into [`ClientError::Status`]. Writes return the raw
//! [`BrokerResponse`] so callers decide what a given status means.

pub mod error;
pub mod management;
pub mod transport;

pub use error::ClientError;
pub use management::ManagementClient;
pub use transport::{BrokerClient, BrokerResponse, HttpBrokerClient, HttpClientConfig, TlsOptions};

/// Re-exported so callers can name methods without depending on reqwest
pub use reqwest::{Method, StatusCode};
