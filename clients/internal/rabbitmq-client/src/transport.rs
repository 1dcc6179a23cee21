// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Raw management API transport

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::LOCATION;
use reqwest::{Certificate, Client, Identity, Method, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ClientError;

/// Response of a single management API call
#[derive(Debug, Clone)]
pub struct BrokerResponse {
    pub status: StatusCode,
    /// Value of the `Location` header, if any
    pub location: Option<String>,
    pub body: String,
}

impl BrokerResponse {
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Status line text, for example `404 Not Found`
    pub fn status_text(&self) -> String {
        self.status.to_string()
    }

    /// Decode the body as JSON. `path` is only used for the error.
    pub fn json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        serde_json::from_str(&self.body).map_err(|source| ClientError::Decode {
            path: path.to_string(),
            source,
        })
    }
}

/// Sends authenticated requests to the management API.
///
/// `path` is the absolute API path (`/api/...`) with every segment already
/// percent-encoded.
#[async_trait]
pub trait BrokerClient: Send + Sync {
    async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<BrokerResponse, ClientError>;
}

/// TLS settings for [`HttpBrokerClient`]
#[derive(Debug, Clone, Default)]
pub struct TlsOptions {
    /// Skip server certificate verification
    pub insecure: bool,
    /// PEM bundle of extra trusted roots
    pub ca_cert_pem: Option<Vec<u8>>,
    /// PEM private key followed by the PEM client certificate chain
    pub client_identity_pem: Option<Vec<u8>>,
}

/// Settings for [`HttpBrokerClient`]
#[derive(Debug)]
pub struct HttpClientConfig {
    /// Base URL of the management plugin, e.g. `http://localhost:15672`
    pub endpoint: String,
    pub username: String,
    pub password: SecretString,
    pub timeout: Duration,
    pub tls: TlsOptions,
}

impl HttpClientConfig {
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

    pub fn new(
        endpoint: impl Into<String>,
        username: impl Into<String>,
        password: SecretString,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            username: username.into(),
            password,
            timeout: Self::DEFAULT_TIMEOUT,
            tls: TlsOptions::default(),
        }
    }
}

/// reqwest-backed [`BrokerClient`] using HTTP basic authentication
#[derive(Debug)]
pub struct HttpBrokerClient {
    client: Client,
    base_url: String,
    username: String,
    password: SecretString,
}

impl HttpBrokerClient {
    pub fn new(config: HttpClientConfig) -> Result<Self, ClientError> {
        let parsed =
            url::Url::parse(&config.endpoint).map_err(|e| ClientError::InvalidEndpoint {
                endpoint: config.endpoint.clone(),
                reason: e.to_string(),
            })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ClientError::InvalidEndpoint {
                endpoint: config.endpoint.clone(),
                reason: format!("unsupported scheme {:?}", parsed.scheme()),
            });
        }

        // reqwest is built without a default crypto provider. Another
        // caller may already have installed one, which is fine.
        let _ = rustls::crypto::ring::default_provider().install_default();

        let mut builder = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("rabbitmq-client/", env!("CARGO_PKG_VERSION")))
            .danger_accept_invalid_certs(config.tls.insecure);

        if let Some(pem) = &config.tls.ca_cert_pem {
            let cert = Certificate::from_pem(pem)
                .map_err(|e| ClientError::Tls(format!("invalid CA certificate: {e}")))?;
            builder = builder.add_root_certificate(cert);
        }
        if let Some(pem) = &config.tls.client_identity_pem {
            let identity = Identity::from_pem(pem)
                .map_err(|e| ClientError::Tls(format!("invalid client certificate: {e}")))?;
            builder = builder.identity(identity);
        }

        let client = builder.build()?;

        Ok(Self {
            client,
            base_url: config.endpoint.trim_end_matches('/').to_string(),
            username: config.username,
            password: config.password,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl BrokerClient for HttpBrokerClient {
    async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<BrokerResponse, ClientError> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(%method, path, "management API request");

        let mut request = self
            .client
            .request(method.clone(), &url)
            .basic_auth(&self.username, Some(self.password.expose_secret()));
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let location = response
            .headers()
            .get(LOCATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = response.text().await?;

        tracing::debug!(%method, path, %status, "management API response");
        tracing::trace!(bytes = body.len(), "management API response body");

        Ok(BrokerResponse {
            status,
            location,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;

    fn config(endpoint: &str) -> HttpClientConfig {
        HttpClientConfig::new(endpoint, "guest", SecretString::from("guest"))
    }

    #[test]
    fn trailing_slash_is_dropped() {
        let client = HttpBrokerClient::new(config("http://localhost:15672/")).unwrap();
        assert_eq!(client.base_url(), "http://localhost:15672");
    }

    #[test]
    fn rejects_unparseable_endpoint() {
        let err = HttpBrokerClient::new(config("not a url")).unwrap_err();
        assert!(matches!(err, ClientError::InvalidEndpoint { .. }));
    }

    #[test]
    fn rejects_non_http_scheme() {
        let err = HttpBrokerClient::new(config("amqp://localhost:5672")).unwrap_err();
        assert!(err.to_string().contains("unsupported scheme"));
    }

    #[test]
    fn password_is_redacted_in_debug_output() {
        let cfg = config("http://localhost:15672");
        assert!(!format!("{cfg:?}").contains("password: \"guest\""));
    }

    #[test]
    fn status_text_includes_reason() {
        let response = BrokerResponse {
            status: StatusCode::NOT_FOUND,
            location: None,
            body: String::new(),
        };
        assert_eq!(response.status_text(), "404 Not Found");
        assert!(!response.is_success());
    }
}
