// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Connection settings for the management API

use std::path::{Path, PathBuf};
use std::time::Duration;

use rabbitmq_client::{HttpBrokerClient, HttpClientConfig, ManagementClient, TlsOptions};
use secrecy::{ExposeSecret, SecretString};

use crate::error::ProviderError;

pub const ENV_ENDPOINT: &str = "RABBITMQ_ENDPOINT";
pub const ENV_USERNAME: &str = "RABBITMQ_USERNAME";
pub const ENV_PASSWORD: &str = "RABBITMQ_PASSWORD";
pub const ENV_INSECURE: &str = "RABBITMQ_INSECURE";
pub const ENV_CACERT: &str = "RABBITMQ_CACERT";
pub const ENV_CLIENTCERT: &str = "RABBITMQ_CLIENTCERT";
pub const ENV_CLIENTKEY: &str = "RABBITMQ_CLIENTKEY";
pub const ENV_HTTP_TIMEOUT_SECS: &str = "RABBITMQ_HTTP_TIMEOUT_SECS";

/// Provider connection configuration
///
/// Usually loaded from the environment (see [`ProviderConfig::from_env`]);
/// the CLI also accepts every setting as a flag.
#[derive(Debug)]
pub struct ProviderConfig {
    /// Management plugin base URL, e.g. `http://localhost:15672`
    pub endpoint: String,
    pub username: String,
    pub password: SecretString,
    /// Skip server certificate verification
    pub insecure: bool,
    /// Extra trusted CA bundle (PEM)
    pub cacert_file: Option<PathBuf>,
    /// Client certificate (PEM); requires `clientkey_file`
    pub clientcert_file: Option<PathBuf>,
    /// Client private key (PEM); requires `clientcert_file`
    pub clientkey_file: Option<PathBuf>,
    pub http_timeout_secs: u64,
}

impl ProviderConfig {
    pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

    pub fn new(
        endpoint: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            username: username.into(),
            password: SecretString::from(password.into()),
            insecure: false,
            cacert_file: None,
            clientcert_file: None,
            clientkey_file: None,
            http_timeout_secs: Self::DEFAULT_HTTP_TIMEOUT_SECS,
        }
    }

    /// Load configuration from `RABBITMQ_*` environment variables
    pub fn from_env() -> Result<Self, ProviderError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through `lookup`, which maps a variable name to
    /// its value. Missing credentials are left empty for [`validate`] to
    /// report.
    ///
    /// [`validate`]: ProviderConfig::validate
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ProviderError> {
        let path = |key: &str| lookup(key).filter(|v| !v.is_empty()).map(PathBuf::from);

        // Accepts "true", "1", "yes" (case-insensitive) as true, anything else as false
        let insecure = lookup(ENV_INSECURE)
            .map(|v| matches!(v.to_lowercase().as_str(), "true" | "1" | "yes"))
            .unwrap_or(false);

        let http_timeout_secs = match lookup(ENV_HTTP_TIMEOUT_SECS) {
            Some(raw) => raw.trim().parse().map_err(|_| {
                ProviderError::config(format!("invalid {ENV_HTTP_TIMEOUT_SECS}: {raw:?}"))
            })?,
            None => Self::DEFAULT_HTTP_TIMEOUT_SECS,
        };

        Ok(Self {
            endpoint: lookup(ENV_ENDPOINT).unwrap_or_default(),
            username: lookup(ENV_USERNAME).unwrap_or_default(),
            password: SecretString::from(lookup(ENV_PASSWORD).unwrap_or_default()),
            insecure,
            cacert_file: path(ENV_CACERT),
            clientcert_file: path(ENV_CLIENTCERT),
            clientkey_file: path(ENV_CLIENTKEY),
            http_timeout_secs,
        })
    }

    /// Check the settings without touching the network or the filesystem.
    pub fn validate(&self) -> Result<(), ProviderError> {
        if self.endpoint.is_empty() {
            return Err(ProviderError::config("endpoint must not be an empty string"));
        }
        if self.username.is_empty() {
            return Err(ProviderError::config("username must not be an empty string"));
        }
        if self.password.expose_secret().is_empty() {
            return Err(ProviderError::config("password must not be an empty string"));
        }
        if self.clientcert_file.is_some() != self.clientkey_file.is_some() {
            return Err(ProviderError::config(
                "clientcert_file and clientkey_file must be set together",
            ));
        }
        if self.http_timeout_secs == 0 {
            return Err(ProviderError::config("http_timeout_secs must be positive"));
        }
        Ok(())
    }

    /// Read the certificate files into TLS options.
    pub fn tls_options(&self) -> Result<TlsOptions, ProviderError> {
        let ca_cert_pem = self.cacert_file.as_deref().map(read_pem).transpose()?;

        let client_identity_pem = match (&self.clientcert_file, &self.clientkey_file) {
            (Some(cert), Some(key)) => {
                // reqwest expects the key and the certificate chain in one buffer
                let mut pem = read_pem(key)?;
                pem.push(b'\n');
                pem.extend(read_pem(cert)?);
                Some(pem)
            }
            _ => None,
        };

        Ok(TlsOptions {
            insecure: self.insecure,
            ca_cert_pem,
            client_identity_pem,
        })
    }

    /// Validate and build a management client.
    pub fn connect(&self) -> Result<ManagementClient<HttpBrokerClient>, ProviderError> {
        self.validate()?;

        let http = HttpClientConfig {
            endpoint: self.endpoint.clone(),
            username: self.username.clone(),
            password: SecretString::from(self.password.expose_secret().to_owned()),
            timeout: Duration::from_secs(self.http_timeout_secs),
            tls: self.tls_options()?,
        };

        tracing::debug!(
            endpoint = %self.endpoint,
            username = %self.username,
            insecure = self.insecure,
            "connecting to RabbitMQ management API"
        );

        Ok(ManagementClient::new(HttpBrokerClient::new(http)?))
    }
}

fn read_pem(path: &Path) -> Result<Vec<u8>, ProviderError> {
    std::fs::read(path).map_err(|source| ProviderError::Io {
        path: path.to_path_buf(),
        source,
    })
}
