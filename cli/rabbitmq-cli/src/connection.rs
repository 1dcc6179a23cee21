// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Management API connection settings

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use rabbitmq_client::{HttpBrokerClient, ManagementClient};
use rabbitmq_provider::ProviderConfig;
use rabbitmq_provider::config::{
    ENV_CACERT, ENV_CLIENTCERT, ENV_CLIENTKEY, ENV_ENDPOINT, ENV_HTTP_TIMEOUT_SECS, ENV_INSECURE,
    ENV_PASSWORD, ENV_USERNAME,
};

#[derive(Args, Clone, Debug)]
pub struct ConnectionArgs {
    /// Management API URL, e.g. http://localhost:15672
    #[arg(long, global = true, env = ENV_ENDPOINT)]
    pub endpoint: Option<String>,

    /// Management API user
    #[arg(short, long, global = true, env = ENV_USERNAME)]
    pub username: Option<String>,

    /// Management API password
    #[arg(long, global = true, env = ENV_PASSWORD, hide_env_values = true)]
    pub password: Option<String>,

    /// Skip TLS certificate verification
    #[arg(long, global = true, env = ENV_INSECURE)]
    pub insecure: bool,

    /// PEM bundle of additional trusted CAs
    #[arg(long, global = true, env = ENV_CACERT)]
    pub cacert: Option<PathBuf>,

    /// PEM client certificate (requires --clientkey)
    #[arg(long, global = true, env = ENV_CLIENTCERT)]
    pub clientcert: Option<PathBuf>,

    /// PEM client key (requires --clientcert)
    #[arg(long, global = true, env = ENV_CLIENTKEY)]
    pub clientkey: Option<PathBuf>,

    /// Request timeout in seconds
    #[arg(
        long,
        global = true,
        env = ENV_HTTP_TIMEOUT_SECS,
        default_value_t = ProviderConfig::DEFAULT_HTTP_TIMEOUT_SECS
    )]
    pub timeout: u64,
}

impl ConnectionArgs {
    pub fn provider_config(&self) -> ProviderConfig {
        let mut config = ProviderConfig::new(
            self.endpoint.clone().unwrap_or_default(),
            self.username.clone().unwrap_or_default(),
            self.password.clone().unwrap_or_default(),
        );
        config.insecure = self.insecure;
        config.cacert_file = self.cacert.clone();
        config.clientcert_file = self.clientcert.clone();
        config.clientkey_file = self.clientkey.clone();
        config.http_timeout_secs = self.timeout;
        config
    }

    pub fn connect(&self) -> Result<ManagementClient<HttpBrokerClient>> {
        self.provider_config()
            .connect()
            .context("failed to configure the management API client")
    }
}
