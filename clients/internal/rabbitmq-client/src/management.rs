// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Typed management API endpoints

use std::borrow::Cow;

use reqwest::{Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;

use rabbitmq_api::{
    BindingInfo, BindingRequest, DestinationType, ExchangeInfo, ExchangeSettings,
    FEDERATION_UPSTREAM_COMPONENT, FederationDefinition, FederationUpstreamInfo, Overview,
    PermissionInfo, Permissions, PolicyInfo, PolicySettings, QueueInfo, QueueSettings,
    RuntimeParameter, SHOVEL_COMPONENT, ShovelDefinition, ShovelInfo, TopicPermissionInfo,
    TopicPermissions, UserInfo, UserSettings, VhostInfo, VhostSettings,
};

use crate::error::ClientError;
use crate::transport::{BrokerClient, BrokerResponse, HttpBrokerClient};

/// Percent-encode one path segment (`/` becomes `%2F`).
fn seg(s: &str) -> Cow<'_, str> {
    urlencoding::encode(s)
}

/// Management API client over any [`BrokerClient`]
#[derive(Debug)]
pub struct ManagementClient<C = HttpBrokerClient> {
    transport: C,
}

impl<C: BrokerClient> ManagementClient<C> {
    pub fn new(transport: C) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &C {
        &self.transport
    }

    /// GET `path` and decode the body.
    pub async fn get<T: DeserializeOwned>(&self, path: String) -> Result<T, ClientError> {
        let response = self.transport.request(Method::GET, &path, None).await?;
        if response.status == StatusCode::NOT_FOUND {
            return Err(ClientError::NotFound { path });
        }
        if !response.is_success() {
            return Err(ClientError::Status {
                method: Method::GET,
                path,
                status: response.status,
                body: response.body,
            });
        }
        response.json(&path)
    }

    /// Send a write request and hand back the raw response.
    pub async fn send<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: String,
        body: Option<&B>,
    ) -> Result<BrokerResponse, ClientError> {
        let body = body
            .map(serde_json::to_value)
            .transpose()
            .map_err(|source| ClientError::Encode {
                path: path.clone(),
                source,
            })?;
        self.transport.request(method, &path, body.as_ref()).await
    }

    async fn delete(&self, path: String) -> Result<BrokerResponse, ClientError> {
        self.send::<()>(Method::DELETE, path, None).await
    }

    pub async fn overview(&self) -> Result<Overview, ClientError> {
        self.get("/api/overview".to_string()).await
    }

    // vhosts

    pub async fn get_vhost(&self, name: &str) -> Result<VhostInfo, ClientError> {
        self.get(format!("/api/vhosts/{}", seg(name))).await
    }

    pub async fn put_vhost(
        &self,
        name: &str,
        settings: &VhostSettings,
    ) -> Result<BrokerResponse, ClientError> {
        self.send(Method::PUT, format!("/api/vhosts/{}", seg(name)), Some(settings))
            .await
    }

    pub async fn delete_vhost(&self, name: &str) -> Result<BrokerResponse, ClientError> {
        self.delete(format!("/api/vhosts/{}", seg(name))).await
    }

    // exchanges

    pub async fn get_exchange(&self, vhost: &str, name: &str) -> Result<ExchangeInfo, ClientError> {
        self.get(format!("/api/exchanges/{}/{}", seg(vhost), seg(name)))
            .await
    }

    pub async fn declare_exchange(
        &self,
        vhost: &str,
        name: &str,
        settings: &ExchangeSettings,
    ) -> Result<BrokerResponse, ClientError> {
        self.send(
            Method::PUT,
            format!("/api/exchanges/{}/{}", seg(vhost), seg(name)),
            Some(settings),
        )
        .await
    }

    pub async fn delete_exchange(
        &self,
        vhost: &str,
        name: &str,
    ) -> Result<BrokerResponse, ClientError> {
        self.delete(format!("/api/exchanges/{}/{}", seg(vhost), seg(name)))
            .await
    }

    // queues

    pub async fn get_queue(&self, vhost: &str, name: &str) -> Result<QueueInfo, ClientError> {
        self.get(format!("/api/queues/{}/{}", seg(vhost), seg(name)))
            .await
    }

    pub async fn declare_queue(
        &self,
        vhost: &str,
        name: &str,
        settings: &QueueSettings,
    ) -> Result<BrokerResponse, ClientError> {
        self.send(
            Method::PUT,
            format!("/api/queues/{}/{}", seg(vhost), seg(name)),
            Some(settings),
        )
        .await
    }

    pub async fn delete_queue(&self, vhost: &str, name: &str) -> Result<BrokerResponse, ClientError> {
        self.delete(format!("/api/queues/{}/{}", seg(vhost), seg(name)))
            .await
    }

    // bindings

    pub async fn list_bindings_in(&self, vhost: &str) -> Result<Vec<BindingInfo>, ClientError> {
        self.get(format!("/api/bindings/{}", seg(vhost))).await
    }

    fn binding_path(
        vhost: &str,
        source: &str,
        destination_type: DestinationType,
        destination: &str,
    ) -> String {
        format!(
            "/api/bindings/{}/e/{}/{}/{}",
            seg(vhost),
            seg(source),
            destination_type.path_segment(),
            seg(destination)
        )
    }

    /// Declare a binding. On success the broker answers `201 Created` with a
    /// `Location` header whose last segment is the escaped properties key.
    pub async fn declare_binding(
        &self,
        vhost: &str,
        source: &str,
        destination_type: DestinationType,
        destination: &str,
        request: &BindingRequest,
    ) -> Result<BrokerResponse, ClientError> {
        self.send(
            Method::POST,
            Self::binding_path(vhost, source, destination_type, destination),
            Some(request),
        )
        .await
    }

    pub async fn delete_binding(
        &self,
        vhost: &str,
        source: &str,
        destination_type: DestinationType,
        destination: &str,
        properties_key: &str,
    ) -> Result<BrokerResponse, ClientError> {
        let path = format!(
            "{}/{}",
            Self::binding_path(vhost, source, destination_type, destination),
            seg(properties_key)
        );
        self.delete(path).await
    }

    // users

    pub async fn get_user(&self, name: &str) -> Result<UserInfo, ClientError> {
        self.get(format!("/api/users/{}", seg(name))).await
    }

    pub async fn put_user(
        &self,
        name: &str,
        settings: &UserSettings,
    ) -> Result<BrokerResponse, ClientError> {
        self.send(Method::PUT, format!("/api/users/{}", seg(name)), Some(settings))
            .await
    }

    pub async fn delete_user(&self, name: &str) -> Result<BrokerResponse, ClientError> {
        self.delete(format!("/api/users/{}", seg(name))).await
    }

    // permissions

    fn permissions_path(vhost: &str, user: &str) -> String {
        format!("/api/permissions/{}/{}", seg(vhost), seg(user))
    }

    pub async fn get_permissions_in(
        &self,
        vhost: &str,
        user: &str,
    ) -> Result<PermissionInfo, ClientError> {
        self.get(Self::permissions_path(vhost, user)).await
    }

    pub async fn update_permissions_in(
        &self,
        vhost: &str,
        user: &str,
        permissions: &Permissions,
    ) -> Result<BrokerResponse, ClientError> {
        self.send(
            Method::PUT,
            Self::permissions_path(vhost, user),
            Some(permissions),
        )
        .await
    }

    pub async fn clear_permissions_in(
        &self,
        vhost: &str,
        user: &str,
    ) -> Result<BrokerResponse, ClientError> {
        self.delete(Self::permissions_path(vhost, user)).await
    }

    // topic permissions

    fn topic_permissions_path(vhost: &str, user: &str) -> String {
        format!("/api/topic-permissions/{}/{}", seg(vhost), seg(user))
    }

    pub async fn get_topic_permissions_in(
        &self,
        vhost: &str,
        user: &str,
    ) -> Result<Vec<TopicPermissionInfo>, ClientError> {
        self.get(Self::topic_permissions_path(vhost, user)).await
    }

    /// Set the permissions of one exchange; other exchanges are untouched.
    pub async fn update_topic_permissions_in(
        &self,
        vhost: &str,
        user: &str,
        permissions: &TopicPermissions,
    ) -> Result<BrokerResponse, ClientError> {
        self.send(
            Method::PUT,
            Self::topic_permissions_path(vhost, user),
            Some(permissions),
        )
        .await
    }

    /// Remove the topic permissions of every exchange.
    pub async fn clear_topic_permissions_in(
        &self,
        vhost: &str,
        user: &str,
    ) -> Result<BrokerResponse, ClientError> {
        self.delete(Self::topic_permissions_path(vhost, user)).await
    }

    // runtime parameters

    fn parameter_path(component: &str, vhost: &str, name: &str) -> String {
        format!(
            "/api/parameters/{}/{}/{}",
            seg(component),
            seg(vhost),
            seg(name)
        )
    }

    pub async fn get_federation_upstream(
        &self,
        vhost: &str,
        name: &str,
    ) -> Result<FederationUpstreamInfo, ClientError> {
        self.get(Self::parameter_path(FEDERATION_UPSTREAM_COMPONENT, vhost, name))
            .await
    }

    pub async fn put_federation_upstream(
        &self,
        vhost: &str,
        name: &str,
        definition: FederationDefinition,
    ) -> Result<BrokerResponse, ClientError> {
        self.send(
            Method::PUT,
            Self::parameter_path(FEDERATION_UPSTREAM_COMPONENT, vhost, name),
            Some(&RuntimeParameter::body(definition)),
        )
        .await
    }

    pub async fn delete_federation_upstream(
        &self,
        vhost: &str,
        name: &str,
    ) -> Result<BrokerResponse, ClientError> {
        self.delete(Self::parameter_path(FEDERATION_UPSTREAM_COMPONENT, vhost, name))
            .await
    }

    pub async fn get_shovel(&self, vhost: &str, name: &str) -> Result<ShovelInfo, ClientError> {
        self.get(Self::parameter_path(SHOVEL_COMPONENT, vhost, name))
            .await
    }

    pub async fn declare_shovel(
        &self,
        vhost: &str,
        name: &str,
        definition: ShovelDefinition,
    ) -> Result<BrokerResponse, ClientError> {
        self.send(
            Method::PUT,
            Self::parameter_path(SHOVEL_COMPONENT, vhost, name),
            Some(&RuntimeParameter::body(definition)),
        )
        .await
    }

    pub async fn delete_shovel(&self, vhost: &str, name: &str) -> Result<BrokerResponse, ClientError> {
        self.delete(Self::parameter_path(SHOVEL_COMPONENT, vhost, name))
            .await
    }

    // policies

    pub async fn get_policy(&self, vhost: &str, name: &str) -> Result<PolicyInfo, ClientError> {
        self.get(format!("/api/policies/{}/{}", seg(vhost), seg(name)))
            .await
    }

    pub async fn put_policy(
        &self,
        vhost: &str,
        name: &str,
        settings: &PolicySettings,
    ) -> Result<BrokerResponse, ClientError> {
        self.send(
            Method::PUT,
            format!("/api/policies/{}/{}", seg(vhost), seg(name)),
            Some(settings),
        )
        .await
    }

    pub async fn delete_policy(&self, vhost: &str, name: &str) -> Result<BrokerResponse, ClientError> {
        self.delete(format!("/api/policies/{}/{}", seg(vhost), seg(name)))
            .await
    }
}
