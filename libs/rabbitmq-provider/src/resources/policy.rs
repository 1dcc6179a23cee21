// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Policies.
//!
//! Definitions are configured as a string map. Values that look like
//! integers or booleans are sent as JSON numbers and booleans
//! (`max-length = "10"` must reach the broker as `10`), and every value is
//! read back as a string.

use std::collections::BTreeMap;

use async_trait::async_trait;
use rabbitmq_api::{Arguments, ApplyTo, PolicySettings};
use rabbitmq_client::{BrokerClient, ManagementClient};
use rabbitmq_codec::NameVhostId;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{
    check_delete, check_write, parse_name_vhost, present_or_absent, require_non_empty,
};
use crate::error::ProviderError;
use crate::lifecycle::{Applied, ReadOutcome, ResourceHandler, ResourceKind, read_back};
use crate::schema::{FieldSchema, FieldType, ResourceSchema};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PolicyConfig {
    pub name: String,
    pub vhost: String,
    pub policy: PolicySpec,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PolicySpec {
    /// Regular expression matched against queue and exchange names
    pub pattern: String,
    #[serde(default)]
    pub priority: i64,
    #[serde(default)]
    pub apply_to: ApplyTo,
    #[serde(default)]
    pub definition: BTreeMap<String, String>,
}

/// Turn a configured string into the JSON value the broker expects.
fn coerce(raw: &str) -> Value {
    if let Ok(n) = raw.parse::<i64>() {
        return Value::from(n);
    }
    match raw {
        "t" | "T" | "true" | "TRUE" | "True" => Value::Bool(true),
        "f" | "F" | "false" | "FALSE" | "False" => Value::Bool(false),
        _ => Value::String(raw.to_string()),
    }
}

fn stringify(value: Value) -> String {
    match value {
        Value::String(s) => s,
        other => other.to_string(),
    }
}

impl PolicySpec {
    fn settings(&self) -> PolicySettings {
        PolicySettings {
            pattern: self.pattern.clone(),
            apply_to: self.apply_to,
            priority: self.priority,
            definition: self
                .definition
                .iter()
                .map(|(k, v)| (k.clone(), coerce(v)))
                .collect::<Arguments>(),
        }
    }
}

pub struct PolicyResource;

impl PolicyResource {
    async fn put<C: BrokerClient>(
        client: &ManagementClient<C>,
        vhost: &str,
        name: &str,
        spec: &PolicySpec,
        action: &'static str,
    ) -> Result<(), ProviderError> {
        let settings = spec.settings();
        tracing::debug!(
            policy = name,
            vhost,
            pattern = %settings.pattern,
            apply_to = %settings.apply_to,
            priority = settings.priority,
            "putting policy"
        );
        tracing::trace!(definition = ?settings.definition, "policy definition");
        let response = client.put_policy(vhost, name, &settings).await?;
        check_write(&response, Self::KIND, action)
    }
}

#[async_trait]
impl ResourceHandler for PolicyResource {
    type Config = PolicyConfig;

    const KIND: ResourceKind = ResourceKind::Policy;

    fn schema(&self) -> ResourceSchema {
        ResourceSchema {
            kind: Self::KIND,
            id_format: "name@vhost",
            updatable: true,
            fields: vec![
                FieldSchema::new("name", FieldType::String).required().force_new(),
                FieldSchema::new("vhost", FieldType::String).required().force_new(),
                FieldSchema::new("policy", FieldType::Block).required(),
                FieldSchema::new("policy.pattern", FieldType::String).required(),
                FieldSchema::new("policy.priority", FieldType::Int).default(0),
                FieldSchema::new("policy.apply_to", FieldType::String).default("all"),
                FieldSchema::new("policy.definition", FieldType::Map).required(),
            ],
        }
    }

    async fn create<C: BrokerClient>(
        &self,
        client: &ManagementClient<C>,
        config: &PolicyConfig,
    ) -> Result<Applied<PolicyConfig>, ProviderError> {
        require_non_empty("name", &config.name)?;
        require_non_empty("vhost", &config.vhost)?;
        Self::put(client, &config.vhost, &config.name, &config.policy, "creating").await?;

        let id = NameVhostId::new(&config.name, &config.vhost).to_string();
        read_back(self, client, id, config).await
    }

    async fn read<C: BrokerClient>(
        &self,
        client: &ManagementClient<C>,
        id: &str,
        _prior: Option<&PolicyConfig>,
    ) -> Result<ReadOutcome<PolicyConfig>, ProviderError> {
        let key = parse_name_vhost(Self::KIND, id)?;
        let outcome = present_or_absent(
            client.get_policy(&key.vhost, &key.name).await,
            Self::KIND,
            id,
        )?;

        Ok(outcome.map(|info| PolicyConfig {
            name: info.name,
            vhost: info.vhost,
            policy: PolicySpec {
                pattern: info.pattern,
                priority: info.priority,
                apply_to: info.apply_to,
                definition: info
                    .definition
                    .into_iter()
                    .map(|(k, v)| (k, stringify(v)))
                    .collect(),
            },
        }))
    }

    async fn update<C: BrokerClient>(
        &self,
        client: &ManagementClient<C>,
        id: &str,
        config: &PolicyConfig,
    ) -> Result<Applied<PolicyConfig>, ProviderError> {
        let key = parse_name_vhost(Self::KIND, id)?;
        Self::put(client, &key.vhost, &key.name, &config.policy, "updating").await?;
        read_back(self, client, id.to_string(), config).await
    }

    async fn delete<C: BrokerClient>(
        &self,
        client: &ManagementClient<C>,
        id: &str,
    ) -> Result<(), ProviderError> {
        let key = parse_name_vhost(Self::KIND, id)?;
        tracing::debug!(policy = %key.name, vhost = %key.vhost, "deleting policy");
        let response = client.delete_policy(&key.vhost, &key.name).await?;
        check_delete(&response, Self::KIND)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use test_case::test_case;

    #[test_case("10", json!(10); "integer")]
    #[test_case("-3", json!(-3); "negative integer")]
    #[test_case("1", json!(1); "one stays numeric")]
    #[test_case("true", json!(true); "bool")]
    #[test_case("False", json!(false); "capitalised bool")]
    #[test_case("all", json!("all"); "plain string")]
    #[test_case("1.5", json!("1.5"); "floats stay strings")]
    fn definition_values_are_coerced(raw: &str, expected: Value) {
        assert_eq!(coerce(raw), expected);
    }

    #[test]
    fn read_stringifies_values() {
        assert_eq!(stringify(json!("exactly")), "exactly");
        assert_eq!(stringify(json!(2)), "2");
        assert_eq!(stringify(json!(true)), "true");
        assert_eq!(stringify(json!(["a", "b"])), r#"["a","b"]"#);
    }

    #[test]
    fn settings_body_uses_wire_names() {
        let spec: PolicySpec = serde_json::from_value(json!({
            "pattern": "^ha\\.",
            "apply_to": "queues",
            "definition": {"ha-mode": "exactly", "ha-params": "2"}
        }))
        .unwrap();
        assert_eq!(spec.priority, 0);

        let wire = serde_json::to_value(spec.settings()).unwrap();
        assert_eq!(
            wire,
            json!({
                "pattern": "^ha\\.",
                "apply-to": "queues",
                "priority": 0,
                "definition": {"ha-mode": "exactly", "ha-params": 2}
            })
        );
    }
}
