// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Per-field metadata of each resource kind.
//!
//! The configuration engine needs more than the shape of a configuration:
//! it must know which fields force a replacement, which are computed by the
//! broker, which must never be displayed and which pairs may not be set
//! together. Paths are dotted (`settings.arguments_json`).

use serde::Serialize;
use serde_json::Value;
use strum::Display;

use rabbitmq_codec::json_equivalent;

use crate::lifecycle::ResourceKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum FieldType {
    String,
    Bool,
    Int,
    /// String holding a JSON document; compared semantically
    Json,
    /// String-to-string map
    Map,
    List,
    Set,
    /// Nested block
    Block,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldSchema {
    pub path: &'static str,
    pub field_type: FieldType,
    pub required: bool,
    pub force_new: bool,
    pub computed: bool,
    pub sensitive: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    #[serde(skip_serializing_if = "<[_]>::is_empty")]
    pub conflicts_with: &'static [&'static str],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<&'static str>,
}

impl FieldSchema {
    pub fn new(path: &'static str, field_type: FieldType) -> Self {
        Self {
            path,
            field_type,
            required: false,
            force_new: false,
            computed: false,
            sensitive: false,
            default: None,
            conflicts_with: &[],
            deprecated: None,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn force_new(mut self) -> Self {
        self.force_new = true;
        self
    }

    pub fn computed(mut self) -> Self {
        self.computed = true;
        self
    }

    pub fn sensitive(mut self) -> Self {
        self.sensitive = true;
        self
    }

    pub fn default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn conflicts_with(mut self, paths: &'static [&'static str]) -> Self {
        self.conflicts_with = paths;
        self
    }

    pub fn deprecated(mut self, message: &'static str) -> Self {
        self.deprecated = Some(message);
        self
    }

    /// Value of this field in a serialized configuration, with the default
    /// standing in for an absent field.
    fn lookup<'a>(&'a self, config: &'a Value) -> Option<&'a Value> {
        let pointer = format!("/{}", self.path.replace('.', "/"));
        match config.pointer(&pointer) {
            None | Some(Value::Null) => self.default.as_ref(),
            found => found,
        }
    }

    fn differs(&self, old: &Value, new: &Value) -> bool {
        match (self.lookup(old), self.lookup(new)) {
            (Some(Value::String(a)), Some(Value::String(b))) if self.field_type == FieldType::Json => {
                !json_equivalent(a, b)
            }
            (a, b) => a != b,
        }
    }
}

/// Metadata of one resource kind
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResourceSchema {
    pub kind: ResourceKind,
    /// Shape of the identifier, e.g. `name@vhost`
    pub id_format: &'static str,
    /// False when every change requires replacement
    pub updatable: bool,
    pub fields: Vec<FieldSchema>,
}

impl ResourceSchema {
    pub fn field(&self, path: &str) -> Option<&FieldSchema> {
        self.fields.iter().find(|f| f.path == path)
    }

    /// ForceNew fields whose value differs between two serialized
    /// configurations. A non-empty result means the engine must destroy the
    /// object and create it again.
    pub fn replacement_fields(&self, old: &Value, new: &Value) -> Vec<&'static str> {
        self.fields
            .iter()
            .filter(|f| f.force_new && !f.computed && f.field_type != FieldType::Block)
            .filter(|f| f.differs(old, new))
            .map(|f| f.path)
            .collect()
    }
}
