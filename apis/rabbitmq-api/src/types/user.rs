// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! User types

use serde::{Deserialize, Deserializer, Serialize};

/// User as returned by `GET /api/users/{name}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserInfo {
    pub name: String,
    /// Tags in the order the broker reports them
    #[serde(default, deserialize_with = "deserialize_tags")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hashing_algorithm: Option<String>,
}

/// Body of `PUT /api/users/{name}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSettings {
    pub password: String,
    /// Comma-separated tag list
    pub tags: String,
}

impl UserSettings {
    pub fn new(password: impl Into<String>, tags: &[String]) -> Self {
        Self {
            password: password.into(),
            tags: tags.join(","),
        }
    }
}

/// Brokers before 3.9 report tags as a comma-separated string, later ones as
/// an array.
fn deserialize_tags<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Tags {
        Joined(String),
        List(Vec<String>),
    }

    Ok(match Option::<Tags>::deserialize(deserializer)? {
        None => Vec::new(),
        Some(Tags::List(list)) => list,
        Some(Tags::Joined(joined)) => joined
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect(),
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn tags_as_string() {
        let u: UserInfo =
            serde_json::from_value(json!({"name": "mctest", "tags": "administrator,monitoring"}))
                .unwrap();
        assert_eq!(u.tags, vec!["administrator", "monitoring"]);
    }

    #[test]
    fn tags_as_list() {
        let u: UserInfo =
            serde_json::from_value(json!({"name": "mctest", "tags": ["management"]})).unwrap();
        assert_eq!(u.tags, vec!["management"]);
    }

    #[test]
    fn empty_tags() {
        let u: UserInfo = serde_json::from_value(json!({"name": "a", "tags": ""})).unwrap();
        assert!(u.tags.is_empty());
        let u: UserInfo = serde_json::from_value(json!({"name": "a"})).unwrap();
        assert!(u.tags.is_empty());
    }

    #[test]
    fn settings_join_tags() {
        let s = UserSettings::new("pw", &["a".to_string(), "b".to_string()]);
        assert_eq!(s.tags, "a,b");
    }
}
