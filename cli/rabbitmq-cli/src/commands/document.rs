// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Resource documents read from disk or stdin

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Value;

/// Load a JSON or YAML document. `-` reads stdin.
///
/// Files ending in `.json` are parsed as JSON, everything else as YAML
/// (which also accepts JSON).
pub fn load(path: &Path) -> Result<Value> {
    tracing::debug!(path = %path.display(), "loading resource document");
    if path.as_os_str() == "-" {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("failed to read document from stdin")?;
        return parse_yaml(&buffer, "stdin");
    }

    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let origin = path.display().to_string();
    match path.extension().and_then(|e| e.to_str()) {
        Some("json") => serde_json::from_str(&raw)
            .with_context(|| format!("{origin} is not valid JSON")),
        _ => parse_yaml(&raw, &origin),
    }
}

fn parse_yaml(raw: &str, origin: &str) -> Result<Value> {
    serde_yaml::from_str(raw).with_context(|| format!("{origin} is not valid YAML"))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::io::Write;

    #[test]
    fn yaml_document() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(file, "name: jobs\nsettings:\n  durable: true\n  arguments_json: '{{\"x-max-length\": 10}}'").unwrap();
        assert_eq!(
            load(file.path()).unwrap(),
            json!({
                "name": "jobs",
                "settings": {"durable": true, "arguments_json": "{\"x-max-length\": 10}"}
            })
        );
    }

    #[test]
    fn json_document() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, r#"{{"name": "dev"}}"#).unwrap();
        assert_eq!(load(file.path()).unwrap(), json!({"name": "dev"}));
    }

    #[test]
    fn malformed_json_names_the_file() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, "{{").unwrap();
        let err = load(file.path()).unwrap_err();
        assert!(format!("{err:#}").contains("is not valid JSON"));
    }
}
