// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Rendering of command results on stdout

use anyhow::{Context, Result};
use comfy_table::{ContentArrangement, Table, presets::NOTHING};
use rabbitmq_provider::ReadOutcome;
use serde::Serialize;
use serde_json::{Value, json};

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value).context("failed to encode output as JSON")?;
    println!("{text}");
    Ok(())
}

/// `{"id", "state"}` document for a read; `state` is null once the object
/// is gone from the broker.
pub fn resource_document(id: &str, outcome: ReadOutcome<Value>) -> Value {
    match outcome {
        ReadOutcome::Present(state) => json!({ "id": id, "state": state }),
        ReadOutcome::Absent => json!({ "id": id, "state": null }),
    }
}

pub fn yes_or_blank(flag: bool) -> String {
    if flag { "yes".to_string() } else { String::new() }
}

/// Borderless table; long notes wrap to the terminal width.
pub fn render_rows<I>(headers: &[&str], rows: I) -> Table
where
    I: IntoIterator<Item = Vec<String>>,
{
    let mut table = Table::new();
    table
        .load_preset(NOTHING)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(headers.to_vec());
    for row in rows {
        table.add_row(row);
    }
    table
}

pub fn print_rows<I>(headers: &[&str], rows: I)
where
    I: IntoIterator<Item = Vec<String>>,
{
    println!("{}", render_rows(headers, rows));
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn absent_state_is_null() {
        assert_eq!(
            resource_document("q@/", ReadOutcome::Absent),
            json!({"id": "q@/", "state": null})
        );
    }

    #[test]
    fn present_state_is_nested() {
        assert_eq!(
            resource_document("dev", ReadOutcome::Present(json!({"name": "dev"}))),
            json!({"id": "dev", "state": {"name": "dev"}})
        );
    }

    #[test]
    fn rows_keep_header_order() {
        let table = render_rows(&["KIND", "ID"], [vec!["vhost".to_string(), "name".to_string()]]);
        let text = table.to_string();
        assert!(text.find("KIND").unwrap() < text.find("ID").unwrap());
        assert!(text.contains("vhost"));
    }
}
