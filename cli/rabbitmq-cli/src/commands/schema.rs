// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Resource kind metadata

use anyhow::Result;
use clap::Args;
use rabbitmq_provider::{FieldSchema, ResourceKind};
use serde_json::json;
use strum::IntoEnumIterator;

use super::parse_kind;
use crate::output::{print_json, print_rows, yes_or_blank};

#[derive(Args, Clone)]
pub struct SchemaArgs {
    /// Resource kind
    #[arg(value_parser = parse_kind)]
    pub kind: ResourceKind,
    /// Print field metadata and the JSON Schema of the document as JSON
    #[arg(short, long)]
    pub json: bool,
}

#[derive(Args, Clone)]
pub struct KindsArgs {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

fn notes(field: &FieldSchema) -> String {
    let mut notes = Vec::new();
    if field.computed {
        notes.push("computed".to_string());
    }
    if field.sensitive {
        notes.push("sensitive".to_string());
    }
    if !field.conflicts_with.is_empty() {
        notes.push(format!("conflicts with {}", field.conflicts_with.join(", ")));
    }
    if let Some(message) = field.deprecated {
        notes.push(format!("deprecated: {message}"));
    }
    notes.join("; ")
}

pub fn schema(args: SchemaArgs) -> Result<()> {
    let schema = args.kind.schema();

    if args.json {
        return print_json(&json!({
            "kind": schema.kind,
            "id_format": schema.id_format,
            "updatable": schema.updatable,
            "fields": schema.fields,
            "json_schema": args.kind.json_schema(),
        }));
    }

    println!("Kind:      {}", schema.kind);
    println!("Id:        {}", schema.id_format);
    println!("Updatable: {}", if schema.updatable { "yes" } else { "no" });
    println!();

    let rows = schema.fields.iter().map(|field| {
        vec![
            field.path.to_string(),
            field.field_type.to_string(),
            yes_or_blank(field.required),
            yes_or_blank(field.force_new),
            field
                .default
                .as_ref()
                .map(|v| v.to_string())
                .unwrap_or_default(),
            notes(field),
        ]
    });
    print_rows(
        &["FIELD", "TYPE", "REQUIRED", "FORCE NEW", "DEFAULT", "NOTES"],
        rows,
    );
    Ok(())
}

pub fn kinds(args: KindsArgs) -> Result<()> {
    if args.json {
        let kinds: Vec<_> = ResourceKind::iter()
            .map(|kind| {
                let schema = kind.schema();
                json!({
                    "kind": kind,
                    "id_format": schema.id_format,
                    "updatable": schema.updatable,
                })
            })
            .collect();
        return print_json(&kinds);
    }

    let rows = ResourceKind::iter().map(|kind| {
        let schema = kind.schema();
        vec![
            kind.to_string(),
            schema.id_format.to_string(),
            yes_or_blank(schema.updatable),
        ]
    });
    print_rows(&["KIND", "ID", "UPDATABLE"], rows);
    Ok(())
}
