// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! create, read, update, delete and import

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Args;
use rabbitmq_provider::ResourceKind;

use super::{document, parse_kind};
use crate::connection::ConnectionArgs;
use crate::output::{print_json, resource_document};

#[derive(Args, Clone)]
pub struct CreateArgs {
    /// Resource kind
    #[arg(value_parser = parse_kind)]
    pub kind: ResourceKind,
    /// JSON or YAML document describing the resource (`-` for stdin)
    #[arg(short, long)]
    pub file: PathBuf,
}

#[derive(Args, Clone)]
pub struct ReadArgs {
    /// Resource kind
    #[arg(value_parser = parse_kind)]
    pub kind: ResourceKind,
    /// Resource identifier, as printed by create
    pub id: String,
    /// Last known state; decides how equivalent values are written back
    #[arg(short, long)]
    pub file: Option<PathBuf>,
}

#[derive(Args, Clone)]
pub struct UpdateArgs {
    /// Resource kind
    #[arg(value_parser = parse_kind)]
    pub kind: ResourceKind,
    /// Resource identifier
    pub id: String,
    /// JSON or YAML document with the new configuration (`-` for stdin)
    #[arg(short, long)]
    pub file: PathBuf,
}

#[derive(Args, Clone)]
pub struct IdArgs {
    /// Resource kind
    #[arg(value_parser = parse_kind)]
    pub kind: ResourceKind,
    /// Resource identifier
    pub id: String,
}

/// Reject malformed identifiers before any connection is attempted.
fn check_id(kind: ResourceKind, id: &str) -> Result<()> {
    kind.parse_id(id)
        .map(|_| ())
        .with_context(|| format!("cannot use '{id}' as a {kind} identifier"))
}

pub async fn create(args: CreateArgs, connection: &ConnectionArgs) -> Result<()> {
    let doc = document::load(&args.file)?;
    let client = connection.connect()?;
    let applied = args
        .kind
        .create(&client, doc)
        .await
        .with_context(|| format!("failed to create {}", args.kind))?;
    print_json(&applied)
}

pub async fn read(args: ReadArgs, connection: &ConnectionArgs) -> Result<()> {
    check_id(args.kind, &args.id)?;
    let prior = args.file.as_deref().map(document::load).transpose()?;
    let client = connection.connect()?;
    let outcome = args
        .kind
        .read(&client, &args.id, prior)
        .await
        .with_context(|| format!("failed to read {} {}", args.kind, args.id))?;
    if outcome.is_absent() {
        eprintln!("{} {} no longer exists", args.kind, args.id);
    }
    print_json(&resource_document(&args.id, outcome))
}

pub async fn update(args: UpdateArgs, connection: &ConnectionArgs) -> Result<()> {
    check_id(args.kind, &args.id)?;
    let doc = document::load(&args.file)?;
    let client = connection.connect()?;
    let applied = args
        .kind
        .update(&client, &args.id, doc)
        .await
        .with_context(|| format!("failed to update {} {}", args.kind, args.id))?;
    print_json(&applied)
}

pub async fn delete(args: IdArgs, connection: &ConnectionArgs) -> Result<()> {
    check_id(args.kind, &args.id)?;
    let client = connection.connect()?;
    args.kind
        .delete(&client, &args.id)
        .await
        .with_context(|| format!("failed to delete {} {}", args.kind, args.id))?;
    println!("Deleted {} {}", args.kind, args.id);
    Ok(())
}

pub async fn import(args: IdArgs, connection: &ConnectionArgs) -> Result<()> {
    check_id(args.kind, &args.id)?;
    let client = connection.connect()?;
    let outcome = args
        .kind
        .import(&client, &args.id)
        .await
        .with_context(|| format!("failed to import {} {}", args.kind, args.id))?;
    if outcome.is_absent() {
        bail!("cannot import {} {}: it does not exist", args.kind, args.id);
    }
    print_json(&resource_document(&args.id, outcome))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;

    #[test]
    fn bad_identifier_mentions_kind() {
        let err = check_id(ResourceKind::Queue, "jobs").unwrap_err();
        assert!(format!("{err:#}").contains("as a queue identifier"));
    }
}
