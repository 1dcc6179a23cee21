// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! rabbitmq-declare - declare RabbitMQ broker objects from documents

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod connection;
mod output;

use commands::lifecycle::{CreateArgs, IdArgs, ReadArgs, UpdateArgs};
use commands::schema::{KindsArgs, SchemaArgs};
use connection::ConnectionArgs;

#[derive(Parser)]
#[command(
    name = "rabbitmq-declare",
    version,
    about = "Declare RabbitMQ broker objects",
    long_about = "Create, read, update, delete and import RabbitMQ broker objects \
                  (vhosts, exchanges, queues, bindings, users, permissions, \
                  federation upstreams, shovels and policies) through the \
                  management HTTP API"
)]
struct Cli {
    #[command(flatten)]
    connection: ConnectionArgs,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Declare a resource and print its id and state
    Create(CreateArgs),

    /// Print the current state of a resource
    #[command(alias = "get")]
    Read(ReadArgs),

    /// Apply changes to a resource's updatable fields
    Update(UpdateArgs),

    /// Delete a resource; a resource that is already gone is not an error
    #[command(alias = "rm")]
    Delete(IdArgs),

    /// Print the state of an existing resource, with no prior state
    Import(IdArgs),

    /// Describe the fields of a resource kind
    Schema(SchemaArgs),

    /// List resource kinds
    Kinds(KindsArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("rabbitmq=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Create(args) => commands::lifecycle::create(args, &cli.connection).await,
        Commands::Read(args) => commands::lifecycle::read(args, &cli.connection).await,
        Commands::Update(args) => commands::lifecycle::update(args, &cli.connection).await,
        Commands::Delete(args) => commands::lifecycle::delete(args, &cli.connection).await,
        Commands::Import(args) => commands::lifecycle::import(args, &cli.connection).await,
        Commands::Schema(args) => commands::schema::schema(args),
        Commands::Kinds(args) => commands::schema::kinds(args),
    }
}
