// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 lodestore contributors

//! lodestore CLI
//!
//! Thin front end over the library: one invocation runs one operation
//! against a store directory.
//!
//! # Usage
//!
//! ```bash
//! # Say hello
//! lodectl greet --name Ana
//!
//! # Append a record (schema is a JSON file: {"name": ..., "schema": ...})
//! lodectl save --dir ./db --schema user.schema.json '{"name": "Ana", "age": 30}'
//!
//! # Print all records stored under a schema
//! lodectl read --dir ./db --schema user.schema.json
//! ```

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use lodestore::{read_records, save_record, ReadOutcome, SaveOutcome, Schema, ServerRegistry};

#[derive(Parser, Debug)]
#[command(name = "lodectl")]
#[command(about = "lodestore - embedded local data store", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print a greeting
    Greet {
        /// Name to greet
        #[arg(short, long)]
        name: Option<String>,
    },
    /// Validate a record against a schema and append it to the store
    Save {
        /// Store directory (must exist)
        #[arg(short, long)]
        dir: PathBuf,

        /// Path to a schema file: {"name": "...", "schema": ...}
        #[arg(short, long)]
        schema: PathBuf,

        /// Record to save, as inline JSON
        data: String,
    },
    /// Print every record stored under a schema
    Read {
        /// Store directory (must exist)
        #[arg(short, long)]
        dir: PathBuf,

        /// Path to a schema file: {"name": "...", "schema": ...}
        #[arg(short, long)]
        schema: PathBuf,
    },
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = Args::parse();

    match args.command {
        Commands::Greet { name } => {
            lodestore::greet(name.as_deref());
            Ok(())
        }
        Commands::Save { dir, schema, data } => {
            let schema = load_schema(&schema)?;
            let record: serde_json::Value =
                serde_json::from_str(&data).context("record is not valid JSON")?;

            let server = open_server(&dir)?;
            match save_record(&server, &schema, &record)? {
                SaveOutcome::Saved => println!("Saved 1 record under '{}'.", schema.name),
                SaveOutcome::NotRunning => println!("Server is not running; nothing saved."),
            }
            Ok(())
        }
        Commands::Read { dir, schema } => {
            let schema = load_schema(&schema)?;
            let server = open_server(&dir)?;

            match read_records(&server, &schema)? {
                ReadOutcome::Data(records) => {
                    println!("{} record(s) under '{}':", records.len(), schema.name);
                    for record in &records {
                        println!("{}", serde_json::to_string(record)?);
                    }
                }
                ReadOutcome::Empty => println!("No records yet under '{}'.", schema.name),
                ReadOutcome::Corrupt(reason) => {
                    println!("Store for '{}' is corrupt: {reason}", schema.name)
                }
                ReadOutcome::NotRunning => println!("Server is not running; nothing read."),
            }
            Ok(())
        }
    }
}

/// Register and start a throwaway server rooted at `dir`.
///
/// The CLI is one-shot, so the registry lives only for this invocation.
fn open_server(dir: &PathBuf) -> Result<lodestore::ServerDescriptor> {
    let mut registry = ServerRegistry::new();
    registry
        .create("local", dir)
        .with_context(|| format!("cannot open store at {}", dir.display()))?;
    let server = registry
        .start("local")
        .context("server registration lost")?
        .clone();
    Ok(server)
}

fn load_schema(path: &PathBuf) -> Result<Schema> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("cannot read schema file {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("invalid schema file {}", path.display()))
}
