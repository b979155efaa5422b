// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 lodestore contributors

//! lodestore -- minimal embedded local data store.
//!
//! Registers named "servers" (logical databases bound to a directory),
//! validates records against user-supplied schemas, and persists each
//! schema's records as an ordered collection in one file per schema name.
//!
//! # Features
//!
//! - **Schema validation** -- recursive boolean check of JSON values
//!   against declarative shape descriptions (type tags, object shapes,
//!   homogeneous arrays, explicit permissive nodes)
//! - **Record store** -- append-by-rewrite persistence with atomic
//!   replace and graceful corrupt-file degradation
//! - **Server registry** -- owned, name-keyed descriptor map with
//!   init/running/stopped lifecycle
//!
//! # Architecture
//!
//! ```text
//! ServerRegistry            (create / lookup / start / stop)
//!      |
//!      v
//! save_record / read_records
//!      +-- SchemaNode::accepts   (validation before any write)
//!      +-- wrapper::{decode, encode}   (legacy on-disk envelope)
//! ```
//!
//! # Example
//!
//! ```no_run
//! use lodestore::{save_record, read_records, Schema, SchemaNode, ServerRegistry, TypeTag};
//! use serde_json::json;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut registry = ServerRegistry::new();
//! registry.create("demo", "/tmp/demo-db")?;
//! registry.start("demo");
//!
//! let schema = Schema::new(
//!     "user",
//!     SchemaNode::object([
//!         ("name", SchemaNode::Tag(TypeTag::String)),
//!         ("age", SchemaNode::Tag(TypeTag::Number)),
//!     ]),
//! );
//!
//! let server = registry.lookup("demo").unwrap();
//! save_record(server, &schema, &json!({"name": "Ana", "age": 30}))?;
//! let records = read_records(server, &schema)?.into_records();
//! # Ok(())
//! # }
//! ```

pub mod registry;
pub mod schema;
pub mod store;
pub mod wrapper;

pub use registry::{RegistryError, ServerDescriptor, ServerRegistry, ServerStatus};
pub use schema::{Schema, SchemaNode, TypeTag};
pub use store::{
    read_records, save_record, store_path, ReadOutcome, SaveOutcome, StoreError, STORE_EXT,
};
pub use wrapper::WrapperError;

/// Print a greeting to stdout.
pub fn greet(name: Option<&str>) {
    match name {
        Some(name) => println!("Hello {name}!"),
        None => println!("Hello!"),
    }
}
