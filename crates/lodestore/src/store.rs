// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 lodestore contributors

//! Record store: schema-validated, per-schema wrapper files.
//!
//! One file per (server directory, schema name) pair holds the full
//! ordered collection of records in the legacy wrapper format. Saving is
//! read-modify-rewrite: the existing collection is decoded, the new
//! record appended, and the whole file replaced via write-to-temp-then-
//! rename. There is no cross-process locking -- two concurrent savers
//! against the same file can still lose an append (last writer wins).

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde_json::Value;
use thiserror::Error;

use crate::registry::ServerDescriptor;
use crate::schema::Schema;
use crate::wrapper;

/// File extension for stored collections. Kept as `.js` so existing
/// wrapper-format stores remain readable.
pub const STORE_EXT: &str = "js";

// ---------------------------------------------------------------------------
// StoreError
// ---------------------------------------------------------------------------

/// Errors produced by save/read operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A required input was absent or empty. Raised before any I/O.
    #[error("missing required argument: {0}")]
    MissingArgument(&'static str),

    /// The record failed validation against the named schema.
    #[error("data does not match schema '{0}'")]
    SchemaMismatch(String),

    /// Re-encoding the collection failed.
    #[error("failed to encode records: {0}")]
    Encode(#[from] serde_json::Error),

    /// The filesystem rejected the write (or the pre-write read).
    #[error("failed to persist records to {path}: {source}")]
    Persist {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

// ---------------------------------------------------------------------------
// Outcomes
// ---------------------------------------------------------------------------

/// Result of a successful [`save_record`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// The record was appended and the file rewritten.
    Saved,
    /// The server is not running; nothing was written.
    NotRunning,
}

/// Result of a successful [`read_records`] call.
///
/// The missing-file, corrupt-file, and stopped-server cases each get
/// their own tag so callers can distinguish "no records yet" from
/// "records lost to corruption" without a diagnostic channel.
#[derive(Debug, Clone, PartialEq)]
pub enum ReadOutcome {
    /// The stored collection, in insertion order.
    Data(Vec<Value>),
    /// No file yet (or a blank file): no records have been saved.
    Empty,
    /// The file exists but does not match the wrapper grammar.
    Corrupt(String),
    /// The server is not running; the file was not consulted.
    NotRunning,
}

impl ReadOutcome {
    /// Normalize to a record list: every non-`Data` outcome becomes an
    /// empty collection.
    pub fn into_records(self) -> Vec<Value> {
        match self {
            ReadOutcome::Data(records) => records,
            _ => Vec::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

/// Target file for a (server, schema) pair:
/// `<server.directory>/<schema.name>.js`.
pub fn store_path(server: &ServerDescriptor, schema: &Schema) -> PathBuf {
    server
        .directory
        .join(format!("{}.{}", schema.name, STORE_EXT))
}

fn check_args(server: &ServerDescriptor, schema: &Schema) -> Result<(), StoreError> {
    if server.name.is_empty() {
        return Err(StoreError::MissingArgument("server name"));
    }
    if schema.name.is_empty() {
        return Err(StoreError::MissingArgument("schema name"));
    }
    Ok(())
}

fn persist_err(path: &Path, source: io::Error) -> StoreError {
    StoreError::Persist {
        path: path.to_path_buf(),
        source,
    }
}

// ---------------------------------------------------------------------------
// save_record
// ---------------------------------------------------------------------------

/// Validate `data` against `schema` and append it to the server's stored
/// collection for that schema.
///
/// - Argument errors and schema mismatches fail before any write.
/// - A server that is not `Running` makes the call a no-op
///   ([`SaveOutcome::NotRunning`]) with a diagnostic, not an error.
/// - An existing file that fails the wrapper grammar is logged and
///   replaced by a fresh collection containing only `data`.
/// - The rewrite goes through a temp file in the same directory followed
///   by a rename, so a crashed writer never leaves a half-written store.
pub fn save_record(
    server: &ServerDescriptor,
    schema: &Schema,
    data: &Value,
) -> Result<SaveOutcome, StoreError> {
    check_args(server, schema)?;
    if data.is_null() {
        return Err(StoreError::MissingArgument("data"));
    }

    if !server.is_running() {
        tracing::warn!(
            server = %server.name,
            status = %server.status,
            "save skipped: server is not running"
        );
        return Ok(SaveOutcome::NotRunning);
    }

    if !schema.schema.accepts(data) {
        return Err(StoreError::SchemaMismatch(schema.name.clone()));
    }

    fs::create_dir_all(&server.directory)
        .map_err(|e| persist_err(&server.directory, e))?;

    let path = store_path(server, schema);

    let mut records = match fs::read_to_string(&path) {
        // A blank file is an empty collection, same as on read.
        Ok(text) if text.trim().is_empty() => Vec::new(),
        Ok(text) => match wrapper::decode(&text) {
            Ok(records) => records,
            Err(reason) => {
                tracing::warn!(
                    path = %path.display(),
                    %reason,
                    "existing store is corrupt; starting a fresh collection"
                );
                Vec::new()
            }
        },
        Err(e) if e.kind() == io::ErrorKind::NotFound => Vec::new(),
        Err(e) => return Err(persist_err(&path, e)),
    };

    records.push(data.clone());
    let text = wrapper::encode(&records)?;

    // Write-to-temp-then-rename keeps the previous contents intact if the
    // write itself fails partway.
    let tmp = server
        .directory
        .join(format!(".{}.{}.tmp", schema.name, STORE_EXT));
    fs::write(&tmp, text).map_err(|e| persist_err(&tmp, e))?;
    fs::rename(&tmp, &path).map_err(|e| persist_err(&path, e))?;

    tracing::debug!(
        server = %server.name,
        schema = %schema.name,
        total = records.len(),
        "record appended"
    );
    Ok(SaveOutcome::Saved)
}

// ---------------------------------------------------------------------------
// read_records
// ---------------------------------------------------------------------------

/// Read the full stored collection for a (server, schema) pair.
///
/// Never fails on file content: a missing or blank file reads as
/// [`ReadOutcome::Empty`], and an unreadable or malformed file degrades to
/// [`ReadOutcome::Corrupt`] with a diagnostic.
pub fn read_records(
    server: &ServerDescriptor,
    schema: &Schema,
) -> Result<ReadOutcome, StoreError> {
    check_args(server, schema)?;

    if !server.is_running() {
        tracing::warn!(
            server = %server.name,
            status = %server.status,
            "read skipped: server is not running"
        );
        return Ok(ReadOutcome::NotRunning);
    }

    let path = store_path(server, schema);

    let text = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(ReadOutcome::Empty),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "store unreadable");
            return Ok(ReadOutcome::Corrupt(e.to_string()));
        }
    };

    if text.trim().is_empty() {
        return Ok(ReadOutcome::Empty);
    }

    match wrapper::decode(&text) {
        Ok(records) => Ok(ReadOutcome::Data(records)),
        Err(reason) => {
            tracing::warn!(path = %path.display(), %reason, "store is corrupt");
            Ok(ReadOutcome::Corrupt(reason.to_string()))
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
