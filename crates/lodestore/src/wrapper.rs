// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 lodestore contributors

//! Legacy wrapper file format.
//!
//! Stored collections are not raw JSON files; they are small source-like
//! text files of the fixed shape:
//!
//! ```text
//! const data = [ ... ];
//!
//! module.exports = data;
//! ```
//!
//! This format is kept for on-disk compatibility with existing stores.
//! Decoding is a fixed-grammar extraction: the JSON array literal sits
//! between the `const data = ` prefix and the `;` immediately preceding
//! `module.exports = data;`, with embedded newlines allowed inside the
//! array. Any file that deviates from this shape is unparseable.

use serde_json::Value;
use thiserror::Error;

/// Literal opening the data assignment.
const PREFIX: &str = "const data = ";

/// Literal export statement closing the file.
const EXPORT: &str = "module.exports = data;";

// ---------------------------------------------------------------------------
// WrapperError
// ---------------------------------------------------------------------------

/// Reasons a stored file fails the wrapper grammar.
#[derive(Debug, Error)]
pub enum WrapperError {
    #[error("missing `const data = ` prefix")]
    MissingPrefix,

    #[error("missing `module.exports = data;` export")]
    MissingExport,

    #[error("array literal is not terminated by `;`")]
    MissingTerminator,

    #[error("invalid JSON literal: {0}")]
    Json(#[from] serde_json::Error),

    #[error("data literal is not an array")]
    NotAnArray,
}

// ---------------------------------------------------------------------------
// decode / encode
// ---------------------------------------------------------------------------

/// Extract the stored collection from wrapper-format text.
pub fn decode(text: &str) -> Result<Vec<Value>, WrapperError> {
    let body = text
        .trim_start()
        .strip_prefix(PREFIX)
        .ok_or(WrapperError::MissingPrefix)?;

    // The export statement is always the last thing `encode` writes, so
    // take the last occurrence: a stored string value may itself contain
    // the export literal.
    let export_at = body.rfind(EXPORT).ok_or(WrapperError::MissingExport)?;

    let literal = body[..export_at]
        .trim_end()
        .strip_suffix(';')
        .ok_or(WrapperError::MissingTerminator)?;

    match serde_json::from_str::<Value>(literal)? {
        Value::Array(records) => Ok(records),
        _ => Err(WrapperError::NotAnArray),
    }
}

/// Serialize a collection into wrapper-format text.
///
/// The array is pretty-printed (2-space indentation, alphabetical key
/// order within objects) so stored files stay diffable.
pub fn encode(records: &[Value]) -> Result<String, serde_json::Error> {
    let literal = serde_json::to_string_pretty(records)?;
    Ok(format!("{PREFIX}{literal};\n\n{EXPORT}\n"))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
