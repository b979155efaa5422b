// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 lodestore contributors

//! Schema model and validation.
//!
//! A schema is a named, recursively-defined shape description. Validation
//! is a single boolean verdict: callers that need per-field diagnostics
//! are out of scope.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

// ---------------------------------------------------------------------------
// TypeTag
// ---------------------------------------------------------------------------

/// Primitive kind expected by a type-tag leaf.
///
/// Comparison is by kind, never by value: `TypeTag::Number` accepts any
/// JSON number, integral or floating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeTag {
    /// Expect a JSON string.
    String,
    /// Expect a JSON number.
    Number,
    /// Expect a JSON boolean.
    Boolean,
    /// Expect JSON null.
    Null,
}

impl TypeTag {
    /// Returns true if `value` has this primitive kind.
    pub fn matches(&self, value: &Value) -> bool {
        match self {
            TypeTag::String => value.is_string(),
            TypeTag::Number => value.is_number(),
            TypeTag::Boolean => value.is_boolean(),
            TypeTag::Null => value.is_null(),
        }
    }
}

// ---------------------------------------------------------------------------
// SchemaNode
// ---------------------------------------------------------------------------

/// A single node in a schema tree.
///
/// The JSON representation mirrors the node shape directly: a known tag
/// string (`"string"`, `"number"`, ...) is a leaf, a one-element array
/// applies its element to every item of an array value, and an object maps
/// field names to nested nodes. Anything else deserializes to
/// [`SchemaNode::Unconstrained`], which accepts every value -- the
/// permissive default is a visible variant, not a silent fallthrough.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SchemaNode {
    /// Leaf node constraining the primitive kind of the value.
    Tag(TypeTag),
    /// Homogeneous array: one element describing every item of the value.
    ///
    /// A node with zero or more than one element carries no constraint.
    Array(Vec<SchemaNode>),
    /// Object shape: every listed field must exist and validate. Extra
    /// fields in the value are ignored (the schema is a lower bound).
    Object(BTreeMap<String, SchemaNode>),
    /// Accepts any value.
    Unconstrained(Value),
}

impl SchemaNode {
    /// Build a homogeneous-array node from its element schema.
    pub fn array(element: SchemaNode) -> Self {
        SchemaNode::Array(vec![element])
    }

    /// Build an object node from `(field, node)` pairs.
    pub fn object<I, K>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, SchemaNode)>,
        K: Into<String>,
    {
        SchemaNode::Object(
            fields
                .into_iter()
                .map(|(k, node)| (k.into(), node))
                .collect(),
        )
    }

    /// Recursively check `value` against this node.
    ///
    /// Fails on the first mismatch; an empty array value trivially passes
    /// an array node.
    pub fn accepts(&self, value: &Value) -> bool {
        match self {
            SchemaNode::Tag(tag) => tag.matches(value),
            SchemaNode::Array(items) => match (items.as_slice(), value) {
                ([element], Value::Array(values)) => {
                    values.iter().all(|v| element.accepts(v))
                }
                ([_element], _) => false,
                // Zero or multiple elements: no constraint to apply.
                _ => true,
            },
            SchemaNode::Object(fields) => match value {
                Value::Object(map) => fields
                    .iter()
                    .all(|(key, node)| map.get(key).is_some_and(|v| node.accepts(v))),
                _ => false,
            },
            SchemaNode::Unconstrained(_) => true,
        }
    }
}

impl From<TypeTag> for SchemaNode {
    fn from(tag: TypeTag) -> Self {
        SchemaNode::Tag(tag)
    }
}

// ---------------------------------------------------------------------------
// Schema
// ---------------------------------------------------------------------------

/// A named schema. The name doubles as the storage file key, so it should
/// be filesystem-safe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    /// Unique schema name.
    pub name: String,
    /// Root node applied to every record saved under this name.
    pub schema: SchemaNode,
}

impl Schema {
    /// Create a named schema from its root node.
    pub fn new(name: impl Into<String>, schema: SchemaNode) -> Self {
        Schema {
            name: name.into(),
            schema,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn type_tags_match_by_kind() {
        assert!(TypeTag::String.matches(&json!("abc")));
        assert!(TypeTag::String.matches(&json!("")));
        assert!(!TypeTag::String.matches(&json!(42)));

        assert!(TypeTag::Number.matches(&json!(42)));
        assert!(TypeTag::Number.matches(&json!(3.25)));
        assert!(!TypeTag::Number.matches(&json!("42")));

        assert!(TypeTag::Boolean.matches(&json!(false)));
        assert!(!TypeTag::Boolean.matches(&json!(0)));

        assert!(TypeTag::Null.matches(&Value::Null));
        assert!(!TypeTag::Null.matches(&json!("null")));
    }

    #[test]
    fn object_schema_is_lower_bound() {
        let schema = SchemaNode::object([
            ("name", SchemaNode::Tag(TypeTag::String)),
            ("age", SchemaNode::Tag(TypeTag::Number)),
        ]);

        assert!(schema.accepts(&json!({"name": "Ana", "age": 30})));
        // Extra keys never cause failure.
        assert!(schema.accepts(&json!({"name": "Ana", "age": 30, "city": "Lisbon"})));
        // Missing schema key fails.
        assert!(!schema.accepts(&json!({"name": "Bo"})));
        // Wrong kind fails.
        assert!(!schema.accepts(&json!({"name": "Ana", "age": "30"})));
        // Non-object value fails.
        assert!(!schema.accepts(&json!([1, 2, 3])));
    }

    #[test]
    fn nested_object_validates_recursively() {
        let schema = SchemaNode::object([(
            "address",
            SchemaNode::object([("street", SchemaNode::Tag(TypeTag::String))]),
        )]);

        assert!(schema.accepts(&json!({"address": {"street": "Main"}})));
        assert!(!schema.accepts(&json!({"address": {"street": 7}})));
        assert!(!schema.accepts(&json!({"address": "Main"})));
    }

    #[test]
    fn array_schema_applies_element_to_every_item() {
        let schema = SchemaNode::array(SchemaNode::Tag(TypeTag::Number));

        assert!(schema.accepts(&json!([])));
        assert!(schema.accepts(&json!([1, 2, 3])));
        assert!(!schema.accepts(&json!([1, "two", 3])));
        assert!(!schema.accepts(&json!(1)));
    }

    #[test]
    fn array_of_objects() {
        let schema = SchemaNode::array(SchemaNode::object([(
            "id",
            SchemaNode::Tag(TypeTag::Number),
        )]));

        assert!(schema.accepts(&json!([{"id": 1}, {"id": 2, "extra": true}])));
        assert!(!schema.accepts(&json!([{"id": 1}, {"name": "x"}])));
    }

    #[test]
    fn empty_and_multi_element_array_nodes_are_unconstrained() {
        let empty = SchemaNode::Array(vec![]);
        assert!(empty.accepts(&json!("anything")));
        assert!(empty.accepts(&json!([1, "two"])));

        let multi = SchemaNode::Array(vec![
            SchemaNode::Tag(TypeTag::String),
            SchemaNode::Tag(TypeTag::Number),
        ]);
        assert!(multi.accepts(&json!(true)));
    }

    #[test]
    fn unconstrained_accepts_everything() {
        let node = SchemaNode::Unconstrained(json!("whatever"));
        assert!(node.accepts(&json!(null)));
        assert!(node.accepts(&json!({"a": [1, 2]})));
    }

    #[test]
    fn schema_json_representation() {
        let schema: SchemaNode =
            serde_json::from_value(json!({"name": "string", "age": "number"})).unwrap();
        assert!(schema.accepts(&json!({"name": "Ana", "age": 30})));
        assert!(!schema.accepts(&json!({"name": "Ana", "age": "thirty"})));

        let array: SchemaNode = serde_json::from_value(json!(["number"])).unwrap();
        assert!(array.accepts(&json!([1, 2])));
    }

    #[test]
    fn unknown_tag_deserializes_as_unconstrained() {
        let node: SchemaNode = serde_json::from_value(json!("uuid")).unwrap();
        assert_eq!(node, SchemaNode::Unconstrained(json!("uuid")));
        assert!(node.accepts(&json!(123)));
    }

    #[test]
    fn schema_node_serde_roundtrip() {
        let schema = SchemaNode::object([
            ("name", SchemaNode::Tag(TypeTag::String)),
            ("tags", SchemaNode::array(SchemaNode::Tag(TypeTag::String))),
        ]);

        let encoded = serde_json::to_value(&schema).unwrap();
        assert_eq!(encoded, json!({"name": "string", "tags": ["string"]}));

        let decoded: SchemaNode = serde_json::from_value(encoded).unwrap();
        assert_eq!(decoded, schema);
    }
}
