//! Conversion between nested catalog trees and flat dotted-key maps.
//!
//! A catalog on disk is a JSON object whose leaves are strings. In memory the
//! engine works on a [`FlatCatalog`], where the path `["a", "b", "c"]` to a
//! leaf is the key `"a.b.c"`. [`flatten`] and [`nest`] are inverse of each
//! other for any catalog in which no key is both a leaf and a prefix of
//! another key.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// Sorted mapping from dotted key to translated string.
pub type FlatCatalog = BTreeMap<String, String>;

/// Separator between key segments.
pub const SEPARATOR: char = '.';

/// A node of a catalog tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// A translated string.
    Leaf(String),
    /// A group of named sub-trees.
    Object(BTreeMap<String, Node>),
}

impl Default for Node {
    fn default() -> Self {
        Self::Object(BTreeMap::new())
    }
}

impl Node {
    /// Build a tree from parsed JSON.
    ///
    /// Only strings and objects are accepted, and object names must be
    /// non-empty without a separator; the error names the dotted key of the
    /// first offending value.
    pub fn from_json(value: &Value) -> std::result::Result<Self, String> {
        Self::from_json_at(value, "")
    }

    fn from_json_at(value: &Value, path: &str) -> std::result::Result<Self, String> {
        match value {
            Value::String(s) => Ok(Self::Leaf(s.clone())),
            Value::Object(map) => {
                let mut children = BTreeMap::new();
                for (segment, child) in map {
                    let child_path = if path.is_empty() {
                        segment.clone()
                    } else {
                        format!("{path}{SEPARATOR}{segment}")
                    };
                    // A dotted name would flatten onto the same key as a nested path.
                    if segment.is_empty() || segment.contains(SEPARATOR) {
                        return Err(format!(
                            "name '{child_path}' must be non-empty and must not contain '{SEPARATOR}'"
                        ));
                    }
                    children.insert(segment.clone(), Self::from_json_at(child, &child_path)?);
                }
                Ok(Self::Object(children))
            },
            other => Err(format!("value at '{path}' is {}, expected a string", kind(other))),
        }
    }

    /// Convert to JSON; object keys come out sorted at every level.
    pub fn to_json(&self) -> Value {
        match self {
            Self::Leaf(s) => Value::String(s.clone()),
            Self::Object(children) => {
                let mut map = Map::new();
                for (segment, child) in children {
                    map.insert(segment.clone(), child.to_json());
                }
                Value::Object(map)
            },
        }
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::Array(_) => "an array",
        Value::String(_) => "a string",
        Value::Object(_) => "an object",
    }
}

/// Flatten a tree into dotted keys.
///
/// A leaf at the root has no key and yields nothing; empty objects contribute
/// no keys either.
pub fn flatten(tree: &Node) -> FlatCatalog {
    let mut flat = FlatCatalog::new();
    if let Node::Object(children) = tree {
        for (segment, child) in children {
            flatten_into(child, segment.clone(), &mut flat);
        }
    }
    flat
}

fn flatten_into(node: &Node, prefix: String, flat: &mut FlatCatalog) {
    match node {
        Node::Leaf(value) => {
            flat.insert(prefix, value.clone());
        },
        Node::Object(children) => {
            for (segment, child) in children {
                flatten_into(child, format!("{prefix}{SEPARATOR}{segment}"), flat);
            }
        },
    }
}

/// Flatten parsed JSON, failing with [`Error::MalformedCatalog`] for
/// non-string leaves or a non-object root. `origin` names the source in the error.
pub fn flatten_json(value: &Value, origin: &std::path::Path) -> Result<FlatCatalog> {
    if !value.is_object() {
        return Err(Error::malformed(origin, "top-level value must be a JSON object"));
    }
    let tree = Node::from_json(value).map_err(|reason| Error::malformed(origin, reason))?;
    Ok(flatten(&tree))
}

/// Rebuild the nested tree from dotted keys.
///
/// Fails with [`Error::KeyConflict`] when a key is both a leaf and a prefix
/// of another key, and with [`Error::InvalidKey`] for empty segments.
pub fn nest(flat: &FlatCatalog) -> Result<Node> {
    let mut root = BTreeMap::new();

    for (key, value) in flat {
        let segments = split_key(key)?;
        let (last, parents) = segments.split_last().ok_or_else(|| Error::InvalidKey(key.clone()))?;

        let mut cursor = &mut root;
        for (depth, segment) in parents.iter().enumerate() {
            let entry =
                cursor.entry((*segment).to_string()).or_insert_with(|| Node::Object(BTreeMap::new()));
            cursor = match entry {
                Node::Object(children) => children,
                Node::Leaf(_) => {
                    return Err(Error::KeyConflict { key: parents[..=depth].join(".") });
                },
            };
        }

        // Keys are sorted, so a prefix is always visited before its children.
        if cursor.contains_key(*last) {
            return Err(Error::KeyConflict { key: key.clone() });
        }
        cursor.insert((*last).to_string(), Node::Leaf(value.clone()));
    }

    Ok(Node::Object(root))
}

/// Split a key into segments, rejecting empty ones.
pub fn split_key(key: &str) -> Result<Vec<&str>> {
    let segments: Vec<&str> = key.split(SEPARATOR).collect();
    if segments.iter().any(|s| s.is_empty()) {
        return Err(Error::InvalidKey(key.to_string()));
    }
    Ok(segments)
}

/// Check that a user-supplied key is dot-joined segments of `[A-Za-z0-9_]+`.
pub fn validate_key(key: &str) -> Result<()> {
    let valid = split_key(key)?
        .iter()
        .all(|segment| segment.chars().all(|c| c.is_ascii_alphanumeric() || c == '_'));
    if valid { Ok(()) } else { Err(Error::InvalidKey(key.to_string())) }
}
