//! Tree-object (JSON-LD) documents

use serde_json::Value;

use super::document::{FragmentShape, IdentifierRewrites};
use super::vocab::{JSON_CONTEXT, JSON_GRAPH, JSON_ID, JSON_NODE_KEYS, JSON_RELATION_KEYS};

/// A fragment expressed as a single JSON-LD object
///
/// The engine only looks at a few well-known keys: the top-level `@id`, the
/// `tree:relation` entries with their `tree:node` targets, and `@context`.
/// Everything else is carried through untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeDocument(Value);

impl TreeDocument {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }

    /// Whether a JSON-LD payload can be kept as a tree document
    ///
    /// Only a single node object with a literal `@id` qualifies. Arrays,
    /// `@graph` containers and objects without an `@id` have to be read as
    /// statements instead.
    pub fn fits(value: &Value) -> bool {
        value.as_object().is_some_and(|object| {
            object.get(JSON_ID).is_some_and(Value::is_string) && !object.contains_key(JSON_GRAPH)
        })
    }

    /// Remote context documents referenced by URL from `@context`
    ///
    /// Inline context objects are skipped; a list keeps its order.
    pub fn context_references(&self) -> Vec<&str> {
        match self.0.get(JSON_CONTEXT) {
            Some(Value::String(url)) => vec![url.as_str()],
            Some(Value::Array(items)) => items.iter().filter_map(Value::as_str).collect(),
            _ => Vec::new(),
        }
    }

    /// Point context references at their replacements
    pub fn replace_context_references(&mut self, replacements: &IdentifierRewrites) -> usize {
        match self.0.get_mut(JSON_CONTEXT) {
            Some(Value::String(url)) => replace(url, replacements),
            Some(Value::Array(items)) => items
                .iter_mut()
                .map(|item| match item {
                    Value::String(url) => replace(url, replacements),
                    _ => 0,
                })
                .sum(),
            _ => 0,
        }
    }

    fn relation_targets(&self) -> Vec<&str> {
        let Some(object) = self.0.as_object() else {
            return Vec::new();
        };

        JSON_RELATION_KEYS
            .into_iter()
            .filter_map(|key| object.get(key))
            .flat_map(entries)
            .flat_map(|entry| {
                JSON_NODE_KEYS
                    .into_iter()
                    .filter_map(move |key| entry.get(key))
            })
            .filter_map(reference)
            .collect()
    }
}

impl FragmentShape for TreeDocument {
    fn primary_identifier(&self) -> Option<&str> {
        self.0.get(JSON_ID).and_then(Value::as_str)
    }

    fn linked_identifiers(&self) -> Vec<&str> {
        self.relation_targets()
    }

    fn rewrite_identifiers(&mut self, rewrites: &IdentifierRewrites) -> usize {
        let Some(object) = self.0.as_object_mut() else {
            return 0;
        };

        let mut replaced = 0;
        if let Some(Value::String(id)) = object.get_mut(JSON_ID) {
            replaced += replace(id, rewrites);
        }

        for key in JSON_RELATION_KEYS {
            let Some(relations) = object.get_mut(key) else {
                continue;
            };
            for entry in entries_mut(relations) {
                for node_key in JSON_NODE_KEYS {
                    if let Some(target) = entry.get_mut(node_key).and_then(reference_mut) {
                        replaced += replace(target, rewrites);
                    }
                }
            }
        }
        replaced
    }
}

/// Relation entries may be a list or a single object
fn entries(value: &Value) -> Vec<&Value> {
    match value {
        Value::Array(items) => items.iter().collect(),
        Value::Object(_) => vec![value],
        _ => Vec::new(),
    }
}

fn entries_mut(value: &mut Value) -> Vec<&mut Value> {
    if value.is_object() {
        return vec![value];
    }
    match value {
        Value::Array(items) => items.iter_mut().collect(),
        _ => Vec::new(),
    }
}

/// A node reference is either a plain string or `{"@id": "..."}`
fn reference(value: &Value) -> Option<&str> {
    match value {
        Value::String(id) => Some(id),
        Value::Object(object) => object.get(JSON_ID).and_then(Value::as_str),
        _ => None,
    }
}

fn reference_mut(value: &mut Value) -> Option<&mut String> {
    match value {
        Value::String(id) => Some(id),
        Value::Object(object) => match object.get_mut(JSON_ID) {
            Some(Value::String(id)) => Some(id),
            _ => None,
        },
        _ => None,
    }
}

fn replace(target: &mut String, rewrites: &IdentifierRewrites) -> usize {
    match rewrites.get(target.as_str()) {
        Some(rewritten) => {
            *target = rewritten.clone();
            1
        }
        None => 0,
    }
}
