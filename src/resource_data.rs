// Copyright (c) 2025 - Cowboy AI, Inc.
//! Read-only accessor over a resource's declared configuration
//!
//! The configuration tree is the JSON rendering of the cluster resource: nested
//! blocks are lists of objects, so a field is addressed by a dotted path with
//! list indices, e.g. `spec.0.cloud.0.openstack.0.username`.

use serde_json::Value;

/// Declared configuration of one cluster resource
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResourceData {
    root: Value,
}

impl ResourceData {
    pub fn new(root: Value) -> Self {
        Self { root }
    }

    /// Look up the raw value at a dotted path
    pub fn get(&self, path: &str) -> Option<&Value> {
        path.split('.')
            .filter(|segment| !segment.is_empty())
            .try_fold(&self.root, |current, segment| match current {
                Value::Object(map) => map.get(segment),
                Value::Array(items) => segment
                    .parse::<usize>()
                    .ok()
                    .and_then(|index| items.get(index)),
                _ => None,
            })
    }

    /// Look up a value that is present and not the zero value of its type
    pub fn get_ok(&self, path: &str) -> Option<&Value> {
        self.get(path).filter(|value| !is_zero_value(value))
    }

    /// Look up a non-empty string
    pub fn get_str(&self, path: &str) -> Option<&str> {
        self.get_ok(path).and_then(Value::as_str)
    }

    /// Whether a nested block is configured at all
    pub fn has_block(&self, path: &str) -> bool {
        matches!(self.get(path), Some(Value::Object(_)))
    }

    pub fn as_value(&self) -> &Value {
        &self.root
    }
}

impl From<Value> for ResourceData {
    fn from(root: Value) -> Self {
        Self::new(root)
    }
}

fn is_zero_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}
