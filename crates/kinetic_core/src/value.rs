//! Dynamic property trees
//!
//! `Value` is the nested container that tweens read start values from and
//! write interpolated values back into when the animated object has no static
//! shape. Maps keep insertion order so flattened key lists are stable.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::path::PropertyPath;

/// A dynamically typed, possibly nested value
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
    List(Vec<Value>),
    Map(IndexMap<String, Value>),
}

impl Value {
    /// Create an empty map
    pub fn map() -> Self {
        Value::Map(IndexMap::new())
    }

    /// Builder: insert a key into a map value
    ///
    /// Non-map values are replaced by a new map holding only `key`.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        if !self.is_map() {
            self = Value::map();
        }
        if let Value::Map(entries) = &mut self {
            entries.insert(key.into(), value.into());
        }
        self
    }

    pub fn is_map(&self) -> bool {
        matches!(self, Value::Map(_))
    }

    /// Whether path segments can descend into this value
    pub fn is_container(&self) -> bool {
        matches!(self, Value::Map(_) | Value::List(_))
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&IndexMap<String, Value>> {
        match self {
            Value::Map(entries) => Some(entries),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// Look up one path segment
    ///
    /// Maps are indexed by key, lists by decimal index. Scalars have no children.
    pub fn child(&self, segment: &str) -> Option<&Value> {
        match self {
            Value::Map(entries) => entries.get(segment),
            Value::List(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => None,
        }
    }

    pub fn child_mut(&mut self, segment: &str) -> Option<&mut Value> {
        match self {
            Value::Map(entries) => entries.get_mut(segment),
            Value::List(items) => segment
                .parse::<usize>()
                .ok()
                .and_then(move |i| items.get_mut(i)),
            _ => None,
        }
    }

    /// Walk `path` from this value
    pub fn get_path(&self, path: &PropertyPath) -> Option<&Value> {
        path.segments()
            .iter()
            .try_fold(self, |current, segment| current.child(segment))
    }

    pub fn get_path_mut(&mut self, path: &PropertyPath) -> Option<&mut Value> {
        path.segments()
            .iter()
            .try_fold(self, |current, segment| current.child_mut(segment))
    }

    /// Replace the value at an existing path, returning the previous value
    ///
    /// Nothing is written when the path does not resolve.
    pub fn set_path(&mut self, path: &PropertyPath, value: Value) -> Option<Value> {
        self.get_path_mut(path)
            .map(|slot| std::mem::replace(slot, value))
    }

    /// Read the number at `path`
    pub fn number_at(&self, path: &PropertyPath) -> Option<f64> {
        self.get_path(path).and_then(Value::as_f64)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Number(value)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::Number(value as f64)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Number(value as f64)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Value {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Value::Map(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}
