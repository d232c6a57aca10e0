//! Dotted-path property resolution
//!
//! Paths such as `"scale.x"` address leaves inside a [`Value`] tree. Reads
//! never fail: anything that cannot be walked degrades to a caller-supplied
//! default.

use smallvec::SmallVec;
use std::fmt;

use crate::value::Value;

/// Separator used when splitting and joining paths
pub const DEFAULT_DELIMITER: char = '.';

/// Nesting depth below which `flatten_keys` treats values as opaque leaves
pub const DEFAULT_MAX_DEPTH: usize = 2;

/// A dotted property path, split once into segments
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PropertyPath {
    raw: String,
    segments: SmallVec<[String; 4]>,
}

impl PropertyPath {
    /// Split `path` on the delimiter; the empty string is the root path
    pub fn parse(path: &str) -> Self {
        let segments = if path.is_empty() {
            SmallVec::new()
        } else {
            path.split(DEFAULT_DELIMITER).map(str::to_owned).collect()
        };
        Self {
            raw: path.to_owned(),
            segments,
        }
    }

    /// The empty path, addressing the root value itself
    pub fn root() -> Self {
        Self::parse("")
    }

    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let segments: SmallVec<[String; 4]> = segments.into_iter().map(Into::into).collect();
        let mut raw = String::new();
        for (i, segment) in segments.iter().enumerate() {
            if i > 0 {
                raw.push(DEFAULT_DELIMITER);
            }
            raw.push_str(segment);
        }
        Self { raw, segments }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// The top-level key this path descends from
    pub fn first(&self) -> &str {
        self.segments.first().map(String::as_str).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }
}

impl fmt::Display for PropertyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl From<&str> for PropertyPath {
    fn from(path: &str) -> Self {
        Self::parse(path)
    }
}

impl From<String> for PropertyPath {
    fn from(path: String) -> Self {
        Self::parse(&path)
    }
}

/// Read the value at `path`, or `default` if any step cannot be walked
pub fn resolve<'a>(root: &'a Value, path: &str, default: &'a Value) -> &'a Value {
    root.get_path(&PropertyPath::parse(path)).unwrap_or(default)
}

/// Write `value` at `path` and return what was there before
///
/// The write only happens when the full path already resolves; otherwise the
/// tree is left untouched and `default` is returned.
pub fn resolve_set(root: &mut Value, path: &str, default: Value, value: Value) -> Value {
    root.set_path(&PropertyPath::parse(path), value)
        .unwrap_or(default)
}

/// Expand a tree into dotted leaf paths
///
/// Maps are descended by key and lists by index. Containers nested deeper than
/// `max_depth` levels are reported as leaves under their ancestor path.
pub fn flatten_keys(value: &Value, delimiter: char, max_depth: usize) -> Vec<String> {
    let delimiter = delimiter.to_string();
    let mut out = Vec::new();
    walk(
        value,
        &mut Vec::new(),
        0,
        max_depth,
        &mut |_: &[String], _: &Value| false,
        &mut |segments: &[String]| out.push(segments.join(delimiter.as_str())),
    );
    out
}

/// `flatten_keys` with the default delimiter and depth, as parsed paths
pub fn flatten_paths(value: &Value) -> Vec<PropertyPath> {
    flatten_paths_with(value, DEFAULT_MAX_DEPTH, |_, _| false)
}

/// Like [`flatten_paths`], but any container for which `is_leaf` returns true
/// is reported as a leaf instead of being descended
///
/// Tweens use this to keep a list as one keyframe target when the animated
/// object holds a number at that path.
pub fn flatten_paths_with<F>(value: &Value, max_depth: usize, mut is_leaf: F) -> Vec<PropertyPath>
where
    F: FnMut(&PropertyPath, &Value) -> bool,
{
    let mut out = Vec::new();
    walk(
        value,
        &mut Vec::new(),
        0,
        max_depth,
        &mut |segments: &[String], value: &Value| {
            is_leaf(&PropertyPath::from_segments(segments.iter().cloned()), value)
        },
        &mut |segments: &[String]| out.push(PropertyPath::from_segments(segments.iter().cloned())),
    );
    out
}

fn walk(
    value: &Value,
    path: &mut Vec<String>,
    level: usize,
    max_depth: usize,
    is_leaf: &mut dyn FnMut(&[String], &Value) -> bool,
    emit: &mut dyn FnMut(&[String]),
) {
    let descend = value.is_container() && level <= max_depth && !is_leaf(path, value);
    match value {
        Value::Map(entries) if descend => {
            for (key, child) in entries {
                path.push(key.clone());
                walk(child, path, level + 1, max_depth, is_leaf, emit);
                path.pop();
            }
        }
        Value::List(items) if descend => {
            for (index, child) in items.iter().enumerate() {
                path.push(index.to_string());
                walk(child, path, level + 1, max_depth, is_leaf, emit);
                path.pop();
            }
        }
        _ if path.is_empty() => {}
        _ => emit(path),
    }
}
