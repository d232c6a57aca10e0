//! Kinetic Core
//!
//! Property trees and dotted-path access shared by the Kinetic animation engine:
//!
//! - **Value**: a dynamic, nested container (maps, lists, numbers)
//! - **Paths**: `"scale.x"`-style addressing with silent-default reads
//! - **Animatable**: the numeric read/write seam tweens animate through
//!
//! # Example
//!
//! ```rust
//! use kinetic_core::{flatten_keys, resolve, Value};
//!
//! let target = Value::map().with("scale", Value::map().with("x", 1.0).with("y", 1.0));
//!
//! assert_eq!(flatten_keys(&target, '.', 2), vec!["scale.x", "scale.y"]);
//! assert_eq!(resolve(&target, "scale.x", &Value::Null), &Value::Number(1.0));
//! assert_eq!(resolve(&target, "scale.x.w", &Value::Null), &Value::Null);
//! ```

pub mod animatable;
pub mod path;
pub mod value;

pub use animatable::Animatable;
pub use path::{
    flatten_keys, flatten_paths, flatten_paths_with, resolve, resolve_set, PropertyPath,
    DEFAULT_DELIMITER, DEFAULT_MAX_DEPTH,
};
pub use value::Value;
