//! Numeric property access by path
//!
//! Tweens never touch their target directly; they go through this trait so a
//! target can be a dynamic [`Value`] tree or a plain struct exposing a few
//! fields by name.

use crate::path::PropertyPath;
use crate::value::Value;

/// An object whose numeric properties can be read and written by path
pub trait Animatable {
    /// Current value of the property, or `None` if the path does not address a number
    fn read(&self, path: &PropertyPath) -> Option<f64>;

    /// Store a new value; returns `false` if the path could not be written
    fn write(&mut self, path: &PropertyPath, value: f64) -> bool;
}

impl Animatable for Value {
    fn read(&self, path: &PropertyPath) -> Option<f64> {
        self.number_at(path)
    }

    fn write(&mut self, path: &PropertyPath, value: f64) -> bool {
        match self.get_path_mut(path) {
            Some(Value::Number(slot)) => {
                *slot = value;
                true
            }
            Some(other) => {
                tracing::trace!("refusing to overwrite non-numeric {:?} at {}", other, path);
                false
            }
            None => false,
        }
    }
}

impl Animatable for f64 {
    /// A bare number is addressed by the root path
    fn read(&self, path: &PropertyPath) -> Option<f64> {
        path.is_empty().then_some(*self)
    }

    fn write(&mut self, path: &PropertyPath, value: f64) -> bool {
        if path.is_empty() {
            *self = value;
        }
        path.is_empty()
    }
}
