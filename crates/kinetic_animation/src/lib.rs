//! Kinetic Animation
//!
//! Time-driven property tweening for dynamic objects.
//!
//! # Features
//!
//! - **Phase chains**: translate and delay phases played in order, looped per lap
//! - **Easing**: the classic Penner families plus cubic-bezier and custom curves
//! - **Keyframes**: list targets interpolated linearly, as Bezier or Catmull-Rom
//! - **Pause/resume**: resuming keeps the fraction of the phase already played
//! - **Explicit time**: the scheduler is advanced with caller-supplied timestamps
//!
//! # Example
//!
//! ```rust
//! use std::sync::{Arc, Mutex};
//! use kinetic_animation::{Easing, Tween, TweenScheduler};
//! use kinetic_core::{PropertyPath, Value};
//!
//! let scheduler = TweenScheduler::new();
//! let sprite = Arc::new(Mutex::new(Value::map().with("x", 0.0)));
//!
//! let tween = Tween::new(&scheduler.handle(), Arc::clone(&sprite))?
//!     .to(Value::map().with("x", 100.0), 1000.0)?
//!     .easing(Easing::Linear);
//! tween.start();
//!
//! scheduler.update(0.0);
//! scheduler.update(250.0);
//! let x = sprite.lock().unwrap().number_at(&PropertyPath::parse("x"));
//! assert_eq!(x, Some(25.0));
//! # Ok::<(), kinetic_animation::TweenError>(())
//! ```

use std::sync::{Mutex, MutexGuard, PoisonError};

pub mod chain;
pub mod config;
pub mod easing;
pub mod error;
pub mod interpolation;
pub mod scheduler;
pub mod tween;

pub use chain::{Phase, PhaseChain, PhaseKind, TargetValue};
pub use config::TweenConfig;
pub use easing::Easing;
pub use error::{Result, TweenError};
pub use interpolation::Interpolation;
pub use scheduler::{
    default_scheduler, has_default_scheduler, set_default_scheduler, SchedulerHandle, TweenId,
    TweenScheduler,
};
pub use tween::Tween;

/// Lock a mutex, recovering the data if a callback panicked while holding it
pub(crate) fn lock<T: ?Sized>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
