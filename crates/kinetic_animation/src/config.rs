//! Tween defaults

use crate::easing::Easing;
use crate::interpolation::Interpolation;

/// Settings applied to a tween when it is created
///
/// Everything here can still be changed afterwards through the tween's
/// builder methods.
#[derive(Clone, Copy, Debug)]
pub struct TweenConfig {
    pub easing: Easing,
    pub interpolation: Interpolation,
    /// Number of laps through the phase chain
    pub repeat: i32,
    /// Wait before the first phase, in milliseconds
    pub start_delay_ms: f64,
}

impl TweenConfig {
    pub fn new(easing: Easing, interpolation: Interpolation, repeat: i32, start_delay_ms: f64) -> Self {
        Self {
            easing,
            interpolation,
            repeat,
            start_delay_ms,
        }
    }

    /// Play the chain once with linear easing
    pub fn once() -> Self {
        Self {
            easing: Easing::Linear,
            interpolation: Interpolation::Linear,
            repeat: 1,
            start_delay_ms: 0.0,
        }
    }

    /// Play the chain `laps` times
    pub fn looping(laps: i32) -> Self {
        Self {
            repeat: laps,
            ..Self::once()
        }
    }

    /// Smooth in-out motion through keyframes
    pub fn smooth() -> Self {
        Self {
            easing: Easing::CubicInOut,
            interpolation: Interpolation::CatmullRom,
            ..Self::once()
        }
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn with_start_delay(mut self, ms: f64) -> Self {
        self.start_delay_ms = ms;
        self
    }
}

impl Default for TweenConfig {
    fn default() -> Self {
        Self::once()
    }
}
