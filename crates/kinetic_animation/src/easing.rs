//! Easing functions for tweens
//!
//! Each curve family lives in its own module with `ease_in`, `ease_out` and
//! `ease_in_out` so the raw functions can be used without a tween. Inputs are
//! not clamped; Back and Elastic overshoot between the endpoints.

/// Easing function type
#[derive(Clone, Copy, Debug, Default)]
pub enum Easing {
    #[default]
    Linear,
    QuadraticIn,
    QuadraticOut,
    QuadraticInOut,
    CubicIn,
    CubicOut,
    CubicInOut,
    QuarticIn,
    QuarticOut,
    QuarticInOut,
    QuinticIn,
    QuinticOut,
    QuinticInOut,
    SinusoidalIn,
    SinusoidalOut,
    SinusoidalInOut,
    ExponentialIn,
    ExponentialOut,
    ExponentialInOut,
    CircularIn,
    CircularOut,
    CircularInOut,
    ElasticIn,
    ElasticOut,
    ElasticInOut,
    BackIn,
    BackOut,
    BackInOut,
    BounceIn,
    BounceOut,
    BounceInOut,
    CubicBezier(f64, f64, f64, f64),
    Custom(fn(f64) -> f64),
}

impl Easing {
    /// Every named curve, in family order
    pub const ALL: [Easing; 31] = [
        Easing::Linear,
        Easing::QuadraticIn,
        Easing::QuadraticOut,
        Easing::QuadraticInOut,
        Easing::CubicIn,
        Easing::CubicOut,
        Easing::CubicInOut,
        Easing::QuarticIn,
        Easing::QuarticOut,
        Easing::QuarticInOut,
        Easing::QuinticIn,
        Easing::QuinticOut,
        Easing::QuinticInOut,
        Easing::SinusoidalIn,
        Easing::SinusoidalOut,
        Easing::SinusoidalInOut,
        Easing::ExponentialIn,
        Easing::ExponentialOut,
        Easing::ExponentialInOut,
        Easing::CircularIn,
        Easing::CircularOut,
        Easing::CircularInOut,
        Easing::ElasticIn,
        Easing::ElasticOut,
        Easing::ElasticInOut,
        Easing::BackIn,
        Easing::BackOut,
        Easing::BackInOut,
        Easing::BounceIn,
        Easing::BounceOut,
        Easing::BounceInOut,
    ];

    /// Apply the easing function to a progress value (0.0 to 1.0)
    pub fn apply(&self, k: f64) -> f64 {
        match self {
            Easing::Linear => linear::none(k),
            Easing::QuadraticIn => quadratic::ease_in(k),
            Easing::QuadraticOut => quadratic::ease_out(k),
            Easing::QuadraticInOut => quadratic::ease_in_out(k),
            Easing::CubicIn => cubic::ease_in(k),
            Easing::CubicOut => cubic::ease_out(k),
            Easing::CubicInOut => cubic::ease_in_out(k),
            Easing::QuarticIn => quartic::ease_in(k),
            Easing::QuarticOut => quartic::ease_out(k),
            Easing::QuarticInOut => quartic::ease_in_out(k),
            Easing::QuinticIn => quintic::ease_in(k),
            Easing::QuinticOut => quintic::ease_out(k),
            Easing::QuinticInOut => quintic::ease_in_out(k),
            Easing::SinusoidalIn => sinusoidal::ease_in(k),
            Easing::SinusoidalOut => sinusoidal::ease_out(k),
            Easing::SinusoidalInOut => sinusoidal::ease_in_out(k),
            Easing::ExponentialIn => exponential::ease_in(k),
            Easing::ExponentialOut => exponential::ease_out(k),
            Easing::ExponentialInOut => exponential::ease_in_out(k),
            Easing::CircularIn => circular::ease_in(k),
            Easing::CircularOut => circular::ease_out(k),
            Easing::CircularInOut => circular::ease_in_out(k),
            Easing::ElasticIn => elastic::ease_in(k),
            Easing::ElasticOut => elastic::ease_out(k),
            Easing::ElasticInOut => elastic::ease_in_out(k),
            Easing::BackIn => back::ease_in(k),
            Easing::BackOut => back::ease_out(k),
            Easing::BackInOut => back::ease_in_out(k),
            Easing::BounceIn => bounce::ease_in(k),
            Easing::BounceOut => bounce::ease_out(k),
            Easing::BounceInOut => bounce::ease_in_out(k),
            Easing::CubicBezier(x1, y1, x2, y2) => cubic_bezier_ease(k, *x1, *y1, *x2, *y2),
            Easing::Custom(f) => f(k),
        }
    }
}

pub mod linear {
    pub fn none(k: f64) -> f64 {
        k
    }
}

pub mod quadratic {
    pub fn ease_in(k: f64) -> f64 {
        k * k
    }

    pub fn ease_out(k: f64) -> f64 {
        k * (2.0 - k)
    }

    pub fn ease_in_out(k: f64) -> f64 {
        let k = k * 2.0;
        if k < 1.0 {
            return 0.5 * k * k;
        }
        let k = k - 1.0;
        -0.5 * (k * (k - 2.0) - 1.0)
    }
}

pub mod cubic {
    pub fn ease_in(k: f64) -> f64 {
        k * k * k
    }

    pub fn ease_out(k: f64) -> f64 {
        let k = k - 1.0;
        k * k * k + 1.0
    }

    pub fn ease_in_out(k: f64) -> f64 {
        let k = k * 2.0;
        if k < 1.0 {
            return 0.5 * k * k * k;
        }
        let k = k - 2.0;
        0.5 * (k * k * k + 2.0)
    }
}

pub mod quartic {
    pub fn ease_in(k: f64) -> f64 {
        k * k * k * k
    }

    pub fn ease_out(k: f64) -> f64 {
        let k = k - 1.0;
        1.0 - k * k * k * k
    }

    pub fn ease_in_out(k: f64) -> f64 {
        let k = k * 2.0;
        if k < 1.0 {
            return 0.5 * k * k * k * k;
        }
        let k = k - 2.0;
        -0.5 * (k * k * k * k - 2.0)
    }
}

pub mod quintic {
    pub fn ease_in(k: f64) -> f64 {
        k * k * k * k * k
    }

    pub fn ease_out(k: f64) -> f64 {
        let k = k - 1.0;
        k * k * k * k * k + 1.0
    }

    pub fn ease_in_out(k: f64) -> f64 {
        let k = k * 2.0;
        if k < 1.0 {
            return 0.5 * k * k * k * k * k;
        }
        let k = k - 2.0;
        0.5 * (k * k * k * k * k + 2.0)
    }
}

pub mod sinusoidal {
    use std::f64::consts::PI;

    pub fn ease_in(k: f64) -> f64 {
        1.0 - (k * PI / 2.0).cos()
    }

    pub fn ease_out(k: f64) -> f64 {
        (k * PI / 2.0).sin()
    }

    pub fn ease_in_out(k: f64) -> f64 {
        0.5 * (1.0 - (PI * k).cos())
    }
}

pub mod exponential {
    pub fn ease_in(k: f64) -> f64 {
        if k == 0.0 {
            0.0
        } else {
            1024f64.powf(k - 1.0)
        }
    }

    pub fn ease_out(k: f64) -> f64 {
        if k == 1.0 {
            1.0
        } else {
            1.0 - 2f64.powf(-10.0 * k)
        }
    }

    pub fn ease_in_out(k: f64) -> f64 {
        if k == 0.0 {
            return 0.0;
        }
        if k == 1.0 {
            return 1.0;
        }
        let k = k * 2.0;
        if k < 1.0 {
            return 0.5 * 1024f64.powf(k - 1.0);
        }
        0.5 * (2.0 - 2f64.powf(-10.0 * (k - 1.0)))
    }
}

pub mod circular {
    pub fn ease_in(k: f64) -> f64 {
        1.0 - (1.0 - k * k).sqrt()
    }

    pub fn ease_out(k: f64) -> f64 {
        let k = k - 1.0;
        (1.0 - k * k).sqrt()
    }

    pub fn ease_in_out(k: f64) -> f64 {
        let k = k * 2.0;
        if k < 1.0 {
            return -0.5 * ((1.0 - k * k).sqrt() - 1.0);
        }
        let k = k - 2.0;
        0.5 * ((1.0 - k * k).sqrt() + 1.0)
    }
}

pub mod elastic {
    use std::f64::consts::PI;

    pub const AMPLITUDE: f64 = 0.1;
    pub const PERIOD: f64 = 0.4;

    /// Effective amplitude and phase shift; amplitudes below 1 are raised to 1
    fn shape() -> (f64, f64) {
        if AMPLITUDE < 1.0 {
            (1.0, PERIOD / 4.0)
        } else {
            (AMPLITUDE, PERIOD / (2.0 * PI) * (1.0 / AMPLITUDE).asin())
        }
    }

    pub fn ease_in(k: f64) -> f64 {
        if k == 0.0 {
            return 0.0;
        }
        if k == 1.0 {
            return 1.0;
        }
        let (a, s) = shape();
        let k = k - 1.0;
        -(a * 2f64.powf(10.0 * k) * ((k - s) * 2.0 * PI / PERIOD).sin())
    }

    pub fn ease_out(k: f64) -> f64 {
        if k == 0.0 {
            return 0.0;
        }
        if k == 1.0 {
            return 1.0;
        }
        let (a, s) = shape();
        a * 2f64.powf(-10.0 * k) * ((k - s) * 2.0 * PI / PERIOD).sin() + 1.0
    }

    pub fn ease_in_out(k: f64) -> f64 {
        if k == 0.0 {
            return 0.0;
        }
        if k == 1.0 {
            return 1.0;
        }
        let (a, s) = shape();
        let k = k * 2.0;
        if k < 1.0 {
            let k = k - 1.0;
            return -0.5 * a * 2f64.powf(10.0 * k) * ((k - s) * 2.0 * PI / PERIOD).sin();
        }
        let k = k - 1.0;
        a * 2f64.powf(-10.0 * k) * ((k - s) * 2.0 * PI / PERIOD).sin() * 0.5 + 1.0
    }
}

pub mod back {
    const OVERSHOOT: f64 = 1.70158;

    pub fn ease_in(k: f64) -> f64 {
        let s = OVERSHOOT;
        k * k * ((s + 1.0) * k - s)
    }

    pub fn ease_out(k: f64) -> f64 {
        let s = OVERSHOOT;
        let k = k - 1.0;
        k * k * ((s + 1.0) * k + s) + 1.0
    }

    pub fn ease_in_out(k: f64) -> f64 {
        let s = OVERSHOOT * 1.525;
        let k = k * 2.0;
        if k < 1.0 {
            return 0.5 * (k * k * ((s + 1.0) * k - s));
        }
        let k = k - 2.0;
        0.5 * (k * k * ((s + 1.0) * k + s) + 2.0)
    }
}

pub mod bounce {
    pub fn ease_in(k: f64) -> f64 {
        1.0 - ease_out(1.0 - k)
    }

    pub fn ease_out(k: f64) -> f64 {
        if k < 1.0 / 2.75 {
            7.5625 * k * k
        } else if k < 2.0 / 2.75 {
            let k = k - 1.5 / 2.75;
            7.5625 * k * k + 0.75
        } else if k < 2.5 / 2.75 {
            let k = k - 2.25 / 2.75;
            7.5625 * k * k + 0.9375
        } else {
            let k = k - 2.625 / 2.75;
            7.5625 * k * k + 0.984375
        }
    }

    pub fn ease_in_out(k: f64) -> f64 {
        if k < 0.5 {
            return ease_in(k * 2.0) * 0.5;
        }
        ease_out(k * 2.0 - 1.0) * 0.5 + 0.5
    }
}

/// Cubic bezier easing calculation (matches CSS spec / browser implementations).
///
/// Uses Newton-Raphson with binary-search fallback for robustness.
fn cubic_bezier_ease(t: f64, x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
    if t <= 0.0 {
        return 0.0;
    }
    if t >= 1.0 {
        return 1.0;
    }

    // Solve for the curve parameter whose x equals t
    let mut p = t;
    for _ in 0..8 {
        let err = bezier_sample(p, x1, x2) - t;
        if err.abs() < 1e-7 {
            return bezier_sample(p, y1, y2);
        }
        let slope = bezier_slope(p, x1, x2);
        if slope.abs() < 1e-7 {
            break;
        }
        p -= err / slope;
    }

    let mut lo = 0.0;
    let mut hi = 1.0;
    p = t;
    for _ in 0..20 {
        let x = bezier_sample(p, x1, x2);
        if (x - t).abs() < 1e-7 {
            break;
        }
        if x < t {
            lo = p;
        } else {
            hi = p;
        }
        p = (lo + hi) * 0.5;
    }

    bezier_sample(p, y1, y2)
}

/// B(t) = 3(1-t)²t·p1 + 3(1-t)t²·p2 + t³ in Horner form
#[inline]
fn bezier_sample(t: f64, p1: f64, p2: f64) -> f64 {
    let a = 1.0 - 3.0 * p2 + 3.0 * p1;
    let b = 3.0 * p2 - 6.0 * p1;
    let c = 3.0 * p1;
    ((a * t + b) * t + c) * t
}

#[inline]
fn bezier_slope(t: f64, p1: f64, p2: f64) -> f64 {
    let a = 1.0 - 3.0 * p2 + 3.0 * p1;
    let b = 3.0 * p2 - 6.0 * p1;
    let c = 3.0 * p1;
    (3.0 * a * t + 2.0 * b) * t + c
}
