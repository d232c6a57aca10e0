//! Multi-sample interpolation
//!
//! These functions map a sequence of uniformly spaced samples and a progress
//! fraction to an in-between value. Tweens use them for keyframe targets: the
//! phase's start value is prepended to the keyframes and the eased progress
//! selects a point along the resulting curve.

/// Interpolation function type
#[derive(Clone, Copy, Debug, Default)]
pub enum Interpolation {
    #[default]
    Linear,
    Bezier,
    CatmullRom,
    Custom(fn(&[f64], f64) -> f64),
}

impl Interpolation {
    /// Evaluate the curve through `values` at progress `k`
    pub fn apply(&self, values: &[f64], k: f64) -> f64 {
        match self {
            Interpolation::Linear => linear(values, k),
            Interpolation::Bezier => bezier(values, k),
            Interpolation::CatmullRom => catmull_rom(values, k),
            Interpolation::Custom(f) => f(values, k),
        }
    }
}

/// Piecewise-linear interpolation, extrapolating past either end
pub fn linear(v: &[f64], k: f64) -> f64 {
    match v.len() {
        0 => return 0.0,
        1 => return v[0],
        _ => {}
    }

    let m = v.len() - 1;
    let f = m as f64 * k;

    if k < 0.0 {
        return utils::lerp(v[0], v[1], f);
    }
    if k > 1.0 {
        return utils::lerp(v[m], v[m - 1], m as f64 - f);
    }

    let i = (f.floor() as usize).min(m);
    utils::lerp(v[i], v[(i + 1).min(m)], f - i as f64)
}

/// Full-degree Bernstein blend of every sample
pub fn bezier(v: &[f64], k: f64) -> f64 {
    if v.is_empty() {
        return 0.0;
    }

    let n = v.len() - 1;
    v.iter()
        .enumerate()
        .map(|(i, &p)| {
            (1.0 - k).powi((n - i) as i32) * k.powi(i as i32) * p * utils::bernstein(n, i)
        })
        .sum()
}

/// Catmull-Rom spline; a sequence whose first and last samples match is a closed loop
pub fn catmull_rom(v: &[f64], k: f64) -> f64 {
    match v.len() {
        0 => return 0.0,
        1 => return v[0],
        _ => {}
    }

    let m = v.len() - 1;
    let mf = m as f64;

    if v[0] == v[m] {
        let f = if k < 0.0 { mf * (1.0 + k) } else { mf * k };
        let i = f.floor() as i64;
        let at = |index: i64| v[index.rem_euclid(m as i64) as usize];
        return utils::catmull_rom(at(i - 1), at(i), at(i + 1), at(i + 2), f - i as f64);
    }

    let f = mf * k;
    if k < 0.0 {
        return v[0] - (utils::catmull_rom(v[0], v[0], v[1], v[1], -f) - v[0]);
    }
    if k > 1.0 {
        return v[m] - (utils::catmull_rom(v[m], v[m], v[m - 1], v[m - 1], f - mf) - v[m]);
    }

    let i = (f.floor() as usize).min(m);
    utils::catmull_rom(
        v[i.saturating_sub(1)],
        v[i],
        v[(i + 1).min(m)],
        v[(i + 2).min(m)],
        f - i as f64,
    )
}

pub mod utils {
    use std::sync::{Mutex, PoisonError};

    /// Memoized factorials, indexed by n; grows on demand and is never trimmed
    static FACTORIALS: Mutex<Vec<f64>> = Mutex::new(Vec::new());

    pub fn lerp(p0: f64, p1: f64, t: f64) -> f64 {
        (p1 - p0) * t + p0
    }

    /// Binomial coefficient n over i
    pub fn bernstein(n: usize, i: usize) -> f64 {
        factorial(n) / factorial(i) / factorial(n - i)
    }

    pub fn factorial(n: usize) -> f64 {
        let mut cache = FACTORIALS.lock().unwrap_or_else(PoisonError::into_inner);
        if cache.is_empty() {
            cache.push(1.0);
        }
        while cache.len() <= n {
            let next = cache.len() as f64 * cache[cache.len() - 1];
            cache.push(next);
        }
        cache[n]
    }

    /// Number of factorials currently memoized
    pub fn cached_factorials() -> usize {
        FACTORIALS
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Hermite segment between p1 and p2 with tangents taken from p0 and p3
    pub fn catmull_rom(p0: f64, p1: f64, p2: f64, p3: f64, t: f64) -> f64 {
        let v0 = (p2 - p0) * 0.5;
        let v1 = (p3 - p1) * 0.5;
        let t2 = t * t;
        let t3 = t * t2;
        (2.0 * p1 - 2.0 * p2 + v0 + v1) * t3 + (-3.0 * p1 + 3.0 * p2 - 2.0 * v0 - v1) * t2
            + v0 * t
            + p1
    }
}
