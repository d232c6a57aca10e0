//! Phase chains
//!
//! A tween plays its phases in order and wraps back to the first one after the
//! last, so the chain is a ring. It is stored as a plain vector; the active
//! phase is always `run_counter mod len` and neighbours are found the same way.

use indexmap::IndexMap;
use kinetic_core::Value;
use smallvec::SmallVec;

use crate::interpolation::Interpolation;

/// Euclidean modulo: the result always has the sign of `b`
pub fn modulo(a: i64, b: i64) -> i64 {
    ((a % b) + b) % b
}

/// End value for one animated property within a translate phase
#[derive(Clone, Debug, PartialEq)]
pub enum TargetValue {
    /// Blend linearly from the start value to this number
    Scalar(f64),
    /// Interpolate through these samples after the start value
    Keyframes(SmallVec<[f64; 4]>),
}

impl TargetValue {
    /// Numbers become scalars, non-empty lists of numbers become keyframes
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => Some(TargetValue::Scalar(*n)),
            Value::List(items) if !items.is_empty() => items
                .iter()
                .map(Value::as_f64)
                .collect::<Option<SmallVec<[f64; 4]>>>()
                .map(TargetValue::Keyframes),
            _ => None,
        }
    }

    /// The value reached when the phase completes
    pub fn end(&self) -> f64 {
        match self {
            TargetValue::Scalar(end) => *end,
            TargetValue::Keyframes(points) => points.last().copied().unwrap_or_default(),
        }
    }

    /// Value at eased progress `t`, starting from `start`
    pub fn sample(&self, start: f64, t: f64, interpolation: Interpolation) -> f64 {
        match self {
            TargetValue::Scalar(end) => start + (end - start) * t,
            TargetValue::Keyframes(points) => {
                let mut samples: SmallVec<[f64; 8]> = SmallVec::with_capacity(points.len() + 1);
                samples.push(start);
                samples.extend_from_slice(points);
                interpolation.apply(&samples, t)
            }
        }
    }
}

/// What a phase does while it is active
#[derive(Clone, Debug)]
pub enum PhaseKind {
    /// Move tracked properties towards new values
    Translate {
        /// The tree passed to `to()`, kept for inspection
        properties: Value,
        /// Flattened target per dotted path
        targets: IndexMap<String, TargetValue>,
        /// Tracked property values captured on phase entry, by tracked slot
        start_values: Vec<Option<f64>>,
    },
    /// Wait without touching the target
    Delay,
}

/// One segment of a tween's chain
#[derive(Clone, Debug)]
pub struct Phase {
    kind: PhaseKind,
    duration: f64,
    start_time: f64,
    end_time: f64,
    inited: bool,
    elapsed: f64,
}

impl Phase {
    pub fn translate(properties: Value, targets: IndexMap<String, TargetValue>, duration: f64) -> Self {
        Self::new(
            PhaseKind::Translate {
                properties,
                targets,
                start_values: Vec::new(),
            },
            duration,
        )
    }

    pub fn delay(duration: f64) -> Self {
        Self::new(PhaseKind::Delay, duration)
    }

    fn new(kind: PhaseKind, duration: f64) -> Self {
        Self {
            kind,
            duration,
            start_time: 0.0,
            end_time: 0.0,
            inited: false,
            elapsed: 0.0,
        }
    }

    pub fn kind(&self) -> &PhaseKind {
        &self.kind
    }

    pub fn is_delay(&self) -> bool {
        matches!(self.kind, PhaseKind::Delay)
    }

    /// Duration in milliseconds
    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Time the phase was entered, if it is currently running
    pub fn start_time(&self) -> Option<f64> {
        self.inited.then_some(self.start_time)
    }

    pub fn end_time(&self) -> Option<f64> {
        self.inited.then_some(self.end_time)
    }

    pub fn is_inited(&self) -> bool {
        self.inited
    }

    /// Fraction of the duration seen on the last frame, not clamped
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// The raw property tree of a translate phase
    pub fn properties(&self) -> Option<&Value> {
        match &self.kind {
            PhaseKind::Translate { properties, .. } => Some(properties),
            PhaseKind::Delay => None,
        }
    }

    pub fn target(&self, path: &str) -> Option<&TargetValue> {
        match &self.kind {
            PhaseKind::Translate { targets, .. } => targets.get(path),
            PhaseKind::Delay => None,
        }
    }

    /// Start value captured for the tracked property in `slot`
    pub fn start_value(&self, slot: usize) -> Option<f64> {
        match &self.kind {
            PhaseKind::Translate { start_values, .. } => start_values.get(slot).copied().flatten(),
            PhaseKind::Delay => None,
        }
    }

    /// Stamp the time window and, for translate phases, record start values
    pub(crate) fn enter<F>(&mut self, now: f64, snapshot: F)
    where
        F: FnOnce() -> Vec<Option<f64>>,
    {
        self.start_time = now;
        self.end_time = now + self.duration;
        self.inited = true;
        if let PhaseKind::Translate { start_values, .. } = &mut self.kind {
            *start_values = snapshot();
        }
    }

    pub(crate) fn has_ended(&self, now: f64) -> bool {
        now > self.end_time
    }

    /// Forget the time window so the next visit re-enters the phase
    pub(crate) fn reset(&mut self) {
        self.start_time = 0.0;
        self.end_time = 0.0;
        self.inited = false;
    }

    /// Record and return the elapsed fraction at `now`
    pub(crate) fn latch(&mut self, now: f64) -> f64 {
        self.elapsed = if self.duration > 0.0 {
            (now - self.start_time) / self.duration
        } else {
            1.0
        };
        self.elapsed
    }

    /// Shift the time window to end `remaining` after `now`, keeping the elapsed fraction
    pub(crate) fn rebase(&mut self, now: f64) {
        if !self.inited {
            return;
        }
        let elapsed_time = (self.end_time - self.start_time) * self.elapsed;
        let time_left = self.duration - elapsed_time;
        self.end_time = now + time_left;
        self.start_time = self.end_time - self.duration;
    }
}

/// The ordered ring of phases belonging to one tween
#[derive(Clone, Debug, Default)]
pub struct PhaseChain {
    phases: Vec<Phase>,
}

impl PhaseChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a phase; the new tail links back to the head
    pub fn push(&mut self, phase: Phase) -> usize {
        self.phases.push(phase);
        self.phases.len() - 1
    }

    pub fn len(&self) -> usize {
        self.phases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phases.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Phase> {
        self.phases.get(index)
    }

    pub(crate) fn get_mut(&mut self, index: usize) -> Option<&mut Phase> {
        self.phases.get_mut(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Phase> {
        self.phases.iter()
    }

    /// Index of the phase that plays after `run_counter` completed phases
    pub fn active_index(&self, run_counter: u64) -> Option<usize> {
        self.wrap(run_counter as i64)
    }

    pub fn next_index(&self, index: usize) -> Option<usize> {
        self.wrap(index as i64 + 1)
    }

    pub fn previous_index(&self, index: usize) -> Option<usize> {
        self.wrap(index as i64 - 1)
    }

    fn wrap(&self, index: i64) -> Option<usize> {
        if self.phases.is_empty() {
            return None;
        }
        Some(modulo(index, self.phases.len() as i64) as usize)
    }
}
