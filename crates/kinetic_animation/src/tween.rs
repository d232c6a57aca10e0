//! Tweens
//!
//! A [`Tween`] is a handle to animation state owned by a [`TweenScheduler`].
//! Builder methods append phases and configure playback; lifecycle methods
//! (`start`, `stop`, `pause`, `unpause`) flip flags that the scheduler acts on
//! during its next `update`.
//!
//! ```ignore
//! let scheduler = TweenScheduler::new();
//! let sprite = Arc::new(Mutex::new(Value::map().with("x", 0.0)));
//!
//! let tween = Tween::new(&scheduler.handle(), sprite.clone())?
//!     .to(Value::map().with("x", 100.0), 1000.0)?
//!     .delay(250.0)?
//!     .to(Value::map().with("x", 0.0), 1000.0)?
//!     .repeat(2)
//!     .easing(Easing::QuadraticInOut);
//! tween.start();
//!
//! // once per frame
//! scheduler.update(now_ms);
//! ```
//!
//! [`TweenScheduler`]: crate::scheduler::TweenScheduler

use std::sync::{Arc, Mutex};

use indexmap::IndexMap;
use kinetic_core::{flatten_paths_with, Animatable, PropertyPath, Value, DEFAULT_MAX_DEPTH};

use crate::chain::{Phase, PhaseChain, TargetValue};
use crate::config::TweenConfig;
use crate::easing::Easing;
use crate::error::{Result, TweenError};
use crate::interpolation::Interpolation;
use crate::lock;
use crate::scheduler::{default_scheduler, SchedulerHandle, TweenId};

/// Type-erased start/complete callback, bound to the tween's target
pub type TargetCallback = Box<dyn FnMut() + Send>;

/// Callback receiving the active phase every animated frame
pub type UpdateCallback = Box<dyn FnMut(&Phase) + Send>;

/// Getter/setter pair for one tracked property, resolved once at `to()` time
pub(crate) struct PropertyAccessor {
    path: PropertyPath,
    get: Box<dyn Fn() -> Option<f64> + Send>,
    set: Box<dyn Fn(f64) -> bool + Send>,
}

impl PropertyAccessor {
    fn bind<T>(target: &Arc<Mutex<T>>, path: PropertyPath) -> Self
    where
        T: Animatable + Send + 'static,
    {
        let reader = Arc::clone(target);
        let read_path = path.clone();
        let writer = Arc::clone(target);
        let write_path = path.clone();
        Self {
            path,
            get: Box::new(move || lock(&reader).read(&read_path)),
            set: Box::new(move |value| lock(&writer).write(&write_path, value)),
        }
    }
}

/// What a single `update` did to one tween
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum Step {
    /// Already complete; remove it and fire the complete callback
    Reap,
    /// Not started or paused
    Idle,
    /// Inside the start delay
    Waiting,
    /// Ran out of phases or laps; reaped on the next update
    Finished,
    /// The active phase ended and the run counter moved on; a finished
    /// translate phase is settled onto its end values
    Advanced { settle: Option<usize> },
    /// Inside a delay phase
    Delaying,
    /// A translate phase produced a new eased progress
    Frame { index: usize, eased: f64 },
}

/// Scheduler-owned state behind a [`Tween`] handle
pub(crate) struct TweenState {
    chain: PhaseChain,
    properties: Vec<PropertyAccessor>,
    easing: Easing,
    interpolation: Interpolation,
    pub(crate) on_start: Option<TargetCallback>,
    pub(crate) on_update: Option<UpdateCallback>,
    pub(crate) on_complete: Option<TargetCallback>,
    started: bool,
    complete: bool,
    start_delay: f64,
    start_time: Option<f64>,
    run_counter: u64,
    remaining_runs: i32,
    resume_pending: bool,
}

impl TweenState {
    pub(crate) fn new(config: &TweenConfig) -> Self {
        Self {
            chain: PhaseChain::new(),
            properties: Vec::new(),
            easing: config.easing,
            interpolation: config.interpolation,
            on_start: None,
            on_update: None,
            on_complete: None,
            started: false,
            complete: false,
            start_delay: config.start_delay_ms,
            start_time: None,
            run_counter: 0,
            remaining_runs: config.repeat,
            resume_pending: false,
        }
    }

    pub(crate) fn is_started(&self) -> bool {
        self.started
    }

    pub(crate) fn is_complete(&self) -> bool {
        self.complete
    }

    pub(crate) fn mark_complete(&mut self) {
        self.complete = true;
    }

    pub(crate) fn phase(&self, index: usize) -> Option<&Phase> {
        self.chain.get(index)
    }

    /// Run one frame of the state machine
    ///
    /// Property writes for translate frames happen separately in [`apply`] so
    /// the update callback can run first without holding this state's lock.
    ///
    /// [`apply`]: TweenState::apply
    pub(crate) fn advance(&mut self, now: f64) -> Step {
        if self.complete {
            return Step::Reap;
        }
        if !self.started {
            return Step::Idle;
        }

        let start_time = *self.start_time.get_or_insert(now);
        if now < start_time + self.start_delay {
            return Step::Waiting;
        }

        let active = self
            .chain
            .active_index(self.run_counter)
            .filter(|_| self.remaining_runs > 0);
        let Some(index) = active else {
            self.complete = true;
            return Step::Finished;
        };

        let properties = &self.properties;
        let Some(phase) = self.chain.get_mut(index) else {
            return Step::Idle;
        };

        if std::mem::take(&mut self.resume_pending) {
            phase.rebase(now);
        }

        if !phase.is_inited() {
            phase.enter(now, || properties.iter().map(|p| (p.get)()).collect());
        }

        if phase.has_ended(now) {
            let settle = (!phase.is_delay()).then_some(index);
            phase.reset();
            self.run_counter += 1;
            if self.chain.active_index(self.run_counter) == Some(0) {
                self.remaining_runs -= 1;
            }
            return Step::Advanced { settle };
        }

        let elapsed = phase.latch(now);
        if phase.is_delay() {
            return Step::Delaying;
        }

        Step::Frame {
            index,
            eased: self.easing.apply(elapsed.min(1.0)),
        }
    }

    /// Write every tracked property the phase at `index` targets
    pub(crate) fn apply(&self, index: usize, eased: f64) {
        let Some(phase) = self.chain.get(index) else {
            return;
        };

        for (slot, property) in self.properties.iter().enumerate() {
            let (Some(target), Some(start)) =
                (phase.target(property.path.as_str()), phase.start_value(slot))
            else {
                continue;
            };

            let value = target.sample(start, eased, self.interpolation);
            if !(property.set)(value) {
                tracing::warn!("Tween: could not write {} = {}", property.path, value);
            }
        }
    }
}

fn validate_duration(duration_ms: f64) -> Result<()> {
    if duration_ms.is_finite() && duration_ms >= 0.0 {
        Ok(())
    } else {
        Err(TweenError::InvalidDuration(duration_ms))
    }
}

/// Handle to a tween registered with a scheduler
///
/// The tween keeps running after the handle is dropped; it is removed from
/// its scheduler only once it completes.
pub struct Tween<T> {
    handle: SchedulerHandle,
    id: TweenId,
    target: Arc<Mutex<T>>,
}

impl<T> Tween<T>
where
    T: Animatable + Send + 'static,
{
    /// Create a tween over `target` and register it with the scheduler
    pub fn new(handle: &SchedulerHandle, target: Arc<Mutex<T>>) -> Result<Self> {
        Self::with_config(handle, target, TweenConfig::default())
    }

    pub fn with_config(
        handle: &SchedulerHandle,
        target: Arc<Mutex<T>>,
        config: TweenConfig,
    ) -> Result<Self> {
        let id = handle
            .register(TweenState::new(&config))
            .ok_or(TweenError::SchedulerUnavailable)?;
        Ok(Self {
            handle: handle.clone(),
            id,
            target,
        })
    }

    /// Create a tween on the scheduler installed with `set_default_scheduler`
    pub fn with_default_scheduler(target: Arc<Mutex<T>>) -> Result<Self> {
        let handle = default_scheduler()?;
        Self::new(&handle, target)
    }

    fn with_state<R>(&self, f: impl FnOnce(&mut TweenState) -> R) -> Option<R> {
        self.handle.with_tween(self.id, f)
    }

    fn configure(self, f: impl FnOnce(&mut TweenState)) -> Self {
        self.with_state(f);
        self
    }

    // =========================================================================
    // Chain building
    // =========================================================================

    /// Append a translate phase moving every leaf of `properties` to its value
    ///
    /// Nested maps and lists are flattened into dotted paths (`{scale: {x: 2}}`
    /// animates `scale.x`, `{pos: [10, 20]}` against a `pos` list animates
    /// `pos.0` and `pos.1`). A list aimed at a path that holds a number is
    /// instead a keyframe target passed through in order. A bare number
    /// animates the target itself through the root path. Every path must
    /// already hold a number on the target.
    ///
    /// On error the tween is unregistered, since the consumed handle was its
    /// only owner. Must not be called while holding the target's lock.
    pub fn to(self, properties: Value, duration_ms: f64) -> Result<Self> {
        match self.push_translate(properties, duration_ms) {
            Ok(()) => Ok(self),
            Err(err) => Err(self.discard(err)),
        }
    }

    /// Append a phase that waits without changing anything
    pub fn delay(self, duration_ms: f64) -> Result<Self> {
        let pushed = validate_duration(duration_ms).and_then(|()| {
            self.with_state(|state| {
                state.chain.push(Phase::delay(duration_ms));
            })
            .ok_or(TweenError::SchedulerUnavailable)
        });
        match pushed {
            Ok(()) => Ok(self),
            Err(err) => Err(self.discard(err)),
        }
    }

    fn discard(self, err: TweenError) -> TweenError {
        tracing::debug!("Tween {:?}: discarded after error: {}", self.id, err);
        self.handle.remove(self.id);
        err
    }

    fn push_translate(&self, properties: Value, duration_ms: f64) -> Result<()> {
        validate_duration(duration_ms)?;

        let mut targets = IndexMap::new();
        let mut accessors = Vec::new();
        {
            let target = lock(&self.target);
            // a list aimed at a number is a keyframe target, otherwise it is
            // expanded element-wise like a map
            let keyframes = |path: &PropertyPath, value: &Value| {
                matches!(value, Value::List(_)) && target.read(path).is_some()
            };
            let paths = match &properties {
                Value::Map(_) | Value::List(_) if !keyframes(&PropertyPath::root(), &properties) => {
                    flatten_paths_with(&properties, DEFAULT_MAX_DEPTH, keyframes)
                }
                _ => vec![PropertyPath::root()],
            };

            for path in paths {
                let end = properties
                    .get_path(&path)
                    .and_then(TargetValue::from_value)
                    .ok_or_else(|| TweenError::NonNumericTarget(path.to_string()))?;
                if target.read(&path).is_none() {
                    return Err(TweenError::UnresolvedPath(path.to_string()));
                }
                targets.insert(path.to_string(), end);
                accessors.push(PropertyAccessor::bind(&self.target, path));
            }
        }

        self.with_state(|state| {
            state.properties.extend(accessors);
            state
                .chain
                .push(Phase::translate(properties, targets, duration_ms));
        })
        .ok_or(TweenError::SchedulerUnavailable)
    }

    /// Play the whole chain `laps` times; zero or less finishes immediately
    pub fn repeat(self, laps: i32) -> Self {
        self.configure(|state| state.remaining_runs = laps)
    }

    /// Wait `ms` after the first update that sees the tween started
    pub fn start_delay(self, ms: f64) -> Self {
        self.configure(|state| state.start_delay = ms)
    }

    pub fn easing(self, easing: Easing) -> Self {
        self.configure(|state| state.easing = easing)
    }

    /// Curve used for keyframe targets
    pub fn interpolation(self, interpolation: Interpolation) -> Self {
        self.configure(|state| state.interpolation = interpolation)
    }

    // =========================================================================
    // Callbacks
    // =========================================================================

    /// Called with the target when `start()` is invoked
    pub fn on_start<F>(self, mut callback: F) -> Self
    where
        F: FnMut(&mut T) + Send + 'static,
    {
        let target = Arc::clone(&self.target);
        self.configure(move |state| {
            state.on_start = Some(Box::new(move || callback(&mut lock(&target))));
        })
    }

    /// Called with the active phase on every frame that moves properties
    pub fn on_update<F>(self, callback: F) -> Self
    where
        F: FnMut(&Phase) + Send + 'static,
    {
        self.configure(move |state| state.on_update = Some(Box::new(callback)))
    }

    /// Called with the target once, when the scheduler removes the tween
    pub fn on_complete<F>(self, mut callback: F) -> Self
    where
        F: FnMut(&mut T) + Send + 'static,
    {
        let target = Arc::clone(&self.target);
        self.configure(move |state| {
            state.on_complete = Some(Box::new(move || callback(&mut lock(&target))));
        })
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Begin playing and fire the start callback
    ///
    /// Must not be called while holding the target's lock.
    pub fn start(&self) {
        let callback = self
            .with_state(|state| {
                state.started = true;
                state.on_start.take()
            })
            .flatten();
        tracing::debug!("Tween {:?}: start", self.id);

        if let Some(mut callback) = callback {
            callback();
            self.with_state(move |state| {
                state.on_start.get_or_insert(callback);
            });
        }
    }

    /// Stop for good; the scheduler removes the tween on its next update
    pub fn stop(&self) {
        self.with_state(|state| {
            state.started = false;
            state.complete = true;
        });
    }

    /// Stop advancing without completing
    pub fn pause(&self) {
        self.with_state(|state| state.started = false);
    }

    /// Resume after `pause`, keeping the fraction of the active phase already played
    ///
    /// The phase is re-based onto the time of the next scheduler update.
    pub fn unpause(&self) {
        self.with_state(|state| {
            state.started = true;
            state.resume_pending = true;
        });
    }

    // =========================================================================
    // Inspection
    // =========================================================================

    pub fn id(&self) -> TweenId {
        self.id
    }

    pub fn target(&self) -> &Arc<Mutex<T>> {
        &self.target
    }

    /// Snapshot of the phase chain
    pub fn phases(&self) -> Vec<Phase> {
        self.with_state(|state| state.chain.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Dotted paths animated by this tween, in registration order
    pub fn tracked_paths(&self) -> Vec<String> {
        self.with_state(|state| {
            state
                .properties
                .iter()
                .map(|p| p.path.to_string())
                .collect()
        })
        .unwrap_or_default()
    }

    /// Whether the scheduler still holds this tween
    pub fn is_registered(&self) -> bool {
        self.with_state(|_| ()).is_some()
    }

    pub fn is_playing(&self) -> bool {
        self.with_state(|state| state.started && !state.complete)
            .unwrap_or(false)
    }

    /// Complete, or already removed from the scheduler
    pub fn is_complete(&self) -> bool {
        self.with_state(|state| state.complete).unwrap_or(true)
    }

    /// Number of phases played so far
    pub fn run_count(&self) -> u64 {
        self.with_state(|state| state.run_counter).unwrap_or_default()
    }

    pub fn remaining_runs(&self) -> i32 {
        self.with_state(|state| state.remaining_runs)
            .unwrap_or_default()
    }
}
