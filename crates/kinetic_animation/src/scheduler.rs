//! Tween scheduler
//!
//! Owns every registered tween and advances them once per frame. Tweens are
//! registered implicitly when a [`Tween`](crate::tween::Tween) handle is
//! created. The scheduler never reads a clock; the only time source is the
//! `now` passed to [`TweenScheduler::update`].

use std::sync::{Arc, Mutex, OnceLock, Weak};

use slotmap::{new_key_type, SlotMap};

use crate::error::{Result, TweenError};
use crate::lock;
use crate::tween::{Step, TweenState};

new_key_type! {
    pub struct TweenId;
}

// ============================================================================
// Default Scheduler
// ============================================================================

/// Scheduler used by `Tween::with_default_scheduler`
static DEFAULT_SCHEDULER: OnceLock<SchedulerHandle> = OnceLock::new();

/// Install the process-wide default scheduler
///
/// Can only succeed once; later calls return
/// [`TweenError::DefaultSchedulerAlreadySet`]. Only a weak handle is kept, so
/// the caller must keep the scheduler alive. Once it is dropped,
/// `Tween::with_default_scheduler` fails with
/// [`TweenError::SchedulerUnavailable`] for the rest of the process and no
/// replacement can be installed.
pub fn set_default_scheduler(handle: SchedulerHandle) -> Result<()> {
    DEFAULT_SCHEDULER
        .set(handle)
        .map_err(|_| TweenError::DefaultSchedulerAlreadySet)?;
    tracing::debug!("TweenScheduler: default scheduler installed");
    Ok(())
}

/// Handle to the default scheduler, if one was installed
pub fn default_scheduler() -> Result<SchedulerHandle> {
    DEFAULT_SCHEDULER
        .get()
        .cloned()
        .ok_or(TweenError::NoDefaultScheduler)
}

pub fn has_default_scheduler() -> bool {
    DEFAULT_SCHEDULER.get().is_some()
}

// ============================================================================
// Scheduler
// ============================================================================

type SharedTween = Arc<Mutex<TweenState>>;

struct SchedulerInner {
    tweens: SlotMap<TweenId, SharedTween>,
    current_time: f64,
}

/// Registry of live tweens
///
/// Each tween sits behind its own lock so callbacks fired during `update` may
/// create, stop or remove tweens (including the one being updated) without
/// deadlocking.
pub struct TweenScheduler {
    inner: Arc<Mutex<SchedulerInner>>,
}

impl TweenScheduler {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(SchedulerInner {
                tweens: SlotMap::with_key(),
                current_time: 0.0,
            })),
        }
    }

    /// Weak handle for creating tweens
    pub fn handle(&self) -> SchedulerHandle {
        SchedulerHandle {
            inner: Arc::downgrade(&self.inner),
        }
    }

    /// Advance every registered tween to `now` (milliseconds)
    ///
    /// Tweens registered by callbacks during this call are first advanced on
    /// the next update; tweens removed during it are skipped. Returns whether
    /// any tweens remain registered.
    ///
    /// Reads start values and writes frames through each tween's target lock,
    /// so it must not be called while holding any of those locks.
    pub fn update(&self, now: f64) -> bool {
        let entries: Vec<(TweenId, SharedTween)> = {
            let mut inner = lock(&self.inner);
            inner.current_time = now;
            inner
                .tweens
                .iter()
                .map(|(id, tween)| (id, Arc::clone(tween)))
                .collect()
        };

        for (id, tween) in entries {
            if !lock(&self.inner).tweens.contains_key(id) {
                continue;
            }

            let step = lock(&tween).advance(now);
            match step {
                Step::Reap => self.reap(id, &tween),
                Step::Frame { index, eased } => Self::frame(&tween, index, eased),
                Step::Finished => tracing::debug!("TweenScheduler: {:?} finished its runs", id),
                Step::Advanced { settle } => {
                    if let Some(index) = settle {
                        lock(&tween).apply(index, 1.0);
                    }
                    tracing::trace!("TweenScheduler: {:?} moved to next phase", id);
                }
                Step::Idle | Step::Waiting | Step::Delaying => {}
            }
        }

        !lock(&self.inner).tweens.is_empty()
    }

    fn reap(&self, id: TweenId, tween: &SharedTween) {
        lock(&self.inner).tweens.remove(id);
        let callback = lock(tween).on_complete.take();
        tracing::debug!("TweenScheduler: {:?} complete", id);

        if let Some(mut callback) = callback {
            callback();
        }
    }

    fn frame(tween: &SharedTween, index: usize, eased: f64) {
        let (callback, phase) = {
            let mut state = lock(tween);
            let callback = state.on_update.take();
            let phase = match callback {
                Some(_) => state.phase(index).cloned(),
                None => None,
            };
            (callback, phase)
        };

        if let Some(mut callback) = callback {
            if let Some(phase) = &phase {
                callback(phase);
            }
            lock(tween).on_update.get_or_insert(callback);
        }

        lock(tween).apply(index, eased);
    }

    /// Mark every tween complete
    ///
    /// The next `update` removes them all and fires each complete callback once.
    pub fn clear(&self) {
        let tweens = self.snapshot();
        tracing::debug!("TweenScheduler: clearing {} tweens", tweens.len());
        for tween in tweens {
            lock(&tween).mark_complete();
        }
    }

    /// Drop a tween immediately without firing its complete callback
    pub fn remove(&self, id: TweenId) -> bool {
        lock(&self.inner).tweens.remove(id).is_some()
    }

    pub fn contains(&self, id: TweenId) -> bool {
        lock(&self.inner).tweens.contains_key(id)
    }

    pub fn tween_count(&self) -> usize {
        lock(&self.inner).tweens.len()
    }

    /// Whether any tween is started and not yet complete
    pub fn has_active_tweens(&self) -> bool {
        self.snapshot().iter().any(|tween| {
            let state = lock(tween);
            state.is_started() && !state.is_complete()
        })
    }

    /// The `now` of the most recent update
    pub fn current_time(&self) -> f64 {
        lock(&self.inner).current_time
    }

    fn snapshot(&self) -> Vec<SharedTween> {
        lock(&self.inner).tweens.values().cloned().collect()
    }
}

impl Default for TweenScheduler {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Handle
// ============================================================================

/// A weak handle to a tween scheduler
///
/// Tweens hold one of these. It won't prevent the scheduler from being dropped.
#[derive(Clone)]
pub struct SchedulerHandle {
    inner: Weak<Mutex<SchedulerInner>>,
}

impl SchedulerHandle {
    pub(crate) fn register(&self, state: TweenState) -> Option<TweenId> {
        self.inner.upgrade().map(|inner| {
            let id = lock(&inner).tweens.insert(Arc::new(Mutex::new(state)));
            tracing::trace!("TweenScheduler: registered {:?}", id);
            id
        })
    }

    /// Run `f` on a tween's state without holding the registry lock
    pub(crate) fn with_tween<R>(&self, id: TweenId, f: impl FnOnce(&mut TweenState) -> R) -> Option<R> {
        let inner = self.inner.upgrade()?;
        let tween = lock(&inner).tweens.get(id).cloned()?;
        let mut state = lock(&tween);
        Some(f(&mut state))
    }

    pub fn remove(&self, id: TweenId) -> bool {
        self.inner
            .upgrade()
            .is_some_and(|inner| lock(&inner).tweens.remove(id).is_some())
    }

    /// Mark every tween on the scheduler complete
    pub fn clear(&self) {
        if let Some(inner) = self.inner.upgrade() {
            TweenScheduler { inner }.clear();
        }
    }

    /// Whether the scheduler is still alive
    pub fn is_alive(&self) -> bool {
        self.inner.strong_count() > 0
    }

    pub fn tween_count(&self) -> usize {
        self.inner
            .upgrade()
            .map(|inner| lock(&inner).tweens.len())
            .unwrap_or(0)
    }

    pub fn current_time(&self) -> Option<f64> {
        self.inner.upgrade().map(|inner| lock(&inner).current_time)
    }
}
