//! Integration tests for tweens driven through the scheduler
//!
//! These tests verify that:
//! - Translate phases land exactly on their targets and complete once
//! - Chains with delays repeat per lap and fire start callbacks once
//! - Pausing keeps the played fraction of the active phase
//! - Clearing the scheduler reaps every tween on the next update
//! - Callbacks can register new tweens while the scheduler is updating
//! - List properties animate element-wise; list targets on numbers are keyframes

use kinetic_animation::{Easing, Interpolation, Tween, TweenError, TweenScheduler};
use kinetic_core::{Animatable, PropertyPath, Value};
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

const EPS: f64 = 1e-9;

fn shared(value: serde_json::Value) -> Arc<Mutex<Value>> {
    Arc::new(Mutex::new(props(value)))
}

fn props(value: serde_json::Value) -> Value {
    serde_json::from_value(value).unwrap()
}

fn number(target: &Arc<Mutex<Value>>, path: &str) -> f64 {
    target
        .lock()
        .unwrap()
        .number_at(&PropertyPath::parse(path))
        .unwrap()
}

fn counter() -> (Arc<AtomicUsize>, Arc<AtomicUsize>) {
    let count = Arc::new(AtomicUsize::new(0));
    (Arc::clone(&count), count)
}

/// Drive the scheduler from `from` to `to` inclusive in fixed steps
fn run(scheduler: &TweenScheduler, from: f64, to: f64, step: f64) {
    let mut now = from;
    while now <= to {
        scheduler.update(now);
        now += step;
    }
}

#[test]
fn test_single_translate_reaches_target() {
    let scheduler = TweenScheduler::new();
    let target = shared(json!({"x": 0, "y": 10}));
    let (completions, seen) = counter();

    let tween = Tween::new(&scheduler.handle(), Arc::clone(&target))
        .unwrap()
        .to(props(json!({"x": 100, "y": -10})), 1000.0)
        .unwrap()
        .on_complete(move |_| {
            completions.fetch_add(1, Ordering::SeqCst);
        });
    tween.start();

    // 16ms frames never land on the phase end
    run(&scheduler, 0.0, 1200.0, 16.0);

    assert!((number(&target, "x") - 100.0).abs() < EPS);
    assert!((number(&target, "y") + 10.0).abs() < EPS);
    assert_eq!(seen.load(Ordering::SeqCst), 1);
    assert_eq!(scheduler.tween_count(), 0);
    assert!(tween.is_complete());

    // nothing fires twice
    run(&scheduler, 1216.0, 1300.0, 16.0);
    assert_eq!(seen.load(Ordering::SeqCst), 1);
}

#[test]
fn test_translate_interpolates_linearly() {
    let scheduler = TweenScheduler::new();
    let target = shared(json!({"x": 0}));

    let tween = Tween::new(&scheduler.handle(), Arc::clone(&target))
        .unwrap()
        .to(props(json!({"x": 100})), 1000.0)
        .unwrap();
    tween.start();

    scheduler.update(0.0);
    assert_eq!(number(&target, "x"), 0.0);
    scheduler.update(250.0);
    assert!((number(&target, "x") - 25.0).abs() < EPS);
    scheduler.update(750.0);
    assert!((number(&target, "x") - 75.0).abs() < EPS);
}

#[test]
fn test_easing_shapes_progress() {
    let scheduler = TweenScheduler::new();
    let target = shared(json!({"x": 0}));

    let tween = Tween::new(&scheduler.handle(), Arc::clone(&target))
        .unwrap()
        .to(props(json!({"x": 100})), 1000.0)
        .unwrap()
        .easing(Easing::QuadraticIn);
    tween.start();

    scheduler.update(0.0);
    scheduler.update(500.0);
    assert!((number(&target, "x") - 25.0).abs() < EPS);
}

#[test]
fn test_two_laps_with_delay() {
    let scheduler = TweenScheduler::new();
    let target = shared(json!({"x": 0}));
    let (starts, started) = counter();
    let (completions, completed) = counter();

    let tween = Tween::new(&scheduler.handle(), Arc::clone(&target))
        .unwrap()
        .to(props(json!({"x": 100})), 100.0)
        .unwrap()
        .delay(50.0)
        .unwrap()
        .to(props(json!({"x": 0})), 100.0)
        .unwrap()
        .repeat(2)
        .on_start(move |_| {
            starts.fetch_add(1, Ordering::SeqCst);
        })
        .on_complete(move |_| {
            completions.fetch_add(1, Ordering::SeqCst);
        });
    tween.start();

    let mut done_at = None;
    let mut now = 0.0;
    while now <= 1000.0 {
        scheduler.update(now);
        if now == 150.0 {
            // inside the delay, A has settled
            assert_eq!(number(&target, "x"), 100.0);
        }
        if now == 300.0 {
            assert!(!tween.is_complete());
            assert_eq!(tween.remaining_runs(), 1);
            assert_eq!(number(&target, "x"), 0.0);
        }
        if now == 360.0 {
            // second lap replays A from the settled start
            assert!((number(&target, "x") - 50.0).abs() < EPS);
        }
        if done_at.is_none() && completed.load(Ordering::SeqCst) == 1 {
            done_at = Some(now);
        }
        now += 10.0;
    }

    // 250ms per lap, plus one frame per phase transition
    let done_at = done_at.unwrap();
    assert!(done_at >= 500.0, "completed early at {done_at}");
    assert!(done_at <= 640.0, "completed late at {done_at}");
    assert_eq!(started.load(Ordering::SeqCst), 1);
    assert_eq!(completed.load(Ordering::SeqCst), 1);
    assert_eq!(number(&target, "x"), 0.0);
}

#[test]
fn test_pause_resumes_at_same_fraction() {
    let scheduler = TweenScheduler::new();
    let target = shared(json!({"x": 0}));
    let last_elapsed = Arc::new(Mutex::new(0.0));
    let observed = Arc::clone(&last_elapsed);

    let tween = Tween::new(&scheduler.handle(), Arc::clone(&target))
        .unwrap()
        .to(props(json!({"x": 100})), 1000.0)
        .unwrap()
        .on_update(move |phase| *observed.lock().unwrap() = phase.elapsed());
    tween.start();

    scheduler.update(0.0);
    scheduler.update(400.0);
    assert!((*last_elapsed.lock().unwrap() - 0.4).abs() < EPS);

    tween.pause();
    run(&scheduler, 500.0, 4900.0, 100.0);
    assert!((number(&target, "x") - 40.0).abs() < EPS);
    assert!(!tween.is_playing());

    tween.unpause();
    scheduler.update(5000.0);
    assert!((*last_elapsed.lock().unwrap() - 0.4).abs() < EPS);
    assert!((number(&target, "x") - 40.0).abs() < EPS);

    scheduler.update(5600.0);
    assert!((*last_elapsed.lock().unwrap() - 1.0).abs() < EPS);
    assert!((number(&target, "x") - 100.0).abs() < EPS);
}

#[test]
fn test_pause_during_delay_phase() {
    let scheduler = TweenScheduler::new();
    let target = shared(json!({"x": 0}));

    let tween = Tween::new(&scheduler.handle(), Arc::clone(&target))
        .unwrap()
        .delay(1000.0)
        .unwrap()
        .to(props(json!({"x": 10})), 100.0)
        .unwrap();
    tween.start();

    scheduler.update(0.0);
    scheduler.update(500.0);
    tween.pause();
    scheduler.update(10_000.0);
    tween.unpause();
    scheduler.update(20_000.0);

    // 500ms of the delay remain
    scheduler.update(20_400.0);
    assert_eq!(tween.run_count(), 0);
    scheduler.update(20_600.0);
    assert_eq!(tween.run_count(), 1);
}

#[test]
fn test_clear_reaps_everything_once() {
    let scheduler = TweenScheduler::new();
    let handle = scheduler.handle();
    let (completions, completed) = counter();

    let build = |start_delay: f64| {
        let completions = Arc::clone(&completions);
        Tween::new(&handle, shared(json!({"x": 0})))
            .unwrap()
            .to(props(json!({"x": 1})), 1000.0)
            .unwrap()
            .start_delay(start_delay)
            .on_complete(move |_| {
                completions.fetch_add(1, Ordering::SeqCst);
            })
    };

    let running = build(0.0);
    let _idle = build(0.0);
    let waiting = build(5000.0);
    running.start();
    waiting.start();

    scheduler.update(0.0);
    scheduler.update(100.0);
    assert_eq!(scheduler.tween_count(), 3);
    assert!(scheduler.has_active_tweens());

    scheduler.clear();
    assert!(!scheduler.update(116.0));
    assert_eq!(completed.load(Ordering::SeqCst), 3);
    assert_eq!(scheduler.tween_count(), 0);

    scheduler.update(132.0);
    assert_eq!(completed.load(Ordering::SeqCst), 3);
}

#[test]
fn test_start_delay_postpones_first_phase() {
    let scheduler = TweenScheduler::new();
    let target = shared(json!({"x": 0}));

    let tween = Tween::new(&scheduler.handle(), Arc::clone(&target))
        .unwrap()
        .to(props(json!({"x": 100})), 1000.0)
        .unwrap()
        .start_delay(100.0);
    tween.start();

    scheduler.update(0.0);
    scheduler.update(50.0);
    assert_eq!(number(&target, "x"), 0.0);
    assert!(tween.phases()[0].start_time().is_none());

    scheduler.update(100.0);
    assert_eq!(tween.phases()[0].start_time(), Some(100.0));
    scheduler.update(600.0);
    assert!((number(&target, "x") - 50.0).abs() < EPS);
}

#[test]
fn test_keyframes_pass_through_samples() {
    let scheduler = TweenScheduler::new();
    let target = shared(json!({"x": 0}));

    let tween = Tween::new(&scheduler.handle(), Arc::clone(&target))
        .unwrap()
        .to(props(json!({"x": [100, 0]})), 1000.0)
        .unwrap()
        .interpolation(Interpolation::Linear);
    tween.start();

    scheduler.update(0.0);
    scheduler.update(250.0);
    assert!((number(&target, "x") - 50.0).abs() < EPS);
    scheduler.update(500.0);
    assert!((number(&target, "x") - 100.0).abs() < EPS);
    scheduler.update(1001.0);
    assert!(number(&target, "x").abs() < EPS);
}

#[test]
fn test_nested_paths_animate() {
    let scheduler = TweenScheduler::new();
    let target = shared(json!({"scale": {"x": 1, "y": 1}, "name": "card"}));

    let tween = Tween::new(&scheduler.handle(), Arc::clone(&target))
        .unwrap()
        .to(props(json!({"scale": {"x": 3}})), 100.0)
        .unwrap();
    assert_eq!(tween.tracked_paths(), vec!["scale.x"]);
    tween.start();

    scheduler.update(0.0);
    scheduler.update(50.0);
    assert!((number(&target, "scale.x") - 2.0).abs() < EPS);
    assert_eq!(number(&target, "scale.y"), 1.0);
}

#[test]
fn test_property_missing_from_later_phase_is_left_alone() {
    let scheduler = TweenScheduler::new();
    let target = shared(json!({"x": 0, "y": 0}));

    let tween = Tween::new(&scheduler.handle(), Arc::clone(&target))
        .unwrap()
        .to(props(json!({"x": 10, "y": 10})), 100.0)
        .unwrap()
        .to(props(json!({"x": 20})), 100.0)
        .unwrap();
    tween.start();

    run(&scheduler, 0.0, 110.0, 10.0);
    assert_eq!(number(&target, "y"), 10.0);

    target
        .lock()
        .unwrap()
        .set_path(&PropertyPath::parse("y"), Value::from(-1.0));
    run(&scheduler, 120.0, 170.0, 10.0);
    assert_eq!(number(&target, "y"), -1.0);
    assert!((number(&target, "x") - 15.0).abs() < EPS);
}

#[test]
fn test_callbacks_may_register_tweens() {
    let scheduler = TweenScheduler::new();
    let handle = scheduler.handle();
    let follow_up = shared(json!({"x": 0}));
    let spawned: Arc<Mutex<Option<Tween<Value>>>> = Arc::new(Mutex::new(None));

    let spawn_handle = handle.clone();
    let spawn_target = Arc::clone(&follow_up);
    let spawn_slot = Arc::clone(&spawned);
    let first = Tween::new(&handle, shared(json!({"x": 0})))
        .unwrap()
        .to(props(json!({"x": 1})), 10.0)
        .unwrap()
        .on_complete(move |_| {
            let next = Tween::new(&spawn_handle, Arc::clone(&spawn_target))
                .and_then(|t| t.to(props(json!({"x": 10})), 100.0))
                .unwrap();
            next.start();
            *spawn_slot.lock().unwrap() = Some(next);
        });
    first.start();

    run(&scheduler, 0.0, 40.0, 10.0);
    assert!(!first.is_registered());
    assert_eq!(scheduler.tween_count(), 1);

    scheduler.update(50.0);
    scheduler.update(100.0);
    assert!((number(&follow_up, "x") - 5.0).abs() < EPS);
    assert!(spawned.lock().unwrap().as_ref().is_some_and(Tween::is_playing));
}

#[test]
fn test_empty_chain_completes_immediately() {
    let scheduler = TweenScheduler::new();
    let (completions, completed) = counter();

    let tween = Tween::new(&scheduler.handle(), shared(json!({"x": 0})))
        .unwrap()
        .on_complete(move |_| {
            completions.fetch_add(1, Ordering::SeqCst);
        });
    tween.start();

    scheduler.update(0.0);
    assert!(tween.is_complete());
    scheduler.update(1.0);
    assert_eq!(completed.load(Ordering::SeqCst), 1);
}

#[test]
fn test_zero_repeat_is_terminal() {
    let scheduler = TweenScheduler::new();
    let target = shared(json!({"x": 0}));

    let tween = Tween::new(&scheduler.handle(), Arc::clone(&target))
        .unwrap()
        .to(props(json!({"x": 100})), 100.0)
        .unwrap()
        .repeat(0);
    tween.start();

    scheduler.update(0.0);
    scheduler.update(50.0);
    assert_eq!(number(&target, "x"), 0.0);
    assert!(tween.is_complete());
}

#[test]
fn test_stop_completes_on_next_update() {
    let scheduler = TweenScheduler::new();
    let target = shared(json!({"x": 0}));
    let (completions, completed) = counter();

    let tween = Tween::new(&scheduler.handle(), Arc::clone(&target))
        .unwrap()
        .to(props(json!({"x": 100})), 1000.0)
        .unwrap()
        .on_complete(move |target| {
            // complete callbacks see the target as it was left
            assert!(target.as_map().is_some());
            completions.fetch_add(1, Ordering::SeqCst);
        });
    tween.start();

    scheduler.update(0.0);
    scheduler.update(300.0);
    tween.stop();
    scheduler.update(400.0);

    assert_eq!(completed.load(Ordering::SeqCst), 1);
    assert!((number(&target, "x") - 30.0).abs() < EPS);
}

/// A statically shaped target
#[derive(Debug, Default)]
struct Sprite {
    x: f64,
    opacity: f64,
}

impl Animatable for Sprite {
    fn read(&self, path: &PropertyPath) -> Option<f64> {
        match path.as_str() {
            "x" => Some(self.x),
            "opacity" => Some(self.opacity),
            _ => None,
        }
    }

    fn write(&mut self, path: &PropertyPath, value: f64) -> bool {
        match path.as_str() {
            "x" => self.x = value,
            "opacity" => self.opacity = value,
            _ => return false,
        }
        true
    }
}

#[test]
fn test_struct_targets() {
    let scheduler = TweenScheduler::new();
    let sprite = Arc::new(Mutex::new(Sprite::default()));

    let tween = Tween::new(&scheduler.handle(), Arc::clone(&sprite))
        .unwrap()
        .to(props(json!({"x": 40, "opacity": 1})), 200.0)
        .unwrap()
        .on_start(|sprite: &mut Sprite| sprite.opacity = 0.5);
    tween.start();
    assert_eq!(sprite.lock().unwrap().opacity, 0.5);

    scheduler.update(0.0);
    scheduler.update(100.0);
    {
        let sprite = sprite.lock().unwrap();
        assert!((sprite.x - 20.0).abs() < EPS);
        assert!((sprite.opacity - 0.75).abs() < EPS);
    }

    let err = Tween::new(&scheduler.handle(), Arc::clone(&sprite))
        .unwrap()
        .to(props(json!({"rotation": 90})), 200.0)
        .err();
    assert_eq!(err, Some(TweenError::UnresolvedPath("rotation".into())));
}

#[test]
fn test_list_properties_animate_element_wise() {
    let scheduler = TweenScheduler::new();
    let target = shared(json!({"pos": [0, 0]}));

    let tween = Tween::new(&scheduler.handle(), Arc::clone(&target))
        .unwrap()
        .to(props(json!({"pos": [10, 20]})), 100.0)
        .unwrap();
    assert_eq!(tween.tracked_paths(), vec!["pos.0", "pos.1"]);
    tween.start();

    scheduler.update(0.0);
    scheduler.update(50.0);
    assert!((number(&target, "pos.0") - 5.0).abs() < EPS);
    assert!((number(&target, "pos.1") - 10.0).abs() < EPS);

    scheduler.update(101.0);
    assert_eq!(number(&target, "pos.0"), 10.0);
    assert_eq!(number(&target, "pos.1"), 20.0);
}

#[test]
fn test_bezier_keyframes() {
    let scheduler = TweenScheduler::new();
    let target = shared(json!({"x": 0}));

    let tween = Tween::new(&scheduler.handle(), Arc::clone(&target))
        .unwrap()
        .to(props(json!({"x": [100, 0]})), 1000.0)
        .unwrap()
        .interpolation(Interpolation::Bezier);
    tween.start();

    scheduler.update(0.0);
    // quadratic Bernstein blend of 0, 100, 0
    scheduler.update(250.0);
    assert!((number(&target, "x") - 37.5).abs() < EPS);
    scheduler.update(500.0);
    assert!((number(&target, "x") - 50.0).abs() < EPS);
    scheduler.update(1001.0);
    assert!(number(&target, "x").abs() < EPS);
}

#[test]
fn test_catmull_rom_keyframes() {
    let scheduler = TweenScheduler::new();
    let target = shared(json!({"x": 0}));

    let tween = Tween::new(&scheduler.handle(), Arc::clone(&target))
        .unwrap()
        .to(props(json!({"x": [10, 5, 20]})), 300.0)
        .unwrap()
        .interpolation(Interpolation::CatmullRom);
    tween.start();

    scheduler.update(0.0);
    scheduler.update(100.0);
    assert!((number(&target, "x") - 10.0).abs() < EPS);
    scheduler.update(200.0);
    assert!((number(&target, "x") - 5.0).abs() < EPS);
    scheduler.update(301.0);
    assert!((number(&target, "x") - 20.0).abs() < EPS);
}

#[test]
fn test_catmull_rom_closed_loop_keyframes() {
    let scheduler = TweenScheduler::new();
    let target = shared(json!({"x": 0}));

    // start value 0 equals the last keyframe, so the curve wraps
    let tween = Tween::new(&scheduler.handle(), Arc::clone(&target))
        .unwrap()
        .to(props(json!({"x": [10, 20, 0]})), 300.0)
        .unwrap()
        .interpolation(Interpolation::CatmullRom);
    tween.start();

    scheduler.update(0.0);
    scheduler.update(100.0);
    assert!((number(&target, "x") - 10.0).abs() < EPS);
    // tangents at 10 and 20 come from the wrapped neighbours 0 and 0
    scheduler.update(150.0);
    assert!((number(&target, "x") - 16.875).abs() < EPS);
    scheduler.update(200.0);
    assert!((number(&target, "x") - 20.0).abs() < EPS);
    scheduler.update(301.0);
    assert!(number(&target, "x").abs() < EPS);
}
