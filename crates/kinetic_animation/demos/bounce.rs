//! Bounce a value back and forth and print each frame
//!
//! Run with `RUST_LOG=kinetic_animation=trace` to see scheduler events.

use std::sync::{Arc, Mutex};

use kinetic_animation::{Easing, Tween, TweenScheduler};
use kinetic_core::{PropertyPath, Value};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let scheduler = TweenScheduler::new();
    let ball = Arc::new(Mutex::new(Value::map().with("y", 0.0)));

    let tween = Tween::new(&scheduler.handle(), Arc::clone(&ball))?
        .to(Value::map().with("y", 100.0), 600.0)?
        .easing(Easing::BounceOut)
        .delay(200.0)?
        .to(Value::map().with("y", 0.0), 400.0)?
        .repeat(2)
        .on_complete(|ball| println!("landed: {ball:?}"));
    tween.start();

    let y = PropertyPath::parse("y");
    let mut now = 0.0;
    while scheduler.update(now) {
        if let Some(value) = ball.lock().map_err(|e| e.to_string())?.number_at(&y) {
            println!("{now:>6.0}ms  y = {value:>7.2}");
        }
        now += 50.0;
    }

    Ok(())
}
