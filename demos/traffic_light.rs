//! Traffic Light
//!
//! Runs a red/green light on a background thread and waits for green a few
//! times from the main thread, like a car queued at an intersection.
//!
//! Key concepts:
//! - The light flips every 4 to 6 seconds on its own worker thread
//! - Every flip is handed over through a blocking queue
//! - The main thread blocks without polling until the light turns green
//! - `stop()` joins the worker before exit
//!
//! Run with: cargo run --example traffic_light
//! Debug logs: TRAFFIC_LIGHT_DEBUG=1 cargo run --example traffic_light

use light_cycle::{LightPhase, TrafficLight};
use std::time::Instant;
use tracing::Level;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let level = if std::env::var_os("TRAFFIC_LIGHT_DEBUG").is_some() {
        Level::DEBUG
    } else {
        Level::INFO
    };
    tracing_subscriber::fmt().with_max_level(level).init();

    println!("=== Traffic Light ===\n");

    let light = TrafficLight::standard();
    println!("Initial phase: {}", light.current_state());
    light.start()?;

    let started = Instant::now();
    for car in 1..=3 {
        println!("Car {car} waiting at the intersection...");
        light.wait_for_green()?;
        println!(
            "Car {car} crosses after {:.1}s (light is {})",
            started.elapsed().as_secs_f64(),
            LightPhase::Green
        );
    }

    light.stop()?;

    let history = light.history();
    let tick = light.config().tick();
    println!("\nPhases observed:");
    for flip in history.transitions() {
        let lasted = tick.saturating_mul(u32::try_from(flip.ticks).unwrap_or(u32::MAX));
        println!(
            "  {} -> {} after {} ticks ({:.3}s)",
            flip.from,
            flip.to,
            flip.ticks,
            lasted.as_secs_f64()
        );
    }

    println!("\n=== Example Complete ===");
    Ok(())
}
