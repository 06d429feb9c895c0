use glam::Vec2;
use std::{env, time::Duration};

// Runtime constants for the headless runner (not gameplay tuning).

pub fn tick_interval() -> Duration {
    let millis = env::var("TANK_SIM_TICK_MS")
        .ok()
        .and_then(|value| value.parse::<u64>().ok())
        .filter(|value| *value > 0)
        .unwrap_or(16);
    Duration::from_millis(millis)
}

// Zero runs until Ctrl-C.
pub fn sim_duration() -> Duration {
    let millis = env::var("TANK_SIM_DURATION_MS")
        .ok()
        .and_then(|value| value.parse::<u64>().ok())
        .unwrap_or(10_000);
    Duration::from_millis(millis)
}

pub fn snapshot_every() -> u64 {
    env::var("TANK_SIM_SNAPSHOT_EVERY")
        .ok()
        .and_then(|v| v.parse().ok())
        .filter(|v| *v > 0)
        .unwrap_or(30)
}

pub fn shooter_count() -> usize {
    env::var("TANK_SIM_SHOOTERS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(2)
}

pub fn arena_size() -> Vec2 {
    let width = env::var("TANK_SIM_ARENA_WIDTH")
        .ok()
        .and_then(|v| v.parse::<f32>().ok())
        .filter(|v| *v > 0.0)
        .unwrap_or(1600.0);
    let height = env::var("TANK_SIM_ARENA_HEIGHT")
        .ok()
        .and_then(|v| v.parse::<f32>().ok())
        .filter(|v| *v > 0.0)
        .unwrap_or(1200.0);
    Vec2::new(width, height)
}

// `stdin` reads JSON input frames; anything else runs the scripted pilot.
pub fn input_source() -> InputSource {
    match env::var("TANK_SIM_INPUT").as_deref() {
        Ok("stdin") => InputSource::Stdin,
        _ => InputSource::Scripted,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputSource {
    Scripted,
    Stdin,
}

pub const INPUT_CHANNEL_CAPACITY: usize = 1024;
pub const WORLD_BROADCAST_CAPACITY: usize = 128;
