use std::time::Duration;

/// Gameplay tuning for autonomous shooters.
#[derive(Debug, Clone, Copy)]
pub struct ShooterTuning {
    /// Patrol speed in units per second.
    pub speed: f32,

    /// Delay between two successful shots.
    pub fire_cooldown: Duration,

    /// Speed given to fired projectiles, in units per second.
    pub muzzle_speed: f32,

    /// Barrel angle relative to the hull, in degrees.
    pub barrel_offset: f32,

    /// Hull orientation at spawn, in degrees.
    pub spawn_hull: f32,

    /// One leg of the yoyo patrol; the shooter covers `speed * leg` per leg.
    pub patrol_leg: Duration,

    /// World-space collision radius (used by the arcade stepper).
    pub radius: f32,
}

impl Default for ShooterTuning {
    fn default() -> Self {
        Self {
            speed: 100.0,
            fire_cooldown: Duration::from_millis(400),
            muzzle_speed: 1000.0,
            barrel_offset: 0.0,
            spawn_hull: 0.0,
            patrol_leg: Duration::from_millis(2000),
            radius: 32.0,
        }
    }
}
