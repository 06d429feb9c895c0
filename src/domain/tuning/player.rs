use std::time::Duration;

/// Gameplay tuning for the player-controlled tank.
#[derive(Debug, Clone, Copy)]
pub struct PlayerTuning {
    /// Per-axis movement speed in units per second.
    pub speed: f32,

    /// Delay between two successful shots.
    pub fire_cooldown: Duration,

    /// Speed given to fired projectiles, in units per second.
    pub muzzle_speed: f32,

    /// Hull orientation at spawn, in degrees.
    pub spawn_hull: f32,

    /// Barrel orientation at spawn, in degrees.
    pub spawn_barrel: f32,

    /// World-space collision radius (used by the arcade stepper).
    pub radius: f32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            speed: 150.0,
            fire_cooldown: Duration::from_millis(80),
            muzzle_speed: 1000.0,
            spawn_hull: 180.0,
            spawn_barrel: 180.0,
            radius: 32.0,
        }
    }
}
