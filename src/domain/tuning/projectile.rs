/// Gameplay tuning for projectiles and the pools that hold them.

#[derive(Debug, Clone, Copy)]
pub struct ProjectileTuning {
    /// Live projectiles one tank may have in flight at once.
    pub pool_capacity: usize,

    /// Health removed from a tank per impact.
    pub damage: f32,

    /// World-space collision radius.
    pub radius: f32,
}

/// Health removed per hit when no explicit amount is given.
pub const DEFAULT_DAMAGE: f32 = 0.05;

/// Capacity of every tank's projectile pool.
pub const POOL_CAPACITY: usize = 10;

impl Default for ProjectileTuning {
    fn default() -> Self {
        Self {
            pool_capacity: POOL_CAPACITY,
            damage: DEFAULT_DAMAGE,
            radius: 5.0,
        }
    }
}
