// Shared tank state machine: health, cooldown clock, hull/barrel orientation,
// the fire gate and the terminal transition. Variant-specific rules plug in
// through `TankBehavior`.

use super::angle::wrap_degrees;
use super::hull::{HullRotation, hull_target};
use super::projectile::{Projectile, ProjectileHandle, ProjectilePool};
use super::signals::CombatSignal;
use super::tuning::projectile::DEFAULT_DAMAGE;
use glam::Vec2;
use std::time::Duration;
use tracing::{debug, info};

// Anything below this after a hit is float residue from repeated subtraction.
const HEALTH_EPSILON: f32 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TankId(pub u64);

impl std::fmt::Display for TankId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "tank-{}", self.0)
    }
}

/// Construction parameters shared by every tank variant.
#[derive(Debug, Clone, Copy)]
pub struct TankParams {
    pub speed: f32,
    pub fire_cooldown: Duration,
    pub muzzle_speed: f32,
    pub hull: f32,
    pub barrel: f32,
    pub pool_capacity: usize,
}

/// State common to all tanks.
///
/// `position` is owned by the physics stepper; everything else only changes
/// inside `Tank::tick`, `Tank::fire` and `Tank::apply_damage`.
#[derive(Debug, Clone)]
pub struct TankCore {
    id: TankId,
    position: Vec2,
    velocity: Vec2,
    speed: f32,
    hull: f32,
    barrel: f32,
    rotation: HullRotation,
    health: f32,
    alive: bool,
    torn_down: bool,
    clock: Duration,
    next_shot_at: Duration,
    fire_cooldown: Duration,
    muzzle_speed: f32,
    pool: ProjectilePool,
    signals: Vec<CombatSignal>,
}

impl TankCore {
    pub fn new(id: TankId, position: Vec2, params: TankParams) -> Self {
        Self {
            id,
            position,
            velocity: Vec2::ZERO,
            speed: params.speed,
            // Spawn is the one place the hull may snap.
            hull: wrap_degrees(params.hull),
            barrel: wrap_degrees(params.barrel),
            rotation: HullRotation::Idle,
            health: 1.0,
            alive: true,
            torn_down: false,
            clock: Duration::ZERO,
            next_shot_at: Duration::ZERO,
            fire_cooldown: params.fire_cooldown,
            muzzle_speed: params.muzzle_speed,
            pool: ProjectilePool::new(params.pool_capacity),
            signals: Vec::new(),
        }
    }

    pub fn id(&self) -> TankId {
        self.id
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Commits a position computed by the physics stepper.
    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn hull(&self) -> f32 {
        self.hull
    }

    pub fn barrel(&self) -> f32 {
        self.barrel
    }

    pub fn rotation(&self) -> HullRotation {
        self.rotation
    }

    pub fn health(&self) -> f32 {
        self.health
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// Time this tank has been simulated for.
    pub fn clock(&self) -> Duration {
        self.clock
    }

    /// Earliest clock value at which the next shot is allowed.
    pub fn next_shot_at(&self) -> Duration {
        self.next_shot_at
    }

    pub fn fire_cooldown(&self) -> Duration {
        self.fire_cooldown
    }

    pub fn pool(&self) -> &ProjectilePool {
        &self.pool
    }

    pub fn pool_mut(&mut self) -> &mut ProjectilePool {
        &mut self.pool
    }

    pub fn emit(&mut self, signal: CombatSignal) {
        self.signals.push(signal);
    }

    pub fn drain_signals(&mut self) -> Vec<CombatSignal> {
        std::mem::take(&mut self.signals)
    }

    fn update_hull(&mut self) {
        if let Some(angle) = self.rotation.advance(self.clock) {
            self.hull = angle;
        }

        if self.rotation.is_rotating() {
            return;
        }
        if let Some(target) = hull_target(self.velocity, self.hull) {
            // Already facing the travel direction; nothing to turn. Skipping the
            // no-op turn keeps the hull free to answer the next direction change at once.
            if wrap_degrees(target) != self.hull {
                self.rotation.try_begin(self.hull, target, self.clock);
            }
        }
    }
}

/// Variant-specific rules for a tank. Each hook runs once per live tick, in
/// declaration order.
pub trait TankBehavior {
    /// Per-tick input the variant reads.
    type Input;

    /// Consumes discrete input before any orientation is computed.
    fn begin_tick(&mut self, _core: &TankCore, _input: &Self::Input) {}

    /// Barrel orientation in degrees for this tick.
    fn barrel_orientation(&mut self, core: &TankCore, input: &Self::Input) -> f32;

    /// Velocity for this tick.
    fn desired_velocity(&mut self, core: &TankCore, input: &Self::Input) -> Vec2;

    /// Whether to try the fire gate this tick.
    fn should_attempt_fire(&mut self, core: &TankCore, input: &Self::Input) -> bool;

    /// Runs after a successful shot.
    fn on_fired(&mut self, _core: &mut TankCore) {}

    /// Runs once, on the hit that empties health.
    fn on_death(&mut self, _core: &mut TankCore) {}
}

/// Result of ticking one tank.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Active,
    /// The tank was dead and its terminal cleanup ran on this tick.
    TornDown,
    /// Dead and already cleaned up; nothing happened.
    Inert,
}

/// Result of applying damage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DamageOutcome {
    Damaged { health: f32 },
    Killed,
    AlreadyDead,
}

#[derive(Debug, Clone)]
pub struct Tank<B> {
    core: TankCore,
    behavior: B,
}

impl<B: TankBehavior> Tank<B> {
    pub fn new(core: TankCore, behavior: B) -> Self {
        Self { core, behavior }
    }

    pub fn core(&self) -> &TankCore {
        &self.core
    }

    pub fn core_mut(&mut self) -> &mut TankCore {
        &mut self.core
    }

    pub fn behavior(&self) -> &B {
        &self.behavior
    }

    pub fn behavior_mut(&mut self) -> &mut B {
        &mut self.behavior
    }

    pub fn id(&self) -> TankId {
        self.core.id
    }

    pub fn is_alive(&self) -> bool {
        self.core.alive
    }

    pub fn drain_signals(&mut self) -> Vec<CombatSignal> {
        self.core.drain_signals()
    }

    /// Advances this tank by `dt`.
    pub fn tick(&mut self, dt: Duration, input: &B::Input) -> TickOutcome {
        if !self.core.alive {
            return self.tear_down();
        }

        self.core.clock += dt;
        self.behavior.begin_tick(&self.core, input);

        let barrel = self.behavior.barrel_orientation(&self.core, input);
        self.core.barrel = wrap_degrees(barrel);

        self.core.velocity = self.behavior.desired_velocity(&self.core, input);
        self.core.update_hull();

        if self.behavior.should_attempt_fire(&self.core, input) {
            self.fire();
        }

        TickOutcome::Active
    }

    /// Fires one projectile along the barrel if the fire gate allows it.
    ///
    /// A closed gate (dead, cooling down, pool full) is not an error: nothing
    /// changes and `None` comes back.
    pub fn fire(&mut self) -> Option<ProjectileHandle> {
        let core = &mut self.core;
        if !core.alive || core.clock < core.next_shot_at {
            return None;
        }

        let handle = core.pool.try_spawn(Projectile {
            position: core.position,
            heading: core.barrel,
            speed: core.muzzle_speed,
            owner: core.id,
        })?;
        core.next_shot_at = core.clock + core.fire_cooldown;

        debug!(
            tank_id = core.id.0,
            projectile_slot = handle.slot(),
            heading = core.barrel,
            in_flight = core.pool.active_count(),
            "shot fired"
        );
        core.emit(CombatSignal::Fired {
            tank: core.id,
            projectile: handle,
        });
        self.behavior.on_fired(&mut self.core);
        Some(handle)
    }

    /// Removes `amount` health, clamped at zero.
    ///
    /// Health left below `HEALTH_EPSILON` (1e-6) counts as zero, so a hit that
    /// leaves only float residue is lethal.
    ///
    /// Negative amounts count as zero. The hit that empties health moves the
    /// tank to its terminal state and raises `Died`; later hits do nothing.
    pub fn apply_damage(&mut self, amount: f32) -> DamageOutcome {
        if !self.core.alive {
            return DamageOutcome::AlreadyDead;
        }

        let mut health = (self.core.health - amount.max(0.0)).max(0.0);
        if health < HEALTH_EPSILON {
            health = 0.0;
        }
        self.core.health = health;

        if health > 0.0 {
            debug!(tank_id = self.core.id.0, health, "tank damaged");
            return DamageOutcome::Damaged { health };
        }

        self.core.alive = false;
        self.core.velocity = Vec2::ZERO;
        self.core.rotation.cancel();
        info!(tank_id = self.core.id.0, "tank destroyed");
        self.core.emit(CombatSignal::Died { tank: self.core.id });
        self.behavior.on_death(&mut self.core);
        DamageOutcome::Killed
    }

    /// Applies one projectile hit's worth of damage.
    pub fn take_hit(&mut self) -> DamageOutcome {
        self.apply_damage(DEFAULT_DAMAGE)
    }

    fn tear_down(&mut self) -> TickOutcome {
        if self.core.torn_down {
            return TickOutcome::Inert;
        }

        let released = self.core.pool.clear();
        self.core.torn_down = true;
        debug!(tank_id = self.core.id.0, released, "tank torn down");
        self.core.emit(CombatSignal::Despawned {
            tank: self.core.id,
            released,
        });
        TickOutcome::TornDown
    }
}
