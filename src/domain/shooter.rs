// Autonomous shooter: no aiming and no movement input of its own. It fires
// whenever the shared gate allows and turns its hull toward whatever velocity
// it is handed.

use super::tank::{Tank, TankBehavior, TankCore, TankId, TankParams};
use super::tuning::{ProjectileTuning, ShooterTuning};
use glam::Vec2;
use std::time::Duration;

pub type ShooterTank = Tank<AutonomousShooter>;

/// Externally driven motion for one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ShooterInput {
    pub velocity: Vec2,
}

#[derive(Debug, Clone)]
pub struct AutonomousShooter {
    barrel_offset: f32,
}

impl AutonomousShooter {
    pub fn new(barrel_offset: f32) -> Self {
        Self { barrel_offset }
    }
}

impl TankBehavior for AutonomousShooter {
    type Input = ShooterInput;

    fn barrel_orientation(&mut self, core: &TankCore, _input: &ShooterInput) -> f32 {
        core.hull() + self.barrel_offset
    }

    fn desired_velocity(&mut self, _core: &TankCore, input: &ShooterInput) -> Vec2 {
        input.velocity
    }

    fn should_attempt_fire(&mut self, _core: &TankCore, _input: &ShooterInput) -> bool {
        true
    }
}

pub fn spawn_shooter(
    id: TankId,
    position: Vec2,
    tuning: &ShooterTuning,
    projectiles: &ProjectileTuning,
) -> ShooterTank {
    let core = TankCore::new(
        id,
        position,
        TankParams {
            speed: tuning.speed,
            fire_cooldown: tuning.fire_cooldown,
            muzzle_speed: tuning.muzzle_speed,
            hull: tuning.spawn_hull,
            barrel: tuning.spawn_hull + tuning.barrel_offset,
            pool_capacity: projectiles.pool_capacity,
        },
    );
    Tank::new(core, AutonomousShooter::new(tuning.barrel_offset))
}

/// Vertical back-and-forth patrol: up for one leg, down for the next, forever.
///
/// Only produces a velocity; the shooter itself never decides where to go.
#[derive(Debug, Clone)]
pub struct YoyoPatrol {
    speed: f32,
    leg: Duration,
    elapsed: Duration,
}

impl YoyoPatrol {
    pub fn new(speed: f32, leg: Duration) -> Self {
        Self {
            speed,
            leg,
            elapsed: Duration::ZERO,
        }
    }

    pub fn from_tuning(tuning: &ShooterTuning) -> Self {
        Self::new(tuning.speed, tuning.patrol_leg)
    }

    /// Velocity for the next `dt` of travel.
    pub fn advance(&mut self, dt: Duration) -> Vec2 {
        let velocity = if self.leg.is_zero() {
            Vec2::ZERO
        } else if (self.elapsed.as_nanos() / self.leg.as_nanos()) % 2 == 0 {
            Vec2::new(0.0, -self.speed)
        } else {
            Vec2::new(0.0, self.speed)
        };
        self.elapsed += dt;
        velocity
    }
}
