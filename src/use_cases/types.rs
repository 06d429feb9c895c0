// Use-case level inputs/outputs for the simulation loop.

use crate::domain::{
    PlayerInput, ProjectileHandle, ProjectileSnapshot, ShooterInput, TankId, TankSnapshot,
};
use glam::Vec2;
use std::collections::HashMap;

/// Reports from the physics/bounds collaborator, applied at the next tick boundary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PhysicsEvent {
    Impact {
        owner: TankId,
        projectile: ProjectileHandle,
        target: TankId,
    },
    OutOfBounds {
        owner: TankId,
        projectile: ProjectileHandle,
    },
}

/// Everything fed into the simulation loop from outside.
#[derive(Debug, Clone)]
pub enum GameEvent {
    /// Key state and intents for the next tick. Keys replace, intents accumulate.
    Input(PlayerInput),
    Physics(PhysicsEvent),
    Pause,
    Resume,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimState {
    Running,
    Paused,
    GameOver,
}

/// Per-tick inputs for every entity on the battlefield.
#[derive(Debug, Clone, Default)]
pub struct TickInputs {
    pub player: PlayerInput,
    /// Shooters without an entry get a zero velocity.
    pub shooters: HashMap<TankId, ShooterInput>,
}

impl TickInputs {
    pub fn with_shooter(mut self, id: TankId, input: ShooterInput) -> Self {
        self.shooters.insert(id, input);
        self
    }
}

#[derive(Debug, Clone)]
pub struct WorldUpdate {
    pub tick: u64,
    pub state: SimState,
    pub tanks: Vec<TankSnapshot>,
    pub projectiles: Vec<ProjectileSnapshot>,
    /// Player aim cursor, when a player is on the field.
    pub aim_cursor: Option<Vec2>,
}

/// Overlap and bounds detection run against the committed world after each tick.
pub trait CollisionProbe {
    fn probe(&mut self, update: &WorldUpdate) -> Vec<PhysicsEvent>;
}
