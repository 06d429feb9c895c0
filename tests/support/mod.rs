// Shared recording collaborators and fixtures for the battle scenario tests.
#![allow(dead_code)]

use glam::Vec2;
use std::time::Duration;
use tank_combat::domain::ports::{CosmeticEffects, PhysicsStepper, SceneLifecycle};
use tank_combat::domain::tuning::{PlayerTuning, ProjectileTuning, ShooterTuning};
use tank_combat::domain::{ProjectileHandle, TankId};
use tank_combat::use_cases::{Battlefield, StepReport, TickInputs};

// Fixed 10 ms step keeps cooldown arithmetic exact.
pub const TICK: Duration = Duration::from_millis(10);

/// Straight-line integration with a call counter.
#[derive(Debug, Default)]
pub struct LinearStepper {
    pub calls: usize,
}

impl PhysicsStepper for LinearStepper {
    fn integrate(&mut self, position: Vec2, velocity: Vec2, dt: Duration) -> Vec2 {
        self.calls += 1;
        position + velocity * dt.as_secs_f32()
    }
}

/// Records every lifecycle call in order.
#[derive(Debug, Default)]
pub struct RecordingScene {
    pub deaths: Vec<TankId>,
    pub game_overs: usize,
}

impl SceneLifecycle for RecordingScene {
    fn on_death(&mut self, tank: TankId) {
        self.deaths.push(tank);
    }

    fn on_game_over(&mut self) {
        self.game_overs += 1;
    }
}

#[derive(Debug, Default)]
pub struct RecordingEffects {
    pub shakes: usize,
    pub flashes: usize,
}

impl CosmeticEffects for RecordingEffects {
    fn request_shake(&mut self) {
        self.shakes += 1;
    }

    fn request_flash(&mut self) {
        self.flashes += 1;
    }
}

/// A battlefield plus recording collaborators.
pub struct Arena {
    pub field: Battlefield,
    pub stepper: LinearStepper,
    pub scene: RecordingScene,
    pub effects: RecordingEffects,
}

impl Arena {
    pub fn new() -> Self {
        Self {
            field: Battlefield::new(ProjectileTuning::default()),
            stepper: LinearStepper::default(),
            scene: RecordingScene::default(),
            effects: RecordingEffects::default(),
        }
    }

    pub fn with_player(mut self, position: Vec2) -> (Self, TankId) {
        let id = self.field.spawn_player(position, &PlayerTuning::default());
        (self, id)
    }

    pub fn add_shooter(&mut self, position: Vec2) -> TankId {
        self.field.spawn_shooter(position, &ShooterTuning::default())
    }

    pub fn step(&mut self, inputs: &TickInputs) -> StepReport {
        self.field.step(
            TICK,
            inputs,
            &mut self.stepper,
            &mut self.scene,
            &mut self.effects,
        )
    }

    pub fn idle(&mut self, ticks: usize) -> Vec<StepReport> {
        (0..ticks).map(|_| self.step(&TickInputs::default())).collect()
    }

    /// Any projectile currently in flight for `owner`.
    pub fn live_projectile(&self, owner: TankId) -> Option<ProjectileHandle> {
        if let Some(player) = self.field.player().filter(|p| p.id() == owner) {
            return player.core().pool().iter().next().map(|(h, _)| h);
        }
        self.field
            .shooter(owner)
            .and_then(|s| s.core().pool().iter().next().map(|(h, _)| h))
    }
}
