// Battlefield: owns every tank, advances them in a fixed order once per tick
// and routes their signals to the scene and effects collaborators.

use super::types::{PhysicsEvent, SimState, TickInputs, WorldUpdate};
use crate::domain::ports::{CosmeticEffects, PhysicsStepper, SceneLifecycle};
use crate::domain::player::spawn_player;
use crate::domain::shooter::spawn_shooter;
use crate::domain::tuning::{PlayerTuning, ProjectileTuning, ShooterTuning};
use crate::domain::{
    CombatSignal, PlayerTank, ProjectileHandle, ProjectilePool, ProjectileSnapshot, ShooterTank,
    TankCore, TankId, TankKind, TankSnapshot,
};
use glam::Vec2;
use std::time::Duration;
use tracing::{debug, info, warn};

/// What happened during one `step`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepReport {
    /// False when the battlefield was paused and nothing ran.
    pub advanced: bool,
    pub shots_fired: usize,
    pub deaths: Vec<TankId>,
    pub despawned: Vec<TankId>,
}

pub struct Battlefield {
    projectiles: ProjectileTuning,
    player: Option<PlayerTank>,
    shooters: Vec<ShooterTank>,
    pending: Vec<PhysicsEvent>,
    next_id: u64,
    tick: u64,
    paused: bool,
    game_over: bool,
}

impl Battlefield {
    pub fn new(projectiles: ProjectileTuning) -> Self {
        Self {
            projectiles,
            player: None,
            shooters: Vec::new(),
            pending: Vec::new(),
            next_id: 1,
            tick: 0,
            paused: false,
            game_over: false,
        }
    }

    /// Places the player, replacing any previous one.
    pub fn spawn_player(&mut self, position: Vec2, tuning: &PlayerTuning) -> TankId {
        let id = self.allocate_id();
        self.player = Some(spawn_player(id, position, tuning, &self.projectiles));
        info!(tank_id = id.0, x = position.x, y = position.y, "player spawned");
        id
    }

    pub fn spawn_shooter(&mut self, position: Vec2, tuning: &ShooterTuning) -> TankId {
        let id = self.allocate_id();
        self.shooters
            .push(spawn_shooter(id, position, tuning, &self.projectiles));
        info!(tank_id = id.0, x = position.x, y = position.y, "shooter spawned");
        id
    }

    pub fn player(&self) -> Option<&PlayerTank> {
        self.player.as_ref()
    }

    pub fn player_mut(&mut self) -> Option<&mut PlayerTank> {
        self.player.as_mut()
    }

    pub fn shooters(&self) -> &[ShooterTank] {
        &self.shooters
    }

    pub fn shooter(&self, id: TankId) -> Option<&ShooterTank> {
        self.shooters.iter().find(|s| s.id() == id)
    }

    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    pub fn state(&self) -> SimState {
        if self.game_over {
            SimState::GameOver
        } else if self.paused {
            SimState::Paused
        } else {
            SimState::Running
        }
    }

    pub fn pause(&mut self) {
        if !self.paused {
            self.paused = true;
            info!(tick = self.tick, "simulation paused");
        }
    }

    /// Unpauses and lets the player show its cursor again. Game over is final.
    pub fn resume(&mut self) -> bool {
        if self.game_over || !self.paused {
            return false;
        }
        self.paused = false;
        if let Some(player) = self.player.as_mut() {
            player.behavior_mut().on_resumed();
        }
        info!(tick = self.tick, "simulation resumed");
        true
    }

    /// Queues a physics report; it takes effect at the start of the next step.
    pub fn report(&mut self, event: PhysicsEvent) {
        self.pending.push(event);
    }

    pub fn pending_events(&self) -> usize {
        self.pending.len()
    }

    /// Runs one simulation tick.
    ///
    /// Order: queued physics events, player tick, shooter ticks in spawn order,
    /// integration through the stepper, then signal dispatch. Tanks whose
    /// terminal cleanup ran this tick are dropped afterwards.
    pub fn step<P, L, E>(
        &mut self,
        dt: Duration,
        inputs: &TickInputs,
        stepper: &mut P,
        scene: &mut L,
        effects: &mut E,
    ) -> StepReport
    where
        P: PhysicsStepper,
        L: SceneLifecycle,
        E: CosmeticEffects,
    {
        if self.paused {
            return StepReport::default();
        }

        self.tick += 1;
        self.apply_pending();

        if let Some(player) = self.player.as_mut() {
            player.tick(dt, &inputs.player);
        }
        for shooter in &mut self.shooters {
            let input = inputs
                .shooters
                .get(&shooter.id())
                .copied()
                .unwrap_or_default();
            shooter.tick(dt, &input);
        }

        self.integrate(dt, stepper);

        let report = self.dispatch(scene, effects);

        self.shooters.retain(|s| !s.core().is_torn_down());
        if self
            .player
            .as_ref()
            .is_some_and(|p| p.core().is_torn_down())
        {
            self.player = None;
        }

        report
    }

    pub fn snapshot(&self) -> WorldUpdate {
        let mut tanks = Vec::with_capacity(self.shooters.len() + 1);
        let mut projectiles = Vec::new();

        if let Some(player) = self.player.as_ref() {
            tanks.push(TankSnapshot::new(TankKind::Player, player.core()));
            collect_projectiles(player.core().pool(), &mut projectiles);
        }
        for shooter in &self.shooters {
            tanks.push(TankSnapshot::new(TankKind::Shooter, shooter.core()));
            collect_projectiles(shooter.core().pool(), &mut projectiles);
        }

        WorldUpdate {
            tick: self.tick,
            state: self.state(),
            tanks,
            projectiles,
            aim_cursor: self
                .player
                .as_ref()
                .map(|p| p.behavior().cursor().position),
        }
    }

    fn allocate_id(&mut self) -> TankId {
        let id = TankId(self.next_id);
        self.next_id += 1;
        id
    }

    fn pool_mut(&mut self, owner: TankId) -> Option<&mut ProjectilePool> {
        if let Some(player) = self.player.as_mut().filter(|p| p.id() == owner) {
            return Some(player.core_mut().pool_mut());
        }
        self.shooters
            .iter_mut()
            .find(|s| s.id() == owner)
            .map(|s| s.core_mut().pool_mut())
    }

    fn apply_pending(&mut self) {
        let damage = self.projectiles.damage;
        for event in std::mem::take(&mut self.pending) {
            match event {
                PhysicsEvent::Impact {
                    owner,
                    projectile,
                    target,
                } => {
                    // A projectile damages at most once; repeated or stale reports are dropped.
                    if !self.release(owner, projectile) {
                        continue;
                    }
                    self.damage(target, damage);
                }
                PhysicsEvent::OutOfBounds { owner, projectile } => {
                    self.release(owner, projectile);
                }
            }
        }
    }

    fn release(&mut self, owner: TankId, projectile: ProjectileHandle) -> bool {
        match self.pool_mut(owner) {
            Some(pool) => pool.release(projectile),
            None => {
                debug!(tank_id = owner.0, "projectile owner no longer on the field");
                false
            }
        }
    }

    fn damage(&mut self, target: TankId, amount: f32) {
        if let Some(player) = self.player.as_mut().filter(|p| p.id() == target) {
            player.apply_damage(amount);
            return;
        }
        match self.shooters.iter_mut().find(|s| s.id() == target) {
            Some(shooter) => {
                shooter.apply_damage(amount);
            }
            None => warn!(tank_id = target.0, "impact reported for unknown tank"),
        }
    }

    fn integrate<P: PhysicsStepper>(&mut self, dt: Duration, stepper: &mut P) {
        if let Some(player) = self.player.as_mut() {
            let velocity = player.core().velocity();
            let cursor = player.behavior().cursor().position;
            let moved = stepper.integrate_cursor(cursor, velocity, dt);
            player.behavior_mut().set_aim_target(moved);

            integrate_core(player.core_mut(), dt, stepper);
        }
        for shooter in &mut self.shooters {
            integrate_core(shooter.core_mut(), dt, stepper);
        }
    }

    fn dispatch<L, E>(&mut self, scene: &mut L, effects: &mut E) -> StepReport
    where
        L: SceneLifecycle,
        E: CosmeticEffects,
    {
        let mut signals = Vec::new();
        if let Some(player) = self.player.as_mut() {
            signals.extend(player.drain_signals());
        }
        for shooter in &mut self.shooters {
            signals.extend(shooter.drain_signals());
        }

        let mut report = StepReport {
            advanced: true,
            ..StepReport::default()
        };
        for signal in signals {
            match signal {
                CombatSignal::Fired { .. } => report.shots_fired += 1,
                CombatSignal::Died { tank } => {
                    report.deaths.push(tank);
                    scene.on_death(tank);
                }
                CombatSignal::GameOver => {
                    self.paused = true;
                    self.game_over = true;
                    info!(tick = self.tick, "game over");
                    scene.on_game_over();
                }
                CombatSignal::ShakeRequested => effects.request_shake(),
                CombatSignal::FlashRequested => effects.request_flash(),
                CombatSignal::Despawned { tank, released } => {
                    debug!(tank_id = tank.0, released, "tank removed from the field");
                    report.despawned.push(tank);
                }
            }
        }
        report
    }
}

fn integrate_core<P: PhysicsStepper>(core: &mut TankCore, dt: Duration, stepper: &mut P) {
    if core.is_alive() {
        let moved = stepper.integrate(core.position(), core.velocity(), dt);
        core.set_position(moved);
    }
    for (_, projectile) in core.pool_mut().iter_mut() {
        let moved = stepper.integrate(projectile.position, projectile.velocity(), dt);
        projectile.advance(moved);
    }
}

fn collect_projectiles(pool: &ProjectilePool, out: &mut Vec<ProjectileSnapshot>) {
    out.extend(pool.iter().map(ProjectileSnapshot::from));
}
