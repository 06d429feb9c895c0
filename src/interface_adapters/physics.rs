// Arcade physics for the headless runner: straight-line integration plus
// naive circle overlap and arena-bounds checks reported as physics events.

use crate::domain::TankKind;
use crate::domain::ports::PhysicsStepper;
use crate::domain::tuning::{PlayerTuning, ProjectileTuning, ShooterTuning};
use crate::use_cases::{CollisionProbe, PhysicsEvent, WorldUpdate};
use glam::Vec2;
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Clone, Copy)]
pub struct ArenaBounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl ArenaBounds {
    pub fn from_size(size: Vec2) -> Self {
        Self {
            min: Vec2::ZERO,
            max: size,
        }
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ArcadeConfig {
    pub bounds: ArenaBounds,
    pub player_radius: f32,
    pub shooter_radius: f32,
    pub projectile_radius: f32,
}

impl ArcadeConfig {
    pub fn new(
        bounds: ArenaBounds,
        player: &PlayerTuning,
        shooter: &ShooterTuning,
        projectile: &ProjectileTuning,
    ) -> Self {
        Self {
            bounds,
            player_radius: player.radius,
            shooter_radius: shooter.radius,
            projectile_radius: projectile.radius,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ArcadeStepper {
    cfg: ArcadeConfig,
}

impl ArcadeStepper {
    pub fn new(cfg: ArcadeConfig) -> Self {
        Self { cfg }
    }

    fn tank_radius(&self, kind: TankKind) -> f32 {
        match kind {
            TankKind::Player => self.cfg.player_radius,
            TankKind::Shooter => self.cfg.shooter_radius,
        }
    }
}

impl PhysicsStepper for ArcadeStepper {
    fn integrate(&mut self, position: Vec2, velocity: Vec2, dt: Duration) -> Vec2 {
        position + velocity * dt.as_secs_f32()
    }

    // The cursor collides with the world edge instead of leaving it.
    fn integrate_cursor(&mut self, position: Vec2, velocity: Vec2, dt: Duration) -> Vec2 {
        self.integrate(position, velocity, dt)
            .clamp(self.cfg.bounds.min, self.cfg.bounds.max)
    }
}

impl CollisionProbe for ArcadeStepper {
    fn probe(&mut self, update: &WorldUpdate) -> Vec<PhysicsEvent> {
        let mut events = Vec::new();

        // Projectile vs tank overlap (naive O(P*T)); first hit wins.
        for p in &update.projectiles {
            let position = Vec2::new(p.x, p.y);
            if !self.cfg.bounds.contains(position) {
                events.push(PhysicsEvent::OutOfBounds {
                    owner: p.owner_id,
                    projectile: p.handle,
                });
                continue;
            }

            let hit = update.tanks.iter().find(|t| {
                if !t.alive || t.id == p.owner_id {
                    return false;
                }
                let reach = self.tank_radius(t.kind) + self.cfg.projectile_radius;
                Vec2::new(t.x, t.y).distance_squared(position) <= reach * reach
            });
            if let Some(target) = hit {
                debug!(
                    owner_id = p.owner_id.0,
                    target_id = target.id.0,
                    projectile_slot = p.handle.slot(),
                    "projectile overlap"
                );
                events.push(PhysicsEvent::Impact {
                    owner: p.owner_id,
                    projectile: p.handle,
                    target: target.id,
                });
            }
        }

        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        Projectile, ProjectileHandle, ProjectilePool, ProjectileSnapshot, TankId, TankSnapshot,
    };
    use crate::use_cases::SimState;

    fn stepper() -> ArcadeStepper {
        ArcadeStepper::new(ArcadeConfig {
            bounds: ArenaBounds::from_size(Vec2::new(1000.0, 1000.0)),
            player_radius: 32.0,
            shooter_radius: 32.0,
            projectile_radius: 5.0,
        })
    }

    fn tank(id: u64, x: f32, y: f32, alive: bool) -> TankSnapshot {
        TankSnapshot {
            id: TankId(id),
            kind: TankKind::Shooter,
            x,
            y,
            hull: 0.0,
            barrel: 0.0,
            health: if alive { 1.0 } else { 0.0 },
            alive,
        }
    }

    fn handle(owner: u64) -> ProjectileHandle {
        let mut pool = ProjectilePool::new(1);
        pool.try_spawn(Projectile {
            position: Vec2::ZERO,
            heading: 0.0,
            speed: 0.0,
            owner: TankId(owner),
        })
        .expect("empty pool")
    }

    fn projectile(owner: u64, x: f32, y: f32) -> ProjectileSnapshot {
        ProjectileSnapshot {
            owner_id: TankId(owner),
            handle: handle(owner),
            x,
            y,
            heading: 0.0,
        }
    }

    fn update(tanks: Vec<TankSnapshot>, projectiles: Vec<ProjectileSnapshot>) -> WorldUpdate {
        WorldUpdate {
            tick: 1,
            state: SimState::Running,
            tanks,
            projectiles,
            aim_cursor: None,
        }
    }

    #[test]
    fn when_bodies_integrate_then_position_moves_by_velocity_times_dt() {
        let moved = stepper().integrate(
            Vec2::new(10.0, 10.0),
            Vec2::new(100.0, -50.0),
            Duration::from_millis(500),
        );
        assert_eq!(moved, Vec2::new(60.0, -15.0));
    }

    #[test]
    fn when_cursor_is_pushed_past_the_edge_then_it_stays_on_the_arena() {
        let cursor = stepper().integrate_cursor(
            Vec2::new(-4900.0, 100.0),
            Vec2::new(0.0, 2000.0),
            Duration::from_millis(500),
        );
        assert_eq!(cursor, Vec2::new(0.0, 1000.0));
    }

    #[test]
    fn when_projectile_overlaps_another_tank_then_impact_is_reported() {
        let events = stepper().probe(&update(
            vec![tank(1, 100.0, 100.0, true), tank(2, 500.0, 500.0, true)],
            vec![projectile(1, 520.0, 500.0)],
        ));
        assert!(matches!(
            events.as_slice(),
            [PhysicsEvent::Impact { owner: TankId(1), target: TankId(2), .. }]
        ));
    }

    #[test]
    fn when_projectile_overlaps_its_owner_then_nothing_is_reported() {
        let events = stepper().probe(&update(
            vec![tank(1, 100.0, 100.0, true)],
            vec![projectile(1, 100.0, 100.0)],
        ));
        assert!(events.is_empty());
    }

    #[test]
    fn when_target_is_dead_then_projectile_passes_through() {
        let events = stepper().probe(&update(
            vec![tank(2, 500.0, 500.0, false)],
            vec![projectile(1, 500.0, 500.0)],
        ));
        assert!(events.is_empty());
    }

    #[test]
    fn when_projectile_leaves_arena_then_out_of_bounds_is_reported() {
        let events = stepper().probe(&update(Vec::new(), vec![projectile(1, 500.0, -3.0)]));
        assert!(matches!(
            events.as_slice(),
            [PhysicsEvent::OutOfBounds { owner: TankId(1), .. }]
        ));
    }
}
