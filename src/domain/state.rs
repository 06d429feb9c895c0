// Read-only views of simulation entities, produced once per tick.

use super::projectile::{Projectile, ProjectileHandle};
use super::tank::{TankCore, TankId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TankKind {
    Player,
    Shooter,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TankSnapshot {
    pub id: TankId,
    pub kind: TankKind,
    pub x: f32,
    pub y: f32,
    pub hull: f32,
    pub barrel: f32,
    pub health: f32,
    pub alive: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProjectileSnapshot {
    pub owner_id: TankId,
    pub handle: ProjectileHandle,
    pub x: f32,
    pub y: f32,
    pub heading: f32,
}

impl TankSnapshot {
    pub fn new(kind: TankKind, core: &TankCore) -> Self {
        let position = core.position();
        Self {
            id: core.id(),
            kind,
            x: position.x,
            y: position.y,
            hull: core.hull(),
            barrel: core.barrel(),
            health: core.health(),
            alive: core.is_alive(),
        }
    }
}

impl From<(ProjectileHandle, &Projectile)> for ProjectileSnapshot {
    fn from((handle, p): (ProjectileHandle, &Projectile)) -> Self {
        Self {
            owner_id: p.owner,
            handle,
            x: p.position.x,
            y: p.position.y,
            heading: p.heading,
        }
    }
}
