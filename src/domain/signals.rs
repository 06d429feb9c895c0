// Outward signals raised by tanks during a tick, drained by the battlefield.

use super::projectile::ProjectileHandle;
use super::tank::TankId;

#[derive(Debug, Clone, PartialEq)]
pub enum CombatSignal {
    /// A shot left the barrel.
    Fired {
        tank: TankId,
        projectile: ProjectileHandle,
    },
    /// Health reached zero. Raised once per tank.
    Died { tank: TankId },
    /// The player died; the scene should pause and show game over.
    GameOver,
    /// Cosmetic camera shake for a player shot.
    ShakeRequested,
    /// Cosmetic opacity pulse for a player shot.
    FlashRequested,
    /// Terminal cleanup ran; the tank can be dropped from the roster.
    Despawned { tank: TankId, released: usize },
}
