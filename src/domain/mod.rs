// Domain layer: core simulation types and rules.

pub mod angle;
pub mod hull;
pub mod player;
pub mod ports;
pub mod projectile;
pub mod shooter;
pub mod signals;
pub mod state;
pub mod tank;
pub mod tuning;

pub use player::{
    AimCursor, AimLatch, DirectionKeys, PlayerController, PlayerInput, PlayerIntent, PlayerTank,
};
pub use projectile::{Projectile, ProjectileHandle, ProjectilePool};
pub use shooter::{AutonomousShooter, ShooterInput, ShooterTank, YoyoPatrol};
pub use signals::CombatSignal;
pub use state::{ProjectileSnapshot, TankKind, TankSnapshot};
pub use tank::{DamageOutcome, Tank, TankBehavior, TankCore, TankId, TickOutcome};
