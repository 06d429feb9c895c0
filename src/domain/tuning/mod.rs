// Gameplay tuning, kept apart from runtime configuration (tick rate, channel sizes).

pub mod player;
pub mod projectile;
pub mod shooter;

pub use player::PlayerTuning;
pub use projectile::ProjectileTuning;
pub use shooter::ShooterTuning;
