// Use cases layer: the battlefield tick and the async loop that drives it.

pub mod battlefield;
pub mod game;
pub mod types;

pub use battlefield::{Battlefield, StepReport};
pub use game::{WorldPorts, WorldSettings, world_task};
pub use types::{CollisionProbe, GameEvent, PhysicsEvent, SimState, TickInputs, WorldUpdate};
