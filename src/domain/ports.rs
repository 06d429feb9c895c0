// Ports for the collaborators the combat core talks to but does not own.

use super::tank::TankId;
use glam::Vec2;
use std::time::Duration;

// Moves bodies. Overlap and bounds checks are reported back separately as physics events.
pub trait PhysicsStepper {
    fn integrate(&mut self, position: Vec2, velocity: Vec2, dt: Duration) -> Vec2;

    /// Moves the player's aim cursor. Steppers with world bounds keep it inside them.
    fn integrate_cursor(&mut self, position: Vec2, velocity: Vec2, dt: Duration) -> Vec2 {
        self.integrate(position, velocity, dt)
    }
}

// Scene lifecycle owner: the only outward lifecycle calls the core makes.
pub trait SceneLifecycle {
    fn on_death(&mut self, tank: TankId);
    fn on_game_over(&mut self);
}

// Fire-and-forget visual effects.
pub trait CosmeticEffects {
    fn request_shake(&mut self);
    fn request_flash(&mut self);
}
