// Player-controlled tank: directional keys drive velocity, the aim cursor
// drives the barrel, and a two-state aim latch decides whether a primary
// intent engages aiming or fires.

use super::angle::angle_between;
use super::signals::CombatSignal;
use super::tank::{Tank, TankBehavior, TankCore, TankId, TankParams};
use super::tuning::{PlayerTuning, ProjectileTuning};
use glam::Vec2;
use tracing::{debug, info};

pub type PlayerTank = Tank<PlayerController>;

/// Debounced directional key state for one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DirectionKeys {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

/// Discrete one-shot input, applied in order at the start of a tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlayerIntent {
    /// Pointer-down or fire key. Engages aiming when free, fires when locked.
    Primary,
    /// Raw pointer delta; moves the cursor only while aiming is locked.
    PointerMoved(Vec2),
    /// Explicit unlock or lost pointer lock.
    ReleaseAim,
    /// The simulation resumed after a pause.
    Resumed,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlayerInput {
    pub keys: DirectionKeys,
    pub intents: Vec<PlayerIntent>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AimLatch {
    #[default]
    Free,
    Locked,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AimCursor {
    pub position: Vec2,
    pub visible: bool,
}

#[derive(Debug, Clone)]
pub struct PlayerController {
    latch: AimLatch,
    cursor: AimCursor,
    fire_requested: bool,
}

impl PlayerController {
    pub fn new(cursor_position: Vec2) -> Self {
        Self {
            latch: AimLatch::Free,
            cursor: AimCursor {
                position: cursor_position,
                visible: false,
            },
            fire_requested: false,
        }
    }

    pub fn latch(&self) -> AimLatch {
        self.latch
    }

    pub fn cursor(&self) -> AimCursor {
        self.cursor
    }

    /// Places the aim target directly, for cursor sources that track absolute positions.
    pub fn set_aim_target(&mut self, position: Vec2) {
        self.cursor.position = position;
    }

    fn apply_intent(&mut self, tank_id: TankId, intent: PlayerIntent) {
        match (self.latch, intent) {
            (AimLatch::Free, PlayerIntent::Primary) => {
                self.latch = AimLatch::Locked;
                self.cursor.visible = true;
                info!(tank_id = tank_id.0, "aim locked");
            }
            (AimLatch::Locked, PlayerIntent::Primary) => {
                self.fire_requested = true;
            }
            (AimLatch::Locked, PlayerIntent::PointerMoved(delta)) => {
                self.cursor.position += delta;
            }
            (AimLatch::Locked, PlayerIntent::ReleaseAim) => {
                self.release_aim();
                info!(tank_id = tank_id.0, "aim released");
            }
            (_, PlayerIntent::Resumed) => self.on_resumed(),
            (AimLatch::Free, PlayerIntent::PointerMoved(_) | PlayerIntent::ReleaseAim) => {}
        }
    }

    /// Shows the cursor again after a pause if aiming is still locked.
    pub fn on_resumed(&mut self) {
        self.cursor.visible = self.latch == AimLatch::Locked;
    }

    fn release_aim(&mut self) {
        self.latch = AimLatch::Free;
        self.cursor.visible = false;
    }
}

impl TankBehavior for PlayerController {
    type Input = PlayerInput;

    fn begin_tick(&mut self, core: &TankCore, input: &PlayerInput) {
        self.fire_requested = false;
        for intent in &input.intents {
            self.apply_intent(core.id(), *intent);
        }
    }

    fn barrel_orientation(&mut self, core: &TankCore, _input: &PlayerInput) -> f32 {
        angle_between(core.position(), self.cursor.position) + 90.0
    }

    fn desired_velocity(&mut self, core: &TankCore, input: &PlayerInput) -> Vec2 {
        let speed = core.speed();
        let keys = input.keys;
        let mut velocity = Vec2::ZERO;

        // Left wins when both horizontal keys are held; right is only read in the else arm.
        if keys.left {
            velocity.x = -speed;
        } else if keys.right {
            velocity.x = speed;
        }

        if keys.up {
            velocity.y = -speed;
        } else if keys.down {
            velocity.y = speed;
        }

        velocity
    }

    fn should_attempt_fire(&mut self, _core: &TankCore, _input: &PlayerInput) -> bool {
        std::mem::take(&mut self.fire_requested)
    }

    fn on_fired(&mut self, core: &mut TankCore) {
        core.emit(CombatSignal::ShakeRequested);
        core.emit(CombatSignal::FlashRequested);
    }

    fn on_death(&mut self, core: &mut TankCore) {
        self.release_aim();
        debug!(tank_id = core.id().0, "player down, aim released");
        core.emit(CombatSignal::GameOver);
    }
}

/// Builds a fresh player tank at `position`.
pub fn spawn_player(
    id: TankId,
    position: Vec2,
    tuning: &PlayerTuning,
    projectiles: &ProjectileTuning,
) -> PlayerTank {
    let core = TankCore::new(
        id,
        position,
        TankParams {
            speed: tuning.speed,
            fire_cooldown: tuning.fire_cooldown,
            muzzle_speed: tuning.muzzle_speed,
            hull: tuning.spawn_hull,
            barrel: tuning.spawn_barrel,
            pool_capacity: projectiles.pool_capacity,
        },
    );
    Tank::new(core, PlayerController::new(position))
}
