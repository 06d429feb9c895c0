// Wire DTOs for the headless runner: world updates written as JSON lines and
// input frames read back from JSON.

use crate::domain::{
    DirectionKeys, PlayerInput, PlayerIntent, ProjectileSnapshot, TankKind, TankSnapshot,
};
use crate::use_cases::{GameEvent, SimState, WorldUpdate};
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Messages the runner writes to its output stream.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", content = "data")]
pub enum SimMessage {
    // Snapshot of the battlefield for a given tick.
    WorldUpdate(WorldUpdateDto),
    // Simulation lifecycle transitions.
    SimState(SimStateDto),
}

/// Messages accepted on the input stream.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum InputMessage {
    Input(InputFrameDto),
    Pause,
    Resume,
}

impl From<InputMessage> for GameEvent {
    fn from(message: InputMessage) -> Self {
        match message {
            InputMessage::Input(frame) => GameEvent::Input(frame.into()),
            InputMessage::Pause => GameEvent::Pause,
            InputMessage::Resume => GameEvent::Resume,
        }
    }
}

/// Held keys plus one-shot intents for the next tick.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InputFrameDto {
    #[serde(default)]
    pub left: bool,
    #[serde(default)]
    pub right: bool,
    #[serde(default)]
    pub up: bool,
    #[serde(default)]
    pub down: bool,
    #[serde(default)]
    pub intents: Vec<IntentDto>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IntentDto {
    Primary,
    PointerMoved { dx: f32, dy: f32 },
    ReleaseAim,
}

impl From<IntentDto> for PlayerIntent {
    fn from(intent: IntentDto) -> Self {
        match intent {
            IntentDto::Primary => PlayerIntent::Primary,
            IntentDto::PointerMoved { dx, dy } => PlayerIntent::PointerMoved(Vec2::new(dx, dy)),
            IntentDto::ReleaseAim => PlayerIntent::ReleaseAim,
        }
    }
}

impl From<InputFrameDto> for PlayerInput {
    fn from(frame: InputFrameDto) -> Self {
        Self {
            keys: DirectionKeys {
                left: frame.left,
                right: frame.right,
                up: frame.up,
                down: frame.down,
            },
            intents: frame.intents.into_iter().map(PlayerIntent::from).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct WorldUpdateDto {
    pub tick: u64,
    pub state: SimStateDto,
    pub tanks: Vec<TankStateDto>,
    pub projectiles: Vec<ProjectileStateDto>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aim_cursor: Option<[f32; 2]>,
}

impl From<WorldUpdate> for WorldUpdateDto {
    fn from(update: WorldUpdate) -> Self {
        Self {
            tick: update.tick,
            state: update.state.into(),
            tanks: update.tanks.iter().map(TankStateDto::from).collect(),
            projectiles: update
                .projectiles
                .iter()
                .map(ProjectileStateDto::from)
                .collect(),
            aim_cursor: update.aim_cursor.map(|c| c.to_array()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TankKindDto {
    Player,
    Shooter,
}

impl From<TankKind> for TankKindDto {
    fn from(kind: TankKind) -> Self {
        match kind {
            TankKind::Player => TankKindDto::Player,
            TankKind::Shooter => TankKindDto::Shooter,
        }
    }
}

/// Flattened tank state for the output stream.
#[derive(Debug, Clone, Serialize)]
pub struct TankStateDto {
    pub id: String,
    pub kind: TankKindDto,
    pub x: f32,
    pub y: f32,
    pub hull: f32,
    pub barrel: f32,
    pub health: f32,
    pub alive: bool,
}

impl From<&TankSnapshot> for TankStateDto {
    fn from(tank: &TankSnapshot) -> Self {
        Self {
            id: tank.id.to_string(),
            kind: tank.kind.into(),
            x: tank.x,
            y: tank.y,
            hull: tank.hull,
            barrel: tank.barrel,
            health: tank.health,
            alive: tank.alive,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ProjectileStateDto {
    pub id: String,
    pub owner_id: String,
    pub x: f32,
    pub y: f32,
    pub rot: f32,
}

impl From<&ProjectileSnapshot> for ProjectileStateDto {
    fn from(projectile: &ProjectileSnapshot) -> Self {
        Self {
            // Slot ids are reused, so the generation keeps the id unique over time.
            id: format!(
                "{}.{}.{}",
                projectile.owner_id.0,
                projectile.handle.slot(),
                projectile.handle.generation()
            ),
            owner_id: projectile.owner_id.to_string(),
            x: projectile.x,
            y: projectile.y,
            rot: projectile.heading,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SimStateDto {
    Running,
    Paused,
    GameOver,
}

impl From<SimState> for SimStateDto {
    fn from(state: SimState) -> Self {
        match state {
            SimState::Running => SimStateDto::Running,
            SimState::Paused => SimStateDto::Paused,
            SimState::GameOver => SimStateDto::GameOver,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TankId;

    #[test]
    fn when_input_frame_is_parsed_then_keys_and_intents_map_to_player_input() {
        let raw = r#"{"type":"Input","data":{"right":true,"intents":[{"kind":"primary"},{"kind":"pointer_moved","dx":3.0,"dy":-4.0}]}}"#;
        let message: InputMessage = serde_json::from_str(raw).expect("valid frame");

        let GameEvent::Input(input) = GameEvent::from(message) else {
            panic!("expected an input event");
        };
        assert!(input.keys.right);
        assert!(!input.keys.left);
        assert_eq!(
            input.intents,
            vec![
                PlayerIntent::Primary,
                PlayerIntent::PointerMoved(Vec2::new(3.0, -4.0))
            ]
        );
    }

    #[test]
    fn when_pause_message_is_parsed_then_it_maps_to_pause_event() {
        let message: InputMessage =
            serde_json::from_str(r#"{"type":"Pause"}"#).expect("valid message");
        assert!(matches!(GameEvent::from(message), GameEvent::Pause));
    }

    #[test]
    fn when_world_update_is_serialized_then_it_is_tagged_and_flattened() {
        let update = WorldUpdate {
            tick: 7,
            state: SimState::Running,
            tanks: vec![TankSnapshot {
                id: TankId(1),
                kind: TankKind::Player,
                x: 10.0,
                y: 20.0,
                hull: -180.0,
                barrel: 90.0,
                health: 0.5,
                alive: true,
            }],
            projectiles: Vec::new(),
            aim_cursor: None,
        };

        let message = SimMessage::WorldUpdate(update.into());
        let json = serde_json::to_value(&message).expect("serializable");
        assert_eq!(json["type"], "WorldUpdate");
        assert_eq!(json["data"]["tick"], 7);
        assert_eq!(json["data"]["state"], "Running");
        assert_eq!(json["data"]["tanks"][0]["id"], "tank-1");
        assert_eq!(json["data"]["tanks"][0]["kind"], "player");
        assert!(json["data"].get("aim_cursor").is_none());
    }
}
