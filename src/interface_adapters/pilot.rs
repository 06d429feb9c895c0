// Input sources for the headless runner: a scripted pilot that drives the
// player from world updates, and a JSON-lines reader for external input.

use super::protocol::InputMessage;
use crate::domain::{DirectionKeys, PlayerInput, PlayerIntent, TankKind, TankSnapshot};
use crate::use_cases::{GameEvent, WorldUpdate};
use glam::Vec2;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::sync::{broadcast, mpsc};
use tracing::{debug, info, warn};

/// Drives a square pattern and keeps the cursor on the nearest live shooter.
#[derive(Debug, Clone)]
pub struct ScriptedPilot {
    leg_ticks: u64,
    fire_every: u64,
    locked: bool,
}

impl ScriptedPilot {
    pub fn new(leg_ticks: u64, fire_every: u64) -> Self {
        Self {
            leg_ticks: leg_ticks.max(1),
            fire_every: fire_every.max(1),
            locked: false,
        }
    }

    /// Builds the input frame that answers `update`.
    pub fn frame(&mut self, update: &WorldUpdate) -> PlayerInput {
        let mut intents = Vec::new();
        let Some(player) = update
            .tanks
            .iter()
            .find(|t| t.kind == TankKind::Player && t.alive)
        else {
            return PlayerInput::default();
        };

        // The first primary only locks aiming.
        if !self.locked {
            intents.push(PlayerIntent::Primary);
            self.locked = true;
        }

        if let (Some(cursor), Some(target)) = (update.aim_cursor, nearest_shooter(player, update)) {
            let delta = target - cursor;
            if delta != Vec2::ZERO {
                intents.push(PlayerIntent::PointerMoved(delta));
            }
        }

        if update.tick % self.fire_every == 0 {
            intents.push(PlayerIntent::Primary);
        }

        PlayerInput {
            keys: self.keys(update.tick),
            intents,
        }
    }

    fn keys(&self, tick: u64) -> DirectionKeys {
        let mut keys = DirectionKeys::default();
        match (tick / self.leg_ticks) % 4 {
            0 => keys.right = true,
            1 => keys.down = true,
            2 => keys.left = true,
            _ => keys.up = true,
        }
        keys
    }
}

fn nearest_shooter(player: &TankSnapshot, update: &WorldUpdate) -> Option<Vec2> {
    let origin = Vec2::new(player.x, player.y);
    update
        .tanks
        .iter()
        .filter(|t| t.kind == TankKind::Shooter && t.alive)
        .map(|t| Vec2::new(t.x, t.y))
        .min_by(|a, b| {
            a.distance_squared(origin)
                .total_cmp(&b.distance_squared(origin))
        })
}

pub async fn pilot_task(
    mut pilot: ScriptedPilot,
    mut world_rx: broadcast::Receiver<WorldUpdate>,
    input_tx: mpsc::Sender<GameEvent>,
) {
    loop {
        match world_rx.recv().await {
            Ok(update) => {
                let frame = pilot.frame(&update);
                if input_tx.send(GameEvent::Input(frame)).await.is_err() {
                    debug!("input channel closed; pilot exiting");
                    break;
                }
            }
            Err(broadcast::error::RecvError::Lagged(n)) => {
                warn!(missed = n, "pilot lagged; skipping to latest update");
            }
            Err(broadcast::error::RecvError::Closed) => {
                debug!("world updates channel closed; pilot exiting");
                break;
            }
        }
    }
}

/// Reads one JSON `InputMessage` per line and forwards it to the world task.
pub async fn line_input_task<R>(reader: R, input_tx: mpsc::Sender<GameEvent>)
where
    R: AsyncRead + Unpin,
{
    let mut lines = BufReader::new(reader).lines();
    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => {
                info!("input stream ended");
                break;
            }
            Err(e) => {
                warn!(error = %e, "failed to read input line");
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        let message: InputMessage = match serde_json::from_str(&line) {
            Ok(message) => message,
            Err(e) => {
                warn!(error = %e, "ignoring malformed input line");
                continue;
            }
        };
        if input_tx.send(message.into()).await.is_err() {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TankId;
    use crate::use_cases::SimState;

    fn tank(id: u64, kind: TankKind, x: f32, y: f32) -> TankSnapshot {
        TankSnapshot {
            id: TankId(id),
            kind,
            x,
            y,
            hull: 0.0,
            barrel: 0.0,
            health: 1.0,
            alive: true,
        }
    }

    fn update(tick: u64, cursor: Vec2) -> WorldUpdate {
        WorldUpdate {
            tick,
            state: SimState::Running,
            tanks: vec![
                tank(1, TankKind::Player, 100.0, 100.0),
                tank(2, TankKind::Shooter, 400.0, 100.0),
                tank(3, TankKind::Shooter, 150.0, 300.0),
            ],
            projectiles: Vec::new(),
            aim_cursor: Some(cursor),
        }
    }

    #[test]
    fn when_first_update_arrives_then_pilot_locks_and_aims_at_nearest_shooter() {
        let mut pilot = ScriptedPilot::new(60, 10);
        let frame = pilot.frame(&update(1, Vec2::new(100.0, 100.0)));

        assert!(frame.keys.right);
        assert_eq!(
            frame.intents,
            vec![
                PlayerIntent::Primary,
                PlayerIntent::PointerMoved(Vec2::new(50.0, 200.0))
            ]
        );
    }

    #[test]
    fn when_fire_tick_comes_around_then_pilot_sends_primary_without_relocking() {
        let mut pilot = ScriptedPilot::new(60, 10);
        pilot.frame(&update(1, Vec2::new(100.0, 100.0)));

        let frame = pilot.frame(&update(10, Vec2::new(150.0, 300.0)));
        assert_eq!(frame.intents, vec![PlayerIntent::Primary]);
    }

    #[test]
    fn when_legs_elapse_then_pilot_drives_a_square() {
        let pilot = ScriptedPilot::new(10, 10);
        assert!(pilot.keys(5).right);
        assert!(pilot.keys(15).down);
        assert!(pilot.keys(25).left);
        assert!(pilot.keys(35).up);
        assert!(pilot.keys(45).right);
    }

    #[tokio::test]
    async fn when_input_lines_are_read_then_valid_ones_are_forwarded() {
        let raw = b"{\"type\":\"Input\",\"data\":{\"up\":true}}\nnot json\n\n{\"type\":\"Resume\"}\n";
        let (input_tx, mut input_rx) = mpsc::channel(8);

        line_input_task(&raw[..], input_tx).await;

        match input_rx.recv().await {
            Some(GameEvent::Input(input)) => assert!(input.keys.up),
            other => panic!("unexpected event: {other:?}"),
        }
        assert!(matches!(input_rx.recv().await, Some(GameEvent::Resume)));
        assert!(input_rx.recv().await.is_none());
    }
}
