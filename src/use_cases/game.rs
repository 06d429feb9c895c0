use super::battlefield::Battlefield;
use super::types::{CollisionProbe, GameEvent, SimState, TickInputs, WorldUpdate};
use crate::domain::ports::{CosmeticEffects, PhysicsStepper, SceneLifecycle};
use crate::domain::tuning::ShooterTuning;
use crate::domain::{PlayerInput, ShooterInput, TankId, YoyoPatrol};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Notify, broadcast, mpsc, watch};
use tracing::{debug, info};

#[derive(Debug, Clone, Copy)]
pub struct WorldSettings {
    pub tick_interval: Duration,
    // Zero runs until shutdown.
    pub duration: Duration,
    pub shooter: ShooterTuning,
}

/// Collaborators the world task owns for its lifetime.
pub struct WorldPorts<P, L, E> {
    pub physics: P,
    pub scene: L,
    pub effects: E,
}

pub async fn world_task<P, L, E>(
    mut battlefield: Battlefield,
    mut input_rx: mpsc::Receiver<GameEvent>,
    world_tx: broadcast::Sender<WorldUpdate>,
    state_tx: watch::Sender<SimState>,
    settings: WorldSettings,
    mut ports: WorldPorts<P, L, E>,
    shutdown: Arc<Notify>,
) -> Battlefield
where
    P: PhysicsStepper + CollisionProbe,
    L: SceneLifecycle,
    E: CosmeticEffects,
{
    let mut patrols: HashMap<TankId, YoyoPatrol> = battlefield
        .shooters()
        .iter()
        .map(|s| (s.id(), YoyoPatrol::from_tuning(&settings.shooter)))
        .collect();

    // Keys are held state and persist across ticks; intents are consumed once.
    let mut player = PlayerInput::default();
    let mut elapsed = Duration::ZERO;
    let mut last_state = battlefield.state();
    let _ = state_tx.send(last_state);

    // Drive the fixed-step loop at the configured tick rate.
    let mut interval = tokio::time::interval(settings.tick_interval);

    loop {
        tokio::select! {
            _ = shutdown.notified() => {
                info!(tick = battlefield.tick_count(), "world task shutting down");
                break;
            }
            _ = interval.tick() => {}
        }

        while let Ok(ev) = input_rx.try_recv() {
            match ev {
                GameEvent::Input(frame) => {
                    player.keys = frame.keys;
                    player.intents.extend(frame.intents);
                }
                GameEvent::Physics(event) => battlefield.report(event),
                GameEvent::Pause => battlefield.pause(),
                GameEvent::Resume => {
                    if !battlefield.resume() {
                        debug!("resume ignored");
                    }
                }
            }
        }

        let mut inputs = TickInputs {
            player: PlayerInput {
                keys: player.keys,
                intents: std::mem::take(&mut player.intents),
            },
            ..TickInputs::default()
        };
        if battlefield.state() == SimState::Running {
            for (id, patrol) in &mut patrols {
                inputs.shooters.insert(
                    *id,
                    ShooterInput {
                        velocity: patrol.advance(settings.tick_interval),
                    },
                );
            }
        }

        let report = battlefield.step(
            settings.tick_interval,
            &inputs,
            &mut ports.physics,
            &mut ports.scene,
            &mut ports.effects,
        );

        if report.advanced {
            for tank in &report.despawned {
                patrols.remove(tank);
            }

            let update = battlefield.snapshot();
            for event in ports.physics.probe(&update) {
                battlefield.report(event);
            }
            let _ = world_tx.send(update);
        }

        let state = battlefield.state();
        if state != last_state {
            info!(tick = battlefield.tick_count(), ?state, "simulation state changed");
            let _ = state_tx.send(state);
            last_state = state;
        }
        if state == SimState::GameOver {
            break;
        }

        elapsed += settings.tick_interval;
        if !settings.duration.is_zero() && elapsed >= settings.duration {
            info!(
                tick = battlefield.tick_count(),
                elapsed_ms = elapsed.as_millis() as u64,
                "simulation duration reached"
            );
            break;
        }
    }

    battlefield
}
