// Framework bootstrap for the headless simulation runner.

use crate::domain::tuning::{PlayerTuning, ProjectileTuning, ShooterTuning};
use crate::frameworks::config::{self, InputSource};
use crate::interface_adapters::effects::{LoggingEffects, LoggingScene};
use crate::interface_adapters::output::snapshot_writer;
use crate::interface_adapters::physics::{ArcadeConfig, ArcadeStepper, ArenaBounds};
use crate::interface_adapters::pilot::{ScriptedPilot, line_input_task, pilot_task};
use crate::use_cases::{
    Battlefield, GameEvent, SimState, WorldPorts, WorldSettings, WorldUpdate, world_task,
};

use glam::Vec2;
use std::{io::Result, sync::Arc};
use tokio::sync::{Notify, broadcast, mpsc, watch};

// Square legs and fire cadence of the scripted pilot, in ticks.
const PILOT_LEG_TICKS: u64 = 90;
const PILOT_FIRE_EVERY: u64 = 12;

fn init_runtime() {
    let _ = dotenvy::dotenv();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    // Logs go to stderr; stdout carries the JSON-lines snapshots.
    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .json()
            .with_current_span(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .compact()
            .init();
    }

    std::panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::capture();
        tracing::error!(%info, ?backtrace, "panic");
    }));
}

/// Places the player low in the arena and spreads shooters across the top.
pub fn build_battlefield(
    arena: Vec2,
    shooters: usize,
    player: &PlayerTuning,
    shooter: &ShooterTuning,
    projectiles: ProjectileTuning,
) -> Battlefield {
    let mut battlefield = Battlefield::new(projectiles);
    battlefield.spawn_player(Vec2::new(arena.x * 0.5, arena.y * 0.75), player);
    for i in 0..shooters {
        let x = arena.x * (i + 1) as f32 / (shooters + 1) as f32;
        battlefield.spawn_shooter(Vec2::new(x, arena.y * 0.25), shooter);
    }
    battlefield
}

pub async fn run_with_config() -> Result<()> {
    init_runtime();

    let arena = config::arena_size();
    let player_tuning = PlayerTuning::default();
    let shooter_tuning = ShooterTuning::default();
    let projectile_tuning = ProjectileTuning::default();

    let settings = WorldSettings {
        tick_interval: config::tick_interval(),
        duration: config::sim_duration(),
        shooter: shooter_tuning,
    };
    let shooters = config::shooter_count();
    tracing::info!(
        tick_ms = settings.tick_interval.as_millis() as u64,
        duration_ms = settings.duration.as_millis() as u64,
        shooters,
        arena_width = arena.x,
        arena_height = arena.y,
        "starting simulation"
    );

    let battlefield = build_battlefield(
        arena,
        shooters,
        &player_tuning,
        &shooter_tuning,
        projectile_tuning,
    );
    let physics = ArcadeStepper::new(ArcadeConfig::new(
        ArenaBounds::from_size(arena),
        &player_tuning,
        &shooter_tuning,
        &projectile_tuning,
    ));

    // Setup Channels
    // input_tx/rx: pilot or stdin frames go to the single world task.
    let (input_tx, input_rx) = mpsc::channel::<GameEvent>(config::INPUT_CHANNEL_CAPACITY);
    // world_tx/rx: world updates fan out to the writer and the pilot.
    let (world_tx, world_rx) = broadcast::channel::<WorldUpdate>(config::WORLD_BROADCAST_CAPACITY);
    let (state_tx, _state_rx) = watch::channel::<SimState>(SimState::Running);
    let shutdown = Arc::new(Notify::new());

    let writer = tokio::spawn(snapshot_writer(
        world_rx,
        config::snapshot_every(),
        tokio::io::stdout(),
    ));

    let input = match config::input_source() {
        InputSource::Scripted => tokio::spawn(pilot_task(
            ScriptedPilot::new(PILOT_LEG_TICKS, PILOT_FIRE_EVERY),
            world_tx.subscribe(),
            input_tx,
        )),
        InputSource::Stdin => tokio::spawn(line_input_task(tokio::io::stdin(), input_tx)),
    };

    let ctrl_c_shutdown = shutdown.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                tracing::info!("ctrl-c received");
                ctrl_c_shutdown.notify_one();
            }
            Err(e) => tracing::error!(error = %e, "failed to listen for ctrl-c"),
        }
    });

    let world = tokio::spawn(world_task(
        battlefield,
        input_rx,
        world_tx,
        state_tx,
        settings,
        WorldPorts {
            physics,
            scene: LoggingScene::default(),
            effects: LoggingEffects,
        },
        shutdown,
    ));

    let battlefield = world
        .await
        .inspect_err(|e| tracing::error!(error = %e, "world task failed"))
        .map_err(std::io::Error::other)?;
    // Stdin reads block until the next line; the pilot exits on its own.
    input.abort();

    // The world channel closed with the task; the writer drains and flushes.
    writer
        .await
        .map_err(std::io::Error::other)?
        .inspect_err(|e| tracing::error!(error = %e, "snapshot writer failed"))?;

    let snapshot = battlefield.snapshot();
    tracing::info!(
        ticks = battlefield.tick_count(),
        state = ?battlefield.state(),
        tanks = snapshot.tanks.len(),
        projectiles = snapshot.projectiles.len(),
        "simulation finished"
    );
    Ok(())
}
