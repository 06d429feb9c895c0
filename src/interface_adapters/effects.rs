// Log-only scene and effects sinks for the headless runner.

use crate::domain::TankId;
use crate::domain::ports::{CosmeticEffects, SceneLifecycle};
use tracing::{debug, info};

#[derive(Debug, Default)]
pub struct LoggingScene {
    deaths: usize,
}

impl LoggingScene {
    pub fn deaths(&self) -> usize {
        self.deaths
    }
}

impl SceneLifecycle for LoggingScene {
    fn on_death(&mut self, tank: TankId) {
        self.deaths += 1;
        info!(tank_id = tank.0, deaths = self.deaths, "scene: tank died");
    }

    fn on_game_over(&mut self) {
        info!("scene: game over");
    }
}

#[derive(Debug, Default)]
pub struct LoggingEffects;

impl CosmeticEffects for LoggingEffects {
    fn request_shake(&mut self) {
        debug!("effect: camera shake");
    }

    fn request_flash(&mut self) {
        debug!("effect: muzzle flash");
    }
}
