//! Content domain: controller tuning loaded from RON at startup.

mod loader;

pub use loader::TuningLoadError;

use bevy::prelude::*;
use std::path::Path;

use crate::movement::ControllerTuning;

const TUNING_PATH: &str = "assets/data/controller.ron";

pub struct ContentPlugin;

impl Plugin for ContentPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(PreStartup, load_tuning);
    }
}

fn load_tuning(mut tuning: ResMut<ControllerTuning>) {
    match loader::load_tuning(Path::new(TUNING_PATH)) {
        Ok(loaded) => {
            info!(
                "Loaded controller tuning: max_slope_angle={}, skin_width={}, rays={}x{}",
                loaded.max_slope_angle,
                loaded.skin_width,
                loaded.horizontal_ray_count,
                loaded.vertical_ray_count
            );
            *tuning = loaded;
        }
        Err(e) => warn!("{e}; using default tuning"),
    }
}
