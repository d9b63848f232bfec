//! Movement domain: raycast kinematic character controller.

mod components;
mod dev;
mod raycast;
mod resolver;
mod resources;
mod systems;

pub use components::{ControllerState, GameLayer, Ground, OneWayPlatform, Player};
pub use raycast::{RayGrid, RayHit, Raycaster, SurfaceKind};
pub use resolver::{CollisionFlags, KinematicResolver, Resolution, SlopeContact, WALL_ANGLE};
pub use resources::{ControllerTuning, MovementInput};

use bevy::prelude::*;

use crate::movement::systems::{apply_movement, read_input};

pub struct MovementPlugin;

impl Plugin for MovementPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ControllerTuning>()
            .init_resource::<MovementInput>()
            .add_systems(Startup, (dev::spawn_player, dev::spawn_test_room))
            .add_systems(Update, (read_input, apply_movement).chain());
    }
}
