//! Movement domain: tuning and input resources.

use bevy::prelude::*;
use serde::Deserialize;

#[derive(Resource, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ControllerTuning {
    /// Steepest angle (degrees) still treated as walkable ground
    pub max_slope_angle: f32,
    /// Inward margin between the collider edge and detected surfaces
    pub skin_width: f32,
    pub horizontal_ray_count: u32,
    pub vertical_ray_count: u32,
    pub move_speed: f32,
    pub gravity: f32,
    pub jump_velocity: f32,
    /// Seconds a one-way platform stays passable after a drop request
    pub drop_through_delay: f32,
}

impl Default for ControllerTuning {
    fn default() -> Self {
        Self {
            max_slope_angle: 80.0,
            skin_width: 1.0,
            horizontal_ray_count: 4,
            vertical_ray_count: 4,
            move_speed: 180.0,
            gravity: 900.0,
            jump_velocity: 420.0,
            drop_through_delay: 0.5,
        }
    }
}

#[derive(Resource, Debug, Default)]
pub struct MovementInput {
    pub axis: Vec2,
    pub jump_just_pressed: bool,
}
