//! Debug overlay: draws the controller's ray fans with gizmos.
//!
//! Green rays hit something last frame, red rays found nothing.
//! Toggled with F3; compiled behind the `dev-tools` feature.

use avian2d::prelude::*;
use bevy::color::palettes::basic::{GREEN, RED};
use bevy::prelude::*;

use crate::movement::{ControllerState, ControllerTuning, Player, RayGrid};

#[derive(Resource, Debug, Default)]
pub struct DebugState {
    pub rays_visible: bool,
}

pub struct DebugPlugin;

impl Plugin for DebugPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DebugState>()
            .add_systems(Update, (toggle_overlay, draw_ray_grid).chain());
    }
}

fn toggle_overlay(keyboard: Res<ButtonInput<KeyCode>>, mut state: ResMut<DebugState>) {
    if keyboard.just_pressed(KeyCode::F3) {
        state.rays_visible = !state.rays_visible;
        info!(
            "Ray overlay: {}",
            if state.rays_visible { "on" } else { "off" }
        );
    }
}

fn draw_ray_grid(
    state: Res<DebugState>,
    tuning: Res<ControllerTuning>,
    mut gizmos: Gizmos,
    query: Query<(&Transform, &Collider, &ControllerState), With<Player>>,
) {
    if !state.rays_visible {
        return;
    }

    for (transform, collider, controller) in &query {
        let Some(cuboid) = collider.shape_scaled().as_cuboid() else {
            continue;
        };
        let half = Vec2::new(cuboid.half_extents.x, cuboid.half_extents.y);
        let grid = RayGrid::from_bounds(
            Rect::from_center_half_size(transform.translation.truncate(), half),
            tuning.skin_width,
            tuning.horizontal_ray_count,
            tuning.vertical_ray_count,
        );

        let last = &controller.last;
        let face = controller.resolver.face_direction();

        let h_len = last.displacement.x.abs().max(tuning.skin_width) + tuning.skin_width;
        let h_color = if last.collisions.left || last.collisions.right {
            GREEN
        } else {
            RED
        };
        for i in 0..grid.horizontal_ray_count {
            let origin = if face < 0.0 {
                grid.bottom_left
            } else {
                grid.bottom_right
            } + Vec2::Y * (grid.horizontal_ray_spacing * i as f32);
            gizmos.line_2d(origin, origin + Vec2::X * face * h_len, h_color);
        }

        let dir_y = if last.displacement.y >= 0.0 { 1.0 } else { -1.0 };
        let v_len = last.displacement.y.abs() + tuning.skin_width;
        let v_color = if last.collisions.above || last.collisions.below {
            GREEN
        } else {
            RED
        };
        for i in 0..grid.vertical_ray_count {
            let origin = if dir_y < 0.0 {
                grid.bottom_left
            } else {
                grid.top_left
            } + Vec2::X * (grid.vertical_ray_spacing * i as f32 + last.displacement.x);
            gizmos.line_2d(origin, origin + Vec2::Y * dir_y * v_len, v_color);
        }
    }
}
