//! Movement domain: velocity integration and displacement resolution.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::movement::components::{ControllerState, GameLayer, OneWayPlatform, Player};
use crate::movement::raycast::RayGrid;
use crate::movement::resources::{ControllerTuning, MovementInput};
use crate::movement::systems::collisions::SpatialRaycaster;

pub(crate) fn apply_movement(
    time: Res<Time>,
    input: Res<MovementInput>,
    tuning: Res<ControllerTuning>,
    spatial_query: SpatialQuery,
    one_way: Query<Has<OneWayPlatform>>,
    mut query: Query<(&mut Transform, &Collider, &mut ControllerState), With<Player>>,
) {
    let dt = time.delta_secs();
    let now = time.elapsed_secs();

    for (mut transform, collider, mut state) in &mut query {
        let was_below = state.last.collisions.below;

        // A vertical contact last frame kills accumulated vertical speed.
        if state.last.collisions.above || state.last.collisions.below {
            state.velocity.y = 0.0;
        }

        state.velocity.x = input.axis.x * tuning.move_speed;
        if input.jump_just_pressed && state.last.collisions.below {
            state.velocity.y = tuning.jump_velocity;
            debug!("Jump: velocity.y={}", state.velocity.y);
        }
        state.velocity.y -= tuning.gravity * dt;

        let intent = state.velocity * dt;

        // The ray grid is rebuilt from the current bounds every frame.
        let half = match collider.shape_scaled().as_cuboid() {
            Some(c) => Vec2::new(c.half_extents.x, c.half_extents.y),
            None => Vec2::new(12.0, 24.0),
        };
        let bounds = Rect::from_center_half_size(transform.translation.truncate(), half);
        let grid = RayGrid::from_bounds(
            bounds,
            tuning.skin_width,
            tuning.horizontal_ray_count,
            tuning.vertical_ray_count,
        );

        let rays = SpatialRaycaster {
            query: &spatial_query,
            filter: SpatialQueryFilter::from_mask(GameLayer::Ground),
            one_way: &one_way,
        };

        let standing_on_platform = std::mem::take(&mut state.standing_on_platform);
        let resolution =
            state
                .resolver
                .resolve(&rays, &grid, intent, input.axis, standing_on_platform, now);

        transform.translation += resolution.displacement.extend(0.0);

        if resolution.collisions.below && !was_below {
            debug!(
                "Landed: slope_angle={}, sliding={}",
                resolution.slope.angle, resolution.sliding_max_slope
            );
        } else if !resolution.collisions.below && was_below {
            debug!("Left ground");
        }

        state.last = resolution;
    }
}
