//! Movement domain: kinematic displacement resolution.
//!
//! Takes the intended per-frame displacement, casts a grid of rays against
//! the level geometry and returns a corrected displacement that respects
//! solid surfaces, walkable slopes and one-way platforms. Horizontal motion
//! is resolved first; vertical rays then originate from the post-horizontal
//! x position, and a ceiling hit while climbing re-perturbs x.

use bevy::math::Vec2;

use crate::movement::raycast::{RayGrid, RayHit, Raycaster, SurfaceKind};

/// Angle (degrees) at which a surface stops being a slope and becomes a wall.
pub const WALL_ANGLE: f32 = 90.0;

/// Tolerance for classifying a sampled angle as exactly vertical.
const ANGLE_EPSILON: f32 = 1e-3;

/// Which sides of the character touched something this call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CollisionFlags {
    pub above: bool,
    pub below: bool,
    pub left: bool,
    pub right: bool,
}

/// Most recently sampled surface for the current call.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SlopeContact {
    /// Degrees from horizontal: 0 = flat ground, 90 = vertical wall.
    pub angle: f32,
    pub normal: Vec2,
    pub is_wall: bool,
}

impl SlopeContact {
    fn record(&mut self, angle: f32, normal: Vec2) {
        self.angle = angle;
        self.normal = normal;
        if (angle - WALL_ANGLE).abs() < ANGLE_EPSILON {
            self.is_wall = true;
        }
    }
}

/// Whether a sampled angle is at or past vertical.
///
/// Derived angles land a few ulps either side of 90 for an exactly vertical
/// normal, so the slope-projection guards share this tolerance; tan is never
/// evaluated at or beyond this boundary.
fn at_or_past_wall(angle: f32) -> bool {
    angle >= WALL_ANGLE - ANGLE_EPSILON
}

/// Outcome of a single resolve call.
///
/// Built fresh at the top of every call and returned, so no transient flag
/// can leak between frames through an early-out path.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Resolution {
    /// Corrected displacement, to be applied as the actual translation.
    pub displacement: Vec2,
    pub collisions: CollisionFlags,
    pub slope: SlopeContact,
    pub climbing_slope: bool,
    pub descending_slope: bool,
    pub sliding_max_slope: bool,
}

/// The resolver proper.
///
/// The only state that outlives a call is the facing direction and the
/// drop-through expiry; everything else lives in the returned [`Resolution`].
#[derive(Debug, Clone)]
pub struct KinematicResolver {
    /// Steepest angle (degrees) still treated as walkable ground.
    pub max_slope_angle: f32,
    /// Seconds a one-way platform stays passable after a drop request.
    pub drop_through_delay: f32,
    face_direction: f32,
    drop_through_until: Option<f32>,
}

impl KinematicResolver {
    pub fn new(max_slope_angle: f32, drop_through_delay: f32) -> Self {
        Self {
            max_slope_angle,
            drop_through_delay,
            face_direction: 1.0,
            drop_through_until: None,
        }
    }

    /// Last movement direction (±1). Only updated on nonzero horizontal intent.
    pub fn face_direction(&self) -> f32 {
        self.face_direction
    }

    /// Whether a drop through a one-way platform is still in progress at `now`.
    pub fn falling_through_platform(&self, now: f32) -> bool {
        self.drop_through_until.is_some_and(|until| now < until)
    }

    /// Resolve `intent` against the world and return the corrected outcome.
    ///
    /// `input` carries the caller's raw axis input; a fully held down axis
    /// (`input.y <= -1`) requests a drop through one-way platforms.
    /// `standing_on_platform` forces the below flag for characters carried by
    /// a collider the rays might miss this frame. `now` is the caller's clock
    /// in seconds, used only for the drop-through window.
    pub fn resolve<R: Raycaster>(
        &mut self,
        rays: &R,
        grid: &RayGrid,
        intent: Vec2,
        input: Vec2,
        standing_on_platform: bool,
        now: f32,
    ) -> Resolution {
        // An expired drop window is cleared here, so a stale expiry is a
        // safe no-op even if several calls passed since it was armed.
        if self.drop_through_until.is_some_and(|until| now >= until) {
            self.drop_through_until = None;
        }

        let mut out = Resolution {
            displacement: intent,
            ..Default::default()
        };

        if out.displacement.y < 0.0 {
            self.descend_slope(rays, grid, &mut out);
        }

        if out.displacement.x != 0.0 {
            self.face_direction = out.displacement.x.signum();
        }

        self.horizontal_collisions(rays, grid, &mut out);
        if out.displacement.y != 0.0 {
            self.vertical_collisions(rays, grid, input, now, &mut out);
            // Probe the slope ahead so an angle change doesn't stagger
            // the climb on the next frame.
            if out.climbing_slope {
                self.check_slope_change(rays, grid, &mut out);
            }
        }

        if standing_on_platform {
            out.collisions.below = true;
        }

        out
    }

    fn horizontal_collisions<R: Raycaster>(
        &self,
        rays: &R,
        grid: &RayGrid,
        out: &mut Resolution,
    ) {
        let direction_x = self.face_direction;
        let mut ray_length = out.displacement.x.abs() + grid.skin_width;

        // Even a sub-skin move still probes for adjacent contact.
        if out.displacement.x.abs() < grid.skin_width {
            ray_length = 2.0 * grid.skin_width;
        }

        for i in 0..grid.horizontal_ray_count {
            let origin = if direction_x == -1.0 {
                grid.bottom_left
            } else {
                grid.bottom_right
            } + Vec2::Y * (grid.horizontal_ray_spacing * i as f32);

            let Some(hit) = rays.cast(origin, Vec2::X * direction_x, ray_length) else {
                continue;
            };

            // Already inside the skin margin from a previous frame.
            if hit.distance == 0.0 {
                continue;
            }

            let slope_angle = surface_angle(hit.normal);
            out.slope.record(slope_angle, hit.normal);

            // Only the lowest ray is authoritative for the ground ahead; a
            // higher ray grazing an overhang must not start a climb.
            if i == 0 && slope_angle <= self.max_slope_angle {
                if out.descending_slope {
                    out.descending_slope = false;
                }
                self.climb_slope(out, slope_angle, hit.normal);
            }

            if !out.climbing_slope || slope_angle > self.max_slope_angle {
                out.displacement.x = (hit.distance - grid.skin_width) * direction_x;
                // Later rays may not push movement past the closest hit.
                ray_length = hit.distance;

                // Keep y consistent with the clipped x while on a slope,
                // tan(angle) = opposite / adjacent. At the wall angle there
                // is no slope to project onto.
                if out.climbing_slope && !at_or_past_wall(out.slope.angle) {
                    out.displacement.y =
                        out.slope.angle.to_radians().tan() * out.displacement.x.abs();
                }

                out.collisions.left = direction_x == -1.0;
                out.collisions.right = direction_x == 1.0;
            }
        }
    }

    fn vertical_collisions<R: Raycaster>(
        &mut self,
        rays: &R,
        grid: &RayGrid,
        input: Vec2,
        now: f32,
        out: &mut Resolution,
    ) {
        let direction_y = out.displacement.y.signum();
        let mut ray_length = out.displacement.y.abs() + grid.skin_width;

        for i in 0..grid.vertical_ray_count {
            // Vertical rays start from where the horizontal pass left us.
            let origin = if direction_y == -1.0 {
                grid.bottom_left
            } else {
                grid.top_left
            } + Vec2::X * (grid.vertical_ray_spacing * i as f32 + out.displacement.x);

            let Some(hit) = rays.cast(origin, Vec2::Y * direction_y, ray_length) else {
                continue;
            };

            // Already inside the skin margin from a previous frame.
            if hit.distance == 0.0 {
                continue;
            }

            if hit.surface == SurfaceKind::Through {
                // Passable from below, and while already dropping through.
                if direction_y == 1.0 {
                    continue;
                }
                if self.falling_through_platform(now) {
                    continue;
                }
                if input.y <= -1.0 {
                    // Arm once; a repeat request while the window is open
                    // never reaches this branch.
                    self.drop_through_until = Some(now + self.drop_through_delay);
                    continue;
                }
            }

            out.displacement.y = (hit.distance - grid.skin_width) * direction_y;
            ray_length = hit.distance;

            // Ceiling-limited climb: pull x back so it matches the clipped y.
            if out.climbing_slope && out.slope.angle > 0.0 && !at_or_past_wall(out.slope.angle) {
                out.displacement.x = out.displacement.y / out.slope.angle.to_radians().tan()
                    * out.displacement.x.signum();
            }

            out.collisions.below = direction_y == -1.0;
            out.collisions.above = direction_y == 1.0;
        }
    }

    /// Re-project the horizontal intent onto an ascending walkable slope.
    ///
    /// The intended |x| is the distance travelled along the surface, so
    /// y = sin(angle) * distance and x = cos(angle) * distance.
    fn climb_slope(&self, out: &mut Resolution, slope_angle: f32, slope_normal: Vec2) {
        let move_distance = out.displacement.x.abs();
        let climb_y = slope_angle.to_radians().sin() * move_distance;

        // A jump already rising faster than the climb wins.
        if out.displacement.y <= climb_y {
            out.displacement.y = climb_y;
            out.displacement.x =
                slope_angle.to_radians().cos() * move_distance * out.displacement.x.signum();
            out.collisions.below = true;
            out.climbing_slope = true;
            out.slope.record(slope_angle, slope_normal);
        }
    }

    /// Fire one extra ray from the post-climb position to catch a change in
    /// slope angle before the next frame overshoots into it.
    fn check_slope_change<R: Raycaster>(&self, rays: &R, grid: &RayGrid, out: &mut Resolution) {
        let direction_x = out.displacement.x.signum();
        let ray_length = out.displacement.x.abs() + grid.skin_width;
        let origin = if direction_x == -1.0 {
            grid.bottom_left
        } else {
            grid.bottom_right
        } + Vec2::Y * out.displacement.y;

        let Some(hit) = rays.cast(origin, Vec2::X * direction_x, ray_length) else {
            return;
        };

        let slope_angle = surface_angle(hit.normal);
        if slope_angle != out.slope.angle {
            out.displacement.x = (hit.distance - grid.skin_width) * direction_x;
        }
        out.slope.record(slope_angle, hit.normal);
    }

    fn descend_slope<R: Raycaster>(&self, rays: &R, grid: &RayGrid, out: &mut Resolution) {
        let probe_length = out.displacement.y.abs() + grid.skin_width;
        let hit_left = rays.cast(grid.bottom_left, Vec2::NEG_Y, probe_length);
        let hit_right = rays.cast(grid.bottom_right, Vec2::NEG_Y, probe_length);

        // Exactly one corner over ground means we're at the edge of a steep
        // drop; check that side for an unwalkable face to slide down.
        if hit_left.is_some() != hit_right.is_some() {
            if let Some(hit) = &hit_left {
                self.slide_down_max_slope(hit, out);
            }
            if let Some(hit) = &hit_right {
                self.slide_down_max_slope(hit, out);
            }
        }

        if out.sliding_max_slope {
            return;
        }

        // Probe below the trailing corner for a walkable slope to follow.
        let direction_x = out.displacement.x.signum();
        let origin = if direction_x == -1.0 {
            grid.bottom_right
        } else {
            grid.bottom_left
        };
        let Some(hit) = rays.cast(origin, Vec2::NEG_Y, f32::INFINITY) else {
            return;
        };

        let slope_angle = surface_angle(hit.normal);
        out.slope.record(slope_angle, hit.normal);

        let descending = slope_angle != 0.0
            && slope_angle <= self.max_slope_angle
            && hit.normal.x.signum() == direction_x
            && hit.distance - grid.skin_width
                <= slope_angle.to_radians().tan() * out.displacement.x.abs();

        if descending {
            let move_distance = out.displacement.x.abs();
            let descend_y = slope_angle.to_radians().sin() * move_distance;
            out.displacement.x = slope_angle.to_radians().cos() * move_distance * direction_x;
            out.displacement.y -= descend_y;

            out.descending_slope = true;
            out.collisions.below = true;
        }
    }

    /// Slide distance grows with how far past the slope edge we have fallen,
    /// so an unwalkable face can't be climbed while falling along it.
    fn slide_down_max_slope(&self, hit: &RayHit, out: &mut Resolution) {
        let slope_angle = surface_angle(hit.normal);
        out.slope.record(slope_angle, hit.normal);

        // At the wall angle there is nothing to slide along; the axis clip
        // handles it (and tan would blow up).
        if slope_angle > self.max_slope_angle && !at_or_past_wall(slope_angle) {
            out.displacement.x = hit.normal.x.signum()
                * (out.displacement.y.abs() - hit.distance)
                / slope_angle.to_radians().tan();
            out.sliding_max_slope = true;
        }
    }
}

/// Angle in degrees between a surface normal and world up.
fn surface_angle(normal: Vec2) -> f32 {
    normal.angle_to(Vec2::Y).abs().to_degrees()
}
