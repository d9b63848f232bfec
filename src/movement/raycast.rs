//! Movement domain: raycast query abstraction and ray-grid geometry.

use bevy::math::{Rect, Vec2};

/// Surface category reported by the raycast backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SurfaceKind {
    #[default]
    Solid,
    /// One-way platform: solid from above, passable from below or on request.
    Through,
}

/// Nearest blocking surface along a ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub distance: f32,
    pub point: Vec2,
    pub normal: Vec2,
    pub surface: SurfaceKind,
}

/// Nearest-surface raycast capability.
///
/// The resolver only ever talks to the physics backend through this trait, so
/// tests can script hit sequences without a physics world.
pub trait Raycaster {
    fn cast(&self, origin: Vec2, direction: Vec2, max_distance: f32) -> Option<RayHit>;
}

impl<F> Raycaster for F
where
    F: Fn(Vec2, Vec2, f32) -> Option<RayHit>,
{
    fn cast(&self, origin: Vec2, direction: Vec2, max_distance: f32) -> Option<RayHit> {
        self(origin, direction, max_distance)
    }
}

/// Ray origins and spacings for one resolve call.
///
/// Derived from the character's world-space bounds shrunk inward by the skin
/// width, so rays start just inside the collider edge. Rebuilt before every
/// resolve call from the current transform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayGrid {
    pub bottom_left: Vec2,
    pub bottom_right: Vec2,
    pub top_left: Vec2,
    pub horizontal_ray_count: u32,
    pub vertical_ray_count: u32,
    pub horizontal_ray_spacing: f32,
    pub vertical_ray_spacing: f32,
    pub skin_width: f32,
}

impl RayGrid {
    pub fn from_bounds(
        bounds: Rect,
        skin_width: f32,
        horizontal_rays: u32,
        vertical_rays: u32,
    ) -> Self {
        let inset = bounds.inflate(-skin_width);

        // At least one ray per edge end, so spacing is always well defined.
        let horizontal_ray_count = horizontal_rays.max(2);
        let vertical_ray_count = vertical_rays.max(2);

        Self {
            bottom_left: inset.min,
            bottom_right: Vec2::new(inset.max.x, inset.min.y),
            top_left: Vec2::new(inset.min.x, inset.max.y),
            horizontal_ray_count,
            vertical_ray_count,
            horizontal_ray_spacing: inset.height() / (horizontal_ray_count - 1) as f32,
            vertical_ray_spacing: inset.width() / (vertical_ray_count - 1) as f32,
            skin_width,
        }
    }
}
