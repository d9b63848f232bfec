//! Movement domain: avian2d spatial-query backend for the resolver.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::movement::components::OneWayPlatform;
use crate::movement::raycast::{RayHit, Raycaster, SurfaceKind};

/// [`Raycaster`] backed by avian2d's `SpatialQuery`.
///
/// Carries the collision-mask filter and resolves the one-way tag from the
/// hit entity's [`OneWayPlatform`] marker.
pub(crate) struct SpatialRaycaster<'a, 'w, 's> {
    pub query: &'a SpatialQuery<'w, 's>,
    pub filter: SpatialQueryFilter,
    pub one_way: &'a Query<'w, 's, Has<OneWayPlatform>>,
}

impl Raycaster for SpatialRaycaster<'_, '_, '_> {
    fn cast(&self, origin: Vec2, direction: Vec2, max_distance: f32) -> Option<RayHit> {
        let direction = Dir2::new(direction).ok()?;
        let max_distance = if max_distance.is_finite() {
            max_distance
        } else {
            f32::MAX
        };

        let hit = self
            .query
            .cast_ray(origin, direction, max_distance, true, &self.filter)?;

        let surface = if self.one_way.get(hit.entity).unwrap_or(false) {
            SurfaceKind::Through
        } else {
            SurfaceKind::Solid
        };

        Some(RayHit {
            distance: hit.distance,
            point: origin + *direction * hit.distance,
            normal: hit.normal,
            surface,
        })
    }
}
