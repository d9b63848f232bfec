//! Movement domain: components and physics layers for the controller.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::movement::resolver::{KinematicResolver, Resolution};

/// Physics layers for collision filtering
#[derive(PhysicsLayer, Clone, Copy, Debug, Default)]
pub enum GameLayer {
    #[default]
    Default,
    /// Level geometry the controller collides with
    Ground,
    /// Player character
    Player,
}

#[derive(Component, Debug)]
pub struct Player;

/// Marker for solid level colliders
#[derive(Component, Debug)]
pub struct Ground;

/// Marker for one-way platforms: solid from above, passable from below or
/// via an explicit drop request
#[derive(Component, Debug)]
pub struct OneWayPlatform;

/// Per-character controller state: the persistent resolver plus the last
/// resolution snapshot, read by gameplay systems for grounding and jumps.
#[derive(Component, Debug)]
pub struct ControllerState {
    pub resolver: KinematicResolver,
    pub last: Resolution,
    pub velocity: Vec2,
    /// Set by carrier systems (moving platforms) to force grounding for one
    /// frame even when the rays miss the carrier collider.
    pub standing_on_platform: bool,
}

impl ControllerState {
    pub fn new(resolver: KinematicResolver) -> Self {
        Self {
            resolver,
            last: Resolution::default(),
            velocity: Vec2::ZERO,
            standing_on_platform: false,
        }
    }
}
