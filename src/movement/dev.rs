//! Movement domain: player and test-room spawn helpers.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::movement::components::{ControllerState, GameLayer, Ground, OneWayPlatform, Player};
use crate::movement::resolver::KinematicResolver;
use crate::movement::resources::ControllerTuning;

pub(crate) fn spawn_player(mut commands: Commands, tuning: Res<ControllerTuning>) {
    commands.spawn((
        Player,
        ControllerState::new(KinematicResolver::new(
            tuning.max_slope_angle,
            tuning.drop_through_delay,
        )),
        Sprite {
            color: Color::srgb(0.9, 0.9, 0.9),
            custom_size: Some(Vec2::new(24.0, 48.0)),
            ..default()
        },
        Transform::from_xyz(0.0, 100.0, 0.0),
        // The body is kinematic: avian only supplies colliders and spatial
        // queries, all motion goes through the resolver.
        (
            RigidBody::Kinematic,
            Collider::rectangle(24.0, 48.0),
            CollisionLayers::new(GameLayer::Player, [GameLayer::Ground]),
        ),
    ));
}

pub(crate) fn spawn_test_room(mut commands: Commands) {
    let ground_color = Color::srgb(0.4, 0.5, 0.4);
    let wall_color = Color::srgb(0.3, 0.3, 0.4);
    let platform_color = Color::srgb(0.5, 0.4, 0.3);

    let ground_layers = CollisionLayers::new(GameLayer::Ground, [GameLayer::Player]);

    // Flat ground
    commands.spawn((
        Ground,
        Sprite {
            color: ground_color,
            custom_size: Some(Vec2::new(1400.0, 40.0)),
            ..default()
        },
        Transform::from_xyz(0.0, -220.0, 0.0),
        RigidBody::Static,
        Collider::rectangle(1400.0, 40.0),
        ground_layers,
    ));

    // Walkable 30 degree slope on the right
    commands.spawn((
        Ground,
        Sprite {
            color: ground_color,
            custom_size: Some(Vec2::new(400.0, 40.0)),
            ..default()
        },
        Transform::from_xyz(400.0, -130.0, 0.0)
            .with_rotation(Quat::from_rotation_z(30f32.to_radians())),
        RigidBody::Static,
        Collider::rectangle(400.0, 40.0),
        ground_layers,
    ));

    // Over-max 85 degree face: should slide, not climb
    commands.spawn((
        Ground,
        Sprite {
            color: wall_color,
            custom_size: Some(Vec2::new(300.0, 40.0)),
            ..default()
        },
        Transform::from_xyz(-450.0, -80.0, 0.0)
            .with_rotation(Quat::from_rotation_z(85f32.to_radians())),
        RigidBody::Static,
        Collider::rectangle(300.0, 40.0),
        ground_layers,
    ));

    // Vertical wall on the far left
    commands.spawn((
        Ground,
        Sprite {
            color: wall_color,
            custom_size: Some(Vec2::new(40.0, 400.0)),
            ..default()
        },
        Transform::from_xyz(-680.0, 0.0, 0.0),
        RigidBody::Static,
        Collider::rectangle(40.0, 400.0),
        ground_layers,
    ));

    // One-way platforms, drop through with down
    for (x, y) in [(-150.0, -100.0), (-20.0, -10.0)] {
        commands.spawn((
            Ground,
            OneWayPlatform,
            Sprite {
                color: platform_color,
                custom_size: Some(Vec2::new(180.0, 12.0)),
                ..default()
            },
            Transform::from_xyz(x, y, 0.0),
            RigidBody::Static,
            Collider::rectangle(180.0, 12.0),
            ground_layers,
        ));
    }
}
