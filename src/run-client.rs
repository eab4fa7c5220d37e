use bevy::{
    log::LogPlugin,
    prelude::*,
};

use lantern_rig::{
    client::{
        plugins::{FlickerPlugin, RigPlugin},
        systems::debug_toggles::{self, DebugKeys},
    },
    common::components::{
        camera_fx::{CameraFx, CameraFxConfig},
        flicker::{FlickerConfig, FlickerLight},
        keybits::RigKeys,
        rig::{Rig, RigConfig},
        Player,
    },
};

const EYE_HEIGHT: f32 = 1.6;
const LAMP_ENERGY: f32 = 60_000.;

fn setup(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let floor = materials.add(StandardMaterial {
        base_color: Color::srgb(0.35, 0.33, 0.3),
        perceptual_roughness: 1.,
        ..default()});
    let wall = materials.add(StandardMaterial {
        base_color: Color::srgb(0.55, 0.52, 0.48),
        perceptual_roughness: 0.9,
        ..default()});

    commands.spawn((
        Mesh3d(meshes.add(Plane3d::default().mesh().size(12., 12.))),
        MeshMaterial3d(floor),
        Transform::default()));

    // one box per heading so turns are visible
    let cube = meshes.add(Cuboid::new(1., 2., 1.));
    for position in [Vec3::new(0., 1., -5.), Vec3::new(5., 1., 0.), Vec3::new(0., 1., 5.), Vec3::new(-5., 1., 0.)] {
        commands.spawn((
            Mesh3d(cube.clone()),
            MeshMaterial3d(wall.clone()),
            Transform::from_translation(position)));
    }

    commands.spawn((
        PointLight {
            intensity: LAMP_ENERGY,
            shadows_enabled: true,
            ..default()},
        Transform::from_xyz(0., 2.8, -2.),
        FlickerLight::new(FlickerConfig {
            base_energy: LAMP_ENERGY,
            min_energy: LAMP_ENERGY * 0.05,
            ..default()
        }, rand::random())));

    commands.spawn((
        Transform::default(),
        Visibility::default(),
        Rig::new(Vec3::ZERO, 0.),
        RigConfig::default().sanitized(),
        RigKeys::default(),
        Player,
    )).with_children(|parent| {
        parent.spawn((
            Camera3d::default(),
            Transform::from_xyz(0., EYE_HEIGHT, 0.),
            CameraFx::new(CameraFxConfig::default(), rand::random()),
        ));
    });
}

fn main() {
    let mut app = App::new();
    app.add_plugins((DefaultPlugins
        .set(LogPlugin {
            level: bevy::log::Level::DEBUG,
            filter:  "wgpu=error,naga=warn,polling=warn,winit=warn,offset_allocator=warn,gilrs=warn,".to_owned()
                    +"bevy=warn,cosmic_text=warn,lantern_rig=debug,"
                    ,
            ..default()
        }),
        RigPlugin,
        FlickerPlugin,
    ));

    app.init_resource::<DebugKeys>();

    app.add_systems(Startup, setup);
    app.add_systems(Update, debug_toggles::update);

    app.run();
}
