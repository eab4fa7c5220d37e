use bevy::{
    prelude::*,
    window::PrimaryWindow,
};

use crate::{
    client::message::AddStress,
    common::components::{
        camera_fx::*,
        rig::Rig,
        Player,
    },
};

/// Cache the local transform a camera was spawned with as its effect base.
pub fn capture_base(
    mut query: Query<(&Transform, &mut CameraFx), Added<CameraFx>>,
) {
    for (transform, mut fx) in &mut query {
        fx.base = *transform;
    }
}

/// Pointer offset from the window center, if the pointer is inside it.
pub fn pointer_offset(window: &Window) -> Option<Vec2> {
    let cursor = window.cursor_position()?;
    Some(cursor - Vec2::new(window.width(), window.height()) * 0.5)
}

pub fn update(
    time: Res<Time>,
    windows: Query<&Window, With<PrimaryWindow>>,
    rigs: Query<&Rig, With<Player>>,
    mut cameras: Query<(&mut CameraFx, &mut Transform)>,
) {
    let pointer_offset = windows.single().ok().and_then(pointer_offset);
    let (moving_forward, yaw_error_deg) = match rigs.single() {
        Ok(rig) => (rig.is_moving_forward(), rig.yaw_error_deg()),
        Err(_) => (false, 0.),
    };
    let input = CameraFxInput { pointer_offset, moving_forward, yaw_error_deg };

    let dt = time.delta_secs();
    for (mut fx, mut transform) in &mut cameras {
        *transform = fx.tick(dt, input);
    }
}

pub fn apply_stress(
    mut reader: MessageReader<AddStress>,
    mut cameras: Query<&mut CameraFx>,
) {
    for &AddStress { intensity, duration } in reader.read() {
        for mut fx in &mut cameras {
            fx.add_stress(intensity, duration);
        }
    }
}
