use bevy::prelude::*;

use crate::client::{
    input,
    message::AddStress,
    systems::{camera, rig},
};

/// Plugin that drives the player rig and its head camera
///
/// This plugin provides:
/// - Directional key sampling into `RigKeys`
/// - Rig movement, written to the body `Transform`
/// - Camera drift, tilt, bob and stress, written to the camera's local `Transform`
/// - The `AddStress` message
pub struct RigPlugin;

impl Plugin for RigPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<AddStress>();
        app.add_systems(
            Update,
            (
                input::sample_rig_keys,
                rig::update,
                camera::capture_base,
                camera::apply_stress,
                camera::update,
            ).chain(),
        );
    }
}
