use bevy::prelude::*;

use crate::common::components::{
    keybits::RigKeys,
    rig::*,
};

/// Tick every rig with this frame's commands and copy its pose to the body transform.
pub fn update(
    time: Res<Time>,
    mut query: Query<(&mut Rig, &RigConfig, &RigKeys, &mut Transform)>,
) {
    let dt = time.delta_secs();
    for (mut rig, config, &keys, mut transform) in &mut query {
        rig.tick(dt, keys, config);
        transform.translation = rig.position;
        transform.rotation = rig.rotation();
    }
}
