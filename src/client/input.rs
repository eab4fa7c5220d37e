use bevy::prelude::*;

use crate::common::components::{
    keybits::*,
    Player,
};

pub const KEYCODES_LEFT: [KeyCode; 2] = [KeyCode::ArrowLeft, KeyCode::KeyA];
pub const KEYCODES_RIGHT: [KeyCode; 2] = [KeyCode::ArrowRight, KeyCode::KeyD];
pub const KEYCODES_BACK: [KeyCode; 2] = [KeyCode::ArrowDown, KeyCode::KeyS];
pub const KEYCODES_FRONT: [KeyCode; 2] = [KeyCode::ArrowUp, KeyCode::KeyW];

/// Edge-triggered directional commands for this frame.
pub fn rig_keys(keyboard: &ButtonInput<KeyCode>) -> RigKeys {
    let mut keys = RigKeys::default();
    keys.set_pressed([KB_LEFT], keyboard.any_just_pressed(KEYCODES_LEFT));
    keys.set_pressed([KB_RIGHT], keyboard.any_just_pressed(KEYCODES_RIGHT));
    keys.set_pressed([KB_BACK], keyboard.any_just_pressed(KEYCODES_BACK));
    keys.set_pressed([KB_FRONT], keyboard.any_just_pressed(KEYCODES_FRONT));
    keys
}

pub fn sample_rig_keys(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut query: Query<&mut RigKeys, With<Player>>,
) {
    keyboard.get_just_pressed().for_each(|key| { trace!("key pressed: {:?}", key) });
    let keys = rig_keys(&keyboard);
    for mut keys0 in &mut query {
        if *keys0 != keys { *keys0 = keys; }
    }
}
