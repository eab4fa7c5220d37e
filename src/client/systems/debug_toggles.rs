use bevy::prelude::*;

use crate::client::message::{AddStress, FlickerControl};

/// Hotkeys for poking the effects by hand
#[derive(Resource)]
pub struct DebugKeys {
    /// Toggle blackouts on every flicker light (default: B)
    pub toggle_blackouts: KeyCode,
    /// Force a blackout (default: N)
    pub blackout: KeyCode,
    /// Force a flutter (default: M)
    pub flutter: KeyCode,
    /// Jolt the camera (default: Space)
    pub stress: KeyCode,
    pub stress_intensity: f32,
    pub stress_duration: f32,
}

impl Default for DebugKeys {
    fn default() -> Self {
        Self {
            toggle_blackouts: KeyCode::KeyB,
            blackout: KeyCode::KeyN,
            flutter: KeyCode::KeyM,
            stress: KeyCode::Space,
            stress_intensity: 0.05,
            stress_duration: 1.2,
        }
    }
}

pub fn update(
    keyboard: Res<ButtonInput<KeyCode>>,
    keys: Res<DebugKeys>,
    mut flicker_writer: MessageWriter<FlickerControl>,
    mut stress_writer: MessageWriter<AddStress>,
) {
    if keyboard.just_pressed(keys.toggle_blackouts) {
        flicker_writer.write(FlickerControl::ToggleBlackoutEnabled);
    }
    if keyboard.just_pressed(keys.blackout) {
        flicker_writer.write(FlickerControl::TriggerBlackoutNow(None));
    }
    if keyboard.just_pressed(keys.flutter) {
        flicker_writer.write(FlickerControl::TriggerFlutterNow);
    }
    if keyboard.just_pressed(keys.stress) {
        stress_writer.write(AddStress { intensity: keys.stress_intensity, duration: keys.stress_duration });
    }
}
