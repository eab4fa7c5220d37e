use bevy::prelude::*;

use crate::{
    client::message::FlickerControl,
    common::components::flicker::FlickerLight,
};

/// Tick every flicker light and write its smoothed energy to the point light.
pub fn update(
    time: Res<Time>,
    mut query: Query<(&mut FlickerLight, &mut PointLight)>,
) {
    let dt = time.delta_secs();
    for (mut flicker, mut light) in &mut query {
        flicker.tick(dt);
        light.intensity = flicker.actual_energy();
    }
}

pub fn apply_controls(
    mut reader: MessageReader<FlickerControl>,
    mut query: Query<&mut FlickerLight>,
) {
    for &control in reader.read() {
        for mut flicker in &mut query {
            match control {
                FlickerControl::SetBlackoutEnabled(enabled) => flicker.set_blackout_enabled(enabled),
                FlickerControl::ToggleBlackoutEnabled => flicker.toggle_blackout_enabled(),
                FlickerControl::SetChancePerSecond(chance) => flicker.set_chance_per_second(chance),
                FlickerControl::SetBlackoutProbability(p) => flicker.set_blackout_probability(p),
                FlickerControl::TriggerBlackoutNow(duration) => flicker.trigger_blackout_now(duration),
                FlickerControl::TriggerFlutterNow => flicker.trigger_flutter_now(),
            }
        }
    }
}
