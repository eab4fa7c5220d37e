use bevy::prelude::*;

use crate::client::{
    message::FlickerControl,
    systems::light,
};

/// Plugin that runs flicker sequences on every `FlickerLight` + `PointLight`
pub struct FlickerPlugin;

impl Plugin for FlickerPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<FlickerControl>();
        app.add_systems(Update, (light::apply_controls, light::update).chain());
    }
}
