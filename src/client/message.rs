use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Spike the rig camera's stress jitter, then decay back over `duration` seconds.
#[derive(Clone, Copy, Debug, Deserialize, Message, PartialEq, Serialize)]
pub struct AddStress {
    pub intensity: f32,
    pub duration: f32,
}

/// Host-side operations on every flicker light.
#[derive(Clone, Copy, Debug, Deserialize, Message, PartialEq, Serialize)]
pub enum FlickerControl {
    SetBlackoutEnabled(bool),
    ToggleBlackoutEnabled,
    SetChancePerSecond(f32),
    SetBlackoutProbability(f32),
    TriggerBlackoutNow(Option<f32>),
    TriggerFlutterNow,
}
