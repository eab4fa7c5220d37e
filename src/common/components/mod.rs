pub mod camera_fx;
pub mod flicker;
pub mod keybits;
pub mod rig;
pub mod stress;

use bevy::prelude::*;

/// The body the player steers; carries a [`rig::Rig`].
#[derive(Clone, Component, Copy, Default)]
pub struct Player;
