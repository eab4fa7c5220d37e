//! Per-frame behavior controllers for a first-person room scene:
//! a player rig that turns and steps on discrete commands with camera
//! drift/bob/stress effects, and lights that flicker or black out at random.
//!
//! `common` holds the simulation state, advanced by explicit `tick` calls.
//! `client` wires it into a Bevy app.

pub mod client;
pub mod common;
