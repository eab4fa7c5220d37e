//! Player rig movement controller
//!
//! The rig turns in 90° steps and can step forward a short distance when it
//! faces front, then walks back to where it started. Discrete transitions are
//! driven by edge-triggered [`RigKeys`]; yaw and position are advanced
//! continuously by [`Rig::tick`].
//!
//! ```text
//!          Front (facing front)             Front at max distance,
//!   Idle ───────────────────────▶ MovingForward ─── or Left/Right/Back ───▶ Returning
//!    ▲                                                                         │
//!    └──────────────── arrived at start (stashed yaw applied) ◀────────────────┘
//! ```

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::common::{
    components::keybits::*,
    smoothing::*,
};

/// Tuning for a [`Rig`].
#[derive(Clone, Component, Copy, Debug, Deserialize, PartialEq, Serialize)]
pub struct RigConfig {
    /// Yaw smoothing speed (1/s)
    pub rotation_smooth: f32,
    /// Forward and return walking speed (world units/s)
    pub forward_speed: f32,
    /// Farthest the rig may step away from its start position
    pub max_forward_distance: f32,
    /// How close to 0° the yaw must be before Front starts walking
    pub face_threshold_deg: f32,
    /// Yaw change for a single Left/Right press
    pub turn_step_deg: f32,
}

impl Default for RigConfig {
    fn default() -> Self {
        Self {
            rotation_smooth: 8.,
            forward_speed: 1.5,
            max_forward_distance: 2.,
            face_threshold_deg: 5.,
            turn_step_deg: 90.,
        }
    }
}

impl RigConfig {
    /// Clamp rates and distances to non-negative values.
    pub fn sanitized(mut self) -> Self {
        for (name, value) in [
            ("rotation_smooth", &mut self.rotation_smooth),
            ("forward_speed", &mut self.forward_speed),
            ("max_forward_distance", &mut self.max_forward_distance),
            ("face_threshold_deg", &mut self.face_threshold_deg),
        ] {
            if !(*value >= 0.) {
                warn!("RigConfig.{name} = {value} is invalid, using 0");
                *value = 0.;
            }
        }
        self
    }
}

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub enum RigPhase {
    #[default]
    Idle,
    MovingForward,
    Returning,
}

/// Movement state for the player body.
///
/// Owns the body pose (`position`, `yaw_deg`); the host copies it into the
/// engine transform after each tick.
#[derive(Clone, Component, Copy, Debug, Default, PartialEq)]
pub struct Rig {
    /// Current body yaw in degrees, `[0, 360)`. 0° faces -Z.
    pub yaw_deg: f32,
    /// Yaw the body is turning toward, `[0, 360)`
    pub target_yaw_deg: f32,
    /// Yaw to adopt once a return completes
    pub pending_yaw_deg: Option<f32>,
    pub position: Vec3,
    /// Snapshot taken when forward motion starts
    pub start_position: Vec3,
    /// Distance walked forward, `[0, max_forward_distance]`
    pub forward_progress: f32,
    pub rotation_locked: bool,
    phase: RigPhase,
}

impl Rig {
    pub fn new(position: Vec3, yaw_deg: f32) -> Self {
        let yaw_deg = normalize_degrees(yaw_deg);
        Self {
            yaw_deg,
            target_yaw_deg: yaw_deg,
            position,
            start_position: position,
            ..default()
        }
    }

    pub fn phase(&self) -> RigPhase {
        self.phase
    }

    pub fn is_moving_forward(&self) -> bool {
        self.phase == RigPhase::MovingForward
    }

    pub fn is_returning(&self) -> bool {
        self.phase == RigPhase::Returning
    }

    /// Signed yaw still to turn, degrees in `(-180, 180]`.
    pub fn yaw_error_deg(&self) -> f32 {
        wrap_degrees(self.target_yaw_deg - self.yaw_deg)
    }

    /// Unit vector the body currently faces (yaw 0 = -Z).
    pub fn forward_dir(&self) -> Vec3 {
        Quat::from_rotation_y(self.yaw_deg.to_radians()) * Vec3::NEG_Z
    }

    /// Body rotation for the host transform.
    pub fn rotation(&self) -> Quat {
        Quat::from_rotation_y(self.yaw_deg.to_radians())
    }

    /// Consume this tick's commands, then advance yaw and position by `dt` seconds.
    pub fn tick(&mut self, dt: f32, keys: RigKeys, config: &RigConfig) {
        for command in keys.commands() {
            self.command(command, config);
        }
        self.advance(dt, config);
    }

    /// Apply one edge-triggered command.
    pub fn command(&mut self, command: RigCommand, config: &RigConfig) {
        match command {
            RigCommand::Front => self.front(config),
            RigCommand::Left => self.turn(config.turn_step_deg),
            RigCommand::Right => self.turn(-config.turn_step_deg),
            RigCommand::Back => self.turn(180.),
        }
    }

    fn front(&mut self, config: &RigConfig) {
        match self.phase {
            RigPhase::MovingForward if self.forward_progress >= config.max_forward_distance => {
                self.set_phase(RigPhase::Returning);
            }
            RigPhase::MovingForward | RigPhase::Returning => {}
            RigPhase::Idle if wrap_degrees(self.yaw_deg).abs() > config.face_threshold_deg => {
                self.target_yaw_deg = 0.;
            }
            // a turn is already under way, walking now would curve the path
            RigPhase::Idle if wrap_degrees(self.target_yaw_deg).abs() > config.face_threshold_deg => {}
            RigPhase::Idle => {
                self.forward_progress = 0.;
                self.start_position = self.position;
                self.set_phase(RigPhase::MovingForward);
            }
        }
    }

    fn turn(&mut self, step_deg: f32) {
        if self.rotation_locked { return }

        let target = normalize_degrees(self.target_yaw_deg + step_deg);
        match self.phase {
            RigPhase::MovingForward => {
                if wrap_degrees(target - self.target_yaw_deg) == 0. { return }
                self.rotation_locked = true;
                self.pending_yaw_deg = Some(target);
                self.set_phase(RigPhase::Returning);
            }
            RigPhase::Idle | RigPhase::Returning => self.target_yaw_deg = target,
        }
    }

    fn advance(&mut self, dt: f32, config: &RigConfig) {
        self.yaw_deg = approach_degrees(self.yaw_deg, self.target_yaw_deg, dt, config.rotation_smooth);

        match self.phase {
            RigPhase::MovingForward => {
                let remaining = (config.max_forward_distance - self.forward_progress).max(0.);
                let step = (config.forward_speed * dt).clamp(0., remaining);
                self.position += self.forward_dir() * step;
                if step >= remaining {
                    self.forward_progress = config.max_forward_distance;
                } else {
                    self.forward_progress += step;
                }
            }
            RigPhase::Returning => {
                let to_start = self.start_position - self.position;
                let distance = to_start.length();
                let step = config.forward_speed * dt;
                if distance <= step {
                    self.position = self.start_position;
                    self.forward_progress = 0.;
                    self.rotation_locked = false;
                    if let Some(pending) = self.pending_yaw_deg.take() {
                        self.target_yaw_deg = pending;
                    }
                    self.set_phase(RigPhase::Idle);
                } else {
                    self.position += to_start / distance * step;
                }
            }
            RigPhase::Idle => {}
        }
    }

    fn set_phase(&mut self, phase: RigPhase) {
        if self.phase != phase {
            debug!("rig {:?} -> {:?} (yaw {:.1}, progress {:.2})", self.phase, phase, self.yaw_deg, self.forward_progress);
            self.phase = phase;
        }
    }
}
