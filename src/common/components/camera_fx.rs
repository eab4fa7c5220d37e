//! Camera effect blending for the rig's head camera
//!
//! Layers four cosmetic effects on top of a cached base transform:
//! - drift: pitch/yaw following the pointer's offset from screen center
//! - tilt: roll into active turns, otherwise a fraction of horizontal drift
//! - bob: sinusoidal sway whose amplitude depends on walking
//! - stress: small positional jitter scaled by a decaying intensity
//!
//! The output transform is recomposed from the base every tick, so effects
//! never accumulate drift into the camera pose.

use bevy::prelude::*;
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::common::{
    components::stress::StressDecay,
    smoothing::*,
};

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
pub struct CameraFxConfig {
    /// Drift radians per pixel of pointer offset
    pub drift_sensitivity: f32,
    pub max_drift_pitch_deg: f32,
    pub max_drift_yaw_deg: f32,
    pub drift_smooth: f32,
    pub tilt_smooth: f32,
    /// Roll while the body is turning
    pub turn_tilt_deg: f32,
    /// Share of horizontal drift fed into roll when not turning
    pub drift_tilt_ratio: f32,
    /// Yaw error above which the body counts as turning
    pub rotating_threshold_deg: f32,
    pub bob_speed: f32,
    pub idle_bob_amplitude: f32,
    pub forward_bob_amplitude: f32,
    pub stress_smooth: f32,
    /// Jitter intensity when no stress event is running
    pub base_stress_intensity: f32,
}

impl Default for CameraFxConfig {
    fn default() -> Self {
        Self {
            drift_sensitivity: 0.0015,
            max_drift_pitch_deg: 4.,
            max_drift_yaw_deg: 6.,
            drift_smooth: 4.,
            tilt_smooth: 3.,
            turn_tilt_deg: 3.,
            drift_tilt_ratio: 0.4,
            rotating_threshold_deg: 1.,
            bob_speed: 6.,
            idle_bob_amplitude: 0.008,
            forward_bob_amplitude: 0.035,
            stress_smooth: 12.,
            base_stress_intensity: 0.002,
        }
    }
}

impl CameraFxConfig {
    pub fn sanitized(mut self) -> Self {
        for (name, value) in [
            ("drift_sensitivity", &mut self.drift_sensitivity),
            ("max_drift_pitch_deg", &mut self.max_drift_pitch_deg),
            ("max_drift_yaw_deg", &mut self.max_drift_yaw_deg),
            ("drift_smooth", &mut self.drift_smooth),
            ("tilt_smooth", &mut self.tilt_smooth),
            ("rotating_threshold_deg", &mut self.rotating_threshold_deg),
            ("bob_speed", &mut self.bob_speed),
            ("idle_bob_amplitude", &mut self.idle_bob_amplitude),
            ("forward_bob_amplitude", &mut self.forward_bob_amplitude),
            ("stress_smooth", &mut self.stress_smooth),
            ("base_stress_intensity", &mut self.base_stress_intensity),
        ] {
            if !(*value >= 0.) {
                warn!("CameraFxConfig.{name} = {value} is invalid, using 0");
                *value = 0.;
            }
        }
        self
    }
}

/// Per-tick inputs sampled by the host.
#[derive(Clone, Copy, Debug, Default)]
pub struct CameraFxInput {
    /// Pointer position relative to screen center, pixels, +y down.
    /// `None` when the pointer is outside the window.
    pub pointer_offset: Option<Vec2>,
    pub moving_forward: bool,
    /// Signed yaw the body still has to turn, degrees
    pub yaw_error_deg: f32,
}

#[derive(Clone, Component, Debug)]
pub struct CameraFx {
    config: CameraFxConfig,
    /// Local transform the effects are layered onto
    pub base: Transform,
    pub drift_pitch: f32,
    pub drift_yaw: f32,
    pub head_tilt: f32,
    pub bob_timer: f32,
    pub stress_offset: Vec3,
    pub stress_target: Vec3,
    stress_intensity: f32,
    decay: Option<StressDecay>,
    rng: StdRng,
}

impl CameraFx {
    pub fn new(config: CameraFxConfig, seed: u64) -> Self {
        let config = config.sanitized();
        Self {
            config,
            base: Transform::default(),
            drift_pitch: 0.,
            drift_yaw: 0.,
            head_tilt: 0.,
            bob_timer: 0.,
            stress_offset: Vec3::ZERO,
            stress_target: Vec3::ZERO,
            stress_intensity: config.base_stress_intensity,
            decay: None,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Sanitized tuning in use.
    pub fn config(&self) -> &CameraFxConfig {
        &self.config
    }

    pub fn with_base(mut self, base: Transform) -> Self {
        self.base = base;
        self
    }

    pub fn stress_intensity(&self) -> f32 {
        self.stress_intensity
    }

    /// The in-flight stress decay, if any.
    pub fn decay(&self) -> Option<&StressDecay> {
        self.decay.as_ref()
    }

    /// Spike stress to `intensity`, then ease back over `duration` seconds.
    ///
    /// Replaces any decay already running. The decay returns to the resting
    /// intensity: the running decay's target if there is one, otherwise the
    /// intensity at the time of the call.
    pub fn add_stress(&mut self, intensity: f32, duration: f32) {
        let intensity = intensity.max(0.);
        let rest = match self.decay.take() {
            Some(decay) => decay.to,
            None => self.stress_intensity,
        };
        self.stress_intensity = intensity;
        self.decay = Some(StressDecay::new(intensity, rest, duration));
        debug!("stress {intensity:.3} decaying to {rest:.3} over {duration:.2}s");
    }

    /// Advance all effects by `dt` seconds and return the composed local transform.
    pub fn tick(&mut self, dt: f32, input: CameraFxInput) -> Transform {
        let config = self.config;

        if let Some(decay) = self.decay.as_mut() {
            self.stress_intensity = decay.advance(dt);
            if decay.is_finished() { self.decay = None; }
        }

        // drift
        let (pitch_target, yaw_target) = match input.pointer_offset {
            Some(offset) => {
                let max_pitch = config.max_drift_pitch_deg.to_radians();
                let max_yaw = config.max_drift_yaw_deg.to_radians();
                (
                    (-offset.y * config.drift_sensitivity).clamp(-max_pitch, max_pitch),
                    (-offset.x * config.drift_sensitivity).clamp(-max_yaw, max_yaw),
                )
            }
            None => (0., 0.),
        };
        self.drift_pitch = approach(self.drift_pitch, pitch_target, dt, config.drift_smooth);
        self.drift_yaw = approach(self.drift_yaw, yaw_target, dt, config.drift_smooth);

        // tilt
        let tilt_target = if input.yaw_error_deg.abs() > config.rotating_threshold_deg {
            input.yaw_error_deg.signum() * config.turn_tilt_deg.to_radians()
        } else {
            self.drift_yaw * config.drift_tilt_ratio
        };
        self.head_tilt = approach(self.head_tilt, tilt_target, dt, config.tilt_smooth);

        // bob
        self.bob_timer += dt * config.bob_speed;
        let amplitude = if input.moving_forward { config.forward_bob_amplitude } else { config.idle_bob_amplitude };
        let bob = Vec3::new(
            (self.bob_timer * 0.5).sin() * amplitude * 0.5,
            self.bob_timer.sin() * amplitude,
            0.,
        );

        // stress
        let intensity = self.stress_intensity;
        self.stress_target = Vec3::new(
            self.rng.random_range(-1_f32..=1.),
            self.rng.random_range(-1_f32..=1.),
            self.rng.random_range(-1_f32..=1.),
        ) * intensity;
        self.stress_offset = Vec3::new(
            approach(self.stress_offset.x, self.stress_target.x, dt, config.stress_smooth),
            approach(self.stress_offset.y, self.stress_target.y, dt, config.stress_smooth),
            approach(self.stress_offset.z, self.stress_target.z, dt, config.stress_smooth),
        );

        self.compose(bob + self.stress_offset)
    }

    fn compose(&self, offset: Vec3) -> Transform {
        let rotation = Quat::from_euler(EulerRot::YXZ, self.drift_yaw, self.drift_pitch, self.head_tilt);
        Transform {
            translation: self.base.translation + offset,
            rotation: self.base.rotation * rotation,
            scale: self.base.scale,
        }
    }
}
