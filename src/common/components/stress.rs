use bevy::math::curve::{Curve, EaseFunction};
use serde::{Deserialize, Serialize};

/// An interruptible timed animation of a single value.
///
/// Eases from `from` to `to` over `duration` seconds. Starting a new decay
/// replaces the old one outright; nothing of the previous timer survives.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
pub struct StressDecay {
    pub from: f32,
    pub to: f32,
    pub duration: f32,
    pub elapsed: f32,
}

impl StressDecay {
    const EASE: EaseFunction = EaseFunction::QuadraticOut;

    pub fn new(from: f32, to: f32, duration: f32) -> Self {
        Self { from, to, duration: duration.max(0.), elapsed: 0. }
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// Current animated value.
    pub fn value(&self) -> f32 {
        if self.is_finished() { return self.to }
        let t = self.elapsed / self.duration;
        self.from + (self.to - self.from) * Self::EASE.sample_clamped(t)
    }

    /// Advance by `dt` seconds and return the new value.
    pub fn advance(&mut self, dt: f32) -> f32 {
        self.elapsed = (self.elapsed + dt.max(0.)).min(self.duration);
        self.value()
    }
}
