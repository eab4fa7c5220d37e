//! Flickering light scheduler
//!
//! A light sits at its base energy until a random event fires. Events are
//! expanded into a queue of timed brightness steps which is drained one step
//! at a time; once empty the light returns to base and waits for the next one.
//!
//! ```text
//!  energy
//!   base ───┐  ┌─┐  ┌──┐ ┌──────      flutter: N × (dip, partial recovery), restore
//!           └──┘ └──┘  └─┘
//!
//!   base ───┐          ┌┐ ┌──────     blackout: off, faint stutter, restore
//!           │          └┘ │
//!    off    └─────────────┘
//! ```
//!
//! The rendered value is `actual_energy`, which always chases the current
//! step's target with exponential smoothing.

use std::collections::VecDeque;

use bevy::prelude::*;
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::common::smoothing::*;

/// Hold time of the full-restore step closing every flutter
pub const FLUTTER_RESTORE_DURATION: f32 = 0.08;
/// Partial recovery holds this fraction of its dip's interval
pub const FLUTTER_RECOVERY_HOLD: f32 = 0.6;
/// Partial recovery lands between these fractions of base energy
pub const FLUTTER_RECOVERY_RANGE: (f32, f32) = (0.85, 1.);
/// Stutter after a blackout, as a fraction of base energy
pub const BLACKOUT_STUTTER_FRACTION: f32 = 0.25;
pub const BLACKOUT_STUTTER_DURATION: f32 = 0.12;

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
pub struct FlickerConfig {
    pub base_energy: f32,
    /// Floor for flutter dips
    pub min_energy: f32,
    /// Energy during a blackout
    pub off_energy: f32,
    pub energy_lerp_speed: f32,
    /// Expected events per second while idle
    pub chance_per_second: f32,
    pub blackouts_enabled: bool,
    /// Share of events that are blackouts, `[0, 1]`
    pub blackout_prob: f32,
    pub flutter_pulses: (u32, u32),
    /// Dip depth as a fraction of base energy
    pub flutter_depth: (f32, f32),
    /// Seconds each dip is held
    pub flutter_interval: (f32, f32),
    pub blackout_duration: (f32, f32),
}

impl Default for FlickerConfig {
    fn default() -> Self {
        Self {
            base_energy: 1.,
            min_energy: 0.05,
            off_energy: 0.,
            energy_lerp_speed: 18.,
            chance_per_second: 0.15,
            blackouts_enabled: true,
            blackout_prob: 0.25,
            flutter_pulses: (2, 5),
            flutter_depth: (0.15, 0.6),
            flutter_interval: (0.03, 0.09),
            blackout_duration: (0.4, 1.4),
        }
    }
}

fn ordered<T: PartialOrd + Copy + std::fmt::Debug>(name: &str, range: (T, T)) -> (T, T) {
    if range.0 > range.1 {
        warn!("FlickerConfig.{name} = {range:?} is inverted, swapping");
        (range.1, range.0)
    } else {
        range
    }
}

fn non_negative(name: &str, value: f32) -> f32 {
    if value >= 0. { return value }
    warn!("FlickerConfig.{name} = {value} is invalid, using 0");
    0.
}

impl FlickerConfig {
    /// Order range pairs and clamp rates and probabilities into their domains.
    pub fn sanitized(self) -> Self {
        let blackout_prob = if (0. ..=1.).contains(&self.blackout_prob) {
            self.blackout_prob
        } else {
            warn!("FlickerConfig.blackout_prob = {} is out of range, clamping", self.blackout_prob);
            if self.blackout_prob > 1. { 1. } else { 0. }
        };
        let clamp_pair = |name: &str, (a, b): (f32, f32)| ordered(name, (non_negative(name, a), non_negative(name, b)));
        Self {
            base_energy: non_negative("base_energy", self.base_energy),
            min_energy: non_negative("min_energy", self.min_energy),
            off_energy: non_negative("off_energy", self.off_energy),
            energy_lerp_speed: non_negative("energy_lerp_speed", self.energy_lerp_speed),
            chance_per_second: non_negative("chance_per_second", self.chance_per_second),
            blackouts_enabled: self.blackouts_enabled,
            blackout_prob,
            flutter_pulses: ordered("flutter_pulses", self.flutter_pulses),
            flutter_depth: clamp_pair("flutter_depth", self.flutter_depth),
            flutter_interval: clamp_pair("flutter_interval", self.flutter_interval),
            blackout_duration: clamp_pair("blackout_duration", self.blackout_duration),
        }
    }
}

/// One timed brightness target.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
pub struct FlickerStep {
    pub energy: f32,
    pub duration: f32,
}

impl FlickerStep {
    pub fn new(energy: f32, duration: f32) -> Self {
        Self { energy, duration }
    }
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum FlickerEvent {
    Flutter,
    Blackout,
}

#[derive(Clone, Component, Debug)]
pub struct FlickerLight {
    config: FlickerConfig,
    queue: VecDeque<FlickerStep>,
    current_target_energy: f32,
    seq_timer: f32,
    actual_energy: f32,
    rng: StdRng,
}

impl FlickerLight {
    pub fn new(config: FlickerConfig, seed: u64) -> Self {
        let config = config.sanitized();
        Self {
            config,
            queue: VecDeque::new(),
            current_target_energy: config.base_energy,
            seq_timer: 0.,
            actual_energy: config.base_energy,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn config(&self) -> &FlickerConfig {
        &self.config
    }

    /// Remaining steps; the front is the active one.
    pub fn queue(&self) -> &VecDeque<FlickerStep> {
        &self.queue
    }

    /// True when no event sequence is running.
    pub fn is_idle(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn current_target_energy(&self) -> f32 {
        self.current_target_energy
    }

    /// Seconds left on the active step.
    pub fn seq_timer(&self) -> f32 {
        self.seq_timer
    }

    /// Smoothed energy to apply to the light.
    pub fn actual_energy(&self) -> f32 {
        self.actual_energy
    }

    pub fn set_blackout_enabled(&mut self, enabled: bool) {
        self.config.blackouts_enabled = enabled;
        info!("blackouts {}", if enabled { "enabled" } else { "disabled" });
    }

    pub fn toggle_blackout_enabled(&mut self) {
        self.set_blackout_enabled(!self.config.blackouts_enabled);
    }

    pub fn set_chance_per_second(&mut self, chance: f32) {
        self.config.chance_per_second = chance.max(0.);
        info!("flicker chance per second {}", self.config.chance_per_second);
    }

    pub fn set_blackout_probability(&mut self, probability: f32) {
        self.config.blackout_prob = probability.clamp(0., 1.);
        info!("blackout probability {}", self.config.blackout_prob);
    }

    /// Start a blackout immediately, replacing any running sequence.
    ///
    /// Without an explicit duration one is sampled from the configured range.
    pub fn trigger_blackout_now(&mut self, duration: Option<f32>) {
        let duration = match duration {
            Some(d) => d.max(0.),
            None => self.sample(self.config.blackout_duration),
        };
        let base = self.config.base_energy;
        debug!("blackout for {duration:.2}s");
        self.start([
            FlickerStep::new(self.config.off_energy, duration),
            FlickerStep::new(base * BLACKOUT_STUTTER_FRACTION, BLACKOUT_STUTTER_DURATION),
            FlickerStep::new(base, 0.),
        ]);
    }

    /// Start a flutter immediately, replacing any running sequence.
    pub fn trigger_flutter_now(&mut self) {
        let config = self.config;
        let base = config.base_energy;
        let pulses = self.rng.random_range(config.flutter_pulses.0..=config.flutter_pulses.1);

        let mut steps = Vec::with_capacity(2 * pulses as usize + 1);
        for _ in 0..pulses {
            let interval = self.sample(config.flutter_interval);
            let depth = self.sample(config.flutter_depth);
            let recovery = self.sample(FLUTTER_RECOVERY_RANGE);
            steps.push(FlickerStep::new(config.min_energy.max(base * depth), interval));
            steps.push(FlickerStep::new(base * recovery, interval * FLUTTER_RECOVERY_HOLD));
        }
        steps.push(FlickerStep::new(base, FLUTTER_RESTORE_DURATION));

        debug!("flutter with {pulses} pulses");
        self.start(steps);
    }

    pub fn trigger(&mut self, event: FlickerEvent) {
        match event {
            FlickerEvent::Flutter => self.trigger_flutter_now(),
            FlickerEvent::Blackout => self.trigger_blackout_now(None),
        }
    }

    /// Advance by `dt` seconds: maybe fire an event, drain the queue, smooth energy.
    pub fn tick(&mut self, dt: f32) {
        if self.queue.is_empty() {
            // linear per-tick approximation of a Poisson arrival, tuned for small dt
            if self.rng.random::<f32>() < self.config.chance_per_second * dt {
                let event = self.pick_event();
                self.trigger(event);
            }
        } else {
            self.seq_timer -= dt;
            if self.seq_timer <= 0. {
                self.queue.pop_front();
                match self.queue.front() {
                    Some(next) => {
                        self.current_target_energy = next.energy;
                        self.seq_timer = next.duration;
                    }
                    None => {
                        self.current_target_energy = self.config.base_energy;
                        self.seq_timer = 0.;
                    }
                }
            }
        }

        self.actual_energy = approach(self.actual_energy, self.current_target_energy, dt, self.config.energy_lerp_speed);
    }

    fn pick_event(&mut self) -> FlickerEvent {
        if self.config.blackouts_enabled && self.rng.random::<f32>() < self.config.blackout_prob {
            FlickerEvent::Blackout
        } else {
            FlickerEvent::Flutter
        }
    }

    fn start(&mut self, steps: impl IntoIterator<Item = FlickerStep>) {
        self.queue.clear();
        self.queue.extend(steps);
        if let Some(first) = self.queue.front() {
            self.current_target_energy = first.energy;
            self.seq_timer = first.duration;
        }
    }

    fn sample(&mut self, (min, max): (f32, f32)) -> f32 {
        self.rng.random_range(min..=max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1. / 60.;

    fn quiet() -> FlickerConfig {
        FlickerConfig { chance_per_second: 0., ..default() }
    }

    fn drain(light: &mut FlickerLight) -> usize {
        let mut ticks = 0;
        while !light.is_idle() {
            light.tick(DT);
            ticks += 1;
            assert!(ticks < 10_000, "queue never drained");
        }
        ticks
    }

    #[test]
    fn test_new_light_rests_at_base() {
        let light = FlickerLight::new(FlickerConfig { base_energy: 3., ..quiet() }, 0);
        assert!(light.is_idle());
        assert_eq!(light.actual_energy(), 3.);
        assert_eq!(light.current_target_energy(), 3.);
    }

    #[test]
    fn test_no_events_without_chance() {
        let mut light = FlickerLight::new(quiet(), 1);
        for _ in 0..6000 {
            light.tick(DT);
            assert!(light.is_idle());
        }
        assert_eq!(light.actual_energy(), 1.);
    }

    #[test]
    fn test_trigger_blackout_with_duration() {
        let config = FlickerConfig { base_energy: 2., off_energy: 0.1, ..quiet() };
        let mut light = FlickerLight::new(config, 2);
        light.trigger_blackout_now(Some(0.5));

        assert_eq!(light.current_target_energy(), 0.1);
        assert_eq!(light.seq_timer(), 0.5);
        let steps: Vec<_> = light.queue().iter().copied().collect();
        assert_eq!(steps, vec![
            FlickerStep::new(0.1, 0.5),
            FlickerStep::new(2. * BLACKOUT_STUTTER_FRACTION, BLACKOUT_STUTTER_DURATION),
            FlickerStep::new(2., 0.),
        ]);
    }

    #[test]
    fn test_sampled_blackout_duration_in_range() {
        let mut light = FlickerLight::new(quiet(), 3);
        for _ in 0..50 {
            light.trigger_blackout_now(None);
            let d = light.queue()[0].duration;
            let (min, max) = light.config().blackout_duration;
            assert!(d >= min && d <= max, "duration {d} outside {min}..={max}");
        }
    }

    #[test]
    fn test_flutter_shape() {
        let config = quiet();
        let mut light = FlickerLight::new(config, 4);
        let mut seen = std::collections::BTreeSet::new();
        for _ in 0..50 {
            light.trigger_flutter_now();
            let steps = light.queue();
            // dips never reach the recovery floor, so counting them recovers the pulse draw
            let dip_floor = config.base_energy * FLUTTER_RECOVERY_RANGE.0;
            let pulses = steps.iter().filter(|s| s.energy < dip_floor).count();
            assert_eq!(steps.len(), 2 * pulses + 1, "{pulses} dips in {} steps", steps.len());
            let pulses_u32 = pulses as u32;
            assert!(pulses_u32 >= config.flutter_pulses.0 && pulses_u32 <= config.flutter_pulses.1);
            seen.insert(pulses_u32);
            assert_eq!(*steps.back().unwrap(), FlickerStep::new(config.base_energy, FLUTTER_RESTORE_DURATION));

            for pair in 0..pulses {
                let dip = steps[2 * pair];
                let recovery = steps[2 * pair + 1];
                assert!(dip.energy >= config.min_energy);
                assert!(dip.energy <= config.base_energy * config.flutter_depth.1 + 1e-6);
                assert!((recovery.duration - dip.duration * FLUTTER_RECOVERY_HOLD).abs() < 1e-6);
                assert!(recovery.energy >= config.base_energy * 0.85 - 1e-6);
                assert!(recovery.energy <= config.base_energy + 1e-6);
            }
            assert_eq!(light.current_target_energy(), steps[0].energy);
        }
        assert!(seen.len() > 1, "pulse count should vary, saw {seen:?}");
    }

    #[test]
    fn test_flutter_dip_respects_min_energy() {
        let config = FlickerConfig { min_energy: 0.5, flutter_depth: (0.1, 0.2), ..quiet() };
        let mut light = FlickerLight::new(config, 5);
        light.trigger_flutter_now();
        assert_eq!(light.queue()[0].energy, 0.5);
    }

    #[test]
    fn test_queue_drains_and_restores_base() {
        let mut light = FlickerLight::new(quiet(), 6);
        light.trigger_blackout_now(Some(0.3));
        drain(&mut light);
        assert_eq!(light.current_target_energy(), 1.);
        assert_eq!(light.seq_timer(), 0.);

        for _ in 0..120 {
            light.tick(DT);
        }
        assert!((light.actual_energy() - 1.).abs() < 1e-4, "energy {}", light.actual_energy());
    }

    #[test]
    fn test_blackout_darkens_actual_energy() {
        let mut light = FlickerLight::new(quiet(), 7);
        light.trigger_blackout_now(Some(1.));
        for _ in 0..30 {
            light.tick(DT);
        }
        assert!(light.actual_energy() < 0.01, "energy {}", light.actual_energy());
    }

    #[test]
    fn test_trigger_replaces_running_sequence() {
        let mut light = FlickerLight::new(quiet(), 8);
        light.trigger_flutter_now();
        light.tick(DT);
        light.trigger_blackout_now(Some(0.7));
        assert_eq!(light.queue().len(), 3);
        assert_eq!(light.seq_timer(), 0.7);
    }

    #[test]
    fn test_random_events_fire_and_converge() {
        let config = FlickerConfig { chance_per_second: 5., ..default() };
        let mut light = FlickerLight::new(config, 9);
        let mut fired = 0;
        let mut was_idle = true;
        for _ in 0..600 {
            light.tick(DT);
            if was_idle && !light.is_idle() { fired += 1; }
            was_idle = light.is_idle();
        }
        assert!(fired > 0, "no events fired in 10s at 5/s");

        light.set_chance_per_second(0.);
        drain(&mut light);
        for _ in 0..120 {
            light.tick(DT);
        }
        assert!((light.actual_energy() - config.base_energy).abs() < 1e-4);
    }

    #[test]
    fn test_blackouts_disabled_only_flutters() {
        let config = FlickerConfig { chance_per_second: 30., blackout_prob: 1., blackouts_enabled: false, ..default() };
        let mut light = FlickerLight::new(config, 10);
        for _ in 0..600 {
            light.tick(DT);
            if let Some(front) = light.queue().front() {
                assert_ne!(front.energy, config.off_energy, "blackout fired while disabled");
            }
        }
    }

    #[test]
    fn test_setters_clamp() {
        let mut light = FlickerLight::new(quiet(), 11);
        light.set_chance_per_second(-3.);
        assert_eq!(light.config().chance_per_second, 0.);
        light.set_blackout_probability(1.7);
        assert_eq!(light.config().blackout_prob, 1.);
        light.set_blackout_probability(-0.2);
        assert_eq!(light.config().blackout_prob, 0.);
        light.toggle_blackout_enabled();
        assert!(!light.config().blackouts_enabled);
    }

    #[test]
    fn test_config_sanitized_orders_ranges() {
        let config = FlickerConfig {
            flutter_pulses: (6, 2),
            blackout_duration: (2., 0.5),
            blackout_prob: 4.,
            energy_lerp_speed: -1.,
            ..default()
        }.sanitized();
        assert_eq!(config.flutter_pulses, (2, 6));
        assert_eq!(config.blackout_duration, (0.5, 2.));
        assert_eq!(config.blackout_prob, 1.);
        assert_eq!(config.energy_lerp_speed, 0.);
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let config = FlickerConfig { chance_per_second: 2., ..default() };
        let mut a = FlickerLight::new(config, 77);
        let mut b = FlickerLight::new(config, 77);
        for _ in 0..600 {
            a.tick(DT);
            b.tick(DT);
            assert_eq!(a.actual_energy(), b.actual_energy());
        }
    }
}
