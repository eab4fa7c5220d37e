//! Frame-rate independent smoothing helpers shared by the rig, camera and light.
//!
//! All chases in this crate use the same first-order form:
//! `current += (target - current) * clamp(dt * speed, 0, 1)`.
//! A factor of 1 snaps to the target, so very long frames never overshoot.

/// Blend factor for one tick of exponential smoothing.
pub fn smooth_factor(dt: f32, speed: f32) -> f32 {
    (dt * speed).clamp(0., 1.)
}

/// Move `current` toward `target` by one smoothing step.
pub fn approach(current: f32, target: f32, dt: f32, speed: f32) -> f32 {
    current + (target - current) * smooth_factor(dt, speed)
}

/// Shortest signed angular difference in degrees, in `(-180, 180]`.
///
/// The result is congruent to `delta` modulo 360.
pub fn wrap_degrees(delta: f32) -> f32 {
    let r = delta.rem_euclid(360.);
    if r > 180. { r - 360. } else { r }
}

/// Normalize an absolute angle in degrees into `[0, 360)`.
pub fn normalize_degrees(angle: f32) -> f32 {
    let r = angle.rem_euclid(360.);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if r >= 360. { 0. } else { r }
}

/// Move a yaw (degrees) toward a target yaw along the shortest arc.
///
/// Returns the new yaw normalized into `[0, 360)`.
pub fn approach_degrees(current: f32, target: f32, dt: f32, speed: f32) -> f32 {
    let delta = wrap_degrees(target - current);
    normalize_degrees(current + delta * smooth_factor(dt, speed))
}
