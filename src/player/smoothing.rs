//! Critically-damped smoothing for input signals.
//!
//! Both the look delta and the move direction are eased toward their raw
//! targets with a spring that never overshoots, so small input jitters
//! don't snap the camera or the movement basis around.

use bevy::prelude::Vec2;

/// Smooth `current` toward `target` with a critically damped spring.
///
/// `smooth_time` is roughly the time to cover ~63% of the remaining
/// distance; `velocity` carries spring state between calls. The result is
/// clamped so it never overshoots the target.
pub fn smooth_damp(current: f32, target: f32, velocity: &mut f32, smooth_time: f32, dt: f32) -> f32 {
    if dt <= 0.0 {
        return current;
    }
    let smooth_time = smooth_time.max(1e-4);
    let omega = 2.0 / smooth_time;
    let x = omega * dt;
    // Pade-style approximation of e^-x, stable for large steps.
    let exp = 1.0 / (1.0 + x + 0.48 * x * x + 0.235 * x * x * x);

    let change = current - target;
    let temp = (*velocity + omega * change) * dt;
    *velocity = (*velocity - omega * temp) * exp;
    let mut output = target + (change + temp) * exp;

    // Overshoot clamp.
    if (target - current > 0.0) == (output > target) {
        output = target;
        *velocity = (output - target) / dt;
    }
    output
}

/// A `Vec2` signal smoothed per component with [`smooth_damp`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SmoothedVec2 {
    pub current: Vec2,
    velocity: Vec2,
}

impl SmoothedVec2 {
    /// Advance toward `target` and return the new smoothed value.
    pub fn step(&mut self, target: Vec2, smooth_time: f32, dt: f32) -> Vec2 {
        self.current.x = smooth_damp(self.current.x, target.x, &mut self.velocity.x, smooth_time, dt);
        self.current.y = smooth_damp(self.current.y, target.y, &mut self.velocity.y, smooth_time, dt);
        self.current
    }

    /// Drop both the value and the spring state (respawn reset).
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converges_to_constant_target() {
        let mut s = SmoothedVec2::default();
        for _ in 0..300 {
            s.step(Vec2::new(1.0, -0.5), 0.3, 1.0 / 60.0);
        }
        assert!((s.current.x - 1.0).abs() < 1e-3);
        assert!((s.current.y + 0.5).abs() < 1e-3);
    }

    #[test]
    fn never_overshoots() {
        let mut v = 0.0;
        let mut current = 0.0;
        for _ in 0..500 {
            current = smooth_damp(current, 1.0, &mut v, 0.03, 1.0 / 60.0);
            assert!(current <= 1.0 + 1e-6);
        }
    }

    #[test]
    fn zero_dt_is_a_no_op() {
        let mut v = 3.0;
        let out = smooth_damp(0.2, 1.0, &mut v, 0.3, 0.0);
        assert_eq!(out, 0.2);
        assert_eq!(v, 3.0);
    }

    #[test]
    fn reset_clears_spring_state() {
        let mut s = SmoothedVec2::default();
        s.step(Vec2::ONE, 0.3, 0.1);
        s.reset();
        assert_eq!(s.current, Vec2::ZERO);
        // No residual velocity: a step toward zero stays at zero.
        assert_eq!(s.step(Vec2::ZERO, 0.3, 0.1), Vec2::ZERO);
    }
}
