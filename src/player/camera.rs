//! Look orientation: smoothed mouse-look driving yaw, clamped pitch and
//! the 180° roll used by gravity inversion.

use bevy::prelude::*;

use crate::host::InputSample;
use crate::player::Player;
use crate::player::smoothing::SmoothedVec2;
use crate::settings::{ControlsSettings, Settings};

/// The player's look orientation, in degrees.
///
/// Yaw is unbounded (it simply wraps); pitch is clamped to the configured
/// cap; roll is 0° upright or 180° while gravity is inverted.
#[derive(Component, Debug, Default)]
pub struct PlayerLook {
    pub yaw: f32,
    pub pitch: f32,
    pub roll: f32,
    smoothed: SmoothedVec2,
}

impl PlayerLook {
    #[must_use]
    pub fn facing_yaw(yaw: f32) -> Self {
        Self { yaw, ..Self::default() }
    }

    /// Feed one tick of raw look input: the delta is smoothed, scaled by
    /// sensitivity, and folded into yaw/pitch (pitch clamped).
    pub fn apply_delta(&mut self, raw: Vec2, controls: &ControlsSettings, dt: f32) {
        let delta = self.smoothed.step(raw, controls.mouse_smooth_time, dt);
        self.yaw -= delta.x * controls.mouse_sensitivity;
        self.pitch = (self.pitch - delta.y * controls.mouse_sensitivity)
            .clamp(-controls.camera_cap, controls.camera_cap);
    }

    /// Full orientation, YXZ order so yaw/pitch/roll stay independent.
    #[must_use]
    pub fn rotation(&self) -> Quat {
        Quat::from_euler(
            EulerRot::YXZ,
            self.yaw.to_radians(),
            self.pitch.to_radians(),
            self.roll.to_radians(),
        )
    }

    /// Horizontal forward basis vector (yaw only, ignores pitch).
    #[must_use]
    pub fn forward(&self) -> Vec3 {
        Quat::from_rotation_y(self.yaw.to_radians()) * -Vec3::Z
    }

    /// Horizontal right basis vector (yaw only).
    #[must_use]
    pub fn right(&self) -> Vec3 {
        Quat::from_rotation_y(self.yaw.to_radians()) * Vec3::X
    }
}

/// Apply this tick's look input to the player orientation.
#[allow(clippy::needless_pass_by_value)]
pub fn player_look(
    time: Res<Time>,
    settings: Res<Settings>,
    input: Res<InputSample>,
    mut query: Query<(&mut Transform, &mut PlayerLook), With<Player>>,
) {
    let mut raw = input.look_delta;
    if settings.controls.invert_x {
        raw.x = -raw.x;
    }
    if settings.controls.invert_y {
        raw.y = -raw.y;
    }

    for (mut transform, mut look) in &mut query {
        look.apply_delta(raw, &settings.controls, time.delta_seconds());
        transform.rotation = look.rotation();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controls() -> ControlsSettings {
        ControlsSettings {
            mouse_sensitivity: 1.0,
            mouse_smooth_time: 0.0, // no easing: deltas apply directly
            ..ControlsSettings::default()
        }
    }

    #[test]
    fn pitch_is_clamped_to_cap() {
        let mut look = PlayerLook::default();
        let c = controls();
        for _ in 0..100 {
            look.apply_delta(Vec2::new(0.0, -10.0), &c, 1.0 / 60.0);
        }
        assert!((look.pitch - c.camera_cap).abs() < 1e-3);
        for _ in 0..200 {
            look.apply_delta(Vec2::new(0.0, 10.0), &c, 1.0 / 60.0);
        }
        assert!((look.pitch + c.camera_cap).abs() < 1e-3);
    }

    #[test]
    fn yaw_is_unbounded() {
        let mut look = PlayerLook::default();
        let c = controls();
        for _ in 0..100 {
            look.apply_delta(Vec2::new(-100.0, 0.0), &c, 1.0 / 60.0);
        }
        assert!(look.yaw > 360.0);
    }

    #[test]
    fn forward_and_right_stay_horizontal() {
        let mut look = PlayerLook::facing_yaw(37.0);
        look.pitch = 45.0;
        assert!(look.forward().y.abs() < 1e-6);
        assert!(look.right().y.abs() < 1e-6);
        assert!((look.forward().dot(look.right())).abs() < 1e-5);
    }

    #[test]
    fn smoothing_spreads_a_delta_over_ticks() {
        let mut look = PlayerLook::default();
        let c = ControlsSettings {
            mouse_sensitivity: 1.0,
            mouse_smooth_time: 0.03,
            ..ControlsSettings::default()
        };
        look.apply_delta(Vec2::new(10.0, 0.0), &c, 1.0 / 60.0);
        let first = look.yaw;
        assert!(first.abs() > 0.0);
        assert!(first.abs() < 10.0); // not all applied on the first tick
    }
}
