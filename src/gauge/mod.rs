//! The oxygen gauge: a bounded depletable resource drained by walking and
//! refilled at stations.
//!
//! Depletion is edge-triggered: the gauge reports the zero-crossing exactly
//! once, and re-arms only after the value rises above zero again. The
//! per-tick drain system publishes the fill fraction to the status bar and
//! audio layer the way the original host pushed it every frame.

pub mod station;

use bevy::prelude::*;
use thiserror::Error;

use crate::cues::{AudioParam, StatusBarFill};
use crate::player::Player;
use crate::settings::Settings;

/// Rejected gauge configuration.
#[derive(Debug, Error, PartialEq)]
pub enum GaugeConfigError {
    #[error("gauge capacity must be a positive number, got {0}")]
    NonPositiveMax(f32),
}

/// Bounded depletable oxygen quantity. The value is clamped to
/// `[0, max]` after every mutation; while `refilling` is set, passive
/// drain is suppressed.
#[derive(Resource, Debug, Clone)]
pub struct OxygenGauge {
    value: f32,
    max: f32,
    refilling: bool,
    // Armed until the zero-crossing is reported; re-armed above zero.
    depletion_armed: bool,
}

impl OxygenGauge {
    /// Create a full gauge with the given capacity.
    ///
    /// # Errors
    /// `max` must be a positive finite number.
    pub fn new(max: f32) -> Result<Self, GaugeConfigError> {
        if !(max > 0.0) || !max.is_finite() {
            return Err(GaugeConfigError::NonPositiveMax(max));
        }
        Ok(Self {
            value: max,
            max,
            refilling: false,
            depletion_armed: true,
        })
    }

    #[must_use]
    pub fn value(&self) -> f32 {
        self.value
    }

    #[must_use]
    pub fn max(&self) -> f32 {
        self.max
    }

    /// Fill fraction in `[0, 1]`, as reported to the status bar and the
    /// audio layer.
    #[must_use]
    pub fn fraction(&self) -> f32 {
        self.value / self.max
    }

    #[must_use]
    pub fn is_refilling(&self) -> bool {
        self.refilling
    }

    pub fn set_refilling(&mut self, refilling: bool) {
        self.refilling = refilling;
    }

    /// Subtract `amount` (no-op while refilling), clamping at zero.
    /// Returns `true` exactly once per depletion: draining a gauge that is
    /// already empty reports nothing until the value has risen above zero
    /// again.
    pub fn drain(&mut self, amount: f32) -> bool {
        if self.refilling {
            return false;
        }
        self.value = (self.value - amount.max(0.0)).max(0.0);
        self.take_depletion_edge()
    }

    /// Add `rate * dt`, clamped to capacity. Only effective while
    /// `refilling` and below capacity.
    pub fn refill(&mut self, rate: f32, dt: f32) {
        if !self.refilling || self.value >= self.max {
            return;
        }
        self.value = (self.value + rate.max(0.0) * dt.max(0.0)).min(self.max);
        if self.value > 0.0 {
            self.depletion_armed = true;
        }
    }

    /// Direct override, clamped to `[0, max]`. Used for jetpack cost
    /// deductions and the respawn reset.
    pub fn set_value(&mut self, value: f32) {
        self.value = value.clamp(0.0, self.max);
        if self.value > 0.0 {
            self.depletion_armed = true;
        }
    }

    /// Report the zero-crossing once. Covers depletions that bypass
    /// `drain` (a jetpack cost can empty the gauge mid-air).
    pub fn take_depletion_edge(&mut self) -> bool {
        if self.value <= 0.0 && self.depletion_armed {
            self.depletion_armed = false;
            true
        } else {
            false
        }
    }
}

/// The gauge crossed zero this tick; the respawn system reacts to it.
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct Depleted;

/// Tracks the player position from the previous tick so drain can be
/// metered by distance actually walked.
#[derive(Component, Debug, Default)]
pub struct DrainTracker {
    last: Option<Vec3>,
}

/// Drain oxygen by distance moved and publish the fill fraction.
///
/// Displacements at or above the teleport threshold are ignored: a
/// checkpoint respawn moves the player arbitrarily far in one tick and
/// must not register as walking.
#[allow(clippy::needless_pass_by_value)]
pub fn oxygen_drain(
    settings: Res<Settings>,
    mut gauge: ResMut<OxygenGauge>,
    mut query: Query<(&Transform, &mut DrainTracker), With<Player>>,
    mut depleted: EventWriter<Depleted>,
    mut status: EventWriter<StatusBarFill>,
    mut audio: EventWriter<AudioParam>,
) {
    for (tf, mut tracker) in &mut query {
        let moved = tracker
            .last
            .map_or(0.0, |last| tf.translation.distance(last));
        tracker.last = Some(tf.translation);

        let crossed_zero = if moved < settings.oxygen.teleport_threshold && !gauge.is_refilling() {
            gauge.drain(moved * settings.oxygen.loss_rate)
        } else {
            gauge.take_depletion_edge()
        };
        if crossed_zero {
            depleted.send(Depleted);
        }
    }

    let fraction = gauge.fraction();
    status.send(StatusBarFill(fraction));
    audio.send(AudioParam::OxygenLevel(fraction));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_positive_capacity() {
        assert!(matches!(
            OxygenGauge::new(0.0),
            Err(GaugeConfigError::NonPositiveMax(m)) if m == 0.0
        ));
        assert!(OxygenGauge::new(-5.0).is_err());
        assert!(OxygenGauge::new(f32::NAN).is_err());
    }

    #[test]
    fn drain_clamps_at_zero() {
        let mut g = OxygenGauge::new(10.0).unwrap();
        g.drain(3.0);
        assert_eq!(g.value(), 7.0);
        g.drain(100.0);
        assert_eq!(g.value(), 0.0);
    }

    #[test]
    fn drain_is_suppressed_while_refilling() {
        let mut g = OxygenGauge::new(10.0).unwrap();
        g.set_refilling(true);
        assert!(!g.drain(5.0));
        assert_eq!(g.value(), 10.0);
    }

    #[test]
    fn refill_requires_refilling_flag() {
        let mut g = OxygenGauge::new(10.0).unwrap();
        g.set_value(2.0);
        g.refill(50.0, 0.1);
        assert_eq!(g.value(), 2.0);

        g.set_refilling(true);
        g.refill(50.0, 0.1);
        assert_eq!(g.value(), 7.0);

        // Toggling off mid-refill freezes the value.
        g.set_refilling(false);
        g.refill(50.0, 0.1);
        assert_eq!(g.value(), 7.0);
    }

    #[test]
    fn refill_clamps_to_capacity() {
        let mut g = OxygenGauge::new(10.0).unwrap();
        g.set_value(9.0);
        g.set_refilling(true);
        g.refill(50.0, 1.0);
        assert_eq!(g.value(), 10.0);
    }

    #[test]
    fn depletion_fires_once_per_zero_crossing() {
        let mut g = OxygenGauge::new(5.0).unwrap();
        assert!(g.drain(5.0));
        // Still empty: no re-fire.
        assert!(!g.drain(1.0));
        assert!(!g.take_depletion_edge());

        // Refill above zero re-arms the edge.
        g.set_refilling(true);
        g.refill(10.0, 0.2);
        g.set_refilling(false);
        assert!(g.drain(10.0));
        assert!(!g.drain(1.0));
    }

    #[test]
    fn set_value_depletion_is_caught_by_edge_check() {
        let mut g = OxygenGauge::new(10.0).unwrap();
        g.set_value(0.0);
        assert!(g.take_depletion_edge());
        assert!(!g.take_depletion_edge());
    }

    #[test]
    fn fraction_tracks_value() {
        let mut g = OxygenGauge::new(300.0).unwrap();
        g.drain(1.0);
        assert!((g.fraction() - 299.0 / 300.0).abs() < 1e-6);
    }
}
