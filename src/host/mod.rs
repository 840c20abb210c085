//! Contracts the host engine fulfils each tick: sampled input, pause flag,
//! inventory capabilities, zone classification, collision probes and
//! station trigger-volume notifications.
//!
//! Everything here is written by the host and read by the simulation; the
//! simulation treats all of it as total (a missing capability is simply
//! `false`, an absent probe hit is "airborne").

use bevy::prelude::*;
use std::collections::HashSet;

/// Per-tick input sample. The host resolves device bindings and edge
/// detection and writes one of these before the simulation schedule runs;
/// `jump_pressed` / `gravity_pressed` are one-shot edges, not held state.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct InputSample {
    /// Raw look delta for this tick (pre-smoothing).
    pub look_delta: Vec2,
    /// Raw move axis (x = strafe, y = forward), pre-normalization.
    pub move_axis: Vec2,
    /// Jump control went down this tick.
    pub jump_pressed: bool,
    /// Gravity-inversion control went down this tick.
    pub gravity_pressed: bool,
}

impl InputSample {
    /// Clear the one-shot edges, keeping held axes. Hosts that write a
    /// fresh sample every tick don't need this.
    pub fn clear_edges(&mut self) {
        self.jump_pressed = false;
        self.gravity_pressed = false;
    }
}

/// Host-owned pause flag. While set, the whole simulation chain is
/// skipped for the tick — no smoothing decay, no drain.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct Paused(pub bool);

/// Run condition for the simulation set.
#[allow(clippy::needless_pass_by_value)]
pub fn unpaused(paused: Res<Paused>) -> bool {
    !paused.0
}

/// Items the player carries. Only queried for capability gating; a name
/// that was never granted reads as not held.
#[derive(Resource, Debug, Clone, Default)]
pub struct Inventory {
    items: HashSet<String>,
}

/// Capability item enabling airborne jumps in the overworld.
pub const JETPACK: &str = "Jetpack";
/// Capability item enabling gravity inversion outside the overworld.
pub const GRAVITY_BOOT: &str = "Gravity Boot";

impl Inventory {
    #[must_use]
    pub fn has_item(&self, name: &str) -> bool {
        self.items.contains(name)
    }

    pub fn grant(&mut self, name: &str) {
        self.items.insert(name.to_string());
    }
}

/// Which part of the game the player is currently in. The overworld allows
/// jetpack bursts but never gravity inversion; interior zones are the
/// reverse.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Zone {
    #[default]
    Overworld,
    Caverns,
}

impl Zone {
    #[must_use]
    pub fn jetpack_allowed(self) -> bool {
        matches!(self, Zone::Overworld)
    }

    #[must_use]
    pub fn gravity_boots_allowed(self) -> bool {
        !matches!(self, Zone::Overworld)
    }

    /// Ground material index fed to the audio layer with footstep and
    /// landing cues.
    #[must_use]
    pub fn surface_index(self) -> u8 {
        match self {
            Zone::Overworld => 2, // water
            Zone::Caverns => 3,   // rock
        }
    }
}

/// Proximity query against ground-classified geometry, answered by the
/// host's collision layer.
pub trait GroundProbe: Send + Sync {
    /// True if any ground geometry lies within `radius` of `point`.
    fn check_sphere(&self, point: Vec3, radius: f32) -> bool;
}

/// Boxed [`GroundProbe`] resource the simulation queries each tick.
#[derive(Resource)]
pub struct GroundQuery(pub Box<dyn GroundProbe>);

impl GroundQuery {
    #[must_use]
    pub fn new(probe: impl GroundProbe + 'static) -> Self {
        GroundQuery(Box::new(probe))
    }
}

/// Infinite horizontal plane at a fixed height. Enough for hosts without a
/// real collision mesh and for tests.
#[derive(Debug, Clone, Copy)]
pub struct FlatGround {
    pub height: f32,
}

impl GroundProbe for FlatGround {
    fn check_sphere(&self, point: Vec3, radius: f32) -> bool {
        (point.y - self.height).abs() <= radius
    }
}

/// Trigger-volume notification for oxygen stations, sent by the host
/// collision layer. `anchor` is the station's parent transform position;
/// `facing_yaw` is the yaw (degrees) the player should face after a
/// respawn at this station.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct StationEvent {
    pub kind: StationEventKind,
    pub anchor: Vec3,
    pub facing_yaw: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StationEventKind {
    Enter,
    Stay,
    Exit,
}

/// Host-driven footstep timing event (typically from animation keyframes).
/// The simulation decides whether it actually produces a sound.
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct FootstepTick;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_item_reads_as_false() {
        let inv = Inventory::default();
        assert!(!inv.has_item(JETPACK));
    }

    #[test]
    fn granted_item_is_held() {
        let mut inv = Inventory::default();
        inv.grant(GRAVITY_BOOT);
        assert!(inv.has_item(GRAVITY_BOOT));
        assert!(!inv.has_item(JETPACK));
    }

    #[test]
    fn zone_gates_are_mutually_exclusive() {
        assert!(Zone::Overworld.jetpack_allowed());
        assert!(!Zone::Overworld.gravity_boots_allowed());
        assert!(!Zone::Caverns.jetpack_allowed());
        assert!(Zone::Caverns.gravity_boots_allowed());
    }

    #[test]
    fn flat_ground_probe_detects_contact() {
        let probe = FlatGround { height: 0.0 };
        assert!(probe.check_sphere(Vec3::new(5.0, 0.1, -3.0), 0.2));
        assert!(!probe.check_sphere(Vec3::new(0.0, 1.0, 0.0), 0.2));
    }
}
