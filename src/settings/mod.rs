//! Settings, types and defaults.
//!
//! Settings are stored as a RON file under `data/settings/` and are
//! hot-reloadable using the RON watcher utilities (see
//! `ron::setup_ron_watcher`).
use bevy::prelude::Resource;
use serde::{Deserialize, Serialize};

pub mod loader;

/// Camera / look input tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ControlsSettings {
    #[serde(default)]
    pub invert_y: bool, // Invert look Y axis
    #[serde(default)]
    pub invert_x: bool, // Invert look X axis
    #[serde(default = "ControlsSettings::default_sensitivity")]
    pub mouse_sensitivity: f32, // Degrees of rotation per unit of look input
    #[serde(default = "ControlsSettings::default_mouse_smooth_time")]
    pub mouse_smooth_time: f32, // Smooth-damp time constant for look deltas (seconds)
    #[serde(default = "ControlsSettings::default_camera_cap")]
    pub camera_cap: f32, // Pitch clamp in degrees (applied as +/- cap)
}

impl ControlsSettings {
    fn default_sensitivity() -> f32 { 0.1 }
    fn default_mouse_smooth_time() -> f32 { 0.03 }
    fn default_camera_cap() -> f32 { 85.0 }
}

impl Default for ControlsSettings {
    fn default() -> Self {
        Self {
            invert_y: false,
            invert_x: false,
            mouse_sensitivity: Self::default_sensitivity(),
            mouse_smooth_time: Self::default_mouse_smooth_time(),
            camera_cap: Self::default_camera_cap(),
        }
    }
}

/// Locomotion tuning: speeds, gravity, jumping.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovementSettings {
    #[serde(default = "MovementSettings::default_move_speed")]
    pub move_speed: f32, // Horizontal speed in world units per second
    #[serde(default = "MovementSettings::default_move_smooth_time")]
    pub move_smooth_time: f32, // Smooth-damp time constant for move input (seconds)
    #[serde(default = "MovementSettings::default_gravity")]
    pub gravity: f32, // Signed vertical acceleration; negated while inverted
    #[serde(default = "MovementSettings::default_jump_height")]
    pub jump_height: f32, // Apex height of a grounded jump in world units
    #[serde(default = "MovementSettings::default_jet_cost")]
    pub jet_cost: f32, // Oxygen deducted per jetpack burst
    #[serde(default = "MovementSettings::default_ground_radius")]
    pub ground_radius: f32, // Probe radius for the grounding check
    #[serde(default = "MovementSettings::default_foot_offset")]
    pub foot_offset: f32, // Distance from body origin to the grounding probe point
}

impl MovementSettings {
    fn default_move_speed() -> f32 { 6.0 }
    fn default_move_smooth_time() -> f32 { 0.3 }
    fn default_gravity() -> f32 { -10.0 }
    fn default_jump_height() -> f32 { 6.0 }
    fn default_jet_cost() -> f32 { 20.0 }
    fn default_ground_radius() -> f32 { 0.2 }
    fn default_foot_offset() -> f32 { 0.9 }
}

impl Default for MovementSettings {
    fn default() -> Self {
        Self {
            move_speed: Self::default_move_speed(),
            move_smooth_time: Self::default_move_smooth_time(),
            gravity: Self::default_gravity(),
            jump_height: Self::default_jump_height(),
            jet_cost: Self::default_jet_cost(),
            ground_radius: Self::default_ground_radius(),
            foot_offset: Self::default_foot_offset(),
        }
    }
}

/// Oxygen gauge tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OxygenSettings {
    #[serde(default = "OxygenSettings::default_max")]
    pub max: f32, // Gauge capacity; must be positive
    #[serde(default = "OxygenSettings::default_loss_rate")]
    pub loss_rate: f32, // Oxygen lost per world unit walked
    #[serde(default = "OxygenSettings::default_refill_rate")]
    pub refill_rate: f32, // Oxygen gained per second at a station
    #[serde(default = "OxygenSettings::default_teleport_threshold")]
    pub teleport_threshold: f32, // Per-tick displacement above this is treated as a teleport and not drained
}

impl OxygenSettings {
    fn default_max() -> f32 { 300.0 }
    fn default_loss_rate() -> f32 { 2.0 }
    fn default_refill_rate() -> f32 { 50.0 }
    fn default_teleport_threshold() -> f32 { 1.0 }
}

impl Default for OxygenSettings {
    fn default() -> Self {
        Self {
            max: Self::default_max(),
            loss_rate: Self::default_loss_rate(),
            refill_rate: Self::default_refill_rate(),
            teleport_threshold: Self::default_teleport_threshold(),
        }
    }
}

/// Debug helpers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebugSettings {
    #[serde(default)]
    pub state_dump: bool, // Periodically print player state to stdout
    #[serde(default = "DebugSettings::default_dump_interval")]
    pub dump_interval: f32, // Seconds between state dumps
}

impl DebugSettings {
    fn default_dump_interval() -> f32 { 5.0 }
}

impl Default for DebugSettings {
    fn default() -> Self {
        Self {
            state_dump: false,
            dump_interval: Self::default_dump_interval(),
        }
    }
}

/// Top-level settings resource.
#[derive(Debug, Clone, Resource, Serialize, Deserialize, Default)]
pub struct Settings {
    #[serde(default)]
    pub controls: ControlsSettings,
    #[serde(default)]
    pub movement: MovementSettings,
    #[serde(default)]
    pub oxygen: OxygenSettings,
    #[serde(default)]
    pub debug: DebugSettings,
}

impl Settings {
    #[must_use]
    pub fn defaults() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let s: Settings = ron::from_str("(movement: (move_speed: 4.5))").unwrap();
        assert_eq!(s.movement.move_speed, 4.5);
        assert_eq!(s.movement.gravity, -10.0);
        assert_eq!(s.oxygen.max, 300.0);
        assert_eq!(s.controls.mouse_smooth_time, 0.03);
    }

    #[test]
    fn empty_document_is_all_defaults() {
        let s: Settings = ron::from_str("()").unwrap();
        assert_eq!(s.oxygen.teleport_threshold, 1.0);
        assert_eq!(s.movement.jump_height, 6.0);
        assert!(!s.debug.state_dump);
    }
}
