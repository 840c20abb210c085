//! Fire-and-forget notifications for the host's audio, particle and UI
//! layers.
//!
//! The simulation only writes these events; it never waits on them and a
//! host that drops them on the floor changes nothing about the player
//! state. Continuous parameters are fractions in `[0, 1]`.

use bevy::prelude::*;

/// One-shot sound effects.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    Jump,
    Landing,
    Jetpack,
    Footstep,
    OutOfOxygen,
}

/// Continuous mixer parameters pushed to the audio layer.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub enum AudioParam {
    /// Horizontal speed normalized against the fixed maximum.
    MoveSpeed(f32),
    /// Gauge fill fraction.
    OxygenLevel(f32),
    /// Ground material index for footstep/landing variation.
    Surface(u8),
}

/// Animator blend parameter (name + value), mirroring the host's
/// `SetFloat`-style API.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct AnimatorParam {
    pub name: &'static str,
    pub value: f32,
}

/// Request to spawn a burst of particles at a world position.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct ParticleBurst {
    pub position: Vec3,
    pub count: u32,
}

/// Oxygen status-bar fill fraction.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct StatusBarFill(pub f32);
