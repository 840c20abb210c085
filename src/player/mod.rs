//! Player state and the per-tick simulation schedule.
//!
//! The `Player` component carries the locomotion state the integrator
//! advances every tick; `PlayerPlugin` wires the whole simulation chain in
//! its required order: station triggers, look, movement, oxygen drain,
//! depletion respawn. The chain is skipped entirely while the host's pause
//! flag is set, so nothing (including input smoothing) drifts in pause
//! menus.
//!
//! The host must insert `Settings`, `OxygenGauge`, `CheckpointStore` and
//! `GroundQuery` resources before the first update, and spawn a
//! `PlayerBundle`.
pub mod camera;
pub mod movement;
pub mod physics;
pub mod respawn;
pub mod smoothing;

use bevy::prelude::*;

pub use camera::{PlayerLook, player_look};
pub use movement::{MAX_HORIZONTAL_SPEED, SPEED_EPSILON, footstep_cues, player_move};
pub use physics::{invert_gravity, jump_velocity};
pub use respawn::respawn_on_depletion;

use crate::cues::{AnimatorParam, AudioParam, ParticleBurst, SoundCue, StatusBarFill};
use crate::gauge::{Depleted, DrainTracker, oxygen_drain, station::station_triggers};
use crate::host::{FootstepTick, InputSample, Inventory, Paused, StationEvent, Zone, unpaused};
use crate::player::smoothing::SmoothedVec2;

/// One-shot permission to invert gravity, spent on use and re-armed by
/// landing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GravityLatch {
    #[default]
    Armed,
    AwaitingLanding,
}

/// Component tracking the locomotion state advanced each tick.
#[derive(Component, Debug)]
pub struct Player {
    /// Velocity from the last integration, world units per second.
    pub velocity: Vec3,
    /// Vertical velocity component; accumulates gravity while airborne.
    pub velocity_y: f32,
    /// Grounding result from the last probe.
    pub grounded: bool,
    /// Current signed gravity; negated by inversion.
    pub gravity: f32,
    /// Gravity-inversion permission for this grounded cycle.
    pub latch: GravityLatch,
    /// Host collision gate; switched off around respawn teleports.
    pub collider_enabled: bool,
    /// Smoothed move input.
    pub move_dir: SmoothedVec2,
}

impl Player {
    #[must_use]
    pub fn new(gravity: f32) -> Self {
        Self {
            velocity: Vec3::ZERO,
            velocity_y: 0.0,
            grounded: false,
            gravity,
            latch: GravityLatch::default(),
            collider_enabled: true,
            move_dir: SmoothedVec2::default(),
        }
    }

    /// Zero all motion: velocity, vertical velocity and the smoothed move
    /// direction with its spring state. Used on respawn.
    pub fn reset_motion(&mut self) {
        self.velocity = Vec3::ZERO;
        self.velocity_y = 0.0;
        self.move_dir.reset();
    }
}

/// Everything a simulated player entity needs.
#[derive(Bundle)]
pub struct PlayerBundle {
    pub player: Player,
    pub look: PlayerLook,
    pub tracker: DrainTracker,
    pub transform: Transform,
}

impl PlayerBundle {
    #[must_use]
    pub fn new(gravity: f32, position: Vec3) -> Self {
        Self {
            player: Player::new(gravity),
            look: PlayerLook::default(),
            tracker: DrainTracker::default(),
            transform: Transform::from_translation(position),
        }
    }
}

/// Registers the simulation events, host-input resources and the ordered
/// per-tick system chain.
pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<SoundCue>()
            .add_event::<AudioParam>()
            .add_event::<AnimatorParam>()
            .add_event::<ParticleBurst>()
            .add_event::<StatusBarFill>()
            .add_event::<StationEvent>()
            .add_event::<FootstepTick>()
            .add_event::<Depleted>()
            .init_resource::<InputSample>()
            .init_resource::<Paused>()
            .init_resource::<Inventory>()
            .init_resource::<Zone>();

        // Order matters: station refill state must be settled before the
        // drain, and the drain before the depletion respawn, so a respawn
        // always sees an up-to-date checkpoint.
        app.add_systems(
            Update,
            (
                station_triggers,
                player_look,
                player_move,
                oxygen_drain,
                respawn_on_depletion,
            )
                .chain()
                .run_if(unpaused),
        );
        app.add_systems(Update, footstep_cues.run_if(unpaused));
    }
}
