//! Depletion handling: the out-of-oxygen death and the reset back to the
//! last stored checkpoint.

use bevy::prelude::*;

use crate::checkpoint::CheckpointStore;
use crate::cues::{SoundCue, StatusBarFill};
use crate::gauge::Depleted;
use crate::player::Player;
use crate::player::camera::PlayerLook;

/// React to a gauge depletion: play the out-of-oxygen cue, teleport to the
/// stored checkpoint (a silent no-op on position when none was ever
/// stored), refill the gauge and clear all motion.
///
/// The collider is switched off around the teleport so the host's
/// collision layer doesn't sweep the player through geometry on the way.
#[allow(clippy::needless_pass_by_value)]
pub fn respawn_on_depletion(
    mut depleted: EventReader<Depleted>,
    checkpoints: Res<CheckpointStore>,
    mut gauge: ResMut<crate::gauge::OxygenGauge>,
    mut query: Query<(&mut Transform, &mut Player, &mut PlayerLook)>,
    mut sounds: EventWriter<SoundCue>,
    mut status: EventWriter<StatusBarFill>,
) {
    if depleted.is_empty() {
        return;
    }
    depleted.clear();

    println!("Player has run out of oxygen");
    sounds.send(SoundCue::OutOfOxygen);

    for (mut transform, mut player, mut look) in &mut query {
        player.reset_motion();

        player.collider_enabled = false;
        if let Ok(cp) = checkpoints.load() {
            transform.translation = cp.position;
            look.yaw = cp.yaw_degrees;
            look.roll = 0.0; // the body comes back upright
            transform.rotation = look.rotation();
        }
        player.collider_enabled = true;
    }

    let max = gauge.max();
    gauge.set_value(max);
    status.send(StatusBarFill(gauge.fraction()));
}
