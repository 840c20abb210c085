//! Oxygen-station trigger handling.
//!
//! The host collision layer reports enter/stay/exit against station
//! trigger volumes. Entering stores a checkpoint at the station anchor;
//! staying refills the gauge; leaving ends the refill.

use bevy::prelude::*;

use crate::checkpoint::CheckpointStore;
use crate::gauge::OxygenGauge;
use crate::host::{StationEvent, StationEventKind};
use crate::settings::Settings;

/// Vertical offset from the station's parent transform to the respawn
/// point, so the player reappears standing on the platform.
const STATION_ANCHOR_LIFT: f32 = 1.0;

/// React to station trigger events for this tick.
#[allow(clippy::needless_pass_by_value)]
pub fn station_triggers(
    time: Res<Time>,
    settings: Res<Settings>,
    mut gauge: ResMut<OxygenGauge>,
    mut checkpoints: ResMut<CheckpointStore>,
    mut events: EventReader<StationEvent>,
) {
    for ev in events.read() {
        match ev.kind {
            StationEventKind::Enter => {
                let anchor = ev.anchor + Vec3::Y * STATION_ANCHOR_LIFT;
                checkpoints.store(anchor, ev.facing_yaw);
                println!("Checkpoint stored at station ({anchor})");
            }
            StationEventKind::Stay => {
                gauge.set_refilling(true);
                gauge.refill(settings.oxygen.refill_rate, time.delta_seconds());
            }
            StationEventKind::Exit => {
                gauge.set_refilling(false);
            }
        }
    }
}
