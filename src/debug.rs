//! Periodic player-state dump for headless debugging.
//!
//! Prints position, grounding and gauge state at a fixed interval when
//! `debug.state_dump` is enabled in settings.

use bevy::prelude::*;

use crate::gauge::OxygenGauge;
use crate::player::Player;
use crate::settings::Settings;

#[derive(Resource)]
pub struct StateDumpTimer(pub Timer);

/// Registers the interval dump. `interval` is seconds between dumps,
/// normally `settings.debug.dump_interval`.
pub struct StateDumpPlugin {
    pub interval: f32,
}

impl Plugin for StateDumpPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(StateDumpTimer(Timer::from_seconds(
            self.interval,
            TimerMode::Repeating,
        )));
        app.add_systems(Update, dump_player_state);
    }
}

#[allow(clippy::needless_pass_by_value)]
fn dump_player_state(
    time: Res<Time>,
    settings: Res<Settings>,
    gauge: Res<OxygenGauge>,
    mut timer: ResMut<StateDumpTimer>,
    query: Query<(&Transform, &Player)>,
) {
    if !settings.debug.state_dump {
        return;
    }
    if !timer.0.tick(time.delta()).just_finished() {
        return;
    }
    for (tf, player) in &query {
        println!(
            "[state] pos={:.2?} grounded={} vy={:.2} gravity={:.1} oxygen={:.1}/{:.1}",
            tf.translation,
            player.grounded,
            player.velocity_y,
            player.gravity,
            gauge.value(),
            gauge.max(),
        );
    }
}
