use bevy::app::ScheduleRunnerPlugin;
use bevy::prelude::*;
use std::time::Duration;

use lowtide::checkpoint::CheckpointStore;
use lowtide::cues::{ParticleBurst, SoundCue, StatusBarFill};
use lowtide::debug::StateDumpPlugin;
use lowtide::gauge::OxygenGauge;
use lowtide::host::{
    FlatGround, GroundQuery, InputSample, Inventory, JETPACK, StationEvent, StationEventKind,
};
use lowtide::player::{PlayerBundle, PlayerPlugin};
use lowtide::settings::Settings;
use lowtide::settings::loader as settings_loader;

const TICK_SECONDS: f32 = 1.0 / 60.0;
const DEMO_TICKS: u64 = 1200;

/// Where the demo's station platform sits on the ground plane.
const STATION_ANCHOR: Vec3 = Vec3::new(0.0, 0.0, -8.0);

#[derive(Resource, Default)]
struct DemoTicks(u64);

fn main() {
    let settings = settings_loader::load_settings_from_dir("data/settings");
    let settings_watcher = settings_loader::setup_settings_watcher("data/settings")
        .unwrap_or_else(|_| settings_loader::SettingsWatcher::stub());

    let gauge = match OxygenGauge::new(settings.oxygen.max) {
        Ok(g) => g,
        Err(e) => {
            eprintln!("Invalid oxygen settings: {e}");
            std::process::exit(1);
        }
    };

    let mut app = App::new();
    app.add_plugins(MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(
        Duration::from_secs_f32(TICK_SECONDS),
    )));

    app.insert_resource(gauge);
    app.insert_resource(CheckpointStore::open("data/save/prefs.ron"));
    app.insert_resource(GroundQuery::new(FlatGround { height: 0.0 }));
    let dump_interval = settings.debug.dump_interval;
    app.insert_resource(settings);
    app.insert_resource(settings_watcher);
    app.insert_resource(DemoTicks::default());

    app.add_plugins(PlayerPlugin);
    app.add_plugins(StateDumpPlugin {
        interval: dump_interval,
    });

    app.add_systems(Startup, spawn_player);
    // The demo script stands in for the host: it writes the input sample
    // and station trigger events before the simulation chain runs.
    app.add_systems(PreUpdate, drive_demo_input);
    app.add_systems(Update, settings_loader::check_settings_changes);
    app.add_systems(PostUpdate, (log_cues, finish_after_demo));

    app.run();
}

#[allow(clippy::needless_pass_by_value)]
fn spawn_player(mut commands: Commands, settings: Res<Settings>) {
    commands.spawn(PlayerBundle::new(
        settings.movement.gravity,
        Vec3::new(0.0, settings.movement.foot_offset, 0.0),
    ));
}

/// Scripted walk: head for the station, top up, then wander off and use
/// the jetpack until the oxygen runs out and the checkpoint respawn kicks
/// in.
#[allow(clippy::needless_pass_by_value)]
fn drive_demo_input(
    mut ticks: ResMut<DemoTicks>,
    mut input: ResMut<InputSample>,
    mut inventory: ResMut<Inventory>,
    mut stations: EventWriter<StationEvent>,
) {
    let t = ticks.0;
    ticks.0 += 1;
    *input = InputSample::default();

    let station = |kind| StationEvent {
        kind,
        anchor: STATION_ANCHOR,
        facing_yaw: 180.0,
    };

    match t {
        0 => inventory.grant(JETPACK),
        // Walk forward to the station.
        1..=170 => input.move_axis = Vec2::new(0.0, 1.0),
        // Arrive: enter the trigger volume, linger to refill.
        171 => {
            stations.send(station(StationEventKind::Enter));
        }
        172..=260 => {
            stations.send(station(StationEventKind::Stay));
        }
        261 => {
            stations.send(station(StationEventKind::Exit));
        }
        // Wander off sideways, jumping as we go.
        262..=900 => {
            input.move_axis = Vec2::new(1.0, 0.2);
            if t % 120 == 0 {
                input.jump_pressed = true;
            }
        }
        _ => {}
    }
}

#[allow(clippy::needless_pass_by_value)]
fn log_cues(
    mut sounds: EventReader<SoundCue>,
    mut bursts: EventReader<ParticleBurst>,
    mut status: EventReader<StatusBarFill>,
    ticks: Res<DemoTicks>,
) {
    for cue in sounds.read() {
        println!("[t={}] sound: {cue:?}", ticks.0);
    }
    for burst in bursts.read() {
        println!("[t={}] particles: {} at {}", ticks.0, burst.count, burst.position);
    }
    // The status bar updates every tick; only surface it once a second.
    if ticks.0 % 60 == 0 {
        if let Some(fill) = status.read().last() {
            println!("[t={}] oxygen bar: {:.0}%", ticks.0, fill.0 * 100.0);
        }
    }
}

#[allow(clippy::needless_pass_by_value)]
fn finish_after_demo(ticks: Res<DemoTicks>, mut exit: EventWriter<AppExit>) {
    if ticks.0 > DEMO_TICKS {
        exit.send(AppExit::Success);
    }
}
