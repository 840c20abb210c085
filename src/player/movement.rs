//! Per-tick locomotion: grounding, smoothed horizontal movement, vertical
//! integration, jump and gravity-inversion edges.
//!
//! The core math lives in `locomotion_step` so tests and benchmarks
//! exercise exactly what the system runs.

use bevy::math::Vec3Swizzles;
use bevy::prelude::*;

use crate::cues::{AnimatorParam, AudioParam, ParticleBurst, SoundCue};
use crate::gauge::OxygenGauge;
use crate::host::{GRAVITY_BOOT, GroundProbe, GroundQuery, InputSample, Inventory, JETPACK, Zone};
use crate::host::FootstepTick;
use crate::player::camera::PlayerLook;
use crate::player::physics;
use crate::player::{GravityLatch, Player};
use crate::settings::{MovementSettings, Settings};

/// Fixed maximum used to normalize the reported horizontal speed.
pub const MAX_HORIZONTAL_SPEED: f32 = 7.5;
/// Speeds at or below this are floored rather than snapped to zero, so
/// audio/animation parameters don't pop.
pub const SPEED_EPSILON: f32 = 0.01;

/// Airborne (jetpack) jumps reach three times the configured height.
const JET_HEIGHT_MULTIPLIER: f32 = 3.0;
/// Particles spawned per jetpack burst.
const JET_PARTICLE_COUNT: u32 = 30;

/// What a single locomotion step observed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveOutcome {
    /// Grounding went false→true this tick.
    pub landed: bool,
    /// Horizontal speed after integration, world units per second.
    pub horizontal_speed: f32,
}

/// Advance grounding, smoothing and velocity for one tick and move the
/// transform.
///
/// Grounding is probed at the feet point, which sits along the gravity
/// direction so an inverted player probes the ceiling. While grounded the
/// vertical velocity is held but motion into the floor is blocked; while
/// airborne it accumulates `gravity * dt`.
pub fn locomotion_step(
    transform: &mut Transform,
    player: &mut Player,
    look: &PlayerLook,
    move_axis: Vec2,
    probe: &dyn GroundProbe,
    movement: &MovementSettings,
    dt: f32,
) -> MoveOutcome {
    let was_grounded = player.grounded;
    let feet =
        transform.translation + Vec3::Y * (player.gravity.signum() * movement.foot_offset);
    player.grounded = probe.check_sphere(feet, movement.ground_radius);
    let landed = player.grounded && !was_grounded;
    if landed {
        player.latch = GravityLatch::Armed;
    }

    // Zero input must smooth toward zero, not toward a normalized NaN.
    let target = move_axis.normalize_or_zero();
    let dir = player
        .move_dir
        .step(target, movement.move_smooth_time, dt);

    if !player.grounded {
        player.velocity_y += player.gravity * dt;
    }

    player.velocity = (look.forward() * dir.y + look.right() * dir.x) * movement.move_speed
        + Vec3::Y * player.velocity_y;

    let mut delta = player.velocity * dt;
    // The floor blocks motion along gravity; the velocity itself is held.
    if player.grounded && player.velocity_y.signum() == player.gravity.signum() {
        delta.y = 0.0;
    }
    transform.translation += delta;

    MoveOutcome {
        landed,
        horizontal_speed: player.velocity.xz().length(),
    }
}

/// Horizontal speed normalized for the audio layer.
#[must_use]
pub fn speed_fraction(horizontal_speed: f32) -> f32 {
    horizontal_speed / MAX_HORIZONTAL_SPEED
}

/// Horizontal speed for the animator, floored near zero.
#[must_use]
pub fn animator_speed(horizontal_speed: f32) -> f32 {
    if horizontal_speed <= SPEED_EPSILON {
        SPEED_EPSILON
    } else {
        horizontal_speed / MAX_HORIZONTAL_SPEED
    }
}

/// Integrate locomotion and evaluate the jump and gravity-inversion edges
/// for this tick.
#[allow(clippy::needless_pass_by_value, clippy::too_many_arguments)]
pub fn player_move(
    time: Res<Time>,
    settings: Res<Settings>,
    input: Res<InputSample>,
    zone: Res<Zone>,
    inventory: Res<Inventory>,
    ground: Res<GroundQuery>,
    mut gauge: ResMut<OxygenGauge>,
    mut query: Query<(&mut Transform, &mut Player, &mut PlayerLook)>,
    mut sounds: EventWriter<SoundCue>,
    mut audio: EventWriter<AudioParam>,
    mut anim: EventWriter<AnimatorParam>,
    mut particles: EventWriter<ParticleBurst>,
) {
    let dt = time.delta_seconds();
    for (mut transform, mut player, mut look) in &mut query {
        let outcome = locomotion_step(
            &mut transform,
            &mut player,
            &look,
            input.move_axis,
            ground.0.as_ref(),
            &settings.movement,
            dt,
        );

        if outcome.landed {
            audio.send(AudioParam::Surface(zone.surface_index()));
            sounds.send(SoundCue::Landing);
        }

        audio.send(AudioParam::MoveSpeed(speed_fraction(outcome.horizontal_speed)));
        anim.send(AnimatorParam {
            name: "horspeed",
            value: animator_speed(outcome.horizontal_speed),
        });

        // Jump: grounded always; airborne only with a jetpack in the
        // overworld, at an oxygen cost.
        if input.jump_pressed {
            let jet_jump =
                !player.grounded && zone.jetpack_allowed() && inventory.has_item(JETPACK);
            if player.grounded || jet_jump {
                let mut height = settings.movement.jump_height;
                if jet_jump {
                    height *= JET_HEIGHT_MULTIPLIER;
                    let v = gauge.value();
                    gauge.set_value(v - settings.movement.jet_cost);
                    sounds.send(SoundCue::Jetpack);
                    particles.send(ParticleBurst {
                        position: transform.translation,
                        count: JET_PARTICLE_COUNT,
                    });
                }
                player.velocity_y = physics::jump_velocity(height, player.gravity);
                sounds.send(SoundCue::Jump);
            }
        }

        // Gravity inversion: interior zones only, needs the boots, and at
        // most once per grounded cycle.
        if input.gravity_pressed
            && zone.gravity_boots_allowed()
            && inventory.has_item(GRAVITY_BOOT)
            && player.latch == GravityLatch::Armed
        {
            physics::invert_gravity(&mut player, &mut look);
            transform.rotation = look.rotation();
        }
    }
}

/// Turn host footstep timing events into sound cues, but only while
/// grounded and actually moving.
#[allow(clippy::needless_pass_by_value)]
pub fn footstep_cues(
    zone: Res<Zone>,
    mut ticks: EventReader<FootstepTick>,
    query: Query<&Player>,
    mut sounds: EventWriter<SoundCue>,
    mut audio: EventWriter<AudioParam>,
) {
    for _ in ticks.read() {
        for player in &query {
            if player.grounded && player.velocity.xz().length() > SPEED_EPSILON {
                audio.send(AudioParam::Surface(zone.surface_index()));
                sounds.send(SoundCue::Footstep);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::FlatGround;

    const DT: f32 = 1.0 / 60.0;

    fn setup() -> (Transform, Player, PlayerLook, MovementSettings, FlatGround) {
        let movement = MovementSettings::default();
        // Feet probe reaches the plane at y=0 when standing at foot_offset.
        let transform = Transform::from_translation(Vec3::new(0.0, movement.foot_offset, 0.0));
        (
            transform,
            Player::new(movement.gravity),
            PlayerLook::default(),
            movement,
            FlatGround { height: 0.0 },
        )
    }

    #[test]
    fn standing_on_the_plane_is_grounded() {
        let (mut tf, mut player, look, movement, ground) = setup();
        let out = locomotion_step(&mut tf, &mut player, &look, Vec2::ZERO, &ground, &movement, DT);
        assert!(player.grounded);
        assert!(out.landed); // first tick transitions from the airborne default
        let out = locomotion_step(&mut tf, &mut player, &look, Vec2::ZERO, &ground, &movement, DT);
        assert!(!out.landed); // edge fires only on the transition
    }

    #[test]
    fn airborne_velocity_accumulates_gravity() {
        let (_, mut player, look, movement, ground) = setup();
        let mut tf = Transform::from_translation(Vec3::new(0.0, 50.0, 0.0));
        locomotion_step(&mut tf, &mut player, &look, Vec2::ZERO, &ground, &movement, DT);
        let v1 = player.velocity_y;
        locomotion_step(&mut tf, &mut player, &look, Vec2::ZERO, &ground, &movement, DT);
        assert!(player.velocity_y < v1);
        assert!(v1 < 0.0);
        assert!(tf.translation.y < 50.0);
    }

    #[test]
    fn grounded_holds_vertical_position() {
        let (mut tf, mut player, look, movement, ground) = setup();
        player.velocity_y = -30.0; // stale fall speed from before landing
        locomotion_step(&mut tf, &mut player, &look, Vec2::ZERO, &ground, &movement, DT);
        assert_eq!(tf.translation.y, movement.foot_offset);
        assert_eq!(player.velocity_y, -30.0); // held, not zeroed
    }

    #[test]
    fn movement_follows_the_look_basis() {
        let (mut tf, mut player, look, movement, ground) = setup();
        // Run several ticks so the smoothed direction ramps up.
        for _ in 0..120 {
            locomotion_step(&mut tf, &mut player, &look, Vec2::new(0.0, 1.0), &ground, &movement, DT);
        }
        // Default yaw faces -Z.
        assert!(tf.translation.z < -1.0);
        assert!(tf.translation.x.abs() < 1e-3);
        let speed = player.velocity.xz().length();
        assert!((speed - movement.move_speed).abs() < 0.05);
    }

    #[test]
    fn zero_move_input_stays_zero() {
        let (mut tf, mut player, look, movement, ground) = setup();
        for _ in 0..10 {
            locomotion_step(&mut tf, &mut player, &look, Vec2::ZERO, &ground, &movement, DT);
        }
        assert_eq!(tf.translation.x, 0.0);
        assert_eq!(tf.translation.z, 0.0);
    }

    #[test]
    fn inverted_gravity_probes_overhead() {
        let (_, mut player, look, movement, _) = setup();
        player.gravity = 10.0;
        // Ceiling at y = 2, player just below it.
        let ceiling = FlatGround { height: 2.0 };
        let mut tf = Transform::from_translation(Vec3::new(0.0, 2.0 - movement.foot_offset, 0.0));
        locomotion_step(&mut tf, &mut player, &look, Vec2::ZERO, &ceiling, &movement, DT);
        assert!(player.grounded);
    }

    #[test]
    fn landing_rearms_the_gravity_latch() {
        let (mut tf, mut player, look, movement, ground) = setup();
        player.latch = GravityLatch::AwaitingLanding;
        locomotion_step(&mut tf, &mut player, &look, Vec2::ZERO, &ground, &movement, DT);
        assert_eq!(player.latch, GravityLatch::Armed);
    }

    #[test]
    fn speed_reporting_floors_near_zero() {
        assert_eq!(animator_speed(0.0), SPEED_EPSILON);
        assert_eq!(animator_speed(0.009), SPEED_EPSILON);
        let f = animator_speed(7.5);
        assert!((f - 1.0).abs() < 1e-6);
        assert!((speed_fraction(3.75) - 0.5).abs() < 1e-6);
    }
}
