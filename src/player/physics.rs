//! Vertical physics helpers: the jump impulse and gravity inversion.

use crate::player::{GravityLatch, Player};
use crate::player::camera::PlayerLook;

/// Vertical velocity for a jump reaching `height` at its apex.
///
/// The formula holds for either gravity sign: under normal (negative)
/// gravity the impulse is upward, under inverted gravity it points down,
/// which is "up" from the player's flipped point of view.
#[must_use]
pub fn jump_velocity(height: f32, gravity: f32) -> f32 {
    (height * gravity.abs()).sqrt() * -gravity.signum()
}

/// Flip gravity for the player: negate gravity, roll the body 180°,
/// mirror the accumulated pitch, zero vertical velocity and spend the
/// latch. The latch re-arms on the next landing.
pub fn invert_gravity(player: &mut Player, look: &mut PlayerLook) {
    player.gravity = -player.gravity;
    look.roll = if look.roll == 0.0 { 180.0 } else { 0.0 };
    look.pitch = -look.pitch;
    player.velocity_y = 0.0;
    player.latch = GravityLatch::AwaitingLanding;
}
