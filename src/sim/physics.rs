//! Vertical motion of the player
//!
//! Per-tick Euler integration: velocity first, then position. Landing clamps
//! the box onto the ground line and kills all vertical velocity.

use super::state::Player;
use crate::consts::{GRAVITY, JUMP_STRENGTH, PLAYER_GROUND_Y};

/// Advance the player by one tick
pub fn integrate(player: &mut Player) {
    if !player.airborne && player.y >= PLAYER_GROUND_Y {
        return;
    }

    player.vy += GRAVITY;
    player.y += player.vy;

    if player.y >= PLAYER_GROUND_Y {
        player.y = PLAYER_GROUND_Y;
        player.vy = 0.0;
        player.airborne = false;
    }
}

/// Start a jump if standing on the ground.
///
/// Requests while airborne are dropped, not queued.
pub fn try_jump(player: &mut Player) -> bool {
    if !player.is_grounded() {
        return false;
    }
    player.airborne = true;
    player.vy = JUMP_STRENGTH;
    true
}
