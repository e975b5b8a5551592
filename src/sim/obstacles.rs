//! Obstacle spawning, scrolling and culling

use super::state::{Obstacle, SimState};
use crate::consts::{CULL_X, SPAWN_INTERVAL};

/// Spawn, advance and cull obstacles for the current tick.
///
/// Call after the tick counter has been incremented. A fresh obstacle is
/// advanced in the same tick it appears. Returns true if one was spawned.
pub fn update(state: &mut SimState) -> bool {
    let spawned = should_spawn(state.tick_count);
    if spawned {
        state.obstacles.push(Obstacle::spawn());
    }

    let speed = state.speed;
    state.obstacles.retain_mut(|obstacle| {
        obstacle.x -= speed;
        obstacle.x > CULL_X
    });

    spawned
}

/// Spawn cadence: every `SPAWN_INTERVAL` ticks, never on tick zero
pub fn should_spawn(tick_count: u64) -> bool {
    tick_count != 0 && tick_count % SPAWN_INTERVAL == 0
}
