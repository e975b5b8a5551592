//! Deterministic simulation module
//!
//! All gameplay rules live here. This module must stay pure:
//! - Fixed timestep only, one call per tick
//! - No clocks, no randomness
//! - No rendering or platform dependencies

pub mod collision;
pub mod obstacles;
pub mod physics;
pub mod state;

pub use collision::{Aabb, check_collision, hits, obstacle_box, player_box};
pub use physics::{integrate, try_jump};
pub use state::{GamePhase, Obstacle, Player, SimState};
