//! Simulation state and core entity types
//!
//! Everything a tick reads or writes lives in [`SimState`]. The controller
//! owns one instance and passes it by reference into the update functions.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Nothing has been played yet, waiting for the first start signal
    #[default]
    Idle,
    /// Ticks are being simulated
    Running,
    /// Run ended on a collision, waiting for a restart
    Over,
}

/// The jumping runner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Top edge of the bounding box
    pub y: f32,
    /// Vertical velocity (positive is down)
    pub vy: f32,
    /// In a jump arc
    pub airborne: bool,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            y: PLAYER_GROUND_Y,
            vy: 0.0,
            airborne: false,
        }
    }
}

impl Player {
    /// Resting exactly on the ground line
    pub fn is_grounded(&self) -> bool {
        !self.airborne && self.y == PLAYER_GROUND_Y
    }
}

/// A cactus scrolling in from the right
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    /// Left edge
    pub x: f32,
    pub width: f32,
    pub height: f32,
}

impl Obstacle {
    /// A fresh obstacle at the spawn point
    pub fn spawn() -> Self {
        Self {
            x: SPAWN_X,
            width: OBSTACLE_WIDTH,
            height: OBSTACLE_HEIGHT,
        }
    }

    /// Top edge, obstacles always stand on the ground line
    pub fn top(&self) -> f32 {
        GROUND_Y - self.height
    }
}

/// Mutable state of a single run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimState {
    pub player: Player,
    /// Spawn order, which is also left-to-right order
    pub obstacles: Vec<Obstacle>,
    /// Ticks since the run started
    pub tick_count: u64,
    /// Horizontal scroll speed (units per tick)
    pub speed: f32,
}

impl Default for SimState {
    fn default() -> Self {
        Self::new()
    }
}

impl SimState {
    /// State at the start of a run
    pub fn new() -> Self {
        Self {
            player: Player::default(),
            obstacles: Vec::new(),
            tick_count: 0,
            speed: BASE_SPEED,
        }
    }

    /// Put everything back to the start-of-run values
    pub fn reset(&mut self) {
        self.player = Player::default();
        self.obstacles.clear();
        self.tick_count = 0;
        self.speed = BASE_SPEED;
    }

    /// Score earned so far this run
    pub fn score(&self) -> u32 {
        (self.tick_count / SCORE_DIVISOR) as u32
    }
}
