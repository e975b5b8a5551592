//! Axis-aligned collision between the runner and obstacles
//!
//! The obstacle hitbox is shrunk horizontally on both sides and trimmed at
//! the top, so grazing a spike tip does not end the run. There is no inset
//! at the bottom: both boxes sit on the same ground line.

use glam::Vec2;

use super::state::Obstacle;
use crate::consts::*;

/// Axis-aligned bounding box in surface coordinates (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            max: Vec2::new(x + width, y + height),
        }
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }
}

/// Bounding box of the player with its top edge at `y`
pub fn player_box(y: f32) -> Aabb {
    Aabb::new(PLAYER_X, y, PLAYER_WIDTH, PLAYER_HEIGHT)
}

/// Bounding box of an obstacle standing on the ground line
pub fn obstacle_box(obstacle: &Obstacle) -> Aabb {
    Aabb::new(obstacle.x, obstacle.top(), obstacle.width, obstacle.height)
}

/// Overlap test with the obstacle's inset hitbox.
///
/// All comparisons are strict: overlapping by exactly the inset is a miss.
pub fn hits(player: &Aabb, obstacle: &Aabb) -> bool {
    player.max.x > obstacle.min.x + HORIZONTAL_INSET
        && player.min.x < obstacle.max.x - HORIZONTAL_INSET
        && player.max.y > obstacle.min.y + TOP_INSET
        && player.min.y < obstacle.max.y
}

/// True if any obstacle hits the player
pub fn check_collision(player_y: f32, obstacles: &[Obstacle]) -> bool {
    let player = player_box(player_y);
    obstacles.iter().any(|o| hits(&player, &obstacle_box(o)))
}
