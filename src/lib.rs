//! Dino Runner - a single-screen endless runner
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, obstacles, collisions)
//! - `game`: Tick orchestration, scoring and the run state machine
//! - `renderer`: Procedural drawing onto a rectangle surface
//! - `platform`: Host clock adapters and the fixed-timestep driver
//! - `highscores`: In-process best score tracking

pub mod error;
pub mod game;
pub mod highscores;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::HostError;
pub use game::{Action, Game, GameEvent, TickOutcome};
pub use highscores::HighScores;
pub use platform::{Clock, Driver, FixedTimestep};
pub use renderer::{Color, Palette};
pub use settings::{Settings, SettingsError};

/// Game configuration constants
///
/// Hand-tuned feel values. The collision insets shrink the obstacle
/// hitbox relative to the drawn cactus.
pub mod consts {
    /// Nominal tick rate of the simulation
    pub const TICKS_PER_SECOND: f64 = 60.0;

    /// Logical drawing surface
    pub const CANVAS_WIDTH: f32 = 800.0;
    pub const CANVAS_HEIGHT: f32 = 200.0;
    /// Strip below the ground line
    pub const GROUND_HEIGHT: f32 = 20.0;
    /// Walkable surface y coordinate
    pub const GROUND_Y: f32 = CANVAS_HEIGHT - GROUND_HEIGHT;

    /// Player bounding box
    pub const PLAYER_X: f32 = 60.0;
    pub const PLAYER_WIDTH: f32 = 40.0;
    pub const PLAYER_HEIGHT: f32 = 43.0;
    /// Top of the player box when standing on the ground
    pub const PLAYER_GROUND_Y: f32 = GROUND_Y - PLAYER_HEIGHT;

    /// Downward acceleration per tick
    pub const GRAVITY: f32 = 0.6;
    /// Launch velocity (negative is up)
    pub const JUMP_STRENGTH: f32 = -12.0;

    /// Obstacles
    pub const SPAWN_INTERVAL: u64 = 90;
    pub const SPAWN_X: f32 = CANVAS_WIDTH;
    pub const OBSTACLE_WIDTH: f32 = 40.0;
    pub const OBSTACLE_HEIGHT: f32 = 40.0;
    /// Obstacles at or left of this x are dropped
    pub const CULL_X: f32 = -50.0;

    /// Scroll speed and difficulty ramp
    pub const BASE_SPEED: f32 = 6.0;
    pub const SPEED_RAMP_INTERVAL: u64 = 200;
    pub const SPEED_INCREMENT: f32 = 0.5;

    /// One point per this many ticks
    pub const SCORE_DIVISOR: u64 = 10;

    /// Hitbox insets
    pub const HORIZONTAL_INSET: f32 = 10.0;
    pub const TOP_INSET: f32 = 5.0;
}
