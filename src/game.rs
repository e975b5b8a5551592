//! Game loop controller
//!
//! Owns the simulation and session state, runs the per-tick update order
//! and drives the Idle -> Running -> Over state machine.

use crate::consts::{SPEED_INCREMENT, SPEED_RAMP_INTERVAL};
use crate::highscores::HighScores;
use crate::renderer::{Painter, Palette, Surface};
use crate::sim::{GamePhase, SimState, check_collision, integrate, obstacles, try_jump};

/// What a primary action (space, click, tap) did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// A new run began
    Started,
    /// The runner left the ground
    Jumped,
    /// Jump requested while already in the air
    Ignored,
}

/// Result of a single tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Run continues
    Continue,
    /// Collision: the run is over and the tick source should stop
    Crashed,
    /// Not running, nothing was simulated
    Halted,
}

/// Notable things that happened, drained by the host
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    Started { run: u32 },
    Jumped,
    ObstacleSpawned,
    SpeedIncreased { speed: f32 },
    Crashed { score: u32, new_best: bool },
}

/// A play session: the current run plus the best score across runs
#[derive(Debug, Clone)]
pub struct Game {
    sim: SimState,
    phase: GamePhase,
    score: u32,
    high_scores: HighScores,
    painter: Painter,
    events: Vec<GameEvent>,
}

impl Default for Game {
    fn default() -> Self {
        Self::new(Palette::default())
    }
}

impl Game {
    pub fn new(palette: Palette) -> Self {
        Self {
            sim: SimState::new(),
            phase: GamePhase::Idle,
            score: 0,
            high_scores: HighScores::new(),
            painter: Painter::new(palette),
            events: Vec::new(),
        }
    }

    /// Space / click / tap: start when idle or over, otherwise jump
    pub fn primary_action(&mut self) -> Action {
        match self.phase {
            GamePhase::Idle | GamePhase::Over => {
                self.start();
                Action::Started
            }
            GamePhase::Running => {
                if self.jump() {
                    Action::Jumped
                } else {
                    Action::Ignored
                }
            }
        }
    }

    /// Begin a fresh run. Restart after game over works the same way.
    pub fn start(&mut self) {
        self.sim.reset();
        self.score = 0;
        self.phase = GamePhase::Running;

        let run = self.high_scores.runs_played() + 1;
        self.events.push(GameEvent::Started { run });
        log::info!("Run {} started", run);
    }

    /// Jump if running and standing on the ground
    pub fn jump(&mut self) -> bool {
        if self.phase != GamePhase::Running {
            return false;
        }
        let jumped = try_jump(&mut self.sim.player);
        if jumped {
            self.events.push(GameEvent::Jumped);
        }
        jumped
    }

    /// Advance one tick and draw it onto `surface`.
    ///
    /// The order matters: physics, redraw, count, obstacles, obstacle draw,
    /// collision, then score and speed.
    pub fn tick<S: Surface>(&mut self, surface: &mut S) -> TickOutcome {
        if self.phase != GamePhase::Running {
            return TickOutcome::Halted;
        }

        integrate(&mut self.sim.player);

        self.painter.draw_backdrop(surface);
        self.painter.draw_player(
            surface,
            self.sim.player.y,
            self.sim.tick_count,
            self.sim.player.airborne,
        );

        self.sim.tick_count += 1;

        if obstacles::update(&mut self.sim) {
            self.events.push(GameEvent::ObstacleSpawned);
            log::trace!("Obstacle spawned at tick {}", self.sim.tick_count);
        }

        self.painter.draw_obstacles(surface, &self.sim.obstacles);

        if check_collision(self.sim.player.y, &self.sim.obstacles) {
            self.finish_run();
            return TickOutcome::Crashed;
        }

        self.score = self.sim.score();

        if self.sim.tick_count % SPEED_RAMP_INTERVAL == 0 {
            self.sim.speed += SPEED_INCREMENT;
            self.events.push(GameEvent::SpeedIncreased {
                speed: self.sim.speed,
            });
            log::debug!(
                "Speed up to {:.1} at tick {}",
                self.sim.speed,
                self.sim.tick_count
            );
        }

        TickOutcome::Continue
    }

    /// Draw the current state without simulating (idle and game-over screens)
    pub fn draw<S: Surface>(&self, surface: &mut S) {
        self.painter.draw_frame(surface, &self.sim);
    }

    fn finish_run(&mut self) {
        self.phase = GamePhase::Over;
        let new_best = self.high_scores.record(self.score);
        self.events.push(GameEvent::Crashed {
            score: self.score,
            new_best,
        });
        log::info!(
            "Crashed at tick {} with score {} (best {}{})",
            self.sim.tick_count,
            self.score,
            self.high_scores.best(),
            if new_best { ", new record" } else { "" }
        );
    }

    /// Take all events raised since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn is_idle(&self) -> bool {
        self.phase == GamePhase::Idle
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::Over
    }

    /// Score of the current (or last finished) run
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Best score since the process started
    pub fn high_score(&self) -> u32 {
        self.high_scores.best()
    }

    pub fn high_scores(&self) -> &HighScores {
        &self.high_scores
    }

    pub fn sim(&self) -> &SimState {
        &self.sim
    }

    /// Direct access for scenario setup in tests and tools
    pub fn sim_mut(&mut self) -> &mut SimState {
        &mut self.sim
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::renderer::{NullSurface, RecordingSurface};
    use crate::sim::Obstacle;

    fn running() -> Game {
        let mut game = Game::default();
        assert_eq!(game.primary_action(), Action::Started);
        game
    }

    #[test]
    fn test_starts_idle() {
        let game = Game::default();
        assert!(game.is_idle());
        assert!(!game.is_running());
        assert!(!game.is_over());
        assert_eq!(game.score(), 0);
        assert_eq!(game.high_score(), 0);
    }

    #[test]
    fn test_tick_while_idle_is_noop() {
        let mut game = Game::default();
        let mut surface = RecordingSurface::new();
        assert_eq!(game.tick(&mut surface), TickOutcome::Halted);
        assert!(surface.calls.is_empty());
        assert_eq!(game.sim().tick_count, 0);
    }

    #[test]
    fn test_jump_rejected_unless_running() {
        let mut game = Game::default();
        assert!(!game.jump());
        assert!(!game.sim().player.airborne);
    }

    #[test]
    fn test_primary_action_jumps_then_ignores() {
        let mut game = running();
        assert_eq!(game.primary_action(), Action::Jumped);
        game.tick(&mut NullSurface);
        assert_eq!(game.primary_action(), Action::Ignored);
    }

    #[test]
    fn test_ninety_ticks_spawns_one_obstacle() {
        let mut game = running();
        for _ in 0..90 {
            assert_eq!(game.tick(&mut NullSurface), TickOutcome::Continue);
        }
        assert_eq!(game.sim().obstacles.len(), 1);
        assert_eq!(game.sim().obstacles[0].x, SPAWN_X - BASE_SPEED);

        for _ in 0..89 {
            game.tick(&mut NullSurface);
        }
        assert_eq!(game.sim().tick_count, 179);
        assert_eq!(game.sim().obstacles.len(), 1);
        assert_eq!(game.sim().obstacles[0].x, SPAWN_X - 90.0 * BASE_SPEED);
    }

    #[test]
    fn test_score_tracks_ticks() {
        let mut game = running();
        let mut last = 0;
        for n in 1..=150u64 {
            game.tick(&mut NullSurface);
            assert!(game.score() >= last);
            assert_eq!(game.score() as u64, n / SCORE_DIVISOR);
            last = game.score();
        }
    }

    #[test]
    fn test_speed_ramps_every_200_ticks() {
        let mut game = running();
        // Keep the track clear so the run survives
        for n in 1..=600u64 {
            game.sim_mut().obstacles.clear();
            game.tick(&mut NullSurface);
            let ramps = (n / SPEED_RAMP_INTERVAL) as f32;
            assert_eq!(game.sim().speed, BASE_SPEED + ramps * SPEED_INCREMENT);
        }

        let speed_events = game
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, GameEvent::SpeedIncreased { .. }))
            .count();
        assert_eq!(speed_events, 3);
    }

    #[test]
    fn test_crash_without_jumping() {
        let mut game = running();
        let mut ticks = 0;
        while game.tick(&mut NullSurface) == TickOutcome::Continue {
            ticks += 1;
            assert!(ticks < 1000);
        }

        assert!(game.is_over());
        assert!(!game.is_running());
        // First obstacle reaches the inset hitbox after ~118 ticks of travel
        assert!((200..215).contains(&game.sim().tick_count));
        assert_eq!(game.high_score(), game.score());
    }

    #[test]
    fn test_score_freezes_at_game_over() {
        let mut game = running();
        while game.tick(&mut NullSurface) == TickOutcome::Continue {}
        let frozen = game.score();
        let tick_count = game.sim().tick_count;

        for _ in 0..50 {
            assert_eq!(game.tick(&mut NullSurface), TickOutcome::Halted);
        }
        assert_eq!(game.score(), frozen);
        assert_eq!(game.sim().tick_count, tick_count);
        // Score is from the last completed tick
        assert_eq!(frozen as u64, (tick_count - 1) / SCORE_DIVISOR);
    }

    #[test]
    fn test_restart_resets_run_but_keeps_best() {
        let mut game = running();
        while game.tick(&mut NullSurface) == TickOutcome::Continue {}
        let best = game.high_score();
        assert!(best > 0);

        assert_eq!(game.primary_action(), Action::Started);
        assert!(game.is_running());
        assert!(!game.is_over());
        assert_eq!(game.score(), 0);
        assert_eq!(*game.sim(), SimState::new());
        assert_eq!(game.high_score(), best);
    }

    #[test]
    fn test_high_score_keeps_larger_run() {
        let mut game = running();
        // Long run: clear the track until tick 500, then let it crash
        for _ in 0..500 {
            game.sim_mut().obstacles.clear();
            game.tick(&mut NullSurface);
        }
        while game.tick(&mut NullSurface) == TickOutcome::Continue {}
        let first = game.score();
        assert!(first >= 50);
        assert_eq!(game.high_score(), first);

        // Short run: obstacle dropped right onto the runner
        game.start();
        game.sim_mut().obstacles.push(Obstacle { x: 66.0, ..Obstacle::spawn() });
        assert_eq!(game.tick(&mut NullSurface), TickOutcome::Crashed);
        assert!(game.score() < first);
        assert_eq!(game.high_score(), first);
    }

    #[test]
    fn test_jumping_clears_an_obstacle() {
        let mut game = running();
        let mut jumped = false;
        for _ in 0..300 {
            // Jump when the nearest cactus is close
            let near = game
                .sim()
                .obstacles
                .iter()
                .any(|o| o.x > PLAYER_X && o.x < PLAYER_X + 90.0);
            if near && !jumped {
                jumped = game.jump();
            }
            if game.tick(&mut NullSurface) == TickOutcome::Crashed {
                break;
            }
            if !game.sim().player.airborne {
                jumped = false;
            }
        }
        assert!(game.sim().tick_count > 215, "crashed at {}", game.sim().tick_count);
    }

    #[test]
    fn test_tick_draws_player_before_obstacles() {
        let mut game = running();
        game.sim_mut().obstacles.push(Obstacle { x: 500.0, ..Obstacle::spawn() });

        let mut surface = RecordingSurface::new();
        game.tick(&mut surface);

        let fills: Vec<_> = surface.fills().collect();
        let body = fills.iter().position(|f| *f == (66.0, 137.0, 22.0, 22.0)).unwrap();
        // Obstacle drawn at its post-advance position
        let cactus = fills.iter().position(|f| *f == (494.0, 140.0, 8.0, 40.0)).unwrap();
        assert!(body < cactus);
    }

    #[test]
    fn test_events_are_drained() {
        let mut game = running();
        game.jump();
        let events = game.drain_events();
        assert_eq!(events, vec![GameEvent::Started { run: 1 }, GameEvent::Jumped]);
        assert!(game.drain_events().is_empty());
    }

    #[test]
    fn test_finished_runs_reach_history() {
        let mut game = running();
        while game.tick(&mut NullSurface) == TickOutcome::Continue {}
        let first = game.score();

        game.primary_action();
        while game.tick(&mut NullSurface) == TickOutcome::Continue {}

        let history = game.high_scores();
        assert_eq!(history.runs_played(), 2);
        assert_eq!(history.recent(), &[game.score(), first]);
    }
}
