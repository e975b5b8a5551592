//! Couples a [`Game`] to its fixed-timestep tick source
//!
//! Hosts call [`Driver::press`] from input handlers and [`Driver::frame`]
//! once per display frame. The timestep runs only while a run is in
//! progress and is stopped on the tick that ends it.

use crate::game::{Action, Game, TickOutcome};
use crate::renderer::Surface;
use crate::settings::Settings;

use super::clock::FixedTimestep;

pub struct Driver {
    pub game: Game,
    timestep: FixedTimestep,
    /// A run started and nothing has been drawn for it yet
    stale: bool,
}

impl Driver {
    pub fn new(settings: &Settings) -> Self {
        Self {
            game: Game::new(settings.palette),
            timestep: FixedTimestep::new(settings.tick_ms(), settings.max_substeps),
            stale: false,
        }
    }

    /// Primary action at time `now`: starts the tick source on a new run
    pub fn press(&mut self, now: f64) -> Action {
        let action = self.game.primary_action();
        if action == Action::Started {
            self.timestep.start(now);
            self.stale = true;
        }
        action
    }

    /// Run every tick due at `now`, drawing onto `surface`.
    ///
    /// Surfaces keep their last frame between ticks, so only the idle
    /// screen and the first frame of a fresh run are drawn here. Returns
    /// the number of ticks simulated.
    pub fn frame<S: Surface>(&mut self, now: f64, surface: &mut S) -> u32 {
        let due = self.timestep.advance(now);
        let mut ran = 0;
        for _ in 0..due {
            match self.game.tick(surface) {
                TickOutcome::Continue => ran += 1,
                TickOutcome::Crashed => {
                    ran += 1;
                    self.timestep.stop();
                    break;
                }
                TickOutcome::Halted => {
                    self.timestep.stop();
                    break;
                }
            }
        }
        if ran == 0 && (self.game.is_idle() || self.stale) {
            self.game.draw(surface);
        }
        self.stale = false;
        ran
    }

    /// Tick source is live
    pub fn is_ticking(&self) -> bool {
        self.timestep.is_running()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::clock::{Clock, ManualClock};
    use crate::renderer::{NullSurface, RecordingSurface};

    #[test]
    fn test_idle_frames_only_redraw() {
        let clock = ManualClock::new(0.0);
        let mut driver = Driver::new(&Settings::default());
        let mut surface = RecordingSurface::new();

        clock.advance(1_000.0);
        assert_eq!(driver.frame(clock.now_ms(), &mut surface), 0);
        assert!(!surface.calls.is_empty());
        assert_eq!(driver.game.sim().tick_count, 0);
    }

    #[test]
    fn test_press_starts_ticking() {
        let clock = ManualClock::new(0.0);
        let settings = Settings::default();
        let mut driver = Driver::new(&settings);

        assert_eq!(driver.press(clock.now_ms()), Action::Started);
        assert!(driver.is_ticking());

        clock.advance(settings.tick_ms() * 3.5);
        assert_eq!(driver.frame(clock.now_ms(), &mut NullSurface), 3);
        assert_eq!(driver.game.sim().tick_count, 3);
    }

    #[test]
    fn test_crash_stops_tick_source() {
        let clock = ManualClock::new(0.0);
        let settings = Settings::default();
        let mut driver = Driver::new(&settings);
        driver.press(clock.now_ms());

        let mut frames = 0;
        while driver.is_ticking() {
            clock.advance(settings.tick_ms());
            driver.frame(clock.now_ms(), &mut NullSurface);
            frames += 1;
            assert!(frames < 2_000);
        }
        assert!(driver.game.is_over());

        let ticks = driver.game.sim().tick_count;
        clock.advance(1_000.0);
        assert_eq!(driver.frame(clock.now_ms(), &mut NullSurface), 0);
        assert_eq!(driver.game.sim().tick_count, ticks);

        // Restart is symmetric with the first start
        assert_eq!(driver.press(clock.now_ms()), Action::Started);
        assert!(driver.is_ticking());
        assert_eq!(driver.game.sim().tick_count, 0);
    }

    #[test]
    fn test_restart_draws_before_first_tick() {
        let clock = ManualClock::new(0.0);
        let settings = Settings::default();
        let mut driver = Driver::new(&settings);
        driver.press(clock.now_ms());
        while driver.is_ticking() {
            clock.advance(settings.tick_ms());
            driver.frame(clock.now_ms(), &mut NullSurface);
        }

        // Game over holds the crash frame
        let mut surface = RecordingSurface::new();
        assert_eq!(driver.frame(clock.now_ms(), &mut surface), 0);
        assert!(surface.calls.is_empty());

        // Restart with no tick due yet still paints the fresh run
        driver.press(clock.now_ms());
        assert_eq!(driver.frame(clock.now_ms(), &mut surface), 0);
        assert!(!surface.calls.is_empty());
        assert!(driver.game.sim().obstacles.is_empty());

        // Only once
        let mut later = RecordingSurface::new();
        assert_eq!(driver.frame(clock.now_ms(), &mut later), 0);
        assert!(later.calls.is_empty());
    }
}
