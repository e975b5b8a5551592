//! Clock adapters and the fixed-timestep tick source
//!
//! The simulation never sees real time. A host reads its clock once per
//! frame and asks [`FixedTimestep`] how many whole ticks are due.

use std::cell::Cell;

/// Monotonic time source in milliseconds
pub trait Clock {
    fn now_ms(&self) -> f64;
}

/// Clock advanced by hand, for tests and headless runs
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<f64>,
}

impl ManualClock {
    pub fn new(start_ms: f64) -> Self {
        Self {
            now: Cell::new(start_ms),
        }
    }

    pub fn advance(&self, ms: f64) {
        self.now.set(self.now.get() + ms);
    }

    pub fn set(&self, ms: f64) {
        self.now.set(ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> f64 {
        self.now.get()
    }
}

/// Wall clock relative to creation
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug)]
pub struct SystemClock {
    origin: std::time::Instant,
}

#[cfg(not(target_arch = "wasm32"))]
impl Default for SystemClock {
    fn default() -> Self {
        Self {
            origin: std::time::Instant::now(),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl Clock for SystemClock {
    fn now_ms(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }
}

/// `performance.now()` in the browser
#[cfg(target_arch = "wasm32")]
#[derive(Debug)]
pub struct BrowserClock {
    performance: Option<web_sys::Performance>,
}

#[cfg(target_arch = "wasm32")]
impl Default for BrowserClock {
    fn default() -> Self {
        Self {
            performance: web_sys::window().and_then(|w| w.performance()),
        }
    }
}

#[cfg(target_arch = "wasm32")]
impl Clock for BrowserClock {
    fn now_ms(&self) -> f64 {
        match &self.performance {
            Some(performance) => performance.now(),
            None => js_sys::Date::now(),
        }
    }
}

/// Converts elapsed time into a whole number of fixed ticks.
///
/// Acts as the periodic tick source: it only produces ticks between
/// `start` and `stop`.
#[derive(Debug, Clone)]
pub struct FixedTimestep {
    step_ms: f64,
    max_substeps: u32,
    accumulator: f64,
    last: f64,
    running: bool,
}

impl FixedTimestep {
    pub fn new(step_ms: f64, max_substeps: u32) -> Self {
        Self {
            step_ms,
            max_substeps: max_substeps.max(1),
            accumulator: 0.0,
            last: 0.0,
            running: false,
        }
    }

    /// Begin producing ticks from `now`, dropping any leftover time
    pub fn start(&mut self, now: f64) {
        self.accumulator = 0.0;
        self.last = now;
        self.running = true;
    }

    /// Stop producing ticks. Safe to call when already stopped.
    pub fn stop(&mut self) {
        self.running = false;
        self.accumulator = 0.0;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Number of ticks due at `now`.
    ///
    /// At most `max_substeps` per call; time beyond that is discarded so a
    /// long stall (hidden tab, debugger) does not fast-forward the run.
    pub fn advance(&mut self, now: f64) -> u32 {
        if !self.running {
            return 0;
        }

        let elapsed = (now - self.last).max(0.0);
        self.last = now;
        self.accumulator += elapsed;

        let mut ticks = 0;
        while self.accumulator >= self.step_ms && ticks < self.max_substeps {
            self.accumulator -= self.step_ms;
            ticks += 1;
        }
        if ticks == self.max_substeps && self.accumulator >= self.step_ms {
            log::debug!(
                "Dropping {:.1}ms of backlog after {} substeps",
                self.accumulator,
                ticks
            );
            self.accumulator = 0.0;
        }
        ticks
    }
}
