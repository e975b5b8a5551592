//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Time (clock adapters)
//! - Driving the fixed-timestep tick source

pub mod clock;
pub mod driver;

#[cfg(target_arch = "wasm32")]
pub use clock::BrowserClock;
#[cfg(not(target_arch = "wasm32"))]
pub use clock::SystemClock;
pub use clock::{Clock, FixedTimestep, ManualClock};
pub use driver::Driver;
