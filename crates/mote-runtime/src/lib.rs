//! Mote Runtime - Render loop and host protocol
//!
//! Provides the pieces that drive a simulation:
//! - `FrameClock`: fixed 60 Hz accumulator with a catch-up cap
//! - `Message` / `Command`: host → worker protocol
//! - `SimulationState`: pool, physics, targets and surface for one canvas
//! - `Host`: handle to a dedicated worker thread fed over a channel
//! - `Scenario`: scripted commands for offline runs

mod clock;
mod message;
mod scenario;
mod state;
mod worker;

pub use clock::{FrameClock, MAX_FRAME_TIME, MAX_STEPS_PER_FRAME, TICK_RATE};
pub use message::{BoxedSurface, Command, Message};
pub use scenario::{Scenario, ScheduledCommand};
pub use state::SimulationState;
pub use worker::Host;
