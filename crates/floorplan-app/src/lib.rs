//! Floor plan replay host
//!
//! Loads a floor plan, feeds it a recorded script of host events through
//! the editor, and writes the result to a file or standard output.

mod error;
mod replay;
mod script;
mod sinks;

pub use error::{AppError, AppResult};
pub use replay::{Args, apply_event, replay, replay_final, run};
pub use script::{HostEvent, Script};
pub use sinks::{JsonFileSink, StdoutSink};
