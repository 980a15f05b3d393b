// ABOUTME: Pure selection pipeline: resolve options, format the call, render the parameter table
// ABOUTME: Session owns the current selection cell and pushes payloads to display sinks

pub mod formatter;
pub mod payload;
pub mod renderer;
pub mod resolver;
pub mod session;

pub use formatter::*;
pub use payload::*;
pub use renderer::*;
pub use resolver::*;
pub use session::*;

pub(crate) const PIPELINE_LOG_TARGET: &str = "walsa::pipeline";
