//! Utilities for inspecting warnings and other non-fatal parse events.

mod logger;
mod message;

pub use logger::Logger;
pub use message::{LogMessage, MetaData, Warning};
