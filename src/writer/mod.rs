//! The typewriter effect: tokenizing inline markup and revealing text
//! one step at a time.

mod token;
mod writer;

pub use token::{tokenize, AudioControl, PunchDirection, Token};
pub use writer::{Cue, Pause, RevealStep, Writer, WriterSettings, WriterState};
