//! Parser and interpreter for a visual-novel conversation script format.
//!
//! Conversations are written as compact records in spreadsheet cells:
//! a parameter field naming the speaker, portrait, stage position and
//! directives, a line of dialogue, and optional response links for
//! branching. `parley` parses those records, steps through them with
//! pause/choice/diversion semantics, and schedules the typewriter reveal
//! of each line — while the host (a game engine, a terminal, a test)
//! keeps full ownership of rendering, input and game state.
//!
//! # Example
//! ```
//! use parley::{parse_conversation, BasicStage, Playthrough, Prompt};
//!
//! let mut stage = BasicStage::new();
//! stage.add_character("Bo", &["Happy", "Sad"]);
//! stage.add_position("Left");
//!
//! let document = "bo happy left`Good evening!`\t\
//!                 `Will you come in?`yes=Of course|no=Never\t";
//!
//! let mut conversation = parse_conversation(document, &stage);
//! let mut playthrough = Playthrough::new();
//! let mut events = Vec::new();
//!
//! conversation.start().unwrap();
//!
//! loop {
//!     match conversation.resume(&mut playthrough, &mut events).unwrap() {
//!         Prompt::Line(line) => println!("{}", line.text),
//!         Prompt::Choice(_responses) => conversation.make_choice(0).unwrap(),
//!         Prompt::Divert(_target) => break, // load and run the target next
//!         Prompt::Done | Prompt::Cancelled => break,
//!     }
//! }
//! ```
//!
//! The conversation surfaces portrait changes and game effects as
//! [`StageEvent`]s, lines as [`Line`]s and choices as [`Response`] sets.
//! Reveal a line with a [`writer::Writer`] to get the typewriter effect,
//! inline markup tags and all. Hosts that prefer callbacks over driving
//! the state machine by hand can implement [`Director`] and call
//! [`run`] or [`play`].

mod consts;
mod conversation;
mod error;
mod events;
pub mod log;
mod playthrough;
mod record;
mod stage;
mod variable;
pub mod writer;

pub use conversation::{parse_conversation, play, run, Control, Conversation, Director, Outcome, Prompt};
pub use error::RunError;
pub use events::{EventBuffer, GameEffect, Line, PortraitChange, StageEvent, Visibility};
pub use playthrough::Playthrough;
pub use record::{
    parse_records, split_parameters, ConversationItem, EffectFlags, EffectKind, Facing, Response,
};
pub use stage::{BasicStage, ScriptLibrary, ScriptSource, Stage};
pub use variable::{check, evaluate, substitute, VariableSet};
