//! Presentation steps and side effects emitted while a conversation runs.

use crate::record::{EffectKind, Facing};

#[cfg(feature = "serde_support")]
use serde::{Deserialize, Serialize};

/// Convenience type for the buffer of `StageEvent`s filled by
/// [`resume`][crate::conversation::Conversation::resume].
pub type EventBuffer = Vec<StageEvent>;

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde_support", derive(Deserialize, Serialize))]
/// A presentation change or side effect the host must apply.
///
/// Events are emitted in item order. They carry everything an item does
/// besides displaying text and presenting choices, which suspend the
/// interpreter and are returned as [`Prompt`][crate::conversation::Prompt]s
/// instead.
pub enum StageEvent {
    /// Show, hide or move a character portrait.
    Portrait(PortraitChange),
    /// Apply a game-state side effect.
    Effect(GameEffect),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde_support", derive(Deserialize, Serialize))]
/// Whether a portrait change shows or hides the character.
pub enum Visibility {
    Show,
    Hide,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde_support", derive(Deserialize, Serialize))]
/// Requested portrait state for the active speaker of one item.
pub struct PortraitChange {
    /// Character the change applies to.
    pub character: String,
    /// Portrait to draw, or `None` to keep the current one.
    pub portrait: Option<String>,
    /// Position to move from, when the item specified one.
    pub from_position: Option<String>,
    /// Position to move to, when the item specified one.
    pub to_position: Option<String>,
    /// Flip the portrait to face the given direction.
    pub facing: Option<Facing>,
    pub flip: bool,
    pub visibility: Visibility,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde_support", derive(Deserialize, Serialize))]
/// Game-state side effect signalled to the host.
///
/// The library does not own mortality, invitations or guest lists; it only
/// reports that a script directive asked for the change.
pub struct GameEffect {
    pub kind: EffectKind,
    /// Character the effect targets: the item's speaker, when known.
    pub character: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde_support", derive(Deserialize, Serialize))]
/// A line of dialogue, ready for the host to reveal.
///
/// The text has passed variable substitution. Reveal it with a
/// [`Writer`][crate::writer::Writer] or display it directly, then call
/// [`resume`][crate::conversation::Conversation::resume] again.
pub struct Line {
    /// Speaking character, if any.
    pub speaker: Option<String>,
    /// Text to display. Never empty: items without text do not suspend.
    pub text: String,
    /// Whether the previously displayed line should be cleared first.
    pub clear_previous: bool,
}
