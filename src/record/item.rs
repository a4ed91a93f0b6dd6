//! Data representation of a single parsed conversation beat.

#[cfg(feature = "serde_support")]
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde_support", derive(Deserialize, Serialize))]
/// Direction a portrait is turned to face when flipped.
pub enum Facing {
    Left,
    Right,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde_support", derive(Deserialize, Serialize))]
/// Game-state side effect requested by a script directive.
///
/// The library does not own the state these act on: each one is surfaced
/// to the host as a [`GameEffect`][crate::events::GameEffect] event.
pub enum EffectKind {
    /// The speaking character dies.
    Kill,
    /// The speaking character is invited in.
    Invite,
    /// The player kills the speaking character.
    PlayerKill,
    /// The speaking character becomes a guest.
    Guest,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde_support", derive(Deserialize, Serialize))]
/// Set of side-effect directives carried by one item.
pub struct EffectFlags {
    pub kill: bool,
    pub invite: bool,
    pub player_kill: bool,
    pub guest: bool,
}

impl EffectFlags {
    /// Whether no effect directive is set.
    pub fn is_empty(&self) -> bool {
        !(self.kill || self.invite || self.player_kill || self.guest)
    }

    /// Iterate over the set effects in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = EffectKind> {
        let flags = [
            (self.kill, EffectKind::Kill),
            (self.invite, EffectKind::Invite),
            (self.player_kill, EffectKind::PlayerKill),
            (self.guest, EffectKind::Guest),
        ];

        flags
            .into_iter()
            .filter_map(|(set, kind)| if set { Some(kind) } else { None })
    }

    /// Set the flag corresponding to a directive keyword.
    ///
    /// Returns false if the token is not an effect keyword.
    pub(crate) fn set_from_keyword(&mut self, token: &str) -> bool {
        match token.to_lowercase().as_str() {
            "kill" => self.kill = true,
            "invite" => self.invite = true,
            "playerkill" => self.player_kill = true,
            "guest" => self.guest = true,
            _ => return false,
        }

        true
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde_support", derive(Deserialize, Serialize))]
/// One selectable response attached to a choice item.
pub struct Response {
    /// Script key to divert to when selected. Empty links select without
    /// diverting: the conversation continues with the next item.
    pub link: String,
    /// Text to represent the response with.
    pub text: String,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde_support", derive(Deserialize, Serialize))]
/// One beat of dialogue: a parsed record from a conversation document.
pub struct ConversationItem {
    /// Line to display. May be empty for items which only perform
    /// side effects or stage changes.
    pub text: String,
    /// Speaking character, resolved through the host
    /// [`Stage`][crate::stage::Stage] lookup. Inherited from the previous
    /// item when the record named no known character.
    pub speaker: Option<String>,
    /// Portrait to switch the speaker to, if any.
    pub portrait: Option<String>,
    /// Stage position the speaker moves to.
    pub to_position: Option<String>,
    /// Stage position the move starts from, when the record named two.
    pub from_position: Option<String>,
    /// Hide the speaker instead of showing them.
    pub hide: bool,
    /// Flip the portrait to face the other way.
    pub flip: bool,
    /// Explicit facing direction, set together with `flip`.
    pub facing: Option<Facing>,
    /// Clear the previously displayed line before writing this one.
    pub clear_previous: bool,
    /// Raw condition/assignment expression, evaluated when the item executes.
    pub condition: Option<String>,
    /// Game-state side effects to apply before the line is displayed.
    pub effects: EffectFlags,
    /// Responses presented after the line. Non-empty makes this a choice item.
    pub responses: Vec<Response>,
}

impl ConversationItem {
    /// Create an empty item with the format's defaults.
    pub(crate) fn new() -> Self {
        ConversationItem {
            text: String::new(),
            speaker: None,
            portrait: None,
            to_position: None,
            from_position: None,
            hide: false,
            flip: false,
            facing: None,
            clear_previous: true,
            condition: None,
            effects: EffectFlags::default(),
            responses: Vec::new(),
        }
    }

    /// Whether this item presents a choice to the player.
    pub fn is_choice(&self) -> bool {
        !self.responses.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_items_clear_the_previous_line_by_default() {
        assert!(ConversationItem::new().clear_previous);
    }

    #[test]
    fn effect_keywords_are_matched_case_insensitively() {
        let mut effects = EffectFlags::default();

        assert!(effects.set_from_keyword("KILL"));
        assert!(effects.set_from_keyword("PlayerKill"));

        assert!(effects.kill);
        assert!(effects.player_kill);
        assert!(!effects.invite);
    }

    #[test]
    fn unknown_keywords_set_no_effect() {
        let mut effects = EffectFlags::default();

        assert!(!effects.set_from_keyword("resurrect"));
        assert!(effects.is_empty());
    }

    #[test]
    fn set_effects_are_iterated_in_declaration_order() {
        let effects = EffectFlags {
            kill: true,
            invite: false,
            player_kill: true,
            guest: true,
        };

        let kinds = effects.iter().collect::<Vec<_>>();

        assert_eq!(
            kinds,
            &[EffectKind::Kill, EffectKind::PlayerKill, EffectKind::Guest]
        );
    }

    #[test]
    fn items_with_responses_are_choice_items() {
        let mut item = ConversationItem::new();
        assert!(!item.is_choice());

        item.responses.push(Response {
            link: "bo_intro".to_string(),
            text: "Hello!".to_string(),
        });

        assert!(item.is_choice());
    }
}
