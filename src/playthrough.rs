//! The per-playthrough context handed to every conversation run.

use std::collections::HashSet;

use crate::variable::{check, substitute, VariableSet};

#[cfg(feature = "serde_support")]
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde_support", derive(Deserialize, Serialize))]
/// State that persists across conversations within one playthrough.
///
/// The host owns this context and passes it to every
/// [`resume`][crate::conversation::Conversation::resume] call. Nothing in
/// it survives [`reset`][Playthrough::reset], which corresponds to starting
/// a new game.
pub struct Playthrough {
    /// Script variables set by assignment directives.
    variables: VariableSet,
    /// Characters whose portraits are currently on screen.
    on_screen: HashSet<String>,
}

impl Playthrough {
    pub fn new() -> Self {
        Playthrough::default()
    }

    /// Retrieve the value of a variable.
    pub fn variable(&self, name: &str) -> Option<&str> {
        self.variables.get(name).map(|value| value.as_str())
    }

    /// Set the value of a variable.
    ///
    /// Unlike script assignments this may be called by the host at any
    /// time, for example to seed a player name before the first scene.
    pub fn set_variable(&mut self, name: &str, value: &str) {
        self.variables.insert(name.to_string(), value.to_string());
    }

    /// Access the full variable store.
    pub fn variables(&self) -> &VariableSet {
        &self.variables
    }

    pub(crate) fn variables_mut(&mut self) -> &mut VariableSet {
        &mut self.variables
    }

    /// Check a `name==value` probe against the variables.
    pub fn check(&self, expression: &str) -> bool {
        check(expression, &self.variables)
    }

    /// Substitute `<$name>` spans in a text with variable values.
    pub fn substitute(&self, text: &str) -> String {
        substitute(text, &self.variables)
    }

    /// Whether a character's portrait is currently on screen.
    pub fn is_on_screen(&self, character: &str) -> bool {
        self.on_screen.contains(character)
    }

    /// Record a character's portrait as shown or hidden.
    ///
    /// Conversations keep this current from the portrait changes they
    /// emit; the host should call it when it shows or hides portraits
    /// through other means.
    pub fn set_on_screen(&mut self, character: &str, on_screen: bool) {
        if on_screen {
            self.on_screen.insert(character.to_string());
        } else {
            self.on_screen.remove(character);
        }
    }

    /// Mark every character as off screen, mirroring a cleared stage.
    pub fn clear_stage(&mut self) {
        self.on_screen.clear();
    }

    /// Wipe all state for a new game.
    pub fn reset(&mut self) {
        self.variables.clear();
        self.on_screen.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variables_are_set_and_read_back() {
        let mut playthrough = Playthrough::new();

        playthrough.set_variable("day", "3");

        assert_eq!(playthrough.variable("day").unwrap(), "3");
        assert!(playthrough.variable("night").is_none());
    }

    #[test]
    fn on_screen_markers_toggle() {
        let mut playthrough = Playthrough::new();

        playthrough.set_on_screen("Bo", true);
        assert!(playthrough.is_on_screen("Bo"));

        playthrough.set_on_screen("Bo", false);
        assert!(!playthrough.is_on_screen("Bo"));
    }

    #[test]
    fn clearing_the_stage_keeps_variables() {
        let mut playthrough = Playthrough::new();
        playthrough.set_variable("day", "3");
        playthrough.set_on_screen("Bo", true);

        playthrough.clear_stage();

        assert!(!playthrough.is_on_screen("Bo"));
        assert_eq!(playthrough.variable("day").unwrap(), "3");
    }

    #[test]
    fn reset_wipes_everything() {
        let mut playthrough = Playthrough::new();
        playthrough.set_variable("day", "3");
        playthrough.set_on_screen("Bo", true);

        playthrough.reset();

        assert!(playthrough.variable("day").is_none());
        assert!(!playthrough.is_on_screen("Bo"));
    }
}
