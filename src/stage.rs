//! Host-provided lookups for characters, portraits, positions and scripts.
//!
//! The parser and interpreter never own presentation data. They resolve
//! identifiers through a [`Stage`] and fetch script text through a
//! [`ScriptSource`], both implemented by the host. [`BasicStage`] and
//! [`ScriptLibrary`] are ready-made in-memory implementations for hosts
//! that register everything up front, and for tests.

use std::collections::HashMap;

/// Lookups against the host's presentation layer.
///
/// All lookups are case-insensitive on the queried name. A successful
/// lookup returns the canonical identifier, which is what gets stored in
/// parsed items and emitted in stage events.
pub trait Stage {
    /// Resolve a character identifier.
    fn resolve_character(&self, name: &str) -> Option<String>;

    /// Resolve a portrait belonging to the given character.
    fn resolve_portrait(&self, character: &str, name: &str) -> Option<String>;

    /// Resolve a named stage position.
    fn resolve_position(&self, name: &str) -> Option<String>;
}

/// Retrieval of raw conversation documents, keyed per character.
///
/// Backed by a localization table in the original game; any keyed string
/// storage works. The library only parses whatever text is returned.
pub trait ScriptSource {
    /// Fetch the raw document for a character's script key.
    ///
    /// `None` means the script does not exist, which the drivers report
    /// as a recoverable failure rather than an error.
    fn load_script(&self, character: &str, key: &str) -> Option<String>;
}

#[derive(Clone, Debug, Default)]
/// In-memory `Stage` implementation with explicit registration.
pub struct BasicStage {
    /// Characters by lowercase identifier, with their portraits.
    characters: HashMap<String, Character>,
    /// Canonical position names by lowercase name.
    positions: HashMap<String, String>,
}

#[derive(Clone, Debug)]
struct Character {
    id: String,
    /// Canonical portrait names by lowercase name.
    portraits: HashMap<String, String>,
}

impl BasicStage {
    pub fn new() -> Self {
        BasicStage::default()
    }

    /// Register a character and the portraits it can be drawn with.
    pub fn add_character(&mut self, id: &str, portraits: &[&str]) {
        let portraits = portraits
            .iter()
            .map(|name| (name.to_lowercase(), name.to_string()))
            .collect();

        self.characters.insert(
            id.to_lowercase(),
            Character {
                id: id.to_string(),
                portraits,
            },
        );
    }

    /// Register a named stage position.
    pub fn add_position(&mut self, name: &str) {
        self.positions
            .insert(name.to_lowercase(), name.to_string());
    }
}

impl Stage for BasicStage {
    fn resolve_character(&self, name: &str) -> Option<String> {
        self.characters
            .get(&name.to_lowercase())
            .map(|character| character.id.clone())
    }

    fn resolve_portrait(&self, character: &str, name: &str) -> Option<String> {
        self.characters
            .get(&character.to_lowercase())
            .and_then(|character| character.portraits.get(&name.to_lowercase()))
            .cloned()
    }

    fn resolve_position(&self, name: &str) -> Option<String> {
        self.positions.get(&name.to_lowercase()).cloned()
    }
}

#[derive(Clone, Debug, Default)]
/// In-memory `ScriptSource` holding documents keyed by character and script key.
pub struct ScriptLibrary {
    scripts: HashMap<(String, String), String>,
}

impl ScriptLibrary {
    pub fn new() -> Self {
        ScriptLibrary::default()
    }

    /// Add a document under a character's script key.
    pub fn add_script(&mut self, character: &str, key: &str, document: &str) {
        self.scripts.insert(
            (character.to_string(), key.to_string()),
            document.to_string(),
        );
    }
}

impl ScriptSource for ScriptLibrary {
    fn load_script(&self, character: &str, key: &str) -> Option<String> {
        self.scripts
            .get(&(character.to_string(), key.to_string()))
            .cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mock_stage() -> BasicStage {
        let mut stage = BasicStage::new();
        stage.add_character("Bo", &["Happy", "Sad"]);
        stage.add_position("Left");
        stage
    }

    #[test]
    fn characters_are_resolved_case_insensitively_to_canonical_ids() {
        let stage = mock_stage();

        assert_eq!(stage.resolve_character("bo").unwrap(), "Bo");
        assert_eq!(stage.resolve_character("BO").unwrap(), "Bo");
        assert!(stage.resolve_character("sal").is_none());
    }

    #[test]
    fn portraits_belong_to_their_character() {
        let stage = mock_stage();

        assert_eq!(stage.resolve_portrait("bo", "happy").unwrap(), "Happy");
        assert!(stage.resolve_portrait("sal", "happy").is_none());
        assert!(stage.resolve_portrait("bo", "angry").is_none());
    }

    #[test]
    fn positions_are_resolved_case_insensitively() {
        let stage = mock_stage();

        assert_eq!(stage.resolve_position("LEFT").unwrap(), "Left");
        assert!(stage.resolve_position("center").is_none());
    }

    #[test]
    fn script_library_returns_stored_documents() {
        let mut library = ScriptLibrary::new();
        library.add_script("Bo", "intro", "`Hello`");

        assert_eq!(library.load_script("Bo", "intro").unwrap(), "`Hello`");
        assert!(library.load_script("Bo", "outro").is_none());
    }
}
