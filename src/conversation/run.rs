//! Callback-style drivers for hosts that prefer to hand over the loop.

use crate::{
    conversation::{parse_conversation, Conversation, Outcome, Prompt},
    error::RunError,
    events::{EventBuffer, Line, StageEvent},
    record::Response,
    stage::{ScriptSource, Stage},
    Playthrough,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Host verdict after a line was delivered.
pub enum Control {
    /// Keep going with the next item.
    Proceed,
    /// Cancel the conversation.
    Cancel,
}

/// Callbacks through which [`run`] and [`play`] hand content to the host.
///
/// This is the push-style counterpart to driving a [`Conversation`] by
/// hand: every suspension point of the state machine becomes a method call,
/// and cancellation is signalled through the return values.
pub trait Director {
    /// Apply a portrait change or game effect.
    fn stage_event(&mut self, event: &StageEvent);

    /// Reveal a line of dialogue, blocking until the reveal is over.
    fn deliver_line(&mut self, line: &Line) -> Control;

    /// Present a choice and return the selected index, or `None` to cancel.
    fn request_choice(&mut self, responses: &[Response]) -> Option<usize>;

    /// A script key could not be found. The run ends as `Completed`.
    fn missing_script(&mut self, _character: &str, _key: &str) {}
}

/// Drive a conversation against a director until it ends.
///
/// # Errors
/// Forwards [`RunError`]s from the underlying state machine. With a
/// well-behaved director (indices taken from the presented responses)
/// this does not happen.
pub fn run(
    conversation: &mut Conversation,
    playthrough: &mut Playthrough,
    director: &mut dyn Director,
) -> Result<Outcome, RunError> {
    conversation.start()?;

    let mut events = EventBuffer::new();

    loop {
        let prompt = conversation.resume(playthrough, &mut events)?;

        for event in events.drain(..) {
            director.stage_event(&event);
        }

        match prompt {
            Prompt::Line(line) => {
                if director.deliver_line(&line) == Control::Cancel {
                    conversation.cancel();
                }
            }
            Prompt::Choice(responses) => match director.request_choice(&responses) {
                Some(selection) => conversation.make_choice(selection)?,
                None => conversation.cancel(),
            },
            Prompt::Divert(target) => return Ok(Outcome::Diverted(target)),
            Prompt::Done => return Ok(Outcome::Completed),
            Prompt::Cancelled => return Ok(Outcome::Cancelled),
        }
    }
}

/// Play a character's script, following diversions until one run completes.
///
/// Loads `entry_point` from the source, runs it, and keeps loading and
/// running whatever scripts the conversation diverts to. A missing script
/// is reported through [`Director::missing_script`] and ends the play as
/// [`Outcome::Completed`] without presenting any items.
///
/// # Errors
/// Forwards [`RunError`]s from the underlying state machine.
pub fn play(
    source: &dyn ScriptSource,
    stage: &dyn Stage,
    playthrough: &mut Playthrough,
    director: &mut dyn Director,
    character: &str,
    entry_point: &str,
) -> Result<Outcome, RunError> {
    let mut key = entry_point.to_string();

    loop {
        let document = match source.load_script(character, &key) {
            Some(document) => document,
            None => {
                director.missing_script(character, &key);
                return Ok(Outcome::Completed);
            }
        };

        let mut conversation = parse_conversation(&document, stage);

        match run(&mut conversation, playthrough, director)? {
            Outcome::Diverted(target) => key = target,
            outcome => return Ok(outcome),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::{record::parse::tests::mock_stage, stage::ScriptLibrary};

    /// Scripted director which answers every choice from a queue and
    /// records everything it is handed.
    struct MockDirector {
        selections: Vec<usize>,
        lines: Vec<String>,
        events: Vec<StageEvent>,
        missing: Vec<String>,
        cancel_after_lines: Option<usize>,
    }

    impl MockDirector {
        fn new(selections: &[usize]) -> Self {
            MockDirector {
                selections: selections.to_vec(),
                lines: Vec::new(),
                events: Vec::new(),
                missing: Vec::new(),
                cancel_after_lines: None,
            }
        }
    }

    impl Director for MockDirector {
        fn stage_event(&mut self, event: &StageEvent) {
            self.events.push(event.clone());
        }

        fn deliver_line(&mut self, line: &Line) -> Control {
            self.lines.push(line.text.clone());

            match self.cancel_after_lines {
                Some(limit) if self.lines.len() >= limit => Control::Cancel,
                _ => Control::Proceed,
            }
        }

        fn request_choice(&mut self, responses: &[Response]) -> Option<usize> {
            if self.selections.is_empty() {
                return None;
            }

            let selection = self.selections.remove(0);
            assert!(selection < responses.len());
            Some(selection)
        }

        fn missing_script(&mut self, character: &str, key: &str) {
            self.missing.push(format!("{}/{}", character, key));
        }
    }

    #[test]
    fn run_delivers_every_line_and_completes() {
        let mut conversation = parse_conversation("bo`One`\t`Two`\t", &mock_stage());
        let mut director = MockDirector::new(&[]);

        let outcome = run(
            &mut conversation,
            &mut Playthrough::new(),
            &mut director,
        )
        .unwrap();

        assert_eq!(outcome, Outcome::Completed);
        assert_eq!(director.lines, &["One", "Two"]);
    }

    #[test]
    fn run_returns_the_diversion_from_a_selected_response() {
        let mut conversation = parse_conversation("`Pick`stay=Stay|leave=Leave\t", &mock_stage());
        let mut director = MockDirector::new(&[1]);

        let outcome = run(
            &mut conversation,
            &mut Playthrough::new(),
            &mut director,
        )
        .unwrap();

        assert_eq!(outcome, Outcome::Diverted("leave".to_string()));
    }

    #[test]
    fn cancelling_mid_run_yields_a_cancelled_outcome() {
        let mut conversation = parse_conversation("bo`One`\t`Two`\t`Three`\t", &mock_stage());
        let mut director = MockDirector::new(&[]);
        director.cancel_after_lines = Some(1);

        let outcome = run(
            &mut conversation,
            &mut Playthrough::new(),
            &mut director,
        )
        .unwrap();

        assert_eq!(outcome, Outcome::Cancelled);
        assert_eq!(director.lines.len(), 1);
    }

    #[test]
    fn play_follows_diversions_across_scripts() {
        let mut library = ScriptLibrary::new();
        library.add_script("Bo", "intro", "bo`Well?`go=Go on|stop=Stop\t");
        library.add_script("Bo", "go", "bo`We went on.`\t");

        let mut director = MockDirector::new(&[0]);

        let outcome = play(
            &library,
            &mock_stage(),
            &mut Playthrough::new(),
            &mut director,
            "Bo",
            "intro",
        )
        .unwrap();

        assert_eq!(outcome, Outcome::Completed);
        assert_eq!(director.lines, &["Well?", "We went on."]);
    }

    #[test]
    fn play_reports_missing_scripts_and_completes_without_items() {
        let library = ScriptLibrary::new();
        let mut director = MockDirector::new(&[]);

        let outcome = play(
            &library,
            &mock_stage(),
            &mut Playthrough::new(),
            &mut director,
            "Bo",
            "missing_key",
        )
        .unwrap();

        assert_eq!(outcome, Outcome::Completed);
        assert!(director.lines.is_empty());
        assert_eq!(director.missing, &["Bo/missing_key"]);
    }

    #[test]
    fn play_reports_missing_diversion_targets() {
        let mut library = ScriptLibrary::new();
        library.add_script("Bo", "intro", "`Pick`gone=Into the void\t");

        let mut director = MockDirector::new(&[0]);

        let outcome = play(
            &library,
            &mock_stage(),
            &mut Playthrough::new(),
            &mut director,
            "Bo",
            "intro",
        )
        .unwrap();

        assert_eq!(outcome, Outcome::Completed);
        assert_eq!(director.missing, &["Bo/gone"]);
    }
}
