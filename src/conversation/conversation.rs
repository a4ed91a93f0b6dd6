//! The conversation state machine and content presented to the host.

use crate::{
    conversation::process::stage_change,
    error::RunError,
    events::{EventBuffer, GameEffect, Line, StageEvent},
    log::Logger,
    record::{parse_records, ConversationItem, Response},
    stage::Stage,
    variable::evaluate,
    Playthrough,
};

#[cfg(feature = "serde_support")]
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq)]
/// Result from resuming a [`Conversation`].
///
/// `Line` and `Choice` are suspension points: the host presents the content,
/// then resumes (after [`make_choice`][Conversation::make_choice] for a
/// choice). The other variants are terminal and sticky — once returned,
/// every further `resume` call returns the same prompt.
///
/// # Examples
/// ```
/// # use parley::{parse_conversation, BasicStage, Playthrough, Prompt};
/// let mut stage = BasicStage::new();
/// stage.add_character("Bo", &["Happy"]);
///
/// let mut conversation = parse_conversation("bo happy`Good evening.`\t", &stage);
/// let mut playthrough = Playthrough::new();
/// let mut events = Vec::new();
///
/// conversation.start().unwrap();
///
/// match conversation.resume(&mut playthrough, &mut events).unwrap() {
///     Prompt::Line(line) => assert_eq!(line.text, "Good evening."),
///     other => panic!("expected a line but got {:?}", other),
/// }
/// ```
pub enum Prompt {
    /// A line of dialogue to reveal. Resume again once the reveal is done.
    Line(Line),
    /// A choice the player must make through
    /// [`make_choice`][Conversation::make_choice].
    Choice(Vec<Response>),
    /// The conversation short-circuited to another script. The host should
    /// load and run the target script next.
    Divert(String),
    /// All items were consumed.
    Done,
    /// The host cancelled the conversation.
    Cancelled,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde_support", derive(Deserialize, Serialize))]
/// Terminal outcome of running a conversation to its end.
pub enum Outcome {
    /// All items were consumed without diversion.
    Completed,
    /// A condition or choice diverted to the named script.
    Diverted(String),
    /// The host cancelled the run. Variable mutations already applied
    /// remain in place.
    Cancelled,
}

#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde_support", derive(Deserialize, Serialize))]
/// A parsed conversation and the state of stepping through it.
///
/// Conversations are created fresh per script invocation with
/// [`parse_conversation`] and driven with [`start`][Conversation::start],
/// [`resume`][Conversation::resume] and
/// [`make_choice`][Conversation::make_choice]. All state that outlives the
/// conversation lives in the [`Playthrough`] context instead.
pub struct Conversation {
    /// Items in presentation order.
    items: Vec<ConversationItem>,
    /// Non-fatal events from parsing the document.
    log: Logger,
    /// Index of the item currently being presented.
    index: usize,
    /// Whether the current item's line has already been delivered.
    line_delivered: bool,
    /// Speaker carried over between items.
    current_speaker: Option<String>,
    /// Set of last responses presented to the user.
    last_responses: Option<Vec<Response>>,
    /// Link of the response selected to resume the conversation with.
    selected_link: Option<String>,
    /// Whether or not the conversation has been started.
    in_progress: bool,
    /// Terminal outcome, set once the conversation has ended.
    ended: Option<Outcome>,
}

impl Conversation {
    /// Create a conversation from already parsed items.
    pub fn new(items: Vec<ConversationItem>) -> Self {
        Conversation::with_log(items, Logger::default())
    }

    pub(crate) fn with_log(items: Vec<ConversationItem>, log: Logger) -> Self {
        Conversation {
            items,
            log,
            index: 0,
            line_delivered: false,
            current_speaker: None,
            last_responses: None,
            selected_link: None,
            in_progress: false,
            ended: None,
        }
    }

    /// Mark the conversation as ready to present items.
    ///
    /// Must be called before the first call to [`resume`][Conversation::resume].
    ///
    /// # Errors
    /// *   [`StartOnConversationInProgress`][RunError::StartOnConversationInProgress]:
    ///     if called twice for the same conversation.
    pub fn start(&mut self) -> Result<(), RunError> {
        if self.in_progress {
            return Err(RunError::StartOnConversationInProgress);
        }

        self.in_progress = true;

        Ok(())
    }

    /// Step forward until the next suspension point or terminal outcome.
    ///
    /// Portrait changes and game effects encountered along the way are
    /// pushed onto `events` in item order; the host applies them before
    /// acting on the returned [`Prompt`]. The buffer is not cleared first —
    /// that is up to the caller.
    ///
    /// Conditions are evaluated as items are entered: assignments mutate
    /// the playthrough's variables, and a matching comparison ends the run
    /// with [`Prompt::Divert`], skipping every remaining item.
    ///
    /// Calling `resume` while a choice is pending re-presents the same
    /// choice.
    ///
    /// # Errors
    /// *   [`ResumeBeforeStart`][RunError::ResumeBeforeStart]:
    ///     if called before [`start`][Conversation::start].
    pub fn resume(
        &mut self,
        playthrough: &mut Playthrough,
        events: &mut EventBuffer,
    ) -> Result<Prompt, RunError> {
        if !self.in_progress {
            return Err(RunError::ResumeBeforeStart);
        }

        if let Some(outcome) = &self.ended {
            return Ok(terminal_prompt(outcome));
        }

        if let Some(link) = self.selected_link.take() {
            if !link.is_empty() {
                return Ok(self.end_with(Outcome::Diverted(link)));
            }

            self.advance();
        } else if let Some(responses) = &self.last_responses {
            return Ok(Prompt::Choice(responses.clone()));
        }

        while self.index < self.items.len() {
            let item = self.items[self.index].clone();

            if !self.line_delivered {
                if let Some(expression) = &item.condition {
                    if let Some(target) = evaluate(expression, playthrough.variables_mut()) {
                        return Ok(self.end_with(Outcome::Diverted(target)));
                    }
                }

                if item.speaker.is_some() {
                    self.current_speaker = item.speaker.clone();
                }

                for kind in item.effects.iter() {
                    events.push(StageEvent::Effect(GameEffect {
                        kind,
                        character: self.current_speaker.clone(),
                    }));
                }

                if let Some(change) = stage_change(&item, &self.current_speaker, playthrough) {
                    events.push(StageEvent::Portrait(change));
                }

                if !item.text.is_empty() {
                    self.line_delivered = true;

                    return Ok(Prompt::Line(Line {
                        speaker: self.current_speaker.clone(),
                        text: playthrough.substitute(&item.text),
                        clear_previous: item.clear_previous,
                    }));
                }
            }

            if item.is_choice() {
                let responses = item
                    .responses
                    .iter()
                    .map(|response| Response {
                        link: response.link.clone(),
                        text: playthrough.substitute(&response.text),
                    })
                    .collect::<Vec<_>>();

                self.last_responses = Some(responses.clone());

                return Ok(Prompt::Choice(responses));
            }

            self.advance();
        }

        Ok(self.end_with(Outcome::Completed))
    }

    /// Make a choice from the last presented set of responses.
    ///
    /// The `selection` index corresponds to the index in the response list
    /// that was returned when the choice was reached. Once a choice has
    /// been made, a call to [`resume`][Conversation::resume] continues the
    /// conversation: with the selected response's diversion when its link
    /// is non-empty, with the next item otherwise.
    ///
    /// # Errors
    /// *   [`MadeChoiceWithoutChoice`][RunError::MadeChoiceWithoutChoice]:
    ///     if the conversation is not currently at a choice.
    /// *   [`InvalidChoice`][RunError::InvalidChoice]: if the index is out
    ///     of bounds for the presented responses.
    pub fn make_choice(&mut self, selection: usize) -> Result<(), RunError> {
        let link = self
            .last_responses
            .as_ref()
            .ok_or(RunError::MadeChoiceWithoutChoice)
            .and_then(|responses| {
                responses
                    .get(selection)
                    .ok_or(RunError::InvalidChoice {
                        selection,
                        presented_responses: responses.clone(),
                    })
                    .map(|response| response.link.clone())
            })?;

        self.selected_link.replace(link);
        self.last_responses = None;

        Ok(())
    }

    /// Cancel the conversation.
    ///
    /// May be called at any suspension point. The next `resume` call
    /// returns [`Prompt::Cancelled`] promptly; variable mutations that were
    /// already applied remain in place.
    pub fn cancel(&mut self) {
        if self.ended.is_none() {
            self.ended = Some(Outcome::Cancelled);
            self.last_responses = None;
            self.selected_link = None;
        }
    }

    /// Items of the conversation in presentation order.
    pub fn items(&self) -> &[ConversationItem] {
        &self.items
    }

    /// Non-fatal events recorded while parsing the document.
    pub fn log(&self) -> &Logger {
        &self.log
    }

    /// Terminal outcome, once the conversation has ended.
    pub fn outcome(&self) -> Option<&Outcome> {
        self.ended.as_ref()
    }

    fn advance(&mut self) {
        self.index += 1;
        self.line_delivered = false;
    }

    fn end_with(&mut self, outcome: Outcome) -> Prompt {
        let prompt = terminal_prompt(&outcome);
        self.ended = Some(outcome);
        prompt
    }
}

fn terminal_prompt(outcome: &Outcome) -> Prompt {
    match outcome {
        Outcome::Completed => Prompt::Done,
        Outcome::Diverted(target) => Prompt::Divert(target.clone()),
        Outcome::Cancelled => Prompt::Cancelled,
    }
}

/// Parse a conversation document into a ready-to-start [`Conversation`].
///
/// Parsing never fails (see [`parse_records`]); anything the parser had to
/// gloss over is available through [`Conversation::log`].
///
/// # Examples
/// ```
/// # use parley::{parse_conversation, BasicStage};
/// let mut stage = BasicStage::new();
/// stage.add_character("Bo", &["Happy"]);
///
/// let conversation = parse_conversation("bo happy`Good evening.`\t", &stage);
///
/// assert_eq!(conversation.items().len(), 1);
/// ```
pub fn parse_conversation(document: &str, stage: &dyn Stage) -> Conversation {
    let (items, log) = parse_records(document, stage);

    Conversation::with_log(items, log)
}
