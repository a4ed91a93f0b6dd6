//! Errors from driving conversations.
//!
//! Parsing a document never fails: malformed records degrade into dropped
//! records or logged warnings (see [`Logger`][crate::log::Logger]). The
//! errors here all concern misuse of the runtime state machine.

use std::{error::Error, fmt};

use crate::record::Response;

#[derive(Clone, Debug, PartialEq)]
/// Errors from running a conversation.
///
/// These are encountered due to some mistake in how the host drives
/// a [`Conversation`][crate::conversation::Conversation], never due to
/// the content of a script.
pub enum RunError {
    /// An invalid response index was given to resume the conversation with.
    InvalidChoice {
        /// Selection input by the user to resume the conversation with.
        selection: usize,
        /// List of responses that were available for the selection.
        presented_responses: Vec<Response>,
    },
    /// Called `make_choice` when no choice had been requested.
    MadeChoiceWithoutChoice,
    /// Tried to resume a conversation that has not been started.
    ResumeBeforeStart,
    /// Tried to `start` a conversation that is already in progress.
    StartOnConversationInProgress,
}

impl Error for RunError {}

impl fmt::Display for RunError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use RunError::*;

        match self {
            InvalidChoice {
                selection,
                presented_responses,
            } => write!(
                f,
                "Invalid selection of response: selection was {} but number of responses was {} \
                 (maximum selection index is {})",
                selection,
                presented_responses.len(),
                presented_responses.len().max(1) - 1
            ),
            MadeChoiceWithoutChoice => write!(
                f,
                "Tried to make a choice, but no choice is currently active. Call `resume` \
                 and assert that a choice prompt is returned before calling this again."
            ),
            ResumeBeforeStart => write!(
                f,
                "Tried to resume a conversation that has not yet been started"
            ),
            StartOnConversationInProgress => write!(
                f,
                "Called `start` on a conversation that is already in progress"
            ),
        }
    }
}
