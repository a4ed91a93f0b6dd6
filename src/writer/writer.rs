//! The typewriter reveal state machine.

use crate::{
    consts::PUNCTUATION,
    writer::token::{tokenize, AudioControl, PunchDirection, Token},
};

#[cfg(feature = "serde_support")]
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde_support", derive(Deserialize, Serialize))]
/// Tuning for how a [`Writer`] reveals text.
pub struct WriterSettings {
    /// Writing speed in characters per second.
    pub writing_speed: f32,
    /// Extra pause after sentence punctuation, in seconds.
    pub punctuation_pause: f32,
    /// Reveal one whole word at a time rather than one character.
    pub write_whole_words: bool,
    /// Whether an input signal mid-reveal finishes the reveal immediately.
    pub instant_complete: bool,
    /// Emit rich-text markup and the hidden-text wrapper. Without it the
    /// output is plain revealed text and word-wrap stability is lost.
    pub rich_text: bool,
    /// Color of text that has not been revealed yet.
    pub hidden_text_color: String,
}

impl Default for WriterSettings {
    fn default() -> Self {
        WriterSettings {
            writing_speed: 60.0,
            punctuation_pause: 0.25,
            write_whole_words: false,
            instant_complete: true,
            rich_text: true,
            hidden_text_color: "#FFFFFF00".to_string(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde_support", derive(Deserialize, Serialize))]
/// Current state of the writing process.
pub enum WriterState {
    /// Writer has not taken its first step.
    Idle,
    /// Writer is revealing text.
    Writing,
    /// Writer is suspended on an input or voice-over wait.
    Paused,
    /// Writing has ended.
    Done,
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde_support", derive(Deserialize, Serialize))]
/// How long, and on what, to wait before requesting the next step.
pub enum Pause {
    /// Proceed immediately.
    None,
    /// Wait the given number of seconds.
    Beat(f32),
    /// Wait for an input signal ([`Writer::input`]), clearing revealed
    /// text on resume if `clear` is set.
    Input { clear: bool },
    /// Wait until the externally tracked voice-over clip finishes
    /// ([`Writer::voice_over_complete`]).
    VoiceOver,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde_support", derive(Deserialize, Serialize))]
/// Side effect attached to a reveal boundary, for the host to act on.
pub enum Cue {
    /// Play, loop, pause or stop a named host sound.
    Audio { cue: String, control: AudioControl },
    /// Shake the dialogue area or camera.
    Punch {
        direction: PunchDirection,
        intensity: f32,
        time: f32,
    },
    /// Flash the screen.
    Flash { duration: f32 },
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde_support", derive(Deserialize, Serialize))]
/// One incremental update of the revealed text.
pub struct RevealStep {
    /// Full render string: the revealed prefix wrapped in any open markup,
    /// followed by the not-yet-revealed remainder in a hidden-color span.
    /// Displaying this verbatim keeps word-wrap layout from shifting as
    /// text appears.
    pub text: String,
    /// Number of revealed glyphs. Non-decreasing except across explicit
    /// clear tags.
    pub visible: usize,
    /// What to wait on before requesting the next step.
    pub pause: Pause,
    /// Side effect attached to this boundary.
    pub cue: Option<Cue>,
}

#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde_support", derive(Deserialize, Serialize))]
struct WordsProgress {
    chars: Vec<char>,
    index: usize,
}

#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde_support", derive(Deserialize, Serialize))]
/// Writes a line using a typewriter effect, one step at a time.
///
/// The writer is a resumable state machine: every call to
/// [`step`][Writer::step] reveals one unit of text or surfaces one tag
/// effect, and the returned [`RevealStep`] tells the host what to display
/// and how long to wait before stepping again. The host drives it from
/// whatever loop it has; nothing here blocks.
///
/// # Examples
/// ```
/// # use parley::writer::{Writer, WriterSettings};
/// let mut writer = Writer::new("Hi!", WriterSettings::default());
///
/// let mut last = 0;
/// while let Some(step) = writer.step() {
///     assert!(step.visible >= last);
///     last = step.visible;
/// }
///
/// assert_eq!(last, 3);
/// ```
pub struct Writer {
    settings: WriterSettings,
    tokens: Vec<Token>,
    token_index: usize,
    /// Reveal progress within the current `Words` token.
    words: Option<WordsProgress>,
    /// Rendered text revealed by finished tokens, markup included.
    revealed: String,
    /// Number of revealed glyphs (markup excluded).
    revealed_glyphs: usize,
    /// Render string and glyph count of the last emitted step.
    current_text: String,
    current_visible: usize,
    state: WriterState,
    /// Wait the writer is currently suspended on.
    awaiting: Option<Pause>,
    /// Reveal everything on the next step.
    instant: bool,
    bold: bool,
    italic: bool,
    color: Option<String>,
    size: Option<String>,
    style: Option<String>,
    current_speed: f32,
    current_punctuation_pause: f32,
    /// The last processed token cleared the text, so the next words token
    /// drops its leading whitespace.
    after_clear: bool,
}

impl Writer {
    /// Create a writer for one line of display text.
    ///
    /// The text is tokenized up front; tag state and speed overrides reset
    /// for every new writer.
    pub fn new(text: &str, settings: WriterSettings) -> Self {
        let current_speed = settings.writing_speed;
        let current_punctuation_pause = settings.punctuation_pause;

        Writer {
            tokens: tokenize(text),
            token_index: 0,
            words: None,
            revealed: String::new(),
            revealed_glyphs: 0,
            current_text: String::new(),
            current_visible: 0,
            state: WriterState::Idle,
            awaiting: None,
            instant: false,
            bold: false,
            italic: false,
            color: None,
            size: None,
            style: None,
            current_speed,
            current_punctuation_pause,
            after_clear: false,
            settings,
        }
    }

    /// Current state of the writing process.
    pub fn state(&self) -> WriterState {
        self.state
    }

    /// Advance to the next reveal boundary.
    ///
    /// Returns `None` once the writer is done. While suspended on an input
    /// or voice-over wait this re-yields the waiting step without progress,
    /// so an impatient host loop never hangs or skips the wait.
    pub fn step(&mut self) -> Option<RevealStep> {
        match self.state {
            WriterState::Done => return None,
            WriterState::Idle => self.state = WriterState::Writing,
            _ => (),
        }

        if self.instant {
            return Some(self.finish_step());
        }

        if let Some(pause) = self.awaiting {
            return Some(RevealStep {
                text: self.current_text.clone(),
                visible: self.current_visible,
                pause,
                cue: None,
            });
        }

        loop {
            if self.words.is_some() {
                return Some(self.words_step());
            }

            let token = match self.tokens.get(self.token_index) {
                Some(token) => token.clone(),
                None => {
                    self.state = WriterState::Done;
                    return None;
                }
            };

            self.token_index += 1;

            match token {
                Token::Words(text) => {
                    let text = self.take_after_clear(&text);

                    if text.is_empty() {
                        continue;
                    }

                    self.words = Some(WordsProgress {
                        chars: text.chars().collect(),
                        index: 0,
                    });

                    return Some(self.words_step());
                }
                Token::NewLine => {
                    self.revealed.push('\n');
                    self.revealed_glyphs += 1;
                    return Some(self.render_step(Pause::None, None));
                }
                Token::BoldStart => self.bold = true,
                Token::BoldEnd => self.bold = false,
                Token::ItalicStart => self.italic = true,
                Token::ItalicEnd => self.italic = false,
                Token::ColorStart(color) => self.color = Some(color),
                Token::ColorEnd => self.color = None,
                Token::SizeStart(size) => self.size = Some(size),
                Token::SizeEnd => self.size = None,
                Token::StyleStart(style) => self.style = Some(style),
                Token::StyleEnd => self.style = None,
                Token::Wait(duration) => return Some(self.render_step(Pause::Beat(duration), None)),
                Token::WaitForInputNoClear => {
                    return Some(self.await_step(Pause::Input { clear: false }))
                }
                Token::WaitForInputAndClear => {
                    return Some(self.await_step(Pause::Input { clear: true }))
                }
                Token::WaitForVoiceOver => return Some(self.await_step(Pause::VoiceOver)),
                Token::WaitOnPunctuationStart(pause) => {
                    self.current_punctuation_pause =
                        pause.unwrap_or(self.settings.punctuation_pause);
                }
                Token::WaitOnPunctuationEnd => {
                    self.current_punctuation_pause = self.settings.punctuation_pause;
                }
                Token::Clear => {
                    self.clear_revealed();
                    return Some(self.render_step(Pause::None, None));
                }
                Token::SpeedStart(speed) => {
                    self.current_speed = speed.unwrap_or(self.settings.writing_speed);
                }
                Token::SpeedEnd => self.current_speed = self.settings.writing_speed,
                Token::Exit => {
                    self.state = WriterState::Done;
                    return None;
                }
                Token::Punch {
                    direction,
                    intensity,
                    time,
                } => {
                    return Some(self.render_step(
                        Pause::None,
                        Some(Cue::Punch {
                            direction,
                            intensity,
                            time,
                        }),
                    ))
                }
                Token::Flash(duration) => {
                    return Some(self.render_step(Pause::None, Some(Cue::Flash { duration })))
                }
                Token::Audio { cue, control } => {
                    return Some(self.render_step(Pause::None, Some(Cue::Audio { cue, control })))
                }
            }
        }
    }

    /// Signal player input.
    ///
    /// Releases a pending input wait. Outside of a wait, with
    /// `instant_complete` enabled, the remaining text reveals on the
    /// next step.
    pub fn input(&mut self) {
        match self.awaiting {
            Some(Pause::Input { clear }) => {
                if clear {
                    self.clear_revealed();
                }

                self.awaiting = None;
                self.state = WriterState::Writing;
            }
            _ => {
                if self.settings.instant_complete && self.state == WriterState::Writing {
                    self.instant = true;
                }
            }
        }
    }

    /// Signal that the tracked voice-over clip has finished.
    pub fn voice_over_complete(&mut self) {
        if let Some(Pause::VoiceOver) = self.awaiting {
            self.awaiting = None;
            self.state = WriterState::Writing;
        }
    }

    /// Force an instant completion: the next step reveals all remaining
    /// text, skipping every per-unit delay, wait and cue.
    pub fn finish(&mut self) {
        if self.state == WriterState::Done {
            return;
        }

        if let Some(Pause::Input { clear: true }) = self.awaiting {
            self.clear_revealed();
        }

        self.awaiting = None;
        self.instant = true;
        self.state = WriterState::Writing;
    }

    /// Stop writing: the writer transitions to `Done` without revealing
    /// anything further.
    pub fn stop(&mut self) {
        self.awaiting = None;
        self.state = WriterState::Done;
    }

    /// Reveal one unit of the current words token.
    fn words_step(&mut self) -> RevealStep {
        let mut progress = self.words.take().expect("stepped words without a words token");

        let length = progress.chars.len();
        let index = progress.index.min(length);

        let left_end = if index >= length {
            length
        } else if self.settings.write_whole_words {
            (index..=length)
                .find(|&j| j == length || progress.chars[j].is_whitespace())
                .unwrap()
        } else {
            index
        };

        let left: String = progress.chars[..left_end].iter().collect();
        let right: String = progress.chars[left_end..].iter().collect();

        let pause = self.unit_pause(&left, &right);
        let text = self.compose(&left, &right);
        let visible = self.revealed_glyphs + left_end;
        let step = self.emit(text, visible, pause, None);

        if left_end >= length {
            self.fold(&left);
        } else {
            progress.index = left_end + 1;
            self.words = Some(progress);
        }

        step
    }

    /// Delay to attach to a unit boundary: the per-character beat plus the
    /// punctuation pause when the last revealed character warrants one.
    fn unit_pause(&self, left: &str, right: &str) -> Pause {
        let mut delay = if self.current_speed > 0.0 {
            1.0 / self.current_speed
        } else {
            0.0
        };

        let ends_in_punctuation = left
            .chars()
            .last()
            .map(|c| PUNCTUATION.contains(&c))
            .unwrap_or(false);

        if ends_in_punctuation && !right.is_empty() {
            delay += self.current_punctuation_pause;
        }

        if delay > 0.0 {
            Pause::Beat(delay)
        } else {
            Pause::None
        }
    }

    /// Emit a step that reveals nothing new (waits, clears, cues).
    fn render_step(&mut self, pause: Pause, cue: Option<Cue>) -> RevealStep {
        let text = self.compose("", "");
        let visible = self.revealed_glyphs;

        self.emit(text, visible, pause, cue)
    }

    /// Suspend on a wait and emit its step.
    fn await_step(&mut self, pause: Pause) -> RevealStep {
        self.awaiting = Some(pause);
        self.state = WriterState::Paused;
        self.render_step(pause, None)
    }

    /// Reveal everything that remains in one step.
    fn finish_step(&mut self) -> RevealStep {
        self.instant = false;

        if let Some(progress) = self.words.take() {
            let full: String = progress.chars.iter().collect();
            self.fold(&full);
        }

        while let Some(token) = self.tokens.get(self.token_index).cloned() {
            self.token_index += 1;

            match token {
                Token::Words(text) => {
                    let text = self.take_after_clear(&text);
                    self.fold(&text);
                }
                Token::NewLine => {
                    self.revealed.push('\n');
                    self.revealed_glyphs += 1;
                }
                Token::BoldStart => self.bold = true,
                Token::BoldEnd => self.bold = false,
                Token::ItalicStart => self.italic = true,
                Token::ItalicEnd => self.italic = false,
                Token::ColorStart(color) => self.color = Some(color),
                Token::ColorEnd => self.color = None,
                Token::SizeStart(size) => self.size = Some(size),
                Token::SizeEnd => self.size = None,
                Token::StyleStart(style) => self.style = Some(style),
                Token::StyleEnd => self.style = None,
                Token::Clear | Token::WaitForInputAndClear => self.clear_revealed(),
                Token::Exit => break,
                _ => (),
            }
        }

        self.state = WriterState::Done;

        let text = self.revealed.clone();
        let visible = self.revealed_glyphs;

        self.emit(text, visible, Pause::None, None)
    }

    fn emit(&mut self, text: String, visible: usize, pause: Pause, cue: Option<Cue>) -> RevealStep {
        self.current_text = text.clone();
        self.current_visible = visible;

        RevealStep {
            text,
            visible,
            pause,
            cue,
        }
    }

    /// Build the render string for a revealed `left` and hidden `right`.
    fn compose(&self, left: &str, right: &str) -> String {
        let mut output = self.revealed.clone();

        if self.settings.rich_text {
            output.push_str(&self.open_markup());
            output.push_str(left);
            output.push_str(&self.close_markup());

            let mut hidden = right.to_string();
            hidden.push_str(&self.read_ahead());

            if !hidden.is_empty() {
                output.push_str(&format!("<color={}>", self.settings.hidden_text_color));
                output.push_str(&hidden);
                output.push_str("</color>");
            }
        } else {
            output.push_str(left);
        }

        output
    }

    /// Text of upcoming words tokens, for the hidden layout wrapper.
    ///
    /// Stops at a wait-and-clear tag: text after it never shares the
    /// current layout.
    fn read_ahead(&self) -> String {
        let mut ahead = String::new();

        for token in &self.tokens[self.token_index..] {
            match token {
                Token::Words(text) => ahead.push_str(text),
                Token::NewLine => ahead.push('\n'),
                Token::WaitForInputAndClear => break,
                _ => (),
            }
        }

        ahead
    }

    /// Move finished text into the revealed buffer, markup applied.
    fn fold(&mut self, text: &str) {
        if self.settings.rich_text {
            self.revealed.push_str(&self.open_markup());
            self.revealed.push_str(text);
            self.revealed.push_str(&self.close_markup());
        } else {
            self.revealed.push_str(text);
        }

        self.revealed_glyphs += text.chars().count();
    }

    fn clear_revealed(&mut self) {
        self.revealed.clear();
        self.revealed_glyphs = 0;
        self.after_clear = true;
    }

    /// Drop leading whitespace from words directly after a clear.
    fn take_after_clear(&mut self, text: &str) -> String {
        if self.after_clear {
            self.after_clear = false;
            text.trim_start().to_string()
        } else {
            text.to_string()
        }
    }

    fn open_markup(&self) -> String {
        if !self.settings.rich_text {
            return String::new();
        }

        let mut open = String::new();

        if let Some(size) = &self.size {
            open.push_str(&format!("<size={}>", size));
        }
        if let Some(color) = &self.color {
            open.push_str(&format!("<color={}>", color));
        }
        if self.bold {
            open.push_str("<b>");
        }
        if self.italic {
            open.push_str("<i>");
        }
        if let Some(style) = &self.style {
            open.push_str(&format!("<style={}>", style));
        }

        open
    }

    fn close_markup(&self) -> String {
        if !self.settings.rich_text {
            return String::new();
        }

        let mut close = String::new();

        if self.italic {
            close.push_str("</i>");
        }
        if self.bold {
            close.push_str("</b>");
        }
        if self.color.is_some() {
            close.push_str("</color>");
        }
        if self.size.is_some() {
            close.push_str("</size>");
        }
        if self.style.is_some() {
            close.push_str("</style>");
        }

        close
    }
}
