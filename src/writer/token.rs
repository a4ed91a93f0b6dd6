//! Tokenization of display text with inline markup tags.

use crate::consts::{TAG_CLOSE, TAG_OPEN};

#[cfg(feature = "serde_support")]
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde_support", derive(Deserialize, Serialize))]
/// Axis of a `{punch}` screen-shake cue.
pub enum PunchDirection {
    Both,
    Horizontal,
    Vertical,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde_support", derive(Deserialize, Serialize))]
/// What an audio tag asks the host to do with its cue.
pub enum AudioControl {
    Play,
    Loop,
    Pause,
    Stop,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde_support", derive(Deserialize, Serialize))]
/// One token of a display string.
///
/// Produced once per input string by [`tokenize`] and consumed in order by
/// the [`Writer`][crate::writer::Writer]. Markup toggles are stateful:
/// a `BoldStart` stays in effect across later tokens until its `BoldEnd`.
pub enum Token {
    /// Plain text to reveal.
    Words(String),
    /// Explicit line break (`{n}`).
    NewLine,
    BoldStart,
    BoldEnd,
    ItalicStart,
    ItalicEnd,
    ColorStart(String),
    ColorEnd,
    SizeStart(String),
    SizeEnd,
    StyleStart(String),
    StyleEnd,
    /// Suspend for a duration in seconds (`{w}`, `{w=1.5}`).
    Wait(f32),
    /// Suspend until input, keeping revealed text (`{wi}`).
    WaitForInputNoClear,
    /// Suspend until input, then clear revealed text (`{wc}`).
    WaitForInputAndClear,
    /// Suspend until the tracked voice-over clip ends (`{wvo}`).
    WaitForVoiceOver,
    /// Override the punctuation pause (`{wp}`, `{wp=0.5}`).
    WaitOnPunctuationStart(Option<f32>),
    WaitOnPunctuationEnd,
    /// Clear revealed text immediately (`{c}`).
    Clear,
    /// Override the writing speed in characters per second (`{s=30}`).
    SpeedStart(Option<f32>),
    SpeedEnd,
    /// Force the writer to `Done` (`{x}`).
    Exit,
    /// Screen-shake cue with intensity and duration.
    Punch {
        direction: PunchDirection,
        intensity: f32,
        time: f32,
    },
    /// Screen-flash cue with duration.
    Flash(f32),
    /// Audio cue for a named host sound.
    Audio { cue: String, control: AudioControl },
}

/// Split a display string into tokens.
///
/// Tags are enclosed in `{}` braces; everything between tags becomes a
/// `Words` token with `\n` escape sequences expanded. Content in braces
/// that is not a recognized tag is kept as literal words, and an unclosed
/// brace swallows no text — tokenization never fails.
///
/// # Examples
/// ```
/// # use parley::writer::{tokenize, Token};
/// let tokens = tokenize("Oh. {i}Oh no.{/i}");
///
/// assert_eq!(
///     tokens,
///     &[
///         Token::Words("Oh. ".to_string()),
///         Token::ItalicStart,
///         Token::Words("Oh no.".to_string()),
///         Token::ItalicEnd,
///     ]
/// );
/// ```
pub fn tokenize(text: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut words = String::new();

    let mut remainder = text;

    while let Some(open) = remainder.find(TAG_OPEN) {
        let after_open = &remainder[open + 1..];

        match after_open.find(TAG_CLOSE) {
            Some(close) => {
                let content = &after_open[..close];

                match parse_tag(content) {
                    Some(token) => {
                        words.push_str(&remainder[..open]);
                        flush_words(&mut words, &mut tokens);
                        tokens.push(token);
                    }
                    None => {
                        // Not a tag after all: keep the braces as text
                        words.push_str(&remainder[..open + 1 + close + 1]);
                    }
                }

                remainder = &after_open[close + 1..];
            }
            None => break,
        }
    }

    words.push_str(remainder);
    flush_words(&mut words, &mut tokens);

    tokens
}

fn flush_words(words: &mut String, tokens: &mut Vec<Token>) {
    if !words.is_empty() {
        tokens.push(Token::Words(words.replace("\\n", "\n")));
        words.clear();
    }
}

/// Parse the content between braces into a token, if it is a known tag.
fn parse_tag(content: &str) -> Option<Token> {
    let (name, param) = match content.split_once('=') {
        Some((name, param)) => (name, Some(param)),
        None => (content, None),
    };

    let token = match name {
        "b" => Token::BoldStart,
        "/b" => Token::BoldEnd,
        "i" => Token::ItalicStart,
        "/i" => Token::ItalicEnd,
        "color" => Token::ColorStart(param?.to_string()),
        "/color" => Token::ColorEnd,
        "size" => Token::SizeStart(param?.to_string()),
        "/size" => Token::SizeEnd,
        "style" => Token::StyleStart(param?.to_string()),
        "/style" => Token::StyleEnd,
        "s" => Token::SpeedStart(param.and_then(parse_seconds)),
        "/s" => Token::SpeedEnd,
        "w" => Token::Wait(param.and_then(parse_seconds).unwrap_or(1.0)),
        "wi" => Token::WaitForInputNoClear,
        "wc" => Token::WaitForInputAndClear,
        "wvo" => Token::WaitForVoiceOver,
        "wp" => Token::WaitOnPunctuationStart(param.and_then(parse_seconds)),
        "/wp" => Token::WaitOnPunctuationEnd,
        "c" => Token::Clear,
        "x" => Token::Exit,
        "n" => Token::NewLine,
        "punch" => parse_punch(PunchDirection::Both, param),
        "hpunch" => parse_punch(PunchDirection::Horizontal, param),
        "vpunch" => parse_punch(PunchDirection::Vertical, param),
        "flash" => Token::Flash(param.and_then(parse_seconds).unwrap_or(0.2)),
        "audio" => Token::Audio {
            cue: param?.to_string(),
            control: AudioControl::Play,
        },
        "audioloop" => Token::Audio {
            cue: param?.to_string(),
            control: AudioControl::Loop,
        },
        "audiopause" => Token::Audio {
            cue: param?.to_string(),
            control: AudioControl::Pause,
        },
        "audiostop" => Token::Audio {
            cue: param?.to_string(),
            control: AudioControl::Stop,
        },
        _ => return None,
    };

    Some(token)
}

fn parse_punch(direction: PunchDirection, param: Option<&str>) -> Token {
    let mut values = param
        .unwrap_or("")
        .split(',')
        .map(|value| value.trim().parse::<f32>().ok());

    Token::Punch {
        direction,
        intensity: values.next().flatten().unwrap_or(10.0),
        time: values.next().flatten().unwrap_or(0.5),
    }
}

fn parse_seconds(param: &str) -> Option<f32> {
    param.trim().parse::<f32>().ok()
}
