//! Parsing of conversation documents into item sequences.

use crate::{
    consts::{
        CLAUSE_SEPARATOR, COMMENT_MARKER, COMPARISON_MARKER, DIVERSION_MARKER, FACE_LEFT_MARKER,
        FACE_RIGHT_MARKER, FIELD_MARKER, HIDE_KEYWORD, NOCLEAR_KEYWORD, RECORD_TERMINATORS,
        RESPONSE_SEPARATOR,
    },
    log::{Logger, MetaData, Warning},
    record::{
        item::{ConversationItem, Facing, Response},
        split::{has_dangling_quote, split_parameters},
    },
    stage::Stage,
};

/// Parse a full conversation document into an ordered item sequence.
///
/// Records are terminated by tab, line feed or carriage return and carry
/// three backtick-separated fields: parameters, display text and response
/// links. Parsing never fails; records the parser cannot make sense of are
/// dropped or partially filled, with a note in the returned [`Logger`].
pub fn parse_records(document: &str, stage: &dyn Stage) -> (Vec<ConversationItem>, Logger) {
    let mut items = Vec::new();
    let mut logger = Logger::default();

    let mut current_speaker = None;

    for (index, record) in document.split(RECORD_TERMINATORS).enumerate() {
        let meta_data = MetaData::from(index);

        let mut fields = record.splitn(3, FIELD_MARKER);

        let params = fields.next().unwrap_or("");
        let text = fields.next().unwrap_or("").trim();
        let links = fields.next().unwrap_or("");

        // Skip blanks between consecutive terminators and commented-out lines
        if (params.is_empty() && text.is_empty()) || text.starts_with(COMMENT_MARKER) {
            continue;
        }

        let item = create_item(
            params,
            text,
            links,
            current_speaker.take(),
            stage,
            &mut logger,
            &meta_data,
        );

        // Previous speaking character is the default for the next item
        current_speaker = item.speaker.clone();

        items.push(item);
    }

    (items, logger)
}

/// Resolve one record's fields into a `ConversationItem`.
///
/// Parameter tokens are consumed positionally: every token can fill at most
/// one slot, and slots claim tokens in a fixed order (speaker, condition,
/// effect flags, hide, facing, portrait, positions, noclear). Tokens left
/// over at the end fill nothing and are logged.
fn create_item(
    params: &str,
    text: &str,
    links: &str,
    previous_speaker: Option<String>,
    stage: &dyn Stage,
    logger: &mut Logger,
    meta_data: &MetaData,
) -> ConversationItem {
    let mut item = ConversationItem::new();
    item.text = text.to_string();

    parse_responses(links, &mut item.responses, logger, meta_data);

    if has_dangling_quote(params) {
        logger.add_warning(Warning::DanglingQuote, meta_data);
    }

    let tokens = split_parameters(params);
    let mut used = vec![false; tokens.len()];

    // Speaker first, since portrait lookups need it
    for (i, token) in tokens.iter().enumerate() {
        if let Some(id) = stage.resolve_character(token) {
            item.speaker = Some(id);
            used[i] = true;
            break;
        }
    }

    if item.speaker.is_none() {
        item.speaker = previous_speaker;
    }

    for (i, token) in tokens.iter().enumerate() {
        if !used[i] && token.contains('=') {
            warn_on_malformed_condition(token, logger, meta_data);
            item.condition = Some(token.clone());
            used[i] = true;
            break;
        }
    }

    for (i, token) in tokens.iter().enumerate() {
        if !used[i] && item.effects.set_from_keyword(token) {
            used[i] = true;
        }
    }

    for (i, token) in tokens.iter().enumerate() {
        if !used[i] && token.eq_ignore_ascii_case(HIDE_KEYWORD) {
            item.hide = true;
            used[i] = true;
            break;
        }
    }

    for (i, token) in tokens.iter().enumerate() {
        if used[i] {
            continue;
        }

        if token == FACE_RIGHT_MARKER || token == FACE_LEFT_MARKER {
            item.facing = Some(if token == FACE_RIGHT_MARKER {
                Facing::Right
            } else {
                Facing::Left
            });
            item.flip = true;
            used[i] = true;
            break;
        }
    }

    if let Some(speaker) = item.speaker.clone() {
        for (i, token) in tokens.iter().enumerate() {
            if !used[i] {
                if let Some(portrait) = stage.resolve_portrait(&speaker, token) {
                    item.portrait = Some(portrait);
                    used[i] = true;
                    break;
                }
            }
        }
    }

    for (i, token) in tokens.iter().enumerate() {
        if used[i] {
            continue;
        }

        if let Some(position) = stage.resolve_position(token) {
            used[i] = true;

            if item.to_position.is_none() {
                item.to_position = Some(position);
            } else {
                item.from_position = item.to_position.take();
                item.to_position = Some(position);
                break;
            }
        }
    }

    for (i, token) in tokens.iter().enumerate() {
        if !used[i] && token.eq_ignore_ascii_case(NOCLEAR_KEYWORD) {
            item.clear_previous = false;
            used[i] = true;
        }
    }

    for (i, token) in tokens.iter().enumerate() {
        if !used[i] {
            logger.add_warning(
                Warning::UnrecognizedParameter {
                    token: token.clone(),
                },
                meta_data,
            );
        }
    }

    item
}

/// Parse the `link=text` pairs of a record's links field.
fn parse_responses(
    links: &str,
    responses: &mut Vec<Response>,
    logger: &mut Logger,
    meta_data: &MetaData,
) {
    if links.is_empty() {
        return;
    }

    for pair in links.split(RESPONSE_SEPARATOR) {
        let (link, text) = match pair.split_once('=') {
            Some((link, text)) => (link, text),
            None => (pair, ""),
        };

        if link.is_empty() && text.is_empty() {
            logger.add_warning(Warning::EmptyResponsePair, meta_data);
            continue;
        }

        responses.push(Response {
            link: link.to_string(),
            text: text.to_string(),
        });
    }
}

/// Log any `==` clause that is missing its `>` diversion target.
///
/// Such a clause can never match at runtime (it is evaluated as a no-match
/// rather than an error), which is almost certainly not what the script
/// author intended.
fn warn_on_malformed_condition(expression: &str, logger: &mut Logger, meta_data: &MetaData) {
    for clause in expression.split(CLAUSE_SEPARATOR) {
        if let Some((_, remainder)) = clause.split_once(COMPARISON_MARKER) {
            if !remainder.contains(DIVERSION_MARKER) {
                logger.add_warning(
                    Warning::MalformedCondition {
                        expression: clause.to_string(),
                    },
                    meta_data,
                );
            }
        }
    }
}
