//! Quote-aware splitting of parameter fields.

/// Characters trimmed from both ends of every finished token.
const TRIM_CHARS: &[char] = &[' ', '\n', '\t', '"'];

/// Split a parameter field into whitespace-separated tokens.
///
/// Double-quoted spans are kept as single tokens. The quote characters
/// themselves are never part of the output and every token is trimmed of
/// surrounding whitespace. Empty tokens are discarded.
///
/// Unbalanced quotes are tolerated: the in-quote state simply stays toggled
/// for the remainder of the field, so everything after a dangling quote
/// merges into one token.
///
/// # Examples
/// ```
/// # use parley::split_parameters;
/// let tokens = split_parameters("go \"north east\" now");
///
/// assert_eq!(tokens, &["go", "north east", "now"]);
/// ```
pub fn split_parameters(field: &str) -> Vec<String> {
    let mut tokens = Vec::new();

    let mut in_quote = false;
    let mut current = String::new();

    for character in field.chars() {
        if character == '"' {
            in_quote = !in_quote;
        } else if character.is_whitespace() && !in_quote {
            let token = current.trim_matches(TRIM_CHARS);

            if !token.is_empty() {
                tokens.push(token.to_string());
            }

            current.clear();
        } else {
            current.push(character);
        }
    }

    let last = current.trim();

    if !last.is_empty() {
        tokens.push(last.to_string());
    }

    tokens
}

/// Whether a parameter field contains an odd number of quote characters.
pub fn has_dangling_quote(field: &str) -> bool {
    field.chars().filter(|&c| c == '"').count() % 2 == 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_are_split_on_whitespace() {
        assert_eq!(split_parameters("bo sad left"), &["bo", "sad", "left"]);
    }

    #[test]
    fn all_whitespace_kinds_separate_tokens() {
        assert_eq!(split_parameters("one\ttwo\nthree four"), &["one", "two", "three", "four"]);
    }

    #[test]
    fn quoted_spans_are_single_tokens() {
        assert_eq!(
            split_parameters("go \"north east\" now"),
            &["go", "north east", "now"]
        );
    }

    #[test]
    fn quote_characters_are_not_part_of_tokens() {
        assert_eq!(split_parameters("\"bo\""), &["bo"]);
    }

    #[test]
    fn consecutive_whitespace_yields_no_empty_tokens() {
        assert_eq!(split_parameters("  bo   sad  "), &["bo", "sad"]);
    }

    #[test]
    fn empty_field_yields_no_tokens() {
        assert!(split_parameters("").is_empty());
        assert!(split_parameters("   ").is_empty());
    }

    #[test]
    fn unbalanced_quote_merges_the_remainder_without_raising() {
        assert_eq!(split_parameters("a \"b c"), &["a", "b c"]);
    }

    #[test]
    fn unbalanced_quotes_are_detected() {
        assert!(has_dangling_quote("a \"b c"));
        assert!(!has_dangling_quote("a \"b c\""));
        assert!(!has_dangling_quote("plain"));
    }

    #[test]
    fn splitting_is_reproducible() {
        let field = "bo \"far left\" happy noclear";

        assert_eq!(split_parameters(field), split_parameters(field));
    }
}
