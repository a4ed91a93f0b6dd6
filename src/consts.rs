// Record format markers
pub const FIELD_MARKER: char = '`';
pub const RECORD_TERMINATORS: &[char] = &['\t', '\n', '\r'];
pub const COMMENT_MARKER: &str = "--";
pub const RESPONSE_SEPARATOR: char = '|';

// Parameter directives
pub const HIDE_KEYWORD: &str = "hide";
pub const NOCLEAR_KEYWORD: &str = "noclear";
pub const FACE_RIGHT_MARKER: &str = ">>>";
pub const FACE_LEFT_MARKER: &str = "<<<";

// Condition expression markers
pub const CLAUSE_SEPARATOR: char = '|';
pub const COMPARISON_MARKER: &str = "==";
pub const ASSIGNMENT_MARKER: char = '=';
pub const DIVERSION_MARKER: char = '>';

// Variable substitution: `<$name>` spans inside display text
pub const SUBSTITUTION_OPEN: &str = "<$";
pub const SUBSTITUTION_CLOSE: char = '>';

// Typewriter tag braces
pub const TAG_OPEN: char = '{';
pub const TAG_CLOSE: char = '}';

// Sentence punctuation that earns an extra pause during the reveal
pub const PUNCTUATION: &[char] = &['.', '?', '!', ',', ':', ';', ')'];
