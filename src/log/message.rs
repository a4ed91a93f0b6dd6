use std::fmt;

#[cfg(feature = "serde_support")]
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde_support", derive(Deserialize, Serialize))]
/// Information about which record an item or message originated from.
pub struct MetaData {
    /// Index of the record in the parsed document.
    pub record_index: u32,
}

impl From<usize> for MetaData {
    fn from(record_index: usize) -> Self {
        MetaData {
            record_index: record_index as u32,
        }
    }
}

impl fmt::Display for MetaData {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "record {}", self.record_index)
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde_support", derive(Deserialize, Serialize))]
/// Log message with additional information.
pub struct LogMessage {
    /// Detected non-fatal error or incompatibility.
    pub warning: Warning,
    /// Information of where the message originated from.
    pub meta_data: MetaData,
}

impl LogMessage {
    pub(crate) fn with_warning(warning: Warning, meta_data: &MetaData) -> Self {
        LogMessage {
            warning,
            meta_data: meta_data.clone(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde_support", derive(Deserialize, Serialize))]
/// A detected non-fatal error or incompatibility.
///
/// The conversation format is written by hand in spreadsheet cells, so the
/// parser never rejects a document. It records what it had to gloss over
/// instead, which is usually what a script author wants to see first when
/// a line does not play out as expected.
pub enum Warning {
    /// A parameter token filled no slot: not a known character, portrait,
    /// position or directive for this record.
    UnrecognizedParameter { token: String },
    /// A parameter field contained an odd number of quote characters.
    DanglingQuote,
    /// A `==` comparison clause had no `>` diversion target and will never match.
    MalformedCondition { expression: String },
    /// A response pair where both the link and the text were empty was dropped.
    EmptyResponsePair,
}

impl fmt::Display for LogMessage {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "[{}] WARNING: {}", self.meta_data, self.warning)
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use Warning::*;

        match self {
            UnrecognizedParameter { token } => write!(
                f,
                "parameter '{}' is not a known character, portrait, position \
                 or directive and was ignored",
                token
            ),
            DanglingQuote => write!(
                f,
                "parameter field contains an unbalanced quote character; \
                 tokens after it may have merged"
            ),
            MalformedCondition { expression } => write!(
                f,
                "comparison '{}' has no '>' diversion target and will never match",
                expression
            ),
            EmptyResponsePair => write!(f, "dropped a response pair with no link and no text"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn warning_messages_are_printed_with_marker_and_record_index() {
        let message = LogMessage::with_warning(Warning::DanglingQuote, &MetaData::from(2));

        let printed = format!("{}", message);

        assert!(printed.contains("WARNING"));
        assert!(printed.contains("record 2"));
    }

    #[test]
    fn unrecognized_parameter_warnings_name_the_token() {
        let warning = Warning::UnrecognizedParameter {
            token: "leftish".to_string(),
        };

        assert!(format!("{}", warning).contains("'leftish'"));
    }
}
