use crate::log::{LogMessage, MetaData, Warning};

#[cfg(feature = "serde_support")]
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde_support", derive(Deserialize, Serialize))]
/// Collection of non-fatal events encountered while parsing a document.
pub struct Logger {
    /// Non-fatal errors and incompatibilities, in record order.
    pub warnings: Vec<LogMessage>,
}

impl Logger {
    pub(crate) fn add_warning(&mut self, warning: Warning, meta_data: &MetaData) {
        self.warnings
            .push(LogMessage::with_warning(warning, meta_data));
    }

    /// Whether any warnings were recorded.
    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty()
    }

    /// Iterate over the recorded messages in record order.
    pub fn iter(&self) -> impl Iterator<Item = &LogMessage> {
        self.warnings.iter()
    }
}
