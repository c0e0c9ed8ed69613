use std::fmt;

use serde_derive::Serialize;

/// Correlation id of one send sequence. Captured when the user message is
/// appended and carried through both delayed stages, so a sequence only
/// ever touches its own composing placeholder.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct SequenceToken(String);

impl SequenceToken {
    pub fn new(id: &str) -> SequenceToken {
        return SequenceToken(id.to_string());
    }

    pub fn as_str(&self) -> &str {
        return &self.0;
    }
}

impl fmt::Display for SequenceToken {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        return write!(f, "{}", self.0);
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum SequenceStage {
    UserAppended,
    Composing,
    Resolved,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PendingSequence {
    pub token: SequenceToken,
    pub user_message_id: String,
    /// Reserved when the sequence starts, the placeholder is inserted later.
    /// The resolved reply keeps this id.
    pub composing_message_id: String,
    pub composing_item_id: String,
    pub stage: SequenceStage,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SendReceipt {
    pub sequence: SequenceToken,
    pub user_message_id: String,
}
