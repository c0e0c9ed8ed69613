use super::MediaDraft;
use super::Position;
use super::SendReceipt;

/// Requests the presentation layer forwards into the session store.
pub enum Intent {
    AddAnnotation(String, String, Position),
    CancelPending(),
    RemoveAnnotation(String),
    SelectMessage(Option<String>),
    SendMessage(Vec<MediaDraft>),
    ToggleAnnotationMode(),
}

#[derive(Debug, PartialEq)]
pub enum Outcome {
    AnnotationAdded(String),
    AnnotationMode(bool),
    AnnotationRemoved(bool),
    Cancelled(usize),
    Selected(Option<String>),
    Sent(SendReceipt),
}
