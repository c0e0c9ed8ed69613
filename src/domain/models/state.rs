#[cfg(test)]
#[path = "state_test.rs"]
mod tests;

use std::collections::BTreeMap;

use serde_derive::Deserialize;
use serde_derive::Serialize;

use super::Annotation;
use super::MediaContent;
use super::Message;

/// The whole conversation as the presentation layer sees it.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    pub messages: Vec<Message>,
    /// Keyed by media id. Insertion order is the display numbering order.
    pub annotations_by_media: BTreeMap<String, Vec<Annotation>>,
    pub selected_message_id: Option<String>,
    pub is_annotating: bool,
}

impl SessionState {
    #[cfg(test)]
    pub fn with_messages(messages: Vec<Message>) -> SessionState {
        return SessionState {
            messages,
            ..SessionState::default()
        };
    }

    pub fn message(&self, id: &str) -> Option<&Message> {
        return self.messages.iter().find(|message| return message.id == id);
    }

    pub fn find_media(&self, media_id: &str) -> Option<&MediaContent> {
        return self
            .messages
            .iter()
            .filter(|message| return !message.is_composing)
            .find_map(|message| return message.media(media_id));
    }

    pub fn annotations_for(&self, media_id: &str) -> &[Annotation] {
        if let Some(annotations) = self.annotations_by_media.get(media_id) {
            return annotations;
        }

        return &[];
    }

    pub fn composing_count(&self) -> usize {
        return self
            .messages
            .iter()
            .filter(|message| return message.is_composing)
            .count();
    }

    /// Last message with real content.
    pub fn last_message(&self) -> Option<&Message> {
        return self
            .messages
            .iter()
            .rev()
            .find(|message| return !message.is_composing);
    }
}
