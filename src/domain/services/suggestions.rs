#[cfg(test)]
#[path = "suggestions_test.rs"]
mod tests;

use crate::domain::models::MediaKind;
use crate::domain::models::Message;

/// An input hint shown next to the prompt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Suggestion {
    pub kind: MediaKind,
    pub label: &'static str,
}

impl Suggestion {
    const fn new(kind: MediaKind, label: &'static str) -> Suggestion {
        return Suggestion { kind, label };
    }
}

const DEFAULT_SUGGESTIONS: [Suggestion; 5] = [
    Suggestion::new(MediaKind::Text, "Text"),
    Suggestion::new(MediaKind::Image, "Image"),
    Suggestion::new(MediaKind::Code, "Code"),
    Suggestion::new(MediaKind::Audio, "Audio"),
    Suggestion::new(MediaKind::Video, "Video"),
];

const CODE_SUGGESTIONS: [Suggestion; 3] = [
    Suggestion::new(MediaKind::Text, "Text"),
    Suggestion::new(MediaKind::Code, "Code"),
    Suggestion::new(MediaKind::Image, "Screenshot"),
];

const IMAGE_SUGGESTIONS: [Suggestion; 3] = [
    Suggestion::new(MediaKind::Text, "Text"),
    Suggestion::new(MediaKind::Image, "Image"),
    Suggestion::new(MediaKind::Text, "Annotate"),
];

pub struct Suggestions {}

impl Suggestions {
    /// Hints based on the last message of the conversation. Code wins over
    /// images when a message carries both.
    pub fn for_message(last: Option<&Message>) -> Vec<Suggestion> {
        let message = match last {
            Some(message) => message,
            None => return DEFAULT_SUGGESTIONS.to_vec(),
        };

        if message.has_kind(MediaKind::Code) {
            return CODE_SUGGESTIONS.to_vec();
        }

        if message.has_kind(MediaKind::Image) {
            return IMAGE_SUGGESTIONS.to_vec();
        }

        return DEFAULT_SUGGESTIONS.to_vec();
    }

    pub fn labels(suggestions: &[Suggestion]) -> String {
        return suggestions
            .iter()
            .map(|suggestion| return suggestion.label)
            .collect::<Vec<&str>>()
            .join(" · ");
    }
}
