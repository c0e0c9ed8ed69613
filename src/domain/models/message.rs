#[cfg(test)]
#[path = "message_test.rs"]
mod tests;

use chrono::DateTime;
use chrono::Utc;
use serde_derive::Deserialize;
use serde_derive::Serialize;

use super::MediaBody;
use super::MediaContent;
use super::MediaKind;
use super::Sender;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub sender: Sender,
    pub created_at: DateTime<Utc>,
    pub items: Vec<MediaContent>,
    #[serde(default)]
    pub is_composing: bool,
}

impl Message {
    pub fn new(
        id: &str,
        sender: Sender,
        created_at: DateTime<Utc>,
        items: Vec<MediaContent>,
    ) -> Message {
        return Message {
            id: id.to_string(),
            sender,
            created_at,
            items,
            is_composing: false,
        };
    }

    /// Placeholder shown while a reply is pending. It holds exactly one empty
    /// text item and is never treated as real content. The item id is
    /// reserved per sequence like any other media id.
    pub fn composing(id: &str, item_id: &str, created_at: DateTime<Utc>) -> Message {
        return Message {
            id: id.to_string(),
            sender: Sender::Assistant,
            created_at,
            items: vec![MediaContent::new(
                item_id,
                MediaBody::Text {
                    text: "".to_string(),
                },
            )],
            is_composing: true,
        };
    }

    pub fn has_kind(&self, kind: MediaKind) -> bool {
        return self.items.iter().any(|item| return item.kind() == kind);
    }

    /// Text of the first text item, if any.
    pub fn first_text(&self) -> Option<&str> {
        return self
            .items
            .iter()
            .find(|item| return item.kind() == MediaKind::Text)
            .map(|item| return item.payload());
    }

    pub fn media(&self, media_id: &str) -> Option<&MediaContent> {
        return self.items.iter().find(|item| return item.id == media_id);
    }
}
