use chrono::Utc;
use test_utils::image_url_fixture;

use super::Suggestions;
use crate::domain::models::MediaContent;
use crate::domain::models::MediaDraft;
use crate::domain::models::MediaKind;
use crate::domain::models::Message;
use crate::domain::models::Sender;

fn message_with(drafts: Vec<MediaDraft>) -> Message {
    let items = drafts
        .into_iter()
        .enumerate()
        .map(|(idx, draft)| return MediaContent::from_draft(&idx.to_string(), draft))
        .collect();

    return Message::new("msg-1", Sender::Assistant, Utc::now(), items);
}

#[test]
fn it_suggests_defaults_without_history() {
    let suggestions = Suggestions::for_message(None);
    assert_eq!(Suggestions::labels(&suggestions), "Text · Image · Code · Audio · Video");
}

#[test]
fn it_suggests_defaults_after_plain_text() {
    let message = message_with(vec![MediaDraft::text("hello")]);
    let suggestions = Suggestions::for_message(Some(&message));
    assert_eq!(suggestions.len(), 5);
}

#[test]
fn it_suggests_screenshots_after_code() {
    let message = message_with(vec![
        MediaDraft::image(image_url_fixture(), None),
        MediaDraft::code("x", None),
    ]);
    let suggestions = Suggestions::for_message(Some(&message));

    assert_eq!(Suggestions::labels(&suggestions), "Text · Code · Screenshot");
    assert_eq!(suggestions[2].kind, MediaKind::Image);
}

#[test]
fn it_suggests_annotations_after_images() {
    let message = message_with(vec![MediaDraft::image(image_url_fixture(), None)]);
    let suggestions = Suggestions::for_message(Some(&message));

    assert_eq!(Suggestions::labels(&suggestions), "Text · Image · Annotate");
    assert_eq!(suggestions[2].kind, MediaKind::Text);
}
