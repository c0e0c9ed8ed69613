use chrono::Utc;
use test_utils::image_url_fixture;

use super::Message;
use crate::domain::models::MediaContent;
use crate::domain::models::MediaDraft;
use crate::domain::models::MediaKind;
use crate::domain::models::Sender;

fn create_message() -> Message {
    return Message::new(
        "msg-1",
        Sender::User,
        Utc::now(),
        vec![
            MediaContent::from_draft("m1", MediaDraft::image(image_url_fixture(), None)),
            MediaContent::from_draft("m2", MediaDraft::text("What is this?")),
            MediaContent::from_draft("m3", MediaDraft::text("Second")),
        ],
    );
}

#[test]
fn it_executes_new() {
    let msg = create_message();
    assert_eq!(msg.id, "msg-1");
    assert_eq!(msg.sender, Sender::User);
    assert_eq!(msg.items.len(), 3);
    assert!(!msg.is_composing);
}

#[test]
fn it_executes_composing() {
    let msg = Message::composing("msg-2", "item-2", Utc::now());
    assert_eq!(msg.sender, Sender::Assistant);
    assert!(msg.is_composing);
    assert_eq!(msg.items.len(), 1);
    assert_eq!(msg.items[0].id, "item-2");
    assert_eq!(msg.items[0].payload(), "");
}

#[test]
fn it_executes_has_kind() {
    let msg = create_message();
    assert!(msg.has_kind(MediaKind::Image));
    assert!(msg.has_kind(MediaKind::Text));
    assert!(!msg.has_kind(MediaKind::Video));
}

#[test]
fn it_executes_first_text() {
    let msg = create_message();
    assert_eq!(msg.first_text(), Some("What is this?"));

    let msg = Message::new("msg-3", Sender::User, Utc::now(), vec![]);
    assert_eq!(msg.first_text(), None);
}

#[test]
fn it_executes_media() {
    let msg = create_message();
    assert_eq!(msg.media("m3").unwrap().payload(), "Second");
    assert!(msg.media("m9").is_none());
}
