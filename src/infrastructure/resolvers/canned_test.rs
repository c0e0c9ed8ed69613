use anyhow::Result;
use chrono::Utc;
use test_utils::image_url_fixture;

use super::reply_for;
use super::welcome_transcript;
use super::Canned;
use super::Topic;
use crate::domain::models::ChartKind;
use crate::domain::models::MediaBody;
use crate::domain::models::MediaContent;
use crate::domain::models::MediaDraft;
use crate::domain::models::MediaKind;
use crate::domain::models::Message;
use crate::domain::models::Resolver;
use crate::domain::models::Sender;

fn user_message(drafts: Vec<MediaDraft>) -> Message {
    let items = drafts
        .into_iter()
        .enumerate()
        .map(|(idx, draft)| return MediaContent::from_draft(&format!("item-{idx}"), draft))
        .collect();

    return Message::new("msg-1", Sender::User, Utc::now(), items);
}

#[test]
fn it_classifies_greetings() {
    let message = user_message(vec![MediaDraft::text("Hello!")]);
    assert_eq!(Topic::classify(&message), Topic::Greeting);

    let message = user_message(vec![MediaDraft::text("oh HI")]);
    assert_eq!(Topic::classify(&message), Topic::Greeting);
}

#[test]
fn it_prefers_greetings_over_code() {
    let message = user_message(vec![
        MediaDraft::text("hello, can you review this?"),
        MediaDraft::code("let a = 1;", Some("rust")),
    ]);
    assert_eq!(Topic::classify(&message), Topic::Greeting);
}

#[test]
fn it_classifies_code() {
    let message = user_message(vec![MediaDraft::text("Write some code please")]);
    assert_eq!(Topic::classify(&message), Topic::Code);

    let message = user_message(vec![MediaDraft::code("fn main() {}", None)]);
    assert_eq!(Topic::classify(&message), Topic::Code);
}

#[test]
fn it_classifies_charts() {
    for text in ["Plot a chart", "some visualization", "show me the data"] {
        let message = user_message(vec![MediaDraft::text(text)]);
        assert_eq!(Topic::classify(&message), Topic::Chart);
    }
}

#[test]
fn it_classifies_images() {
    let message = user_message(vec![MediaDraft::image(image_url_fixture(), None)]);
    assert_eq!(Topic::classify(&message), Topic::Image);

    let message = user_message(vec![MediaDraft::text("describe the image")]);
    assert_eq!(Topic::classify(&message), Topic::Image);
}

#[test]
fn it_classifies_audio_and_video() {
    let message = user_message(vec![MediaDraft::audio("file:///memo.mp3", None)]);
    assert_eq!(Topic::classify(&message), Topic::Audio);

    let message = user_message(vec![MediaDraft::video("file:///demo.mp4", None)]);
    assert_eq!(Topic::classify(&message), Topic::Video);
}

#[test]
fn it_falls_through_to_other() {
    let message = user_message(vec![MediaDraft::document("quarterly report", None)]);
    assert_eq!(Topic::classify(&message), Topic::Other);
}

#[test]
fn it_replies_with_a_line_chart() -> Result<()> {
    let reply = reply_for(Topic::Chart);
    assert_eq!(reply.len(), 2);

    let media = MediaContent::from_draft("chart", reply[1].clone());
    assert_eq!(media.kind(), MediaKind::Spreadsheet);
    match &media.body {
        MediaBody::Spreadsheet { chart, title, .. } => {
            assert_eq!(*chart, ChartKind::LineChart);
            assert_eq!(title.as_deref(), Some("Multi-series Data Visualization"));
        }
        _ => panic!("expected a spreadsheet"),
    }

    let data = media.chart_data()?;
    assert_eq!(data.labels.len(), 6);
    assert_eq!(data.datasets.len(), 2);

    return Ok(());
}

#[tokio::test]
async fn it_resolves_with_the_reply_for_the_topic() -> Result<()> {
    let message = user_message(vec![MediaDraft::text("what about the weather")]);
    let reply = Canned::default().resolve(&message).await?;

    assert_eq!(
        reply,
        vec![MediaDraft::text(
            "I received your message! How can I help you further?"
        )]
    );

    return Ok(());
}

#[test]
fn it_builds_the_welcome_transcript() {
    let transcript = welcome_transcript();
    assert_eq!(transcript.len(), 7);
    assert_eq!(transcript[0].0, Sender::Assistant);
    assert_eq!(transcript[1].0, Sender::User);

    let kinds = transcript
        .iter()
        .flat_map(|(_, drafts)| return drafts.iter().map(|draft| return draft.body.kind()))
        .collect::<Vec<MediaKind>>();
    assert!(kinds.contains(&MediaKind::Code));
    assert!(kinds.contains(&MediaKind::Image));
    assert!(kinds.contains(&MediaKind::Spreadsheet));
}
