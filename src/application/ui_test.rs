use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use anyhow::bail;
use anyhow::Result;
use test_utils::chart_fixture;
use tokio::time;

use super::render_new;
use super::Repl;
use super::Reply;
use crate::domain::models::MediaKind;
use crate::domain::models::SessionSettings;
use crate::domain::models::UuidIds;
use crate::domain::services::SessionStore;
use crate::infrastructure::resolvers::canned::Canned;

fn create_repl() -> (SessionStore, Repl) {
    let store = SessionStore::new(
        Arc::new(Canned::default()),
        Arc::new(UuidIds::default()),
        SessionSettings::default(),
    );
    let repl = Repl::new(store.clone(), "testuser");
    return (store, repl);
}

fn name_and_id(header: &str) -> String {
    return header.split(' ').take(2).collect::<Vec<&str>>().join(" ");
}

fn printed(reply: Reply) -> Result<String> {
    match reply {
        Reply::Print(text) => return Ok(text),
        _ => bail!("Wrong enum"),
    }
}

#[tokio::test(start_paused = true)]
async fn it_sends_plain_text() {
    let (store, mut repl) = create_repl();
    assert_eq!(repl.handle("hello"), Reply::Nothing);
    store.wait_idle().await;

    let state = store.snapshot();
    assert_eq!(state.messages.len(), 2);
    assert_eq!(state.messages[0].first_text(), Some("hello"));
}

#[tokio::test(start_paused = true)]
async fn it_sends_staged_media_with_the_next_message() -> Result<()> {
    let (store, mut repl) = create_repl();
    let text = printed(repl.handle("/attach image https://example.com/a.png A desk"))?;
    assert_eq!(
        text,
        "Staged image. 1 item(s) will be sent with your next message."
    );

    repl.handle("what is this?");
    let state = store.snapshot();
    let items = &state.messages[0].items;
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].kind(), MediaKind::Text);
    assert_eq!(items[1].kind(), MediaKind::Image);

    let text = printed(repl.handle("/clear"))?;
    assert_eq!(text, "Dropped 0 staged item(s).");

    return Ok(());
}

#[test]
fn it_ignores_blank_lines_and_reports_unknown_commands() -> Result<()> {
    let (_store, mut repl) = create_repl();
    assert_eq!(repl.handle("   "), Reply::Nothing);
    assert_eq!(
        printed(repl.handle("/model gpt"))?,
        "Unknown command. Run /help for a list of commands."
    );
    assert_eq!(repl.handle("/quit"), Reply::Quit);

    return Ok(());
}

#[test]
fn it_reports_bad_attachments() -> Result<()> {
    let (_store, mut repl) = create_repl();
    assert_eq!(
        printed(repl.handle("/attach gif foo.gif"))?,
        "gif is not a media kind."
    );

    return Ok(());
}

#[tokio::test(start_paused = true)]
async fn it_gates_notes_on_annotation_mode() -> Result<()> {
    let (store, mut repl) = create_repl();
    repl.handle("/attach image https://example.com/a.png");
    repl.handle("look");

    let state = store.snapshot();
    let message_id = state.messages[0].id.to_string();
    let media_id = state.messages[0].items[1].id.to_string();

    let note = format!("/note {media_id} 10 20 the monitor");
    assert_eq!(
        printed(repl.handle(&note))?,
        "Annotation mode is off. Select a message and run /annotate first."
    );
    assert_eq!(
        printed(repl.handle("/annotate"))?,
        "Select a message before entering annotation mode."
    );

    printed(repl.handle(&format!("/select {message_id}")))?;
    assert_eq!(printed(repl.handle("/annotate"))?, "Annotation mode on.");

    let text = printed(repl.handle(&note))?;
    assert!(text.starts_with("Added note 1 ("));
    assert_eq!(store.annotations_for(&media_id).len(), 1);

    let text = printed(repl.handle(&format!("/note {media_id} 101 20 off the edge")))?;
    assert_eq!(
        text,
        "Invalid annotation: x must be between 0 and 100, got 101"
    );

    let text = printed(repl.handle("/note nope 10 10 elsewhere"))?;
    assert_eq!(text, "Media 'nope' is not part of the selected message.");

    let annotation_id = store.annotations_for(&media_id)[0].id.to_string();
    let text = printed(repl.handle(&format!("/unnote {annotation_id}")))?;
    assert_eq!(text, format!("Removed note {annotation_id}."));
    assert!(store.annotations_for(&media_id).is_empty());

    return Ok(());
}

#[tokio::test(start_paused = true)]
async fn it_selects_messages() -> Result<()> {
    let (store, mut repl) = create_repl();
    repl.handle("hello");

    let message_id = store.snapshot().messages[0].id.to_string();
    let text = printed(repl.handle(&format!("/select {message_id}")))?;
    assert!(text.starts_with(&format!("testuser [{message_id}]")));
    assert!(text.ends_with("(selected)\n    hello"));

    assert_eq!(
        printed(repl.handle("/select missing"))?,
        "No message with id 'missing'."
    );
    assert_eq!(printed(repl.handle("/select"))?, "Selection cleared.");
    assert_eq!(store.snapshot().selected_message_id, None);

    return Ok(());
}

#[tokio::test(start_paused = true)]
async fn it_exports_spreadsheets_as_csv() -> Result<()> {
    let (store, mut repl) = create_repl();
    let compact = chart_fixture().replace('\n', "").replace("  ", "");
    repl.handle(&format!("/attach spreadsheet table {compact}"));
    repl.handle("numbers");

    let media_id = store.snapshot().messages[0].items[1].id.to_string();
    insta::assert_snapshot!(printed(repl.handle(&format!("/csv {media_id}")))?, @r###"
    Jan,Feb,Mar
    65,59,80
    28,48.5,40
    "###);

    let first_text_id = store.snapshot().messages[0].items[0].id.to_string();
    let text = printed(repl.handle(&format!("/csv {first_text_id}")))?;
    assert!(text.contains("not a spreadsheet"));

    return Ok(());
}

#[tokio::test(start_paused = true)]
async fn it_cancels_and_dumps() -> Result<()> {
    let (store, mut repl) = create_repl();
    repl.handle("hello");

    assert_eq!(
        printed(repl.handle("/cancel"))?,
        "Cancelled 1 pending reply(ies)."
    );
    store.wait_idle().await;

    let dump = printed(repl.handle("/dump"))?;
    assert!(dump.contains("messages:"));
    assert!(dump.contains("Response cancelled."));
    assert!(dump.contains("is_annotating: false"));

    return Ok(());
}

#[tokio::test(start_paused = true)]
async fn it_renders_each_message_once() {
    let (store, mut repl) = create_repl();
    let mut seen = HashSet::new();
    repl.handle("hello");

    let lines = render_new(&store.snapshot(), &mut seen, "testuser", false);
    assert_eq!(lines.len(), 3);
    assert!(render_new(&store.snapshot(), &mut seen, "testuser", false).is_empty());

    time::sleep(Duration::from_millis(600)).await;
    let lines = render_new(&store.snapshot(), &mut seen, "testuser", false);
    assert_eq!(lines[1], "    composing...");
    let composing_header = lines[0].to_string();

    store.wait_idle().await;
    let lines = render_new(&store.snapshot(), &mut seen, "testuser", false);
    assert_eq!(name_and_id(&lines[0]), name_and_id(&composing_header));
    assert_eq!(lines[1], "    Hello there! How can I assist you today?");
    assert!(render_new(&store.snapshot(), &mut seen, "testuser", false).is_empty());
}
