#[cfg(test)]
#[path = "ui_test.rs"]
mod tests;

use std::collections::HashSet;

use anyhow::Result;
use tokio::io::AsyncBufReadExt;
use tokio::io::BufReader;
use yansi::Paint;

use crate::domain::models::Intent;
use crate::domain::models::MediaDraft;
use crate::domain::models::Outcome;
use crate::domain::models::SessionState;
use crate::domain::models::SlashCommand;
use crate::domain::services::SessionStore;
use crate::domain::services::Suggestions;
use crate::domain::services::Transcript;

pub fn help_text() -> String {
    let text = r#"
COMMANDS:
- /attach (/a) KIND ARGS - Stages a media item for the next message. KIND is one of text, code, image, audio, video, document, spreadsheet.
- /clear - Drops all staged media items.
- /select (/s) [MESSAGE_ID?] - Selects a message and shows it with its annotations. Omit the id to clear the selection.
- /annotate (/an) - Toggles annotation mode for the selected message.
- /note (/n) MEDIA_ID X Y TEXT - Pins a note at X,Y percent on a media item of the selected message. Requires annotation mode.
- /unnote (/un) ANNOTATION_ID - Removes a note.
- /cancel - Cancels replies that are still pending.
- /csv MEDIA_ID - Prints a spreadsheet item as CSV.
- /dump - Prints the whole session as YAML.
- /quit /exit (/q) - Exit Mosaic.
- /help (/h) - Provides this help menu.

ATTACH EXAMPLES:
- /attach image https://example.com/cat.png A sleeping cat
- /attach code rust fn main() {}
- /attach document notes.txt Remember the milk
- /attach spreadsheet bar-chart {"labels":["Jan"],"datasets":[{"label":"Sales","data":[1]}]}

Anything that does not start with a slash is sent as a message, together with the staged media items.
        "#;

    return text.trim().to_string();
}

/// What the loop should do after handling a line.
#[derive(Debug, PartialEq, Eq)]
pub enum Reply {
    Print(String),
    Nothing,
    Quit,
}

/// Turns input lines into intents for the session store. Annotation mode
/// gating lives here, the store accepts annotations at any time.
pub struct Repl {
    store: SessionStore,
    staged: Vec<MediaDraft>,
    username: String,
    colored: bool,
}

impl Repl {
    pub fn new(store: SessionStore, username: &str) -> Repl {
        return Repl {
            store,
            staged: vec![],
            username: username.to_string(),
            colored: false,
        };
    }

    pub fn with_color(mut self, colored: bool) -> Repl {
        self.colored = colored;
        return self;
    }

    fn error(&self, text: &str) -> Reply {
        if self.colored {
            return Reply::Print(Paint::red(text).to_string());
        }

        return Reply::Print(text.to_string());
    }

    pub fn handle(&mut self, line: &str) -> Reply {
        let line = line.trim();
        if line.is_empty() {
            return Reply::Nothing;
        }

        if !line.starts_with('/') {
            return self.send(line);
        }

        let cmd = match SlashCommand::parse(line) {
            Some(cmd) => cmd,
            None => return self.error("Unknown command. Run /help for a list of commands."),
        };

        match self.run(&cmd) {
            Ok(reply) => return reply,
            Err(err) => return self.error(&err.to_string()),
        }
    }

    fn send(&mut self, text: &str) -> Reply {
        let mut drafts = vec![MediaDraft::text(text)];
        drafts.append(&mut self.staged);

        match self.store.apply(Intent::SendMessage(drafts.clone())) {
            Ok(_) => return Reply::Nothing,
            Err(err) => {
                drafts.remove(0);
                self.staged = drafts;
                return self.error(&err.to_string());
            }
        }
    }

    fn run(&mut self, cmd: &SlashCommand) -> Result<Reply> {
        if cmd.is_quit() {
            return Ok(Reply::Quit);
        }

        if cmd.is_help() {
            return Ok(Reply::Print(help_text()));
        }

        if cmd.is_attach() {
            let draft = cmd.media_draft()?;
            let kind = draft.body.kind();
            self.staged.push(draft);
            return Ok(Reply::Print(format!(
                "Staged {kind}. {} item(s) will be sent with your next message.",
                self.staged.len()
            )));
        }

        if cmd.is_clear() {
            let count = self.staged.len();
            self.staged.clear();
            return Ok(Reply::Print(format!("Dropped {count} staged item(s).")));
        }

        if cmd.is_select() {
            return self.select(cmd);
        }

        if cmd.is_annotate() {
            if let Outcome::AnnotationMode(is_annotating) =
                self.store.apply(Intent::ToggleAnnotationMode())?
            {
                let state = if is_annotating { "on" } else { "off" };
                return Ok(Reply::Print(format!("Annotation mode {state}.")));
            }
            return Ok(Reply::Nothing);
        }

        if cmd.is_note() {
            return self.note(cmd);
        }

        if cmd.is_unnote() {
            let id = cmd.args.first().map(|e| return e.to_string()).unwrap_or_default();
            if let Outcome::AnnotationRemoved(true) =
                self.store.apply(Intent::RemoveAnnotation(id.to_string()))?
            {
                return Ok(Reply::Print(format!("Removed note {id}.")));
            }
            return Ok(self.error(&format!("No note with id '{id}'.")));
        }

        if cmd.is_cancel() {
            if let Outcome::Cancelled(count) = self.store.apply(Intent::CancelPending())? {
                return Ok(Reply::Print(format!("Cancelled {count} pending reply(ies).")));
            }
            return Ok(Reply::Nothing);
        }

        if cmd.is_csv() {
            let media_id = cmd.args.first().map(|e| return e.as_str()).unwrap_or("");
            let media = match self.store.find_media(media_id) {
                Some(media) => media,
                None => return Ok(self.error(&format!("No media with id '{media_id}'."))),
            };
            return Ok(Reply::Print(media.chart_data()?.to_csv()));
        }

        if cmd.is_dump() {
            return Ok(Reply::Print(serde_yaml::to_string(&self.store.snapshot())?));
        }

        return Ok(Reply::Nothing);
    }

    fn select(&mut self, cmd: &SlashCommand) -> Result<Reply> {
        let id = match cmd.args.first() {
            Some(id) => id.to_string(),
            None => {
                self.store.apply(Intent::SelectMessage(None))?;
                return Ok(Reply::Print("Selection cleared.".to_string()));
            }
        };

        let state = self.store.snapshot();
        if state.message(&id).is_none() {
            return Ok(self.error(&format!("No message with id '{id}'.")));
        }

        self.store.apply(Intent::SelectMessage(Some(id.to_string())))?;

        let state = self.store.snapshot();
        let message = match state.message(&id) {
            Some(message) => message,
            None => return Ok(Reply::Nothing),
        };
        let lines = Transcript::new(&state, &self.username)
            .with_color(self.colored)
            .message_lines(message);

        return Ok(Reply::Print(lines.join("\n")));
    }

    fn note(&mut self, cmd: &SlashCommand) -> Result<Reply> {
        let state = self.store.snapshot();
        if !state.is_annotating {
            return Ok(self.error(
                "Annotation mode is off. Select a message and run /annotate first.",
            ));
        }

        let (media_id, position, text) = cmd.annotation()?;
        let selected = self.store.selected_message();
        if selected.and_then(|message| return message.media(&media_id).cloned()).is_none() {
            return Ok(self.error(&format!(
                "Media '{media_id}' is not part of the selected message."
            )));
        }

        let outcome = self
            .store
            .apply(Intent::AddAnnotation(media_id.to_string(), text, position))?;
        if let Outcome::AnnotationAdded(id) = outcome {
            let count = self.store.annotations_for(&media_id).len();
            return Ok(Reply::Print(format!(
                "Added note {count} ({id}) to {media_id}."
            )));
        }

        return Ok(Reply::Nothing);
    }
}

/// Lines for messages that have not been printed yet. Composing placeholders
/// are shown once, their resolved reply reuses the id and gets printed when
/// it arrives.
pub fn render_new(
    state: &SessionState,
    printed: &mut HashSet<(String, bool)>,
    username: &str,
    colored: bool,
) -> Vec<String> {
    let transcript = Transcript::new(state, username).with_color(colored);
    let mut lines = vec![];
    for message in state.messages.iter() {
        if !printed.insert((message.id.to_string(), message.is_composing)) {
            continue;
        }
        lines.extend(transcript.message_lines(message));
        lines.push("".to_string());
    }

    return lines;
}

pub async fn start(store: SessionStore, username: &str) -> Result<()> {
    let colored = Paint::is_enabled();
    let mut rx = store.subscribe();

    let render_username = username.to_string();
    let renderer = tokio::spawn(async move {
        let mut printed = HashSet::new();
        let mut last_hinted = None;
        loop {
            let state = rx.borrow_and_update().clone();
            let lines = render_new(&state, &mut printed, &render_username, colored);
            if !lines.is_empty() {
                println!("{}", lines.join("\n"));
            }

            let last = state.last_message();
            let last_id = last.map(|message| return message.id.to_string());
            if last_id != last_hinted && state.composing_count() == 0 {
                let suggestions = Suggestions::for_message(last);
                println!(
                    "{}",
                    Paint::new(format!("Try: {}", Suggestions::labels(&suggestions))).dimmed()
                );
                last_hinted = last_id;
            }

            if rx.changed().await.is_err() {
                return;
            }
        }
    });

    let mut repl = Repl::new(store.clone(), username).with_color(colored);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match repl.handle(&line) {
            Reply::Print(text) => println!("{text}"),
            Reply::Nothing => {}
            Reply::Quit => break,
        }
    }

    store.cancel_all();
    store.wait_idle().await;
    renderer.abort();

    return Ok(());
}
