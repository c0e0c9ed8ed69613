#[cfg(test)]
#[path = "transcript_test.rs"]
mod tests;

use yansi::Color;
use yansi::Paint;

use crate::domain::models::ChartData;
use crate::domain::models::MediaBody;
use crate::domain::models::MediaContent;
use crate::domain::models::Message;
use crate::domain::models::Sender;
use crate::domain::models::SessionState;
use crate::domain::models::DEFAULT_CHART_TITLE;
use crate::domain::models::DEFAULT_CODE_LANGUAGE;
use crate::domain::models::DEFAULT_DOCUMENT_FILENAME;
use crate::domain::models::DEFAULT_IMAGE_ALT;

const INDENT: &str = "    ";

/// Plain text rendering of a session snapshot, one block per message with
/// numbered annotations under the media they are pinned to.
pub struct Transcript<'a> {
    state: &'a SessionState,
    username: &'a str,
    colored: bool,
}

impl<'a> Transcript<'a> {
    pub fn new(state: &'a SessionState, username: &'a str) -> Transcript<'a> {
        return Transcript {
            state,
            username,
            colored: false,
        };
    }

    pub fn with_color(mut self, colored: bool) -> Transcript<'a> {
        self.colored = colored;
        return self;
    }

    fn paint(&self, text: &str, color: Color) -> String {
        if !self.colored {
            return text.to_string();
        }

        return Paint::new(text).fg(color).to_string();
    }

    pub fn render(&self) -> String {
        return self
            .state
            .messages
            .iter()
            .map(|message| return self.message_lines(message).join("\n"))
            .collect::<Vec<String>>()
            .join("\n\n");
    }

    pub fn message_lines(&self, message: &Message) -> Vec<String> {
        let is_selected = self.state.selected_message_id.as_deref() == Some(message.id.as_str());
        let (name, color) = match message.sender {
            Sender::User => (self.username, Color::Green),
            Sender::Assistant => ("Assistant", Color::Cyan),
        };

        let mut header = format!(
            "{} [{}] {}",
            self.paint(name, color),
            message.id,
            message.created_at.format("%H:%M:%S")
        );
        if is_selected {
            header.push_str(&self.paint(" (selected)", Color::White));
        }
        let mut lines = vec![header];

        if message.is_composing {
            lines.push(format!("{INDENT}{}", self.paint("composing...", Color::Blue)));
            return lines;
        }

        for item in message.items.iter() {
            lines.extend(self.item_lines(item));
            lines.extend(self.annotation_lines(&item.id));
        }

        return lines;
    }

    fn tag(&self, item: &MediaContent, detail: &str) -> String {
        let tag = format!("[{} {}]", item.kind(), item.id);
        if detail.is_empty() {
            return format!("{INDENT}{}", self.paint(&tag, Color::Yellow));
        }

        return format!("{INDENT}{} {detail}", self.paint(&tag, Color::Yellow));
    }

    fn quoted(text: &str) -> Vec<String> {
        return text
            .lines()
            .map(|line| return format!("{INDENT}| {line}"))
            .collect();
    }

    fn item_lines(&self, item: &MediaContent) -> Vec<String> {
        match &item.body {
            MediaBody::Text { text } => {
                return text
                    .lines()
                    .map(|line| return format!("{INDENT}{line}"))
                    .collect();
            }
            MediaBody::Code { source, language } => {
                let language = language.as_deref().unwrap_or(DEFAULT_CODE_LANGUAGE);
                let mut lines = vec![self.tag(item, language)];
                lines.extend(Transcript::quoted(source));
                return lines;
            }
            MediaBody::Image {
                url,
                alt,
                width,
                height,
            } => {
                let alt = alt.as_deref().unwrap_or(DEFAULT_IMAGE_ALT);
                let detail = match (width, height) {
                    (Some(width), Some(height)) => format!("{alt} ({width}x{height}) {url}"),
                    _ => format!("{alt} {url}"),
                };
                return vec![self.tag(item, &detail)];
            }
            MediaBody::Audio { url, file } | MediaBody::Video { url, file } => {
                let detail = match file {
                    Some(file) => format!("{} {url}", file.filename),
                    None => url.to_string(),
                };
                return vec![self.tag(item, &detail)];
            }
            MediaBody::Document { text, file } => {
                let filename = file
                    .as_ref()
                    .map(|file| return file.filename.as_str())
                    .unwrap_or(DEFAULT_DOCUMENT_FILENAME);
                let mut lines = vec![self.tag(item, filename)];
                lines.extend(Transcript::quoted(text));
                return lines;
            }
            MediaBody::Spreadsheet { data, chart, title } => {
                let title = title.as_deref().unwrap_or(DEFAULT_CHART_TITLE);
                let mut lines = vec![self.tag(item, &format!("{title} ({chart})"))];
                match ChartData::parse(data) {
                    Ok(chart_data) => lines.extend(Transcript::quoted(&chart_data.to_csv())),
                    Err(err) => {
                        tracing::warn!(media_id = item.id.as_str(), error = %err, "Unreadable chart data");
                        lines.push(format!("{INDENT}| unreadable data"));
                    }
                }
                return lines;
            }
        }
    }

    fn annotation_lines(&self, media_id: &str) -> Vec<String> {
        return self
            .state
            .annotations_for(media_id)
            .iter()
            .enumerate()
            .map(|(idx, annotation)| {
                let pin = format!("{}.", idx + 1);
                return format!(
                    "{INDENT}  {} ({}, {}) {} [{}]",
                    self.paint(&pin, Color::Magenta),
                    annotation.position.x,
                    annotation.position.y,
                    annotation.text,
                    annotation.id
                );
            })
            .collect();
    }
}
