#[cfg(test)]
#[path = "echo_test.rs"]
mod tests;

use anyhow::Result;
use async_trait::async_trait;

use crate::domain::models::MediaBody;
use crate::domain::models::MediaContent;
use crate::domain::models::MediaDraft;
use crate::domain::models::Message;
use crate::domain::models::Resolver;
use crate::domain::models::ResolverName;

fn describe(item: &MediaContent) -> String {
    match &item.body {
        MediaBody::Text { text } => {
            return format!("- text: {text}");
        }
        MediaBody::Code { source, language } => {
            let language = language.as_deref().unwrap_or("plain");
            return format!("- code ({language}, {} lines)", source.lines().count());
        }
        MediaBody::Image { url, alt, .. } => {
            return match alt {
                Some(alt) => format!("- image \"{alt}\" at {url}"),
                None => format!("- image at {url}"),
            };
        }
        MediaBody::Audio { url, file } | MediaBody::Video { url, file } => {
            let name = file
                .as_ref()
                .map(|file| return file.filename.as_str())
                .unwrap_or(url.as_str());
            return format!("- {}: {name}", item.kind());
        }
        MediaBody::Document { text, file } => {
            let name = file
                .as_ref()
                .map(|file| return file.filename.as_str())
                .unwrap_or("untitled");
            return format!("- document {name} ({} chars)", text.chars().count());
        }
        MediaBody::Spreadsheet { chart, .. } => {
            return match item.chart_data() {
                Ok(data) => format!(
                    "- spreadsheet ({chart}, {} labels, {} series)",
                    data.labels.len(),
                    data.datasets.len()
                ),
                Err(_) => format!("- spreadsheet ({chart}, unreadable data)"),
            };
        }
    }
}

/// Replies with an inventory of what the user sent. Handy for checking how
/// mixed media arrives without any canned interpretation.
#[derive(Default)]
pub struct Echo {}

#[async_trait]
impl Resolver for Echo {
    fn name(&self) -> ResolverName {
        return ResolverName::Echo;
    }

    #[allow(clippy::implicit_return)]
    async fn resolve(&self, message: &Message) -> Result<Vec<MediaDraft>> {
        let mut lines = vec![format!("Received {} item(s):", message.items.len())];
        lines.extend(message.items.iter().map(describe));

        return Ok(vec![MediaDraft::text(&lines.join("\n"))]);
    }
}
