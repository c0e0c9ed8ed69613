#[cfg(test)]
#[path = "canned_test.rs"]
mod tests;

use anyhow::Result;
use async_trait::async_trait;
use serde_json::json;

use crate::domain::models::ChartKind;
use crate::domain::models::MediaBody;
use crate::domain::models::MediaDraft;
use crate::domain::models::MediaKind;
use crate::domain::models::Message;
use crate::domain::models::Resolver;
use crate::domain::models::ResolverName;
use crate::domain::models::Sender;

const PROCESS_DATA_SNIPPET: &str = r#"function processData(data) {
  return data.map(item => ({
    ...item,
    processed: true,
    timestamp: new Date().toISOString()
  }));
}"#;

const COUNTER_SNIPPET: &str = r#"import React, { useState } from 'react';

function Counter() {
  const [count, setCount] = useState(0);

  return (
    <div className="counter">
      <h2>Count: {count}</h2>
      <button onClick={() => setCount(count + 1)}>
        Increment
      </button>
    </div>
  );
}

export default Counter;"#;

/// Kind of reply picked for a user message. Rules are checked in
/// declaration order and the first match wins.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Topic {
    Greeting,
    Code,
    Chart,
    Image,
    Audio,
    Video,
    Other,
}

impl Topic {
    pub fn classify(message: &Message) -> Topic {
        let text = message.first_text().unwrap_or("").to_lowercase();

        if text.contains("hello") || text.contains("hi") {
            return Topic::Greeting;
        }
        if text.contains("code") || message.has_kind(MediaKind::Code) {
            return Topic::Code;
        }
        if ["chart", "visualization", "data"]
            .iter()
            .any(|word| return text.contains(word))
        {
            return Topic::Chart;
        }
        if text.contains("image") || message.has_kind(MediaKind::Image) {
            return Topic::Image;
        }
        if message.has_kind(MediaKind::Audio) {
            return Topic::Audio;
        }
        if message.has_kind(MediaKind::Video) {
            return Topic::Video;
        }

        return Topic::Other;
    }
}

fn multi_series_chart() -> String {
    return json!({
        "labels": ["Jan", "Feb", "Mar", "Apr", "May", "Jun"],
        "datasets": [
            {
                "label": "Dataset 1",
                "data": [65, 59, 80, 81, 56, 55],
                "backgroundColor": "rgba(54, 162, 235, 0.2)",
                "borderColor": "rgb(54, 162, 235)"
            },
            {
                "label": "Dataset 2",
                "data": [28, 48, 40, 19, 86, 27],
                "backgroundColor": "rgba(255, 99, 132, 0.2)",
                "borderColor": "rgb(255, 99, 132)"
            }
        ]
    })
    .to_string();
}

fn monthly_sales_chart() -> String {
    return json!({
        "labels": ["Jan", "Feb", "Mar", "Apr", "May"],
        "datasets": [
            {
                "label": "Sales 2023",
                "data": [65, 59, 80, 81, 56],
                "backgroundColor": "rgba(54, 162, 235, 0.2)",
                "borderColor": "rgb(54, 162, 235)",
                "borderWidth": 1
            }
        ]
    })
    .to_string();
}

pub fn reply_for(topic: Topic) -> Vec<MediaDraft> {
    match topic {
        Topic::Greeting => {
            return vec![MediaDraft::text("Hello there! How can I assist you today?")];
        }
        Topic::Code => {
            return vec![
                MediaDraft::text("Here's a code snippet that might help:"),
                MediaDraft::code(PROCESS_DATA_SNIPPET, Some("javascript")),
            ];
        }
        Topic::Chart => {
            return vec![
                MediaDraft::text("Here's a visualization of the data you requested:"),
                MediaDraft::spreadsheet(
                    &multi_series_chart(),
                    ChartKind::LineChart,
                    Some("Multi-series Data Visualization"),
                ),
            ];
        }
        Topic::Image => {
            return vec![
                MediaDraft::text("I analyzed the image you sent. Here are my observations:"),
                MediaDraft::text("1. The main subject appears to be in focus\n2. The lighting conditions seem optimal\n3. There are interesting patterns in the composition"),
            ];
        }
        Topic::Audio => {
            return vec![
                MediaDraft::text("I listened to the audio clip. Here's my transcription and analysis:"),
                MediaDraft::text("\"[Transcribed content would appear here]\"\n\nThe audio quality is good with minimal background noise. The main points discussed were about project planning and resource allocation."),
            ];
        }
        Topic::Video => {
            return vec![
                MediaDraft::text("I watched the video clip. Here's a summary:"),
                MediaDraft::text("The video demonstrates a step-by-step process for setting up a development environment. Key timestamps:\n\n- 0:14 - Installation begins\n- 1:23 - Configuration settings\n- 2:45 - Test run of the environment"),
            ];
        }
        Topic::Other => {
            return vec![MediaDraft::text(
                "I received your message! How can I help you further?",
            )];
        }
    }
}

/// Demo conversation a fresh session starts with.
pub fn welcome_transcript() -> Vec<(Sender, Vec<MediaDraft>)> {
    return vec![
        (
            Sender::Assistant,
            vec![MediaDraft::text("Hello! I'm your adaptive chat assistant. I can help you with various types of media and interactions. What would you like to do today?")],
        ),
        (
            Sender::User,
            vec![MediaDraft::text(
                "Can you help me with some code to create a React component?",
            )],
        ),
        (
            Sender::Assistant,
            vec![
                MediaDraft::text("Sure! Here's a simple React component example:"),
                MediaDraft::code(COUNTER_SNIPPET, Some("javascript")),
            ],
        ),
        (
            Sender::User,
            vec![
                MediaDraft::text("Can you explain how this image processing algorithm works?"),
                MediaDraft::new(MediaBody::Image {
                    url: "https://images.unsplash.com/photo-1488590528505-98d2b5aba04b?ixlib=rb-4.0.3&auto=format&fit=crop&w=600&q=80".to_string(),
                    alt: Some("Computer code on a screen".to_string()),
                    width: Some(600),
                    height: Some(400),
                }),
            ],
        ),
        (
            Sender::Assistant,
            vec![
                MediaDraft::text("This appears to be an image of computer code displayed on a screen. Based on what I can see, this could represent an image processing algorithm that might be using techniques like:"),
                MediaDraft::text("1. **Convolution operations** - applying filters to extract features\n2. **Color space transformations** - converting between RGB, HSV, etc.\n3. **Edge detection** - identifying boundaries in images\n4. **Image segmentation** - dividing images into meaningful segments"),
            ],
        ),
        (
            Sender::User,
            vec![MediaDraft::text(
                "Can you create a simple data visualization for me?",
            )],
        ),
        (
            Sender::Assistant,
            vec![
                MediaDraft::text("Here's a simple bar chart visualization:"),
                MediaDraft::spreadsheet(
                    &monthly_sales_chart(),
                    ChartKind::BarChart,
                    Some("Monthly Sales Data"),
                ),
            ],
        ),
    ];
}

/// Classifies the user message by keywords and attached media kinds and
/// answers with a fixed reply per topic.
#[derive(Default)]
pub struct Canned {}

#[async_trait]
impl Resolver for Canned {
    fn name(&self) -> ResolverName {
        return ResolverName::Canned;
    }

    #[allow(clippy::implicit_return)]
    async fn resolve(&self, message: &Message) -> Result<Vec<MediaDraft>> {
        let topic = Topic::classify(message);
        tracing::debug!(message_id = message.id.as_str(), topic = ?topic, "Classified message");

        return Ok(reply_for(topic));
    }
}
