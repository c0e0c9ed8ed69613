#[cfg(test)]
#[path = "media_test.rs"]
mod tests;

use std::collections::BTreeMap;

use anyhow::bail;
use anyhow::Result;
use serde_derive::Deserialize;
use serde_derive::Serialize;
use strum::EnumIter;
use strum::EnumVariantNames;
use strum::IntoEnumIterator;

pub const DEFAULT_CODE_LANGUAGE: &str = "javascript";
pub const DEFAULT_IMAGE_ALT: &str = "Image";
pub const DEFAULT_DOCUMENT_FILENAME: &str = "document.txt";
pub const DEFAULT_CHART_TITLE: &str = "Data Visualization";

#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    EnumIter,
    EnumVariantNames,
    strum::Display,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Text,
    Code,
    Image,
    Audio,
    Video,
    Document,
    Spreadsheet,
}

impl MediaKind {
    pub fn parse(text: &str) -> Option<MediaKind> {
        return MediaKind::iter().find(|e| return e.to_string() == text);
    }
}

#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, EnumIter, strum::Display, Serialize, Deserialize,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum ChartKind {
    Table,
    #[default]
    BarChart,
    LineChart,
}

impl ChartKind {
    pub fn parse(text: &str) -> Option<ChartKind> {
        return ChartKind::iter().find(|e| return e.to_string() == text);
    }
}

/// Details of a file the user picked when attaching media.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileInfo {
    pub filename: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
}

impl FileInfo {
    pub fn new(filename: &str) -> FileInfo {
        return FileInfo {
            filename: filename.to_string(),
            ..FileInfo::default()
        };
    }
}

/// The content of one media item. Each kind only carries the fields it uses,
/// the payload string is interpreted per kind.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum MediaBody {
    Text {
        text: String,
    },
    Code {
        source: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        language: Option<String>,
    },
    Image {
        url: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        alt: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        width: Option<u32>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        height: Option<u32>,
    },
    Audio {
        url: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        file: Option<FileInfo>,
    },
    Video {
        url: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        file: Option<FileInfo>,
    },
    Document {
        text: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        file: Option<FileInfo>,
    },
    Spreadsheet {
        data: String,
        #[serde(default)]
        chart: ChartKind,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        title: Option<String>,
    },
}

impl MediaBody {
    pub fn kind(&self) -> MediaKind {
        match self {
            MediaBody::Text { .. } => return MediaKind::Text,
            MediaBody::Code { .. } => return MediaKind::Code,
            MediaBody::Image { .. } => return MediaKind::Image,
            MediaBody::Audio { .. } => return MediaKind::Audio,
            MediaBody::Video { .. } => return MediaKind::Video,
            MediaBody::Document { .. } => return MediaKind::Document,
            MediaBody::Spreadsheet { .. } => return MediaKind::Spreadsheet,
        }
    }

    /// Raw text or code, a resource locator for image/audio/video, serialized
    /// text for documents and serialized series data for spreadsheets.
    pub fn payload(&self) -> &str {
        match self {
            MediaBody::Text { text } => return text,
            MediaBody::Code { source, .. } => return source,
            MediaBody::Image { url, .. } => return url,
            MediaBody::Audio { url, .. } => return url,
            MediaBody::Video { url, .. } => return url,
            MediaBody::Document { text, .. } => return text,
            MediaBody::Spreadsheet { data, .. } => return data,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaContent {
    pub id: String,
    #[serde(flatten)]
    pub body: MediaBody,
    /// Free-form extension fields. Never interpreted, only passed through.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl MediaContent {
    pub fn new(id: &str, body: MediaBody) -> MediaContent {
        return MediaContent {
            id: id.to_string(),
            body,
            extra: BTreeMap::new(),
        };
    }

    pub fn from_draft(id: &str, draft: MediaDraft) -> MediaContent {
        return MediaContent {
            id: id.to_string(),
            body: draft.body,
            extra: draft.extra,
        };
    }

    pub fn kind(&self) -> MediaKind {
        return self.body.kind();
    }

    pub fn payload(&self) -> &str {
        return self.body.payload();
    }

    pub fn chart_data(&self) -> Result<ChartData> {
        if let MediaBody::Spreadsheet { data, .. } = &self.body {
            return ChartData::parse(data);
        }

        bail!(format!("Media {} is {}, not a spreadsheet", self.id, self.kind()));
    }
}

/// A media item as submitted by a caller, before it is given an id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MediaDraft {
    pub body: MediaBody,
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl MediaDraft {
    pub fn new(body: MediaBody) -> MediaDraft {
        return MediaDraft {
            body,
            extra: BTreeMap::new(),
        };
    }

    pub fn text(text: &str) -> MediaDraft {
        return MediaDraft::new(MediaBody::Text {
            text: text.to_string(),
        });
    }

    pub fn code(source: &str, language: Option<&str>) -> MediaDraft {
        return MediaDraft::new(MediaBody::Code {
            source: source.to_string(),
            language: language.map(|e| return e.to_string()),
        });
    }

    pub fn image(url: &str, alt: Option<&str>) -> MediaDraft {
        return MediaDraft::new(MediaBody::Image {
            url: url.to_string(),
            alt: alt.map(|e| return e.to_string()),
            width: None,
            height: None,
        });
    }

    pub fn audio(url: &str, file: Option<FileInfo>) -> MediaDraft {
        return MediaDraft::new(MediaBody::Audio {
            url: url.to_string(),
            file,
        });
    }

    pub fn video(url: &str, file: Option<FileInfo>) -> MediaDraft {
        return MediaDraft::new(MediaBody::Video {
            url: url.to_string(),
            file,
        });
    }

    pub fn document(text: &str, file: Option<FileInfo>) -> MediaDraft {
        return MediaDraft::new(MediaBody::Document {
            text: text.to_string(),
            file,
        });
    }

    pub fn spreadsheet(data: &str, chart: ChartKind, title: Option<&str>) -> MediaDraft {
        return MediaDraft::new(MediaBody::Spreadsheet {
            data: data.to_string(),
            chart,
            title: title.map(|e| return e.to_string()),
        });
    }

    pub fn with_extra(mut self, key: &str, value: serde_json::Value) -> MediaDraft {
        self.extra.insert(key.to_string(), value);
        return self;
    }

    /// Trims text drafts. Text that is only whitespace carries nothing to
    /// send and is dropped, every other kind is kept as is.
    pub fn normalize(self) -> Option<MediaDraft> {
        if let MediaBody::Text { text } = &self.body {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                return None;
            }

            return Some(MediaDraft {
                body: MediaBody::Text {
                    text: trimmed.to_string(),
                },
                extra: self.extra,
            });
        }

        return Some(self);
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub label: String,
    pub data: Vec<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_width: Option<f64>,
}

/// Series data carried by spreadsheet items.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

impl ChartData {
    pub fn parse(payload: &str) -> Result<ChartData> {
        let data: ChartData = serde_json::from_str(payload)?;
        return Ok(data);
    }

    /// Labels on the first row, then one row of values per dataset.
    pub fn to_csv(&self) -> String {
        let mut rows = vec![self.labels.join(",")];
        for dataset in self.datasets.iter() {
            rows.push(
                dataset
                    .data
                    .iter()
                    .map(|value| return value.to_string())
                    .collect::<Vec<String>>()
                    .join(","),
            );
        }

        return rows.join("\n");
    }
}
