#[cfg(test)]
#[path = "annotation_test.rs"]
mod tests;

use serde_derive::Deserialize;
use serde_derive::Serialize;

use super::SessionError;

/// Percentage coordinates relative to the rendered bounding box of the
/// annotated media. Both components must lie within 0..=100.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Position {
        return Position { x, y };
    }

    pub fn validate(&self) -> Result<(), SessionError> {
        for (axis, value) in [("x", self.x), ("y", self.y)] {
            if !value.is_finite() || !(0.0..=100.0).contains(&value) {
                return Err(SessionError::InvalidAnnotation(format!(
                    "{axis} must be between 0 and 100, got {value}"
                )));
            }
        }

        return Ok(());
    }
}

/// A note pinned to a point on one media item. The media id is a reference
/// only, annotations outlive the item they point at.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub id: String,
    pub media_id: String,
    pub text: String,
    pub position: Position,
}

impl Annotation {
    pub fn new(id: &str, media_id: &str, text: &str, position: Position) -> Annotation {
        return Annotation {
            id: id.to_string(),
            media_id: media_id.to_string(),
            text: text.to_string(),
            position,
        };
    }

    pub fn validate(text: &str, position: &Position) -> Result<(), SessionError> {
        if text.trim().is_empty() {
            return Err(SessionError::InvalidAnnotation(
                "annotation text is empty".to_string(),
            ));
        }

        return position.validate();
    }
}
