use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::fmt;

use crate::errors::{TaggerError, TaggerResult};

/// A text label the recognition service assigned to the photo.
pub type Tag = String;

/// Token returned by the upload endpoint, used to key the tags and colors reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentId(String);

impl ContentId {
    pub fn new<S: Into<String>>(id: S) -> TaggerResult<Self> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(TaggerError::MissingField("result.upload_id"));
        }
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A dominant color swatch and the name of the closest palette color.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoColor {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub color_name: String,
}

impl PhotoColor {
    pub fn new<S: Into<String>>(red: u8, green: u8, blue: u8, color_name: S) -> Self {
        Self {
            red,
            green,
            blue,
            color_name: color_name.into(),
        }
    }

    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.red, self.green, self.blue)
    }
}

/// Everything one orchestration run produced.
///
/// The tags and colors reads fail independently, so each keeps its own outcome.
#[derive(Debug)]
pub struct PhotoAnalysis {
    pub content_id: ContentId,
    pub tags: TaggerResult<Vec<Tag>>,
    pub colors: TaggerResult<Vec<PhotoColor>>,
}

impl PhotoAnalysis {
    pub fn tags(&self) -> Option<&[Tag]> {
        self.tags.as_deref().ok()
    }

    pub fn colors(&self) -> Option<&[PhotoColor]> {
        self.colors.as_deref().ok()
    }

    pub fn to_json(&self) -> Value {
        json!({
            "content_id": self.content_id,
            "tags": self.tags(),
            "colors": self.colors(),
            "errors": {
                "tags": self.tags.as_ref().err().map(|e| e.to_string()),
                "colors": self.colors.as_ref().err().map(|e| e.to_string()),
            }
        })
    }
}
