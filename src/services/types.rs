//! Response bodies of the Imagga v2 API.
//!
//! Entries are read leaf by leaf: a missing, null or mistyped leaf falls back to an empty
//! string or 0 and the rest of the entry survives. Missing containers are errors.

use serde::Deserialize;
use serde_json::Value;

use crate::errors::{TaggerError, TaggerResult};
use crate::models::{ContentId, PhotoColor, Tag};

#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub result: Option<T>,
}

#[derive(Debug, Deserialize)]
pub struct UploadResult {
    pub upload_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TagsResult {
    pub tags: Option<Vec<Value>>,
}

#[derive(Debug, Deserialize)]
pub struct ColorsResult {
    pub colors: Option<ColorsBody>,
}

#[derive(Debug, Deserialize)]
pub struct ColorsBody {
    pub image_colors: Option<Vec<Value>>,
}

fn text(value: &Value) -> String {
    value.as_str().unwrap_or_default().to_string()
}

/// Integer channel value; fractions truncate, anything else is 0
fn channel(value: &Value) -> u8 {
    let raw = value
        .as_i64()
        .or_else(|| value.as_f64().map(|f| f.trunc() as i64))
        .unwrap_or(0);
    raw.clamp(0, u8::MAX as i64) as u8
}

pub fn upload_to_content_id(envelope: Envelope<UploadResult>) -> TaggerResult<ContentId> {
    let upload_id = envelope
        .result
        .and_then(|r| r.upload_id)
        .ok_or(TaggerError::MissingField("result.upload_id"))?;
    ContentId::new(upload_id)
}

pub fn tags_to_labels(envelope: Envelope<TagsResult>) -> TaggerResult<Vec<Tag>> {
    let tags = envelope
        .result
        .and_then(|r| r.tags)
        .ok_or(TaggerError::MissingField("result.tags"))?;
    Ok(tags.iter().map(|entry| text(&entry["tag"]["en"])).collect())
}

pub fn colors_to_photo_colors(envelope: Envelope<ColorsResult>) -> TaggerResult<Vec<PhotoColor>> {
    let colors = envelope
        .result
        .and_then(|r| r.colors)
        .and_then(|c| c.image_colors)
        .ok_or(TaggerError::MissingField("result.colors.image_colors"))?;

    Ok(colors
        .iter()
        .map(|c| {
            PhotoColor::new(
                channel(&c["r"]),
                channel(&c["g"]),
                channel(&c["b"]),
                text(&c["closest_palette_color"]),
            )
        })
        .collect())
}

/// Human readable message from an error body, e.g. `{"status": {"text": "...", "type": "error"}}`
pub fn status_message(body: &[u8]) -> Option<String> {
    let value: Value = serde_json::from_slice(body).ok()?;
    value["status"]["text"]
        .as_str()
        .filter(|text| !text.is_empty())
        .map(str::to_string)
}
