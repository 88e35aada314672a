//! Runs one photo through the recognition service: encode, upload, then the two reads.
//!
//! The chain is strictly sequential. A failed upload ends the run with an error; after a
//! successful upload the tags and colors reads are both attempted and each keeps its own
//! outcome. Nothing is retried and nothing is cancelled.

use std::sync::Arc;
use strum::Display;
use tracing::{info, warn};

use crate::encoding::{encode_jpeg, DEFAULT_JPEG_QUALITY};
use crate::errors::TaggerResult;
use crate::models::PhotoAnalysis;
use crate::services::base::TaggingService;
use crate::services::progress::ProgressCallback;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum Stage {
    Idle,
    Encoding,
    Uploading,
    FetchingTags,
    FetchingColors,
    Done,
}

pub struct Orchestrator<S: TaggingService> {
    service: S,
    quality: u8,
    stage: Stage,
}

impl<S: TaggingService> Orchestrator<S> {
    pub fn new(service: S) -> Self {
        Self {
            service,
            quality: DEFAULT_JPEG_QUALITY,
            stage: Stage::Idle,
        }
    }

    pub fn with_quality(mut self, quality: u8) -> Self {
        self.quality = quality;
        self
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    fn enter(&mut self, stage: Stage) {
        info!(%stage, "entering stage");
        self.stage = stage;
    }

    /// Encode `image` as JPEG and analyze it.
    ///
    /// Takes `&mut self` so a single orchestrator can only drive one run at a time.
    pub async fn analyze<F>(&mut self, image: &[u8], on_progress: F) -> TaggerResult<PhotoAnalysis>
    where
        F: Fn(f32) + Send + Sync + 'static,
    {
        self.enter(Stage::Encoding);
        let jpeg = match encode_jpeg(image, self.quality) {
            Ok(jpeg) => jpeg,
            Err(e) => {
                warn!("Could not encode image: {}", e);
                self.enter(Stage::Done);
                return Err(e);
            }
        };

        self.analyze_jpeg(jpeg, on_progress).await
    }

    /// Analyze a payload that is already JPEG encoded.
    pub async fn analyze_jpeg<F>(&mut self, jpeg: Vec<u8>, on_progress: F) -> TaggerResult<PhotoAnalysis>
    where
        F: Fn(f32) + Send + Sync + 'static,
    {
        let progress: ProgressCallback = Arc::new(on_progress);

        self.enter(Stage::Uploading);
        let content_id = match self.service.upload(jpeg, progress).await {
            Ok(id) => id,
            Err(e) => {
                warn!("Error while uploading file: {}", e);
                self.enter(Stage::Done);
                return Err(e);
            }
        };
        info!(%content_id, "content uploaded");

        self.enter(Stage::FetchingTags);
        let tags = self.service.download_tags(&content_id).await;
        if let Err(e) = &tags {
            warn!("Error while fetching tags: {}", e);
        }

        self.enter(Stage::FetchingColors);
        let colors = self.service.download_colors(&content_id).await;
        if let Err(e) = &colors {
            warn!("Error while fetching colors: {}", e);
        }

        self.enter(Stage::Done);
        Ok(PhotoAnalysis {
            content_id,
            tags,
            colors,
        })
    }
}
