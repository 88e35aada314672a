use async_trait::async_trait;
use std::sync::Mutex;

use super::base::TaggingService;
use super::progress::ProgressCallback;
use crate::errors::{TaggerError, TaggerResult};
use crate::models::{ContentId, PhotoColor, Tag};

/// A mock service that returns pre-configured outcomes and records every call
pub struct MockService {
    upload: Mutex<Option<TaggerResult<ContentId>>>,
    tags: Mutex<Option<TaggerResult<Vec<Tag>>>>,
    colors: Mutex<Option<TaggerResult<Vec<PhotoColor>>>>,
    calls: Mutex<Vec<&'static str>>,
    uploaded_len: Mutex<Option<usize>>,
}

impl MockService {
    pub fn new(
        upload: TaggerResult<ContentId>,
        tags: TaggerResult<Vec<Tag>>,
        colors: TaggerResult<Vec<PhotoColor>>,
    ) -> Self {
        Self {
            upload: Mutex::new(Some(upload)),
            tags: Mutex::new(Some(tags)),
            colors: Mutex::new(Some(colors)),
            calls: Mutex::new(Vec::new()),
            uploaded_len: Mutex::new(None),
        }
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    pub fn uploaded_len(&self) -> Option<usize> {
        *self.uploaded_len.lock().unwrap()
    }

    fn take<T>(&self, name: &'static str, slot: &Mutex<Option<TaggerResult<T>>>) -> TaggerResult<T> {
        self.calls.lock().unwrap().push(name);
        slot.lock()
            .unwrap()
            .take()
            .unwrap_or(Err(TaggerError::MissingField("mock outcome already used")))
    }
}

#[async_trait]
impl TaggingService for MockService {
    async fn upload(&self, jpeg: Vec<u8>, progress: ProgressCallback) -> TaggerResult<ContentId> {
        *self.uploaded_len.lock().unwrap() = Some(jpeg.len());
        let outcome = self.take("upload", &self.upload);
        if outcome.is_ok() {
            progress(0.25);
            progress(1.0);
        }
        outcome
    }

    async fn download_tags(&self, _content_id: &ContentId) -> TaggerResult<Vec<Tag>> {
        self.take("tags", &self.tags)
    }

    async fn download_colors(&self, _content_id: &ContentId) -> TaggerResult<Vec<PhotoColor>> {
        self.take("colors", &self.colors)
    }
}
