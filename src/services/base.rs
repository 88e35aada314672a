use async_trait::async_trait;

use super::progress::ProgressCallback;
use crate::errors::TaggerResult;
use crate::models::{ContentId, PhotoColor, Tag};

/// Base trait for image recognition services (Imagga, test doubles)
#[async_trait]
pub trait TaggingService: Send + Sync {
    /// Upload a JPEG payload and return the id the service assigned to it
    async fn upload(&self, jpeg: Vec<u8>, progress: ProgressCallback) -> TaggerResult<ContentId>;

    /// Fetch the tags of previously uploaded content, in the order the service ranks them
    async fn download_tags(&self, content_id: &ContentId) -> TaggerResult<Vec<Tag>>;

    /// Fetch the dominant colors of previously uploaded content
    async fn download_colors(&self, content_id: &ContentId) -> TaggerResult<Vec<PhotoColor>>;
}
