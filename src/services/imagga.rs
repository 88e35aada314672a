use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::debug;

use super::base::TaggingService;
use super::configs::{Credentials, ImaggaConfig};
use super::progress::{progress_body, ProgressCallback, ProgressTracker};
use super::router::Endpoint;
use super::types::{
    colors_to_photo_colors, status_message, tags_to_labels, upload_to_content_id, ColorsResult,
    Envelope, TagsResult, UploadResult,
};
use crate::errors::{TaggerError, TaggerResult};
use crate::models::{ContentId, PhotoColor, Tag};

pub const UPLOAD_FIELD: &str = "image";
pub const UPLOAD_FILE_NAME: &str = "image.jpg";
pub const UPLOAD_MIME: &str = "image/jpeg";

pub struct ImaggaService {
    client: Client,
    config: ImaggaConfig,
}

impl ImaggaService {
    pub fn new(config: ImaggaConfig) -> TaggerResult<Self> {
        let client = Client::builder().timeout(config.timeout).build()?;

        Ok(Self { client, config })
    }

    fn request(&self, endpoint: Endpoint<'_>) -> RequestBuilder {
        let url = endpoint.url(&self.config.host);
        debug!("{} {}", endpoint.method(), url);

        let mut builder = self.client.request(endpoint.method(), url);
        let query = endpoint.query();
        if !query.is_empty() {
            builder = builder.query(&query);
        }

        match &self.config.credentials {
            Credentials::Header(value) => builder.header(AUTHORIZATION, value),
            Credentials::Basic {
                api_key,
                api_secret,
            } => builder.basic_auth(api_key, Some(api_secret)),
        }
    }

    /// Validate the status and decode the body
    async fn read_json<T: DeserializeOwned>(response: Response) -> TaggerResult<T> {
        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            let message = status_message(&body).unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("unknown status")
                    .to_string()
            });
            return Err(TaggerError::Status {
                status: status.as_u16(),
                message,
            });
        }

        Ok(serde_json::from_slice(&body)?)
    }
}

#[async_trait]
impl TaggingService for ImaggaService {
    async fn upload(&self, jpeg: Vec<u8>, progress: ProgressCallback) -> TaggerResult<ContentId> {
        let length = jpeg.len() as u64;
        let tracker = Arc::new(ProgressTracker::new(length, progress));

        let part = Part::stream_with_length(progress_body(jpeg, tracker.clone()), length)
            .file_name(UPLOAD_FILE_NAME)
            .mime_str(UPLOAD_MIME)?;
        let form = Form::new().part(UPLOAD_FIELD, part);

        let response = self.request(Endpoint::Uploads).multipart(form).send().await?;
        let envelope: Envelope<UploadResult> = Self::read_json(response).await?;
        let content_id = upload_to_content_id(envelope)?;

        tracker.finish();
        Ok(content_id)
    }

    async fn download_tags(&self, content_id: &ContentId) -> TaggerResult<Vec<Tag>> {
        let response = self.request(Endpoint::Tags(content_id)).send().await?;
        let envelope: Envelope<TagsResult> = Self::read_json(response).await?;
        tags_to_labels(envelope)
    }

    async fn download_colors(&self, content_id: &ContentId) -> TaggerResult<Vec<PhotoColor>> {
        let response = self.request(Endpoint::Colors(content_id)).send().await?;
        let envelope: Envelope<ColorsResult> = Self::read_json(response).await?;
        colors_to_photo_colors(envelope)
    }
}
