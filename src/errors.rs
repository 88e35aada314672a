use thiserror::Error;

#[non_exhaustive]
#[derive(Error, Debug)]
pub enum TaggerError {
    #[error("Could not encode image as JPEG: {0}")]
    Encode(String),

    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Server returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Malformed response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Missing field in response: {0}")]
    MissingField(&'static str),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<image::ImageError> for TaggerError {
    fn from(err: image::ImageError) -> Self {
        TaggerError::Encode(err.to_string())
    }
}

pub type TaggerResult<T> = Result<T, TaggerError>;
