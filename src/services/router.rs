use reqwest::Method;

use crate::models::ContentId;

/// The three Imagga endpoints this crate talks to.
#[derive(Debug, Clone, Copy)]
pub enum Endpoint<'a> {
    Uploads,
    Tags(&'a ContentId),
    Colors(&'a ContentId),
}

impl<'a> Endpoint<'a> {
    pub fn method(&self) -> Method {
        match self {
            Endpoint::Uploads => Method::POST,
            Endpoint::Tags(_) | Endpoint::Colors(_) => Method::GET,
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::Uploads => "/uploads",
            Endpoint::Tags(_) => "/tags",
            Endpoint::Colors(_) => "/colors",
        }
    }

    pub fn query(&self) -> Vec<(&'static str, &'a str)> {
        match self {
            Endpoint::Uploads => vec![],
            Endpoint::Tags(id) | Endpoint::Colors(id) => vec![("image_upload_id", id.as_str())],
        }
    }

    pub fn url(&self, host: &str) -> String {
        format!("{}{}", host.trim_end_matches('/'), self.path())
    }
}
