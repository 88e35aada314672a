use std::env;
use std::time::Duration;

use crate::errors::{TaggerError, TaggerResult};

pub const IMAGGA_HOST: &str = "https://api.imagga.com/v2";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

pub trait ServiceConfig {
    /// Load configuration from environment variables
    fn from_env() -> TaggerResult<Self>
    where
        Self: Sized;

    /// Helper function to get environment variables with error handling
    fn get_env(key: &str, required: bool, default: Option<String>) -> TaggerResult<Option<String>> {
        match env::var(key) {
            Ok(value) => Ok(Some(value)),
            Err(env::VarError::NotPresent) if !required => Ok(default),
            Err(env::VarError::NotPresent) => Err(TaggerError::Config(format!(
                "Environment variable '{}' is required but not set.",
                key
            ))),
            Err(e) => Err(TaggerError::Config(format!("{}: {}", key, e))),
        }
    }
}

/// How requests authenticate against the API.
#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    /// A complete `Authorization` header value, e.g. `Basic YWNjXzEyMzp4eXo=`
    Header(String),
    /// API key and secret sent as HTTP basic auth
    Basic { api_key: String, api_secret: String },
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Credentials::Header(_) => f.write_str("Header(***)"),
            Credentials::Basic { api_key, .. } => f
                .debug_struct("Basic")
                .field("api_key", api_key)
                .field("api_secret", &"***")
                .finish(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ImaggaConfig {
    pub host: String,
    pub credentials: Credentials,
    pub timeout: Duration,
}

impl ImaggaConfig {
    pub fn new(host: String, credentials: Credentials) -> Self {
        Self {
            host,
            credentials,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl ServiceConfig for ImaggaConfig {
    fn from_env() -> TaggerResult<Self> {
        let host = Self::get_env("IMAGGA_HOST", false, Some(IMAGGA_HOST.to_string()))?
            .unwrap_or_else(|| IMAGGA_HOST.to_string());

        let header = Self::get_env("IMAGGA_AUTHORIZATION", false, None)?;
        let api_key = Self::get_env("IMAGGA_API_KEY", false, None)?;
        let api_secret = Self::get_env("IMAGGA_API_SECRET", false, None)?;

        let credentials = match (header, api_key, api_secret) {
            (Some(header), _, _) => Credentials::Header(header),
            (None, Some(api_key), Some(api_secret)) => Credentials::Basic {
                api_key,
                api_secret,
            },
            _ => {
                return Err(TaggerError::Config(
                    "Authentication not configured: set IMAGGA_AUTHORIZATION or both IMAGGA_API_KEY and IMAGGA_API_SECRET"
                        .to_string(),
                ))
            }
        };

        let timeout = match Self::get_env("IMAGGA_TIMEOUT_SECS", false, None)? {
            Some(secs) => secs.parse::<u64>().map_err(|_| {
                TaggerError::Config(format!("IMAGGA_TIMEOUT_SECS is not a number: {}", secs))
            })?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self::new(host, credentials).with_timeout(Duration::from_secs(timeout)))
    }
}
