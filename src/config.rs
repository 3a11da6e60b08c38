//! Configuration for an upload session.
//!
//! All client behaviour is controlled through [`ClientConfig`], built via
//! its [`ClientConfigBuilder`]. Keeping every knob in one struct makes it
//! trivial to share a config across sessions, serialise it for logging, and
//! diff two runs to understand why their outcomes differ.

use crate::error::ConvertError;
use serde::{Deserialize, Serialize};

/// Configuration for a conversion upload session.
///
/// Built via [`ClientConfig::builder()`] or [`ClientConfig::default()`].
///
/// # Example
/// ```rust
/// use doc2pdf_client::ClientConfig;
///
/// let config = ClientConfig::builder()
///     .endpoint("http://localhost:5000/convert")
///     .request_timeout_secs(60)
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Conversion endpoint URL. Default: `http://localhost:5000/convert`
    /// (the doc2pdf service's default bind).
    pub endpoint: String,

    /// Extension appended to the original filename's stem when the server
    /// sends no `Content-Disposition` header. Default: `"pdf"`.
    ///
    /// The service converts to PDF only, so the fallback is fixed rather
    /// than negotiated; a future multi-format service would carry the
    /// extension in the response header instead.
    pub target_extension: String,

    /// Multipart form field the server reads the upload from. Default:
    /// `"file"`. Part of the wire contract — change only if the service
    /// changes.
    pub field_name: String,

    /// Whole-request timeout in seconds (connect + upload + response body).
    /// Default: 120. A conversion holds the request open while the server
    /// runs the converter, so this needs headroom beyond a plain download.
    pub request_timeout_secs: u64,

    /// `User-Agent` header sent with the request.
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:5000/convert".to_string(),
            target_extension: "pdf".to_string(),
            field_name: "file".to_string(),
            request_timeout_secs: 120,
            user_agent: concat!("doc2pdf-client/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl ClientConfig {
    /// Create a new builder for `ClientConfig`.
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`ClientConfig`].
#[derive(Debug)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    pub fn endpoint(mut self, url: impl Into<String>) -> Self {
        self.config.endpoint = url.into();
        self
    }

    pub fn target_extension(mut self, ext: impl Into<String>) -> Self {
        self.config.target_extension = ext.into();
        self
    }

    pub fn field_name(mut self, name: impl Into<String>) -> Self {
        self.config.field_name = name.into();
        self
    }

    pub fn request_timeout_secs(mut self, secs: u64) -> Self {
        self.config.request_timeout_secs = secs.max(1);
        self
    }

    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.config.user_agent = ua.into();
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ClientConfig, ConvertError> {
        let c = &self.config;
        if !c.endpoint.starts_with("http://") && !c.endpoint.starts_with("https://") {
            return Err(ConvertError::InvalidConfig(format!(
                "endpoint must be an HTTP/HTTPS URL, got '{}'",
                c.endpoint
            )));
        }
        let ext = c.target_extension.trim_start_matches('.');
        if ext.is_empty() {
            return Err(ConvertError::InvalidConfig(
                "target_extension must not be empty".into(),
            ));
        }
        if c.field_name.is_empty() {
            return Err(ConvertError::InvalidConfig(
                "field_name must not be empty".into(),
            ));
        }
        Ok(self.config)
    }
}
