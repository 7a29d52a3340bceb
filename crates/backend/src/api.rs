//! REST API client for the render service HTTP endpoints.
//!
//! Wraps the render service's HTTP API (prompt translation, parameter
//! validation, plain and ControlNet rendering, version listing,
//! control-image upload) using [`reqwest`]. Response bodies are decoded
//! from text explicitly so that an unexpected payload shape surfaces as
//! [`RenderApiError::Malformed`] rather than being lumped in with
//! transport failures.

use std::time::Duration;

use chrono::Utc;
use serde::Deserialize;
use studioflow_core::params::{ControlKind, RenderParameters};
use studioflow_core::types::Timestamp;

use crate::config::BackendConfig;

/// HTTP client for a single render service.
pub struct RenderServiceApi {
    client: reqwest::Client,
    base_url: String,
}

/// Response returned by the render endpoints after a completed render.
#[derive(Debug, Clone, Deserialize)]
pub struct RenderReceipt {
    /// Server-assigned identifier for the persisted version.
    pub version_id: String,
    /// Image reference, possibly relative to the service base URL.
    pub image_url: String,
    /// Seed the service actually rendered with.
    pub seed: i64,
}

/// Verdict returned by the validate endpoint.
///
/// `valid == false` always comes with a populated `error`; `valid == true`
/// comes with the enhanced prompt the service would render from.
#[derive(Debug, Clone, Deserialize)]
pub struct ValidationReport {
    pub valid: bool,
    #[serde(default, alias = "enhancedPrompt")]
    pub enhanced_prompt: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// One entry of the version listing.
///
/// The listing persists only seed and image, not the full parameter set;
/// callers reconstructing history from it must treat the snapshot as a
/// placeholder.
#[derive(Debug, Clone, Deserialize)]
pub struct VersionEntry {
    pub id: String,
    #[serde(default)]
    pub seed: Option<i64>,
    pub timestamp: String,
    /// Image reference, possibly relative to the service base URL.
    pub image_url: String,
}

impl VersionEntry {
    /// Parse the listing timestamp.
    ///
    /// The service emits naive ISO-8601 strings (no offset); RFC 3339 is
    /// accepted as well in case the service grows a timezone.
    pub fn parsed_timestamp(&self) -> Option<Timestamp> {
        if let Ok(ts) = chrono::DateTime::parse_from_rfc3339(&self.timestamp) {
            return Some(ts.with_timezone(&Utc));
        }
        chrono::NaiveDateTime::parse_from_str(&self.timestamp, "%Y-%m-%dT%H:%M:%S%.f")
            .ok()
            .map(|naive| naive.and_utc())
    }
}

/// Response returned by the control-image upload endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct UploadReceipt {
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub filename: Option<String>,
}

impl UploadReceipt {
    /// The reference to store, preferring the saved path over the
    /// original filename.
    pub fn reference(&self) -> Option<&str> {
        self.path.as_deref().or(self.filename.as_deref())
    }
}

/// Errors from the render service REST layer.
#[derive(Debug, thiserror::Error)]
pub enum RenderApiError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The render service returned a non-2xx status code.
    #[error("Render service error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The response decoded as JSON but did not have the expected shape.
    #[error("Malformed response: {0}")]
    Malformed(String),
}

impl RenderServiceApi {
    /// Create a new API client for a render service.
    ///
    /// * `base_url` - Base HTTP URL, e.g. `http://localhost:8000`.
    pub fn new(base_url: String) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Create an API client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, base_url: String) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Build a client from [`BackendConfig`], applying its request timeout.
    pub fn from_config(config: &BackendConfig) -> Result<Self, RenderApiError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;
        Ok(Self::with_client(client, config.base_url.clone()))
    }

    /// Base HTTP URL of the render service.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Resolve a possibly-relative image reference against the base URL.
    pub fn resolve_url(&self, reference: &str) -> String {
        resolve_url(&self.base_url, reference)
    }

    /// Translate a free-text prompt into its service-normalized form.
    ///
    /// Sends a `POST /translate` request. The service responds with a
    /// full structured-parameter JSON; only the translated prompt text
    /// (`translated_prompt`, falling back to `prompt`) is consumed here.
    pub async fn translate_prompt(&self, prompt: &str) -> Result<String, RenderApiError> {
        let body = serde_json::json!({ "prompt": prompt });

        let response = self
            .client
            .post(format!("{}/translate", self.base_url))
            .json(&body)
            .send()
            .await?;

        let value: serde_json::Value = Self::parse_json(response).await?;
        extract_translated_prompt(&value)
    }

    /// Ask the service to validate a full parameter set.
    ///
    /// Sends a `POST /validate` request with the camelCase parameter
    /// JSON. A rejection is a successful call with `valid == false`.
    pub async fn validate_params(
        &self,
        params: &RenderParameters,
    ) -> Result<ValidationReport, RenderApiError> {
        let response = self
            .client
            .post(format!("{}/validate", self.base_url))
            .json(params)
            .send()
            .await?;

        Self::parse_json(response).await
    }

    /// Render from a structured parameter set.
    ///
    /// Sends a `POST /render` request and returns the persisted version
    /// id and image reference.
    pub async fn render_image(
        &self,
        structured: &RenderParameters,
    ) -> Result<RenderReceipt, RenderApiError> {
        let response = self
            .client
            .post(format!("{}/render", self.base_url))
            .json(structured)
            .send()
            .await?;

        Self::parse_json(response).await
    }

    /// Render through the ControlNet pipeline.
    ///
    /// Sends a `POST /render_controlnet` request; same response shape as
    /// [`render_image`](Self::render_image). Used when the parameter
    /// set's control net kind is not `none`.
    pub async fn render_with_control(
        &self,
        structured: &RenderParameters,
    ) -> Result<RenderReceipt, RenderApiError> {
        let response = self
            .client
            .post(format!("{}/render_controlnet", self.base_url))
            .json(structured)
            .send()
            .await?;

        Self::parse_json(response).await
    }

    /// Retrieve the persisted version listing, newest first.
    ///
    /// Sends a `GET /versions` request.
    pub async fn list_versions(&self) -> Result<Vec<VersionEntry>, RenderApiError> {
        let response = self
            .client
            .get(format!("{}/versions", self.base_url))
            .send()
            .await?;

        Self::parse_json(response).await
    }

    /// Upload a control reference image.
    ///
    /// Sends a `POST /upload_controlnet` multipart request with the file
    /// bytes and the conditioning kind as the `image_type` form field.
    pub async fn upload_control_image(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
        kind: ControlKind,
    ) -> Result<UploadReceipt, RenderApiError> {
        let part = reqwest::multipart::Part::bytes(bytes).file_name(file_name.to_string());
        let form = reqwest::multipart::Form::new()
            .part("file", part)
            .text("image_type", kind.as_str());

        let response = self
            .client
            .post(format!("{}/upload_controlnet", self.base_url))
            .multipart(form)
            .send()
            .await?;

        Self::parse_json(response).await
    }

    // ---- private helpers ----

    /// Ensure the response has a success status code. Returns the
    /// response unchanged on success, or a [`RenderApiError::Api`]
    /// containing the status and body text on failure.
    async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, RenderApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(RenderApiError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    /// Decode a successful response body into the expected type, mapping
    /// decode failures to [`RenderApiError::Malformed`].
    async fn parse_json<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, RenderApiError> {
        let response = Self::ensure_success(response).await?;
        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|e| RenderApiError::Malformed(e.to_string()))
    }
}

/// Resolve an image reference against a base URL. Absolute references
/// pass through unchanged.
pub fn resolve_url(base_url: &str, reference: &str) -> String {
    if reference.starts_with("http://") || reference.starts_with("https://") {
        return reference.to_string();
    }
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        reference.trim_start_matches('/')
    )
}

/// Pull the translated prompt text out of a translate response.
///
/// Accepts `translated_prompt` or `prompt` as the carrying key.
fn extract_translated_prompt(value: &serde_json::Value) -> Result<String, RenderApiError> {
    value
        .get("translated_prompt")
        .or_else(|| value.get("prompt"))
        .and_then(|v| v.as_str())
        .map(|s| s.to_string())
        .ok_or_else(|| {
            RenderApiError::Malformed(
                "translate response carries neither 'translated_prompt' nor 'prompt'".to_string(),
            )
        })
}
