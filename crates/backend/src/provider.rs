//! Provider trait over the render service operations.
//!
//! The session coordinator talks to the service exclusively through
//! [`RenderBackend`], so tests can substitute an in-memory mock for the
//! real [`RenderServiceApi`].

use async_trait::async_trait;
use studioflow_core::params::{ControlKind, RenderParameters};

use crate::api::{
    RenderApiError, RenderReceipt, RenderServiceApi, UploadReceipt, ValidationReport, VersionEntry,
};

/// The render service operations consumed by the session coordinator.
#[async_trait]
pub trait RenderBackend: Send + Sync {
    /// Translate a free-text prompt into its service-normalized form.
    async fn translate_prompt(&self, prompt: &str) -> Result<String, RenderApiError>;

    /// Validate a full parameter set; a rejection is an `Ok` report with
    /// `valid == false`.
    async fn validate_params(
        &self,
        params: &RenderParameters,
    ) -> Result<ValidationReport, RenderApiError>;

    /// Render from a structured parameter set.
    async fn render_image(
        &self,
        structured: &RenderParameters,
    ) -> Result<RenderReceipt, RenderApiError>;

    /// Render through the ControlNet pipeline.
    async fn render_with_control(
        &self,
        structured: &RenderParameters,
    ) -> Result<RenderReceipt, RenderApiError>;

    /// Retrieve the persisted version listing, newest first.
    async fn list_versions(&self) -> Result<Vec<VersionEntry>, RenderApiError>;

    /// Upload a control reference image.
    async fn upload_control_image(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
        kind: ControlKind,
    ) -> Result<UploadReceipt, RenderApiError>;

    /// Resolve a possibly-relative image reference to an absolute URL.
    fn resolve_url(&self, reference: &str) -> String {
        reference.to_string()
    }
}

#[async_trait]
impl RenderBackend for RenderServiceApi {
    async fn translate_prompt(&self, prompt: &str) -> Result<String, RenderApiError> {
        RenderServiceApi::translate_prompt(self, prompt).await
    }

    async fn validate_params(
        &self,
        params: &RenderParameters,
    ) -> Result<ValidationReport, RenderApiError> {
        RenderServiceApi::validate_params(self, params).await
    }

    async fn render_image(
        &self,
        structured: &RenderParameters,
    ) -> Result<RenderReceipt, RenderApiError> {
        RenderServiceApi::render_image(self, structured).await
    }

    async fn render_with_control(
        &self,
        structured: &RenderParameters,
    ) -> Result<RenderReceipt, RenderApiError> {
        RenderServiceApi::render_with_control(self, structured).await
    }

    async fn list_versions(&self) -> Result<Vec<VersionEntry>, RenderApiError> {
        RenderServiceApi::list_versions(self).await
    }

    async fn upload_control_image(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
        kind: ControlKind,
    ) -> Result<UploadReceipt, RenderApiError> {
        RenderServiceApi::upload_control_image(self, file_name, bytes, kind).await
    }

    fn resolve_url(&self, reference: &str) -> String {
        RenderServiceApi::resolve_url(self, reference)
    }
}
