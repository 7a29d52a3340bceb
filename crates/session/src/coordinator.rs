//! Action coordinator: the one owner of session-state transitions.
//!
//! User intent arrives as an [`Action`]; [`Coordinator::dispatch`]
//! matches it to a handler, drives the render service calls, and
//! reconciles results back into the [`SessionState`]. Every failure is
//! caught here and returned as an [`Outcome::Failed`] value with a
//! user-readable message; nothing propagates as a panic or an `Err`,
//! and a failed action leaves the session in its prior stable state.

use std::sync::Arc;

use chrono::Utc;
use studioflow_backend::api::RenderApiError;
use studioflow_backend::provider::RenderBackend;
use studioflow_core::params::{ControlKind, ParamUpdate, RenderParameters};
use studioflow_core::version::{SnapshotOrigin, Version};

use crate::state::SessionState;

/// A user-initiated command against the session.
#[derive(Debug)]
pub enum Action {
    /// Replace one parameter field.
    Update(ParamUpdate),
    /// Replace the whole parameter model (bulk JSON edit).
    ReplaceParams(RenderParameters),
    /// Translate the current prompt through the render service.
    Translate,
    /// Validate the current parameter set.
    Validate,
    /// Run the translate-then-render pipeline and record a version.
    Render,
    /// Upload a control reference image and merge the returned URL.
    UploadControlImage {
        file_name: String,
        bytes: Vec<u8>,
        kind: ControlKind,
    },
    /// Restore the parameter snapshot stored under a version id.
    SelectVersion(String),
}

/// A failure surfaced to the user. Every variant is recoverable by
/// retrying the action.
#[derive(Debug, thiserror::Error)]
pub enum ActionFailure {
    /// The render service was unreachable or answered with an error
    /// status.
    #[error("render service unreachable: {0}")]
    Transport(String),

    /// The render service explicitly rejected the parameters.
    #[error("parameters rejected: {0}")]
    ValidationRejected(String),

    /// The render service answered with an unexpected payload shape.
    #[error("malformed response from render service: {0}")]
    MalformedResponse(String),

    /// A version id not present in the ledger.
    #[error("unknown version id: {0}")]
    UnknownVersion(String),
}

impl From<RenderApiError> for ActionFailure {
    fn from(err: RenderApiError) -> Self {
        match err {
            RenderApiError::Request(e) => ActionFailure::Transport(e.to_string()),
            RenderApiError::Api { status, body } => {
                ActionFailure::Transport(format!("service returned {status}: {body}"))
            }
            RenderApiError::Malformed(msg) => ActionFailure::MalformedResponse(msg),
        }
    }
}

/// Result of dispatching one [`Action`].
#[derive(Debug)]
pub enum Outcome {
    /// The parameter model was replaced (field update or bulk edit).
    Updated,
    /// Translation succeeded; `prompt` is the new prompt text.
    Translated { prompt: String },
    /// Validation succeeded; the snapshot is now marked validated.
    Validated {
        enhanced_prompt: Option<String>,
        message: Option<String>,
    },
    /// A render completed and its version sits at the ledger head.
    Rendered {
        version_id: String,
        image_url: String,
    },
    /// A render was already in flight; no service call was made.
    RenderAlreadyInFlight,
    /// A control image was uploaded and merged into the parameters.
    Uploaded { reference: String },
    /// A stored snapshot was restored as the active parameter model.
    /// `placeholder` is true when the snapshot was reconstructed from
    /// the service listing rather than captured at render time.
    VersionRestored { id: String, placeholder: bool },
    /// The action failed; the session state is unchanged except for
    /// cleared in-flight/validated flags.
    Failed(ActionFailure),
}

/// Orchestrates the asynchronous render service operations and owns all
/// transitions of the [`SessionState`].
pub struct Coordinator {
    state: SessionState,
    backend: Arc<dyn RenderBackend>,
}

impl Coordinator {
    pub fn new(backend: Arc<dyn RenderBackend>) -> Self {
        Self {
            state: SessionState::new(),
            backend,
        }
    }

    /// Read-only view of the session state.
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Dispatch one user action.
    pub async fn dispatch(&mut self, action: Action) -> Outcome {
        match action {
            Action::Update(update) => {
                self.state.apply_update(update);
                Outcome::Updated
            }
            Action::ReplaceParams(params) => {
                self.state.replace_params(params);
                Outcome::Updated
            }
            Action::Translate => self.translate().await,
            Action::Validate => self.validate().await,
            Action::Render => self.render().await,
            Action::UploadControlImage {
                file_name,
                bytes,
                kind,
            } => self.upload_control_image(file_name, bytes, kind).await,
            Action::SelectVersion(id) => self.select_version(&id),
        }
    }

    /// Replace the ledger with placeholder entries from the render
    /// service's version listing. Entries whose timestamps cannot be
    /// parsed are skipped with a warning rather than given made-up
    /// times. Returns the number of versions loaded.
    pub async fn seed_versions(&mut self) -> Result<usize, ActionFailure> {
        let entries = self.backend.list_versions().await?;

        let mut versions = Vec::with_capacity(entries.len());
        for entry in entries {
            let Some(timestamp) = entry.parsed_timestamp() else {
                tracing::warn!(
                    id = %entry.id,
                    timestamp = %entry.timestamp,
                    "Skipping listed version with unparseable timestamp",
                );
                continue;
            };
            let mut params = RenderParameters::default();
            if let Some(seed) = entry.seed {
                params = params.apply(ParamUpdate::Seed(seed));
            }
            versions.push(Version {
                thumbnail: self.backend.resolve_url(&entry.image_url),
                id: entry.id,
                timestamp,
                params,
                origin: SnapshotOrigin::Placeholder,
            });
        }

        let count = versions.len();
        self.state.ledger_mut().replace(versions);
        tracing::info!(count, "Seeded version history from render service");
        Ok(count)
    }

    // ---- action handlers ----

    async fn translate(&mut self) -> Outcome {
        self.state.set_translating(true);
        let result = self.backend.translate_prompt(&self.state.params().prompt).await;
        self.state.set_translating(false);

        match result {
            Ok(prompt) => {
                // A prompt replacement is an edit like any other and
                // clears the validated flag.
                self.state.apply_update(ParamUpdate::Prompt(prompt.clone()));
                tracing::info!(chars = prompt.len(), "Prompt translated");
                Outcome::Translated { prompt }
            }
            Err(e) => {
                tracing::warn!(error = %e, "Prompt translation failed");
                Outcome::Failed(e.into())
            }
        }
    }

    async fn validate(&mut self) -> Outcome {
        self.state.set_validating(true);
        let result = self.backend.validate_params(self.state.params()).await;
        self.state.set_validating(false);

        match result {
            Ok(report) if report.valid => {
                self.state.set_validated(true);
                tracing::info!("Parameters validated");
                Outcome::Validated {
                    enhanced_prompt: report.enhanced_prompt,
                    message: report.message,
                }
            }
            Ok(report) => {
                self.state.set_validated(false);
                let reason = report
                    .error
                    .or(report.message)
                    .unwrap_or_else(|| "parameters rejected".to_string());
                tracing::warn!(reason = %reason, "Validation rejected");
                Outcome::Failed(ActionFailure::ValidationRejected(reason))
            }
            Err(e) => {
                self.state.set_validated(false);
                tracing::warn!(error = %e, "Validation call failed");
                Outcome::Failed(e.into())
            }
        }
    }

    async fn render(&mut self) -> Outcome {
        if self.state.rendering() {
            tracing::warn!("Render already in flight; ignoring");
            return Outcome::RenderAlreadyInFlight;
        }

        // Snapshot at invocation time: a mid-flight edit must not change
        // what the recorded version claims it was rendered from.
        let snapshot = self.state.params().clone();
        self.state.set_rendering(true);
        let result = self.render_pipeline(&snapshot).await;
        self.state.set_rendering(false);

        match result {
            Ok((version_id, image_url)) => Outcome::Rendered {
                version_id,
                image_url,
            },
            Err(e) => {
                tracing::warn!(error = %e, "Render failed; no version recorded");
                Outcome::Failed(e)
            }
        }
    }

    /// Translate-then-render. On success the new version is appended at
    /// the ledger head; on failure at either step nothing is recorded.
    async fn render_pipeline(
        &mut self,
        snapshot: &RenderParameters,
    ) -> Result<(String, String), ActionFailure> {
        let translated = self.backend.translate_prompt(&snapshot.prompt).await?;
        let structured = snapshot.apply(ParamUpdate::Prompt(translated));

        let receipt = if snapshot.control_net.kind == ControlKind::None {
            self.backend.render_image(&structured).await?
        } else {
            self.backend.render_with_control(&structured).await?
        };

        let thumbnail = self.backend.resolve_url(&receipt.image_url);
        let id = if receipt.version_id.is_empty() {
            uuid::Uuid::new_v4().to_string()
        } else {
            receipt.version_id
        };

        self.state.ledger_mut().append(Version {
            id: id.clone(),
            timestamp: Utc::now(),
            thumbnail: thumbnail.clone(),
            params: snapshot.clone(),
            origin: SnapshotOrigin::Captured,
        });
        tracing::info!(version_id = %id, seed = receipt.seed, "Render complete");
        Ok((id, thumbnail))
    }

    async fn upload_control_image(
        &mut self,
        file_name: String,
        bytes: Vec<u8>,
        kind: ControlKind,
    ) -> Outcome {
        if kind == ControlKind::None {
            return Outcome::Failed(ActionFailure::ValidationRejected(
                "control image kind must be sketch, depth, or canny".to_string(),
            ));
        }

        self.state.set_uploading(true);
        let result = self
            .backend
            .upload_control_image(&file_name, bytes, kind)
            .await;
        self.state.set_uploading(false);

        match result {
            Ok(receipt) => match receipt.reference() {
                Some(reference) => {
                    let absolute = self.backend.resolve_url(reference);
                    self.state
                        .apply_update(ParamUpdate::ControlImage(Some(absolute.clone())));
                    tracing::info!(reference = %absolute, "Control image uploaded");
                    Outcome::Uploaded {
                        reference: absolute,
                    }
                }
                None => Outcome::Failed(ActionFailure::MalformedResponse(
                    "upload response carries neither 'path' nor 'filename'".to_string(),
                )),
            },
            Err(e) => {
                tracing::warn!(error = %e, "Control image upload failed");
                Outcome::Failed(e.into())
            }
        }
    }

    fn select_version(&mut self, id: &str) -> Outcome {
        let found = self
            .state
            .ledger()
            .select(id)
            .map(|v| (v.params.clone(), v.origin));

        match found {
            Some((params, origin)) => {
                self.state.replace_params(params);
                Outcome::VersionRestored {
                    id: id.to_string(),
                    placeholder: origin == SnapshotOrigin::Placeholder,
                }
            }
            None => Outcome::Failed(ActionFailure::UnknownVersion(id.to_string())),
        }
    }

    #[cfg(test)]
    pub(crate) fn state_mut(&mut self) -> &mut SessionState {
        &mut self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use studioflow_backend::api::{
        resolve_url, RenderReceipt, UploadReceipt, ValidationReport, VersionEntry,
    };

    const MOCK_BASE: &str = "http://mock:8000";

    /// In-memory stand-in for the render service. Call counters let the
    /// guard tests assert that no request was made.
    #[derive(Default)]
    struct MockBackend {
        fail_translate: bool,
        fail_render: bool,
        reject_validation: bool,
        versions: Vec<VersionEntry>,
        translate_calls: AtomicUsize,
        render_calls: AtomicUsize,
        control_calls: AtomicUsize,
        upload_calls: AtomicUsize,
        last_render_prompt: Mutex<Option<String>>,
    }

    fn service_error() -> RenderApiError {
        RenderApiError::Api {
            status: 500,
            body: "boom".to_string(),
        }
    }

    #[async_trait]
    impl RenderBackend for MockBackend {
        async fn translate_prompt(&self, prompt: &str) -> Result<String, RenderApiError> {
            self.translate_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_translate {
                return Err(service_error());
            }
            Ok(format!("{prompt}, professional photography"))
        }

        async fn validate_params(
            &self,
            params: &RenderParameters,
        ) -> Result<ValidationReport, RenderApiError> {
            if self.reject_validation {
                return Ok(ValidationReport {
                    valid: false,
                    enhanced_prompt: None,
                    message: None,
                    error: Some("focalLength must be between 12 and 200".to_string()),
                });
            }
            Ok(ValidationReport {
                valid: true,
                enhanced_prompt: Some(format!("{}, shot with standard lens", params.prompt)),
                message: Some("Parameters are valid and ready for rendering".to_string()),
                error: None,
            })
        }

        async fn render_image(
            &self,
            structured: &RenderParameters,
        ) -> Result<RenderReceipt, RenderApiError> {
            let n = self.render_calls.fetch_add(1, Ordering::SeqCst) + 1;
            if self.fail_render {
                return Err(service_error());
            }
            *self.last_render_prompt.lock().unwrap() = Some(structured.prompt.clone());
            Ok(RenderReceipt {
                version_id: format!("r-{n}"),
                image_url: format!("/samples/output/render_{n}.jpg"),
                seed: structured.seed,
            })
        }

        async fn render_with_control(
            &self,
            structured: &RenderParameters,
        ) -> Result<RenderReceipt, RenderApiError> {
            let n = self.control_calls.fetch_add(1, Ordering::SeqCst) + 1;
            if self.fail_render {
                return Err(service_error());
            }
            Ok(RenderReceipt {
                version_id: format!("cn-{n}"),
                image_url: format!("/samples/output/render_cn_{n}.jpg"),
                seed: structured.seed,
            })
        }

        async fn list_versions(&self) -> Result<Vec<VersionEntry>, RenderApiError> {
            Ok(self.versions.clone())
        }

        async fn upload_control_image(
            &self,
            file_name: &str,
            _bytes: Vec<u8>,
            _kind: ControlKind,
        ) -> Result<UploadReceipt, RenderApiError> {
            self.upload_calls.fetch_add(1, Ordering::SeqCst);
            Ok(UploadReceipt {
                path: Some("uploads/saved.png".to_string()),
                filename: Some(file_name.to_string()),
            })
        }

        fn resolve_url(&self, reference: &str) -> String {
            resolve_url(MOCK_BASE, reference)
        }
    }

    fn entry(id: &str, seed: i64, timestamp: &str) -> VersionEntry {
        VersionEntry {
            id: id.to_string(),
            seed: Some(seed),
            timestamp: timestamp.to_string(),
            image_url: format!("/samples/output/{id}.jpg"),
        }
    }

    fn coordinator_with(mock: MockBackend) -> (Arc<MockBackend>, Coordinator) {
        let backend = Arc::new(mock);
        let coordinator = Coordinator::new(backend.clone());
        (backend, coordinator)
    }

    #[tokio::test]
    async fn field_update_clears_validated_even_for_same_value() {
        let (_backend, mut coordinator) = coordinator_with(MockBackend::default());

        coordinator.dispatch(Action::Validate).await;
        assert!(coordinator.state().validated());

        let seed = coordinator.state().params().seed;
        coordinator
            .dispatch(Action::Update(ParamUpdate::Seed(seed)))
            .await;
        assert!(!coordinator.state().validated());
    }

    #[tokio::test]
    async fn translate_replaces_prompt_only_and_clears_validated() {
        let (_backend, mut coordinator) = coordinator_with(MockBackend::default());
        let before = coordinator.state().params().clone();

        coordinator.dispatch(Action::Validate).await;
        let outcome = coordinator.dispatch(Action::Translate).await;

        assert_matches!(outcome, Outcome::Translated { .. });
        let after = coordinator.state().params();
        assert_eq!(
            after.prompt,
            format!("{}, professional photography", before.prompt)
        );
        assert_eq!(after.focal_length, before.focal_length);
        assert_eq!(after.seed, before.seed);
        assert!(!coordinator.state().validated());
    }

    #[tokio::test]
    async fn translate_failure_leaves_parameters_untouched() {
        let (_backend, mut coordinator) = coordinator_with(MockBackend {
            fail_translate: true,
            ..Default::default()
        });
        let before = coordinator.state().params().clone();

        let outcome = coordinator.dispatch(Action::Translate).await;

        assert_matches!(outcome, Outcome::Failed(ActionFailure::Transport(_)));
        assert_eq!(coordinator.state().params(), &before);
        assert!(!coordinator.state().translating());
    }

    #[tokio::test]
    async fn validation_rejection_surfaces_reason() {
        let (_backend, mut coordinator) = coordinator_with(MockBackend {
            reject_validation: true,
            ..Default::default()
        });

        let outcome = coordinator.dispatch(Action::Validate).await;

        assert_matches!(
            outcome,
            Outcome::Failed(ActionFailure::ValidationRejected(reason))
                if reason.contains("focalLength")
        );
        assert!(!coordinator.state().validated());
        assert!(!coordinator.state().validating());
    }

    #[tokio::test]
    async fn render_appends_invocation_time_snapshot_at_head() {
        let mock = MockBackend {
            versions: vec![
                entry("s3", 3, "2020-01-01T10:00:02"),
                entry("s2", 2, "2020-01-01T10:00:01"),
                entry("s1", 1, "2020-01-01T10:00:00"),
            ],
            ..Default::default()
        };
        let (backend, mut coordinator) = coordinator_with(mock);
        coordinator.seed_versions().await.unwrap();
        assert_eq!(coordinator.state().ledger().len(), 3);

        let snapshot = coordinator.state().params().clone();
        let outcome = coordinator.dispatch(Action::Render).await;

        assert_matches!(outcome, Outcome::Rendered { ref version_id, .. } if version_id == "r-1");
        let ledger = coordinator.state().ledger();
        assert_eq!(ledger.len(), 4);

        let head = &ledger.list()[0];
        // The recorded snapshot is the invocation-time model: the
        // translated prompt went to the service, not into the version.
        assert_eq!(head.params, snapshot);
        assert_eq!(head.origin, SnapshotOrigin::Captured);
        assert_eq!(
            head.thumbnail,
            format!("{MOCK_BASE}/samples/output/render_1.jpg")
        );
        assert!(ledger.list()[1..].iter().all(|v| head.timestamp >= v.timestamp));

        let sent = backend.last_render_prompt.lock().unwrap().clone().unwrap();
        assert_eq!(sent, format!("{}, professional photography", snapshot.prompt));
    }

    #[tokio::test]
    async fn render_while_rendering_makes_no_service_calls() {
        let (backend, mut coordinator) = coordinator_with(MockBackend::default());
        coordinator.state_mut().set_rendering(true);

        let outcome = coordinator.dispatch(Action::Render).await;

        assert_matches!(outcome, Outcome::RenderAlreadyInFlight);
        assert_eq!(backend.translate_calls.load(Ordering::SeqCst), 0);
        assert_eq!(backend.render_calls.load(Ordering::SeqCst), 0);
        assert!(coordinator.state().ledger().is_empty());
    }

    #[tokio::test]
    async fn render_failure_at_translate_records_nothing() {
        let (backend, mut coordinator) = coordinator_with(MockBackend {
            fail_translate: true,
            ..Default::default()
        });

        let outcome = coordinator.dispatch(Action::Render).await;

        assert_matches!(outcome, Outcome::Failed(ActionFailure::Transport(_)));
        assert!(coordinator.state().ledger().is_empty());
        assert!(!coordinator.state().rendering());
        assert_eq!(backend.render_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn render_failure_at_render_step_records_nothing() {
        let (backend, mut coordinator) = coordinator_with(MockBackend {
            fail_render: true,
            ..Default::default()
        });

        let outcome = coordinator.dispatch(Action::Render).await;

        assert_matches!(outcome, Outcome::Failed(ActionFailure::Transport(_)));
        assert!(coordinator.state().ledger().is_empty());
        assert!(!coordinator.state().rendering());
        assert_eq!(backend.translate_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn render_routes_through_controlnet_when_configured() {
        let (backend, mut coordinator) = coordinator_with(MockBackend::default());
        coordinator
            .dispatch(Action::Update(ParamUpdate::ControlNet(
                studioflow_core::params::ControlNet {
                    kind: ControlKind::Depth,
                    strength: 0.6,
                    image: Some("http://mock:8000/uploads/depth.png".to_string()),
                },
            )))
            .await;

        let outcome = coordinator.dispatch(Action::Render).await;

        assert_matches!(outcome, Outcome::Rendered { ref version_id, .. } if version_id == "cn-1");
        assert_eq!(backend.control_calls.load(Ordering::SeqCst), 1);
        assert_eq!(backend.render_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn select_version_restores_stored_snapshot() {
        let (_backend, mut coordinator) = coordinator_with(MockBackend::default());
        let snapshot = coordinator.state().params().clone();
        coordinator.dispatch(Action::Render).await;

        // Drift the live model, then restore.
        coordinator
            .dispatch(Action::Update(ParamUpdate::Seed(1)))
            .await;
        coordinator
            .dispatch(Action::Update(ParamUpdate::Lighting(5.0)))
            .await;

        let outcome = coordinator
            .dispatch(Action::SelectVersion("r-1".to_string()))
            .await;

        assert_matches!(
            outcome,
            Outcome::VersionRestored { placeholder: false, .. }
        );
        assert_eq!(coordinator.state().params(), &snapshot);
        assert!(!coordinator.state().validated());
    }

    #[tokio::test]
    async fn select_unknown_version_is_a_surfaced_failure() {
        let (_backend, mut coordinator) = coordinator_with(MockBackend::default());
        let before = coordinator.state().params().clone();

        let outcome = coordinator
            .dispatch(Action::SelectVersion("v99".to_string()))
            .await;

        assert_matches!(outcome, Outcome::Failed(ActionFailure::UnknownVersion(id)) if id == "v99");
        assert_eq!(coordinator.state().params(), &before);
    }

    #[tokio::test]
    async fn seeded_versions_are_placeholders_with_listing_seed() {
        let mock = MockBackend {
            versions: vec![entry("s1", 777, "2020-01-01T10:00:00")],
            ..Default::default()
        };
        let (_backend, mut coordinator) = coordinator_with(mock);

        let count = coordinator.seed_versions().await.unwrap();
        assert_eq!(count, 1);

        let outcome = coordinator
            .dispatch(Action::SelectVersion("s1".to_string()))
            .await;
        assert_matches!(outcome, Outcome::VersionRestored { placeholder: true, .. });
        assert_eq!(coordinator.state().params().seed, 777);
    }

    #[tokio::test]
    async fn seeding_skips_entries_with_unparseable_timestamps() {
        let mock = MockBackend {
            versions: vec![
                entry("good", 1, "2020-01-01T10:00:00"),
                entry("bad", 2, "yesterday"),
            ],
            ..Default::default()
        };
        let (_backend, mut coordinator) = coordinator_with(mock);

        let count = coordinator.seed_versions().await.unwrap();
        assert_eq!(count, 1);
        assert!(coordinator.state().ledger().select("bad").is_none());
    }

    #[tokio::test]
    async fn upload_merges_resolved_reference_and_clears_validated() {
        let (_backend, mut coordinator) = coordinator_with(MockBackend::default());
        coordinator.dispatch(Action::Validate).await;

        let outcome = coordinator
            .dispatch(Action::UploadControlImage {
                file_name: "sketch.png".to_string(),
                bytes: vec![0x89, 0x50, 0x4e, 0x47],
                kind: ControlKind::Sketch,
            })
            .await;

        assert_matches!(
            outcome,
            Outcome::Uploaded { ref reference }
                if reference == "http://mock:8000/uploads/saved.png"
        );
        assert_eq!(
            coordinator.state().params().control_net.image.as_deref(),
            Some("http://mock:8000/uploads/saved.png")
        );
        assert!(!coordinator.state().validated());
        assert!(!coordinator.state().uploading());
    }

    #[tokio::test]
    async fn upload_with_kind_none_is_rejected_without_a_call() {
        let (backend, mut coordinator) = coordinator_with(MockBackend::default());

        let outcome = coordinator
            .dispatch(Action::UploadControlImage {
                file_name: "x.png".to_string(),
                bytes: vec![],
                kind: ControlKind::None,
            })
            .await;

        assert_matches!(outcome, Outcome::Failed(ActionFailure::ValidationRejected(_)));
        assert_eq!(backend.upload_calls.load(Ordering::SeqCst), 0);
        assert!(coordinator.state().params().control_net.image.is_none());
    }

    #[tokio::test]
    async fn bulk_replace_is_atomic_and_clears_validated() {
        let (_backend, mut coordinator) = coordinator_with(MockBackend::default());
        coordinator.dispatch(Action::Validate).await;

        let replacement = RenderParameters {
            prompt: "night market in the rain".to_string(),
            ..RenderParameters::default()
        };
        coordinator
            .dispatch(Action::ReplaceParams(replacement.clone()))
            .await;

        assert_eq!(coordinator.state().params(), &replacement);
        assert!(!coordinator.state().validated());
    }
}
