//! Mutable session state: the parameter model, the version ledger, and
//! the coordinator's in-flight and validation flags.
//!
//! The `validated` flag is a claim about the exact parameter snapshot at
//! the moment validation succeeded. Every edit path clears it
//! unconditionally, including a same-value update; no value comparison
//! is performed.

use studioflow_core::params::{ParamUpdate, RenderParameters};
use studioflow_core::version::VersionLedger;

/// All mutable state of one logical session.
///
/// Presentation surfaces only read this; transitions go through the
/// coordinator.
#[derive(Debug, Default)]
pub struct SessionState {
    params: RenderParameters,
    ledger: VersionLedger,
    validated: bool,
    translating: bool,
    validating: bool,
    rendering: bool,
    uploading: bool,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// The active parameter model.
    pub fn params(&self) -> &RenderParameters {
        &self.params
    }

    /// The version history, newest first.
    pub fn ledger(&self) -> &VersionLedger {
        &self.ledger
    }

    /// Whether the current parameter snapshot passed validation and has
    /// not been edited since.
    pub fn validated(&self) -> bool {
        self.validated
    }

    pub fn translating(&self) -> bool {
        self.translating
    }

    pub fn validating(&self) -> bool {
        self.validating
    }

    pub fn rendering(&self) -> bool {
        self.rendering
    }

    pub fn uploading(&self) -> bool {
        self.uploading
    }

    /// Replace one field of the parameter model. Clears `validated`.
    pub(crate) fn apply_update(&mut self, update: ParamUpdate) {
        self.params = self.params.apply(update);
        self.validated = false;
    }

    /// Replace the whole parameter model in a single atomic swap (version
    /// restore, bulk JSON edit). Clears `validated`.
    pub(crate) fn replace_params(&mut self, params: RenderParameters) {
        self.params = params;
        self.validated = false;
    }

    pub(crate) fn ledger_mut(&mut self) -> &mut VersionLedger {
        &mut self.ledger
    }

    pub(crate) fn set_validated(&mut self, validated: bool) {
        self.validated = validated;
    }

    pub(crate) fn set_translating(&mut self, in_flight: bool) {
        self.translating = in_flight;
    }

    pub(crate) fn set_validating(&mut self, in_flight: bool) {
        self.validating = in_flight;
    }

    pub(crate) fn set_rendering(&mut self, in_flight: bool) {
        self.rendering = in_flight;
    }

    pub(crate) fn set_uploading(&mut self, in_flight: bool) {
        self.uploading = in_flight;
    }
}
