//! Version history of completed renders.
//!
//! A [`Version`] pairs a thumbnail URL with the parameter snapshot that
//! produced it. The [`VersionLedger`] keeps versions newest-first and
//! never deletes or mutates an entry; the only wholesale change is
//! [`VersionLedger::replace`], used when seeding from the render
//! service's listing at startup.

use crate::params::RenderParameters;
use crate::types::Timestamp;

/// How a version's parameter snapshot came to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotOrigin {
    /// Captured from the live parameter model when the render was
    /// invoked. Restoring it reproduces the exact inputs.
    Captured,
    /// Reconstructed from the render service's listing, which persists
    /// only a partial parameter set (seed and image). Restoring it gives
    /// defaults plus the persisted seed, not the true inputs.
    Placeholder,
}

/// Immutable record of one completed render.
#[derive(Debug, Clone, PartialEq)]
pub struct Version {
    /// Unique identifier assigned by the render service.
    pub id: String,
    pub timestamp: Timestamp,
    /// Absolute URL of the rendered image.
    pub thumbnail: String,
    /// Parameter snapshot associated with the render.
    pub params: RenderParameters,
    pub origin: SnapshotOrigin,
}

/// Ordered collection of versions, newest first.
#[derive(Debug, Default, Clone)]
pub struct VersionLedger {
    entries: Vec<Version>,
}

impl VersionLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a version at the head (index 0 = most recent).
    pub fn append(&mut self, version: Version) {
        self.entries.insert(0, version);
    }

    /// All versions, newest first. Re-listable at any time.
    pub fn list(&self) -> &[Version] {
        &self.entries
    }

    /// Look up a version by id.
    pub fn select(&self, id: &str) -> Option<&Version> {
        self.entries.iter().find(|v| v.id == id)
    }

    /// Replace the whole ledger with entries from the render service's
    /// listing. Only used at seed time; entries are stored in the order
    /// given, which is expected to be newest-first already.
    pub fn replace(&mut self, entries: Vec<Version>) {
        self.entries = entries;
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
