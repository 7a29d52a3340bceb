//! Domain types for the StudioFlow session core.
//!
//! Defines [`params::RenderParameters`] with field-level replacement
//! updates, the immutable [`version::Version`] record, and the
//! newest-first [`version::VersionLedger`].

pub mod params;
pub mod types;
pub mod version;
