//! REST client for the StudioFlow render service.
//!
//! Wraps the render service's HTTP API (prompt translation, parameter
//! validation, rendering, version listing, control-image upload) using
//! [`reqwest`], and exposes the [`provider::RenderBackend`] trait so the
//! session coordinator can run against a mock in tests.

pub mod api;
pub mod config;
pub mod provider;
