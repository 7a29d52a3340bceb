//! Session core for the StudioFlow control surface.
//!
//! [`state::SessionState`] holds the one parameter model and version
//! ledger of a logical session; [`coordinator::Coordinator`] owns every
//! transition of that state and orchestrates the asynchronous render
//! service calls behind an explicit [`coordinator::Action`] dispatch.

pub mod coordinator;
pub mod state;
