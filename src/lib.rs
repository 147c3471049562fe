//! projectini - GitHub issue and Projects V2 board automation.
//!
//! This library exposes the internal modules for integration testing
//! and potential use as a library.

pub mod catalog;
pub mod cleanup;
pub mod config;
pub mod error;
pub mod github;
pub mod greeter;
pub mod logging;
pub mod pacing;
pub mod sync;
