//! Pacing between GitHub mutations.
//!
//! GitHub's secondary rate limits throttle bursts of content-creating calls.
//! A fixed one-second pause after each issue round-trip keeps a full catalog
//! run under them. The policy is a value injected into the synchronizer so
//! tests can disable it.

use std::time::Duration;

/// Delay policy applied after each mutation round-trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pacer {
    /// Sleep for the given duration.
    Fixed(Duration),
    /// No delay.
    Disabled,
}

impl Default for Pacer {
    fn default() -> Self {
        Pacer::Fixed(Duration::from_secs(1))
    }
}

impl Pacer {
    /// Wait out the configured delay, if any.
    pub async fn pause(&self) {
        if let Pacer::Fixed(delay) = self {
            tokio::time::sleep(*delay).await;
        }
    }
}
