//! OCN Sequencer - produces the ordered explanation list for one demo run
//!
//! Two realizations of the same contract:
//!
//! - [`MockSequencer`]: deterministic, infallible, fixed 11-step catalog.
//! - [`RealSequencer`]: one aggregation call against live agent services,
//!   mapped through a declarative section table, with guaranteed fallback
//!   to the mock output on any network, status, or parse failure.
//!
//! Callers never observe a failed run; they get mock or real data.

use async_trait::async_trait;

use ocn_types::{Explanation, PaymentChoice};

pub mod mapping;
pub mod mock;
pub mod real;

pub use mapping::{map_composite, MapContext};
pub use mock::{MockSequencer, STEP_INTERVAL_SECS};
pub use real::{RealSequencer, SequencerError, DEFAULT_AGGREGATE_URL};

/// Common seam over the mock and real sequencers.
///
/// Implementations must be infallible: the real sequencer recovers from
/// upstream failure internally by delegating to the mock catalog.
#[async_trait]
pub trait Sequencer: Send + Sync {
    /// Produce the ordered explanation list for one run.
    async fn explanations(&self, choice: PaymentChoice) -> Vec<Explanation>;
}

#[async_trait]
impl Sequencer for MockSequencer {
    async fn explanations(&self, choice: PaymentChoice) -> Vec<Explanation> {
        self.run(choice)
    }
}

#[async_trait]
impl Sequencer for RealSequencer {
    async fn explanations(&self, choice: PaymentChoice) -> Vec<Explanation> {
        self.run(choice).await
    }
}
