//! Live sequencer with guaranteed fallback
//!
//! Issues exactly one POST to the aggregation endpoint (which fans out to
//! the real agent services) and maps the composite response through the
//! section table. Any transport failure, non-success status, or JSON parse
//! failure falls back to the mock sequencer's output for the same choice;
//! callers never observe an error. No retries, no caching.

use serde_json::Value;
use thiserror::Error;

use ocn_types::{Explanation, PaymentChoice};

use crate::mapping::{map_composite, MapContext};
use crate::mock::MockSequencer;

/// Default aggregation endpoint exposed by the local gateway
pub const DEFAULT_AGGREGATE_URL: &str = "http://localhost:8090/run/demo1";

/// Why an aggregation attempt was abandoned (internal; recovered by fallback)
#[derive(Debug, Error)]
pub enum SequencerError {
    #[error("aggregation transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("aggregation endpoint returned status {0}")]
    UpstreamStatus(u16),
}

/// Sequencer that attempts live upstream data
pub struct RealSequencer {
    client: reqwest::Client,
    aggregate_url: String,
}

impl RealSequencer {
    /// Sequencer against the given aggregation endpoint
    pub fn new(aggregate_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            aggregate_url: aggregate_url.into(),
        }
    }

    /// Produce the explanation list for one run.
    ///
    /// Infallible by contract: on any upstream failure this returns the
    /// mock catalog for the same choice instead of an error.
    pub async fn run(&self, choice: PaymentChoice) -> Vec<Explanation> {
        match self.fetch_composite().await {
            Ok(doc) => {
                let ctx = MapContext::new(choice);
                let mapped = map_composite(&doc, &ctx);
                tracing::info!(
                    trace_id = %ctx.trace_id,
                    sections = mapped.len(),
                    "mapped live aggregation response"
                );
                mapped
            }
            Err(err) => {
                tracing::warn!(error = %err, "aggregation call failed, using mock output");
                MockSequencer::new().run(choice)
            }
        }
    }

    async fn fetch_composite(&self) -> Result<Value, SequencerError> {
        let resp = self
            .client
            .post(&self.aggregate_url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(SequencerError::UpstreamStatus(status.as_u16()));
        }

        Ok(resp.json().await?)
    }
}
