//! Verbosity projection
//!
//! A pure, display-time projection of one already-revealed record. The
//! verbosity level decides how much evidence is rendered; redaction masking
//! applies at every level and is stronger than verbosity. Forensics mode may
//! additionally show *that* a field was redacted, never its value.

use serde::Serialize;
use serde_json::Value;

use ocn_types::{Agent, Explanation, KeySignal, Verbosity};

use crate::mask::{mask_json, MASK_PLACEHOLDER};

/// Evidentiary portion of a rendered record
#[derive(Debug, Clone, Serialize)]
pub struct RenderedDetail {
    /// Key signals with redacted values already masked
    pub key_signals: Vec<KeySignal>,
    pub ap2_refs: Vec<String>,
    /// The record's extra payload with redacted paths masked
    pub extra: Value,
    /// Present only in forensics mode: which field paths were redacted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redacted_fields: Option<Vec<String>>,
}

/// One chat message as projected for display
#[derive(Debug, Clone, Serialize)]
pub struct RenderedMessage {
    pub agent: Agent,
    pub summary: String,
    pub decision: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<RenderedDetail>,
}

/// Project one record for display at the given verbosity.
pub fn render(record: &Explanation, verbosity: Verbosity) -> RenderedMessage {
    let show_detail = match verbosity {
        Verbosity::Brief => false,
        Verbosity::Standard => !record.key_signals.is_empty(),
        Verbosity::Forensics => true,
    };

    let detail = show_detail.then(|| RenderedDetail {
        key_signals: record
            .key_signals
            .iter()
            .map(|signal| masked_signal(signal, &record.redactions))
            .collect(),
        ap2_refs: record.ap2_refs.clone(),
        extra: mask_json(
            &Value::Object(record.extra.clone().into_iter().collect()),
            &record.redactions,
        ),
        redacted_fields: (verbosity == Verbosity::Forensics).then(|| record.redactions.clone()),
    });

    RenderedMessage {
        agent: record.agent,
        summary: record.summary.clone(),
        decision: record.decision.to_string(),
        detail,
    }
}

fn masked_signal(signal: &KeySignal, redactions: &[String]) -> KeySignal {
    let mut out = signal.clone();
    if redactions.iter().any(|path| *path == signal.path) {
        out.value = Value::String(MASK_PLACEHOLDER.to_string());
    }
    out
}
