//! The `Explanation` record - unit of output for every sequencer step
//!
//! One record describes one agent's contribution to a run. The sequencers
//! produce ordered lists of these; the presenter reveals and projects them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

use crate::agent::Agent;

/// Decision carried by an explanation record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    Allow,
    Review,
    Decline,
    ProposeAlt,
    Error,
    Pending,
}

impl Decision {
    /// Map an upstream decision string (any case) onto the enum.
    ///
    /// Unrecognized values become `Pending` rather than failing the
    /// section; absent upstream data is never fatal to a run.
    pub fn from_upstream(s: &str) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "allow" => Decision::Allow,
            "review" => Decision::Review,
            "decline" => Decision::Decline,
            "propose_alt" => Decision::ProposeAlt,
            "error" => Decision::Error,
            "pending" => Decision::Pending,
            _ => Decision::Pending,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Decision::Allow => "allow",
            Decision::Review => "review",
            Decision::Decline => "decline",
            Decision::ProposeAlt => "propose_alt",
            Decision::Error => "error",
            Decision::Pending => "pending",
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What an explanation's score measures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreType {
    Risk,
    Cost,
    Suitability,
    Security,
    Success,
    Error,
    Value,
    Affordability,
    Trust,
    Optimization,
    Efficiency,
    Completeness,
    Final,
}

/// One evidentiary attribute behind a decision
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeySignal {
    /// Dot-notation path of the attribute
    pub path: String,
    /// Observed value
    pub value: Value,
    /// Relative weight in the decision, when known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
}

impl KeySignal {
    pub fn new(path: impl Into<String>, value: impl Into<Value>, weight: f64) -> Self {
        Self {
            path: path.into(),
            value: value.into(),
            weight: Some(weight),
        }
    }
}

/// Structured record describing one agent's contribution to a run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Explanation {
    /// Correlates all records of one run
    pub trace_id: String,
    /// Unique per record within a run; encodes step order and agent
    pub step_id: String,
    /// Which pseudo-agent produced this record
    pub agent: Agent,
    /// Model provenance tag, opaque to logic
    pub model_version: String,
    /// Policy provenance tag, opaque to logic
    pub policy_version: String,
    /// 1-3 sentences of human-readable explanation; drives the typewriter UI
    pub summary: String,
    pub decision: Decision,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score_type: Option<ScoreType>,
    /// Confidence spread in [0, 1]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uncertainty: Option<f64>,
    /// Ordered evidentiary attributes
    pub key_signals: Vec<KeySignal>,
    /// Citation identifiers
    pub ap2_refs: Vec<String>,
    /// Field paths that must be masked before display
    pub redactions: Vec<String>,
    /// RFC 3339 timestamp; non-decreasing across a run
    pub timestamp: String,
    /// Agent-specific payload
    pub extra: BTreeMap<String, Value>,
}

impl Explanation {
    /// Parse the record's timestamp
    pub fn timestamp_parsed(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.timestamp)
            .ok()
            .map(|t| t.with_timezone(&Utc))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Explanation {
        Explanation {
            trace_id: "trace_1_abc".to_string(),
            step_id: "orca_checkout_001".to_string(),
            agent: Agent::Orca,
            model_version: "orca_checkout_ml_v4.1.8".to_string(),
            policy_version: "checkout_v5.2.1".to_string(),
            summary: "Checkout initiated.".to_string(),
            decision: Decision::Allow,
            score: Some(0.12),
            score_type: Some(ScoreType::Risk),
            uncertainty: Some(0.15),
            key_signals: vec![KeySignal::new("cart.total", json!(380), 0.08)],
            ap2_refs: vec!["checkout_policy_v5.2.1".to_string()],
            redactions: vec!["user.id".to_string()],
            timestamp: "2025-01-01T00:00:01+00:00".to_string(),
            extra: BTreeMap::new(),
        }
    }

    #[test]
    fn test_decision_from_upstream_is_case_insensitive() {
        assert_eq!(Decision::from_upstream("ALLOW"), Decision::Allow);
        assert_eq!(Decision::from_upstream("Decline"), Decision::Decline);
        assert_eq!(Decision::from_upstream("weird"), Decision::Pending);
    }

    #[test]
    fn test_explanation_json_shape() {
        let record = sample();
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["agent"], "orca");
        assert_eq!(json["decision"], "allow");
        assert_eq!(json["score_type"], "risk");
        assert_eq!(json["key_signals"][0]["path"], "cart.total");
    }

    #[test]
    fn test_timestamp_parses() {
        assert!(sample().timestamp_parsed().is_some());
    }

    #[test]
    fn test_absent_score_omitted() {
        let mut record = sample();
        record.score = None;
        record.score_type = None;
        let json = serde_json::to_value(&record).unwrap();
        assert!(json.get("score").is_none());
        assert!(json.get("score_type").is_none());
    }
}
