//! Composite-document mapping for the real sequencer
//!
//! The aggregation endpoint fans out to the live agent services and returns
//! one composite JSON document with optional per-agent sections. Each known
//! section maps onto one [`Explanation`] through a declarative rule table;
//! absent or null sections are skipped without error, so the mapped list's
//! length is response-dependent.

use chrono::{DateTime, Utc};
use serde_json::{json, Value};
use std::collections::BTreeMap;

use ocn_types::{
    generate_trace_id, Agent, Cart, Decision, Explanation, KeySignal, PaymentChoice, ScoreType,
};

/// Run identity and inputs shared by every mapped record
pub struct MapContext {
    pub trace_id: String,
    pub base: DateTime<Utc>,
    pub choice: PaymentChoice,
    pub cart: Cart,
}

impl MapContext {
    /// Fresh run identity for one aggregation call
    pub fn new(choice: PaymentChoice) -> Self {
        Self::with_run(generate_trace_id(), Utc::now(), choice)
    }

    /// Fixed run identity, for deterministic tests
    pub fn with_run(trace_id: String, base: DateTime<Utc>, choice: PaymentChoice) -> Self {
        Self {
            trace_id,
            base,
            choice,
            cart: Cart::oxford(),
        }
    }

    fn timestamp(&self, offset_ms: i64) -> String {
        (self.base + chrono::Duration::milliseconds(offset_ms)).to_rfc3339()
    }

    /// Last 8 bytes of the trace id, nudged forward to a char boundary so
    /// arbitrary trace ids from [`MapContext::with_run`] cannot panic.
    fn trace_suffix(&self) -> &str {
        let mut start = self.trace_id.len().saturating_sub(8);
        while !self.trace_id.is_char_boundary(start) {
            start += 1;
        }
        &self.trace_id[start..]
    }
}

type SectionMapper = fn(&Value, &MapContext, String) -> Option<Explanation>;

/// One row of the mapping table: where to look, when the record happened,
/// and how to shape it.
struct SectionRule {
    name: &'static str,
    pointer: &'static str,
    offset_ms: i64,
    map: SectionMapper,
}

const RULES: &[SectionRule] = &[
    SectionRule {
        name: "orca_decision",
        pointer: "/orca",
        offset_ms: 1_000,
        map: map_orca_decision,
    },
    SectionRule {
        name: "opal_methods",
        pointer: "/opal/methods",
        offset_ms: 2_000,
        map: map_opal_methods,
    },
    SectionRule {
        name: "olive_incentives",
        pointer: "/olive/incentives",
        offset_ms: 3_000,
        map: map_olive_incentives,
    },
    SectionRule {
        name: "okra_bnpl_quote",
        pointer: "/okra/bnpl_quote",
        offset_ms: 4_000,
        map: map_okra_quote,
    },
    SectionRule {
        name: "onyx_kyb",
        pointer: "/onyx/kyb_verification",
        offset_ms: 5_000,
        map: map_onyx_kyb,
    },
    SectionRule {
        name: "weave_auction",
        pointer: "/weave",
        offset_ms: 6_000,
        map: map_weave_auction,
    },
    SectionRule {
        name: "negotiation_orca",
        pointer: "/phase3/negotiation/orca",
        offset_ms: 6_500,
        map: map_negotiation_orca,
    },
    SectionRule {
        name: "negotiation_opal",
        pointer: "/phase3/negotiation/opal",
        offset_ms: 6_800,
        map: map_negotiation_opal,
    },
    SectionRule {
        name: "settlement_olive_policy",
        pointer: "/phase3/settlement/olive_policy",
        offset_ms: 9_000,
        map: map_settlement_olive_policy,
    },
    SectionRule {
        name: "settlement_onyx_trust",
        pointer: "/phase3/settlement/onyx_trust",
        offset_ms: 10_000,
        map: map_settlement_onyx_trust,
    },
    SectionRule {
        name: "settlement_final",
        pointer: "/phase3/settlement/final",
        offset_ms: 11_000,
        map: map_settlement_final,
    },
    SectionRule {
        name: "instruction_signing",
        pointer: "/phase4/instruction_signing",
        offset_ms: 13_000,
        map: map_instruction_signing,
    },
];

/// Map a composite aggregation document into ordered explanation records.
///
/// Unwraps a top-level `data` envelope when present. Sections absent from
/// the document are skipped; nothing here is fatal.
pub fn map_composite(doc: &Value, ctx: &MapContext) -> Vec<Explanation> {
    let data = doc
        .get("data")
        .filter(|v| v.is_object())
        .unwrap_or(doc);

    let mut out = Vec::new();
    for rule in RULES {
        match data.pointer(rule.pointer) {
            Some(section) if !section.is_null() => {
                if let Some(record) = (rule.map)(section, ctx, ctx.timestamp(rule.offset_ms)) {
                    tracing::debug!(section = rule.name, step_id = %record.step_id, "mapped upstream section");
                    out.push(record);
                }
            }
            _ => {
                tracing::debug!(section = rule.name, "upstream section absent, skipped");
            }
        }
    }
    out
}

fn record(
    ctx: &MapContext,
    timestamp: String,
    step_id: &str,
    agent: Agent,
    model_version: &str,
    policy_version: &str,
    summary: String,
    decision: Decision,
) -> Explanation {
    Explanation {
        trace_id: ctx.trace_id.clone(),
        step_id: step_id.to_string(),
        agent,
        model_version: model_version.to_string(),
        policy_version: policy_version.to_string(),
        summary,
        decision,
        score: None,
        score_type: None,
        uncertainty: None,
        key_signals: Vec::new(),
        ap2_refs: Vec::new(),
        redactions: Vec::new(),
        timestamp,
        extra: BTreeMap::new(),
    }
}

fn str_or<'a>(value: &'a Value, key: &str, default: &'a str) -> &'a str {
    value.get(key).and_then(Value::as_str).unwrap_or(default)
}

/// Checkout decision, preferring the upstream LLM explanation text when the
/// gateway supplied one. Which source produced the summary is recorded in
/// `extra.explanation_source` for later inspection, never in the summary.
fn map_orca_decision(section: &Value, ctx: &MapContext, timestamp: String) -> Option<Explanation> {
    let decision_obj = section.get("decision")?;

    let llm_text = section
        .pointer("/explanation/explanation")
        .and_then(Value::as_str);
    let decision_str = str_or(decision_obj, "decision", "pending");
    let summary = match llm_text {
        Some(text) => text.to_string(),
        None => {
            let reasons = decision_obj
                .get("reasons")
                .and_then(Value::as_array)
                .map(|arr| {
                    arr.iter()
                        .filter_map(Value::as_str)
                        .collect::<Vec<_>>()
                        .join(", ")
                })
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| "Risk assessment completed.".to_string());
            format!("Checkout decision: {}. {}", decision_str, reasons)
        }
    };

    let cart_total = decision_obj
        .get("cart_total")
        .or_else(|| decision_obj.pointer("/meta/cart_total"))
        .and_then(Value::as_f64)
        .unwrap_or(ctx.cart.total);

    let mut rec = record(
        ctx,
        timestamp,
        "orca_checkout_001",
        Agent::Orca,
        "orca_decision_ml_v4.1.8",
        "checkout_v1.0.0",
        summary,
        Decision::from_upstream(decision_str),
    );
    rec.score = Some(
        decision_obj
            .pointer("/meta/risk_score")
            .and_then(Value::as_f64)
            .unwrap_or(0.5),
    );
    rec.score_type = Some(ScoreType::Risk);
    rec.uncertainty = Some(0.1);
    rec.key_signals = vec![KeySignal::new("cart.total", json!(cart_total), 0.5)];
    rec.extra.insert("status".into(), json!("completed"));
    rec.extra.insert("real_data".into(), json!(true));
    rec.extra.insert(
        "explanation_source".into(),
        json!(if llm_text.is_some() { "llm" } else { "template" }),
    );
    Some(rec)
}

fn map_opal_methods(section: &Value, ctx: &MapContext, timestamp: String) -> Option<Explanation> {
    let methods = section.as_array()?;
    let first_type = methods
        .first()
        .and_then(|m| m.get("type"))
        .and_then(Value::as_str)
        .unwrap_or("card");

    let mut rec = record(
        ctx,
        timestamp,
        "opal_wallet_002",
        Agent::Opal,
        "opal_wallet_v2.1.0",
        "wallet_v1.0.0",
        format!(
            "Wallet methods retrieved: {} payment options available. Selected: {}",
            methods.len(),
            first_type
        ),
        Decision::Allow,
    );
    rec.score = Some(0.9);
    rec.score_type = Some(ScoreType::Security);
    rec.uncertainty = Some(0.05);
    rec.key_signals = vec![KeySignal::new(
        "payment_methods.count",
        json!(methods.len()),
        0.3,
    )];
    rec.extra.insert("method".into(), json!(first_type));
    rec.extra.insert("real_data".into(), json!(true));
    Some(rec)
}

fn map_olive_incentives(
    section: &Value,
    ctx: &MapContext,
    timestamp: String,
) -> Option<Explanation> {
    let count = section
        .pointer("/data/count")
        .and_then(Value::as_u64)
        .unwrap_or(0);
    let first_name = section
        .pointer("/data/incentives/0/name")
        .and_then(Value::as_str)
        .unwrap_or("Loyalty rewards calculated.");

    let mut rec = record(
        ctx,
        timestamp,
        "olive_loyalty_003",
        Agent::Olive,
        "olive_loyalty_v3.0.0",
        "loyalty_v1.0.0",
        format!(
            "Incentives applied: {} programs available. {}",
            count, first_name
        ),
        Decision::Allow,
    );
    rec.score = Some(0.8);
    rec.score_type = Some(ScoreType::Value);
    rec.uncertainty = Some(0.1);
    rec.key_signals = vec![KeySignal::new("incentives.count", json!(count), 0.2)];
    rec.extra.insert("real_data".into(), json!(true));
    Some(rec)
}

fn map_okra_quote(section: &Value, ctx: &MapContext, timestamp: String) -> Option<Explanation> {
    let approved = section
        .get("approved")
        .and_then(Value::as_bool)
        .unwrap_or(false);
    let apr = section.get("apr").cloned().unwrap_or(Value::Null);
    let limit = section.get("limit").cloned().unwrap_or(Value::Null);

    let mut rec = record(
        ctx,
        timestamp,
        "okra_bnpl_004",
        Agent::Okra,
        "okra_scoring_v2.5.0",
        "bnpl_v1.0.0",
        format!(
            "BNPL quote generated: {}. APR: {}%, Limit: ${}",
            if approved { "APPROVED" } else { "DECLINED" },
            apr,
            limit
        ),
        if approved {
            Decision::Allow
        } else {
            Decision::Decline
        },
    );
    rec.score = Some(section.get("score").and_then(Value::as_f64).unwrap_or(0.8));
    rec.score_type = Some(ScoreType::Affordability);
    rec.uncertainty = Some(0.15);
    rec.key_signals = vec![KeySignal::new("bnpl.apr", apr.clone(), 0.4)];
    rec.extra.insert("apr".into(), apr);
    rec.extra.insert("limit".into(), limit);
    rec.extra.insert("real_data".into(), json!(true));
    Some(rec)
}

fn map_onyx_kyb(section: &Value, ctx: &MapContext, timestamp: String) -> Option<Explanation> {
    let status = str_or(section, "status", "unknown");
    let reason = str_or(section, "reason", "Verification completed.");

    let mut rec = record(
        ctx,
        timestamp,
        "onyx_kyb_005",
        Agent::Onyx,
        "onyx_kyb_v1.8.0",
        "kyb_v1.0.0",
        format!("KYB verification: {}. {}", status.to_uppercase(), reason),
        if status == "verified" {
            Decision::Allow
        } else {
            Decision::Review
        },
    );
    rec.score = Some(0.85);
    rec.score_type = Some(ScoreType::Trust);
    rec.uncertainty = Some(0.1);
    rec.key_signals = vec![KeySignal::new("kyb.status", json!(status), 0.3)];
    rec.extra.insert(
        "entity_id".into(),
        section.get("entity_id").cloned().unwrap_or(Value::Null),
    );
    rec.extra.insert("real_data".into(), json!(true));
    Some(rec)
}

fn map_weave_auction(_section: &Value, ctx: &MapContext, timestamp: String) -> Option<Explanation> {
    let mut rec = record(
        ctx,
        timestamp,
        "weave_auction_007",
        Agent::Weave,
        "weave_auction_v1.2.0",
        "auction_v1.0.0",
        format!(
            "Processor auction completed. Settlement path optimized for {} transaction.",
            ctx.choice
        ),
        Decision::Allow,
    );
    rec.score = Some(0.9);
    rec.score_type = Some(ScoreType::Optimization);
    rec.uncertainty = Some(0.05);
    rec.key_signals = vec![KeySignal::new(
        "auction.winner",
        json!("selected_processor"),
        0.2,
    )];
    rec.extra.insert("auction_results".into(), json!("completed"));
    rec.extra.insert("real_data".into(), json!(true));
    Some(rec)
}

/// Negotiation explanations may carry a free-text LLM analysis; only the
/// part before the "Structured Analysis:" divider is user-facing.
fn map_negotiation_orca(
    section: &Value,
    ctx: &MapContext,
    timestamp: String,
) -> Option<Explanation> {
    let llm_text = section
        .get("explanation")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty());

    let summary = match llm_text {
        Some(text) => text
            .split("\n\nStructured Analysis:")
            .next()
            .unwrap_or(text)
            .to_string(),
        None => {
            let rail = str_or(section, "optimal_rail", "Card");
            let risk = section
                .pointer("/negotiation_metadata/ml_risk_score")
                .and_then(Value::as_f64)
                .map(|v| v.to_string())
                .unwrap_or_else(|| "N/A".to_string());
            format!(
                "Orca negotiation completed. Optimal rail: {}. Risk score: {}.",
                rail, risk
            )
        }
    };

    let mut rec = record(
        ctx,
        timestamp,
        "orca_negotiation_007",
        Agent::Orca,
        "orca_negotiation_v1.0.0",
        "negotiation_v1.0.0",
        summary,
        Decision::Allow,
    );
    rec.score = Some(
        section
            .pointer("/negotiation_metadata/ml_risk_score")
            .and_then(Value::as_f64)
            .unwrap_or(0.7),
    );
    rec.score_type = Some(ScoreType::Risk);
    rec.uncertainty = Some(0.1);
    rec.key_signals = vec![KeySignal::new(
        "negotiation.optimal_rail",
        json!(str_or(section, "optimal_rail", "Card")),
        0.5,
    )];
    rec.extra.insert(
        "rail_evaluations".into(),
        section
            .get("rail_evaluations")
            .cloned()
            .unwrap_or(Value::Null),
    );
    rec.extra.insert("real_data".into(), json!(true));
    rec.extra.insert(
        "explanation_source".into(),
        json!(if llm_text.is_some() { "llm" } else { "template" }),
    );
    Some(rec)
}

fn map_negotiation_opal(
    section: &Value,
    ctx: &MapContext,
    timestamp: String,
) -> Option<Explanation> {
    let instrument = section
        .pointer("/consumer_proposal/instrument_type")
        .and_then(Value::as_str)
        .unwrap_or("credit_card");
    let confidence = str_or(section, "confidence", "high");

    let mut rec = record(
        ctx,
        timestamp,
        "opal_counter_negotiation_008",
        Agent::Opal,
        "opal_counter_negotiation_v1.0.0",
        "counter_negotiation_v1.0.0",
        format!(
            "Opal counter-negotiation completed. Consumer proposal: {}. Confidence: {}.",
            instrument, confidence
        ),
        Decision::Allow,
    );
    rec.score = Some(if confidence == "high" { 0.9 } else { 0.7 });
    rec.score_type = Some(ScoreType::Value);
    rec.uncertainty = Some(0.1);
    rec.key_signals = vec![KeySignal::new(
        "counter_negotiation.instrument_type",
        json!(instrument),
        0.4,
    )];
    rec.extra.insert(
        "consumer_proposal".into(),
        section
            .get("consumer_proposal")
            .cloned()
            .unwrap_or(Value::Null),
    );
    rec.extra.insert("real_data".into(), json!(true));
    Some(rec)
}

fn map_settlement_olive_policy(
    section: &Value,
    ctx: &MapContext,
    timestamp: String,
) -> Option<Explanation> {
    let impact = section
        .pointer("/data/policy_impact")
        .and_then(Value::as_str)
        .unwrap_or("Policy evaluation completed");
    let winner = section
        .pointer("/data/winner_rail")
        .and_then(Value::as_str)
        .unwrap_or("unknown");

    let mut rec = record(
        ctx,
        timestamp,
        "phase3_olive_policy_011",
        Agent::Olive,
        "olive_policy_v1.0.0",
        "policy_v1.0.0",
        format!(
            "Settlement policy applied: {}. Winner rail: {}.",
            impact, winner
        ),
        Decision::Allow,
    );
    rec.score = Some(
        section
            .pointer("/data/updated_scores/cost")
            .and_then(Value::as_f64)
            .unwrap_or(0.8),
    );
    rec.score_type = Some(ScoreType::Cost);
    rec.uncertainty = Some(0.05);
    rec.key_signals = vec![KeySignal::new("policy.winner_rail", json!(winner), 0.3)];
    rec.extra.insert("policy_impact".into(), json!(impact));
    rec.extra.insert("real_data".into(), json!(true));
    Some(rec)
}

fn map_settlement_onyx_trust(
    section: &Value,
    ctx: &MapContext,
    timestamp: String,
) -> Option<Explanation> {
    let risk_level = section
        .pointer("/data/risk_level")
        .and_then(Value::as_str)
        .unwrap_or("unknown");
    let trust_score = section
        .pointer("/data/trust_score")
        .and_then(Value::as_f64)
        .unwrap_or(0.0);
    let explanation = section
        .pointer("/data/explanation")
        .and_then(Value::as_str)
        .unwrap_or("Trust evaluation completed");

    let mut rec = record(
        ctx,
        timestamp,
        "phase3_onyx_trust_012",
        Agent::Onyx,
        "onyx_trust_v1.0.0",
        "trust_v1.0.0",
        format!(
            "Trust signal analysis: {} risk detected (score: {:.2}). {}.",
            risk_level, trust_score, explanation
        ),
        if risk_level == "low" {
            Decision::Allow
        } else {
            Decision::Review
        },
    );
    rec.score = Some(
        section
            .pointer("/data/trust_score")
            .and_then(Value::as_f64)
            .unwrap_or(0.7),
    );
    rec.score_type = Some(ScoreType::Trust);
    rec.uncertainty = Some(0.1);
    rec.key_signals = vec![KeySignal::new("trust.risk_level", json!(risk_level), 0.4)];
    rec.extra.insert("risk_level".into(), json!(risk_level));
    rec.extra.insert("real_data".into(), json!(true));
    Some(rec)
}

fn map_settlement_final(
    section: &Value,
    ctx: &MapContext,
    timestamp: String,
) -> Option<Explanation> {
    let rail = str_or(section, "final_rail", "unknown");
    let cost_bps = section.get("final_cost_bps").cloned().unwrap_or(Value::Null);
    let adjustment = str_or(section, "adjustment_summary", "Settlement optimization completed");

    let mut rec = record(
        ctx,
        timestamp,
        "weave_final_settlement_013",
        Agent::Weave,
        "weave_settlement_v1.0.0",
        "settlement_v1.0.0",
        format!(
            "Final settlement path determined: {} rail selected at {} bps. {}.",
            rail, cost_bps, adjustment
        ),
        Decision::Allow,
    );
    rec.score = Some(0.95);
    rec.score_type = Some(ScoreType::Final);
    rec.uncertainty = Some(0.02);
    rec.key_signals = vec![KeySignal::new("final.rail", json!(rail), 0.5)];
    rec.extra.insert("final_rail".into(), json!(rail));
    rec.extra.insert("final_cost_bps".into(), cost_bps);
    rec.extra.insert("real_data".into(), json!(true));
    Some(rec)
}

fn map_instruction_signing(
    section: &Value,
    ctx: &MapContext,
    timestamp: String,
) -> Option<Explanation> {
    let signature_id = section
        .get("signature_id")
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| format!("SIG-{}", ctx.trace_suffix()));
    let status = str_or(section, "status", "forwarded");

    let mut rec = record(
        ctx,
        timestamp,
        "instruction_signing_015",
        Agent::Weave,
        "weave_signing_v1.0.0",
        "signing_v1.0.0",
        format!(
            "Instruction signed and forwarded by Weave. Digital signature: {}. Status: {}.",
            signature_id, status
        ),
        Decision::Allow,
    );
    rec.score = Some(0.98);
    rec.score_type = Some(ScoreType::Security);
    rec.uncertainty = Some(0.02);
    rec.key_signals = vec![KeySignal::new("signing.status", json!(status), 0.5)];
    rec.extra
        .insert("signing".into(), section.clone());
    rec.extra.insert("real_data".into(), json!(true));
    Some(rec)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ctx() -> MapContext {
        MapContext::with_run(
            "trace_1700000000000_deadbeef".to_string(),
            Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap(),
            PaymentChoice::Credit,
        )
    }

    #[test]
    fn test_absent_sections_are_skipped() {
        let doc = json!({ "opal": { "methods": [ { "type": "card" } ] } });
        let mapped = map_composite(&doc, &ctx());
        assert_eq!(mapped.len(), 1);
        assert_eq!(mapped[0].step_id, "opal_wallet_002");
    }

    #[test]
    fn test_data_envelope_unwrapped() {
        let doc = json!({ "data": { "weave": { "auction": "done" } } });
        let mapped = map_composite(&doc, &ctx());
        assert_eq!(mapped.len(), 1);
        assert_eq!(mapped[0].agent, Agent::Weave);
    }

    #[test]
    fn test_orca_prefers_llm_explanation() {
        let doc = json!({
            "orca": {
                "decision": { "decision": "ALLOW", "meta": { "risk_score": 0.2 } },
                "explanation": { "explanation": "Low-risk purchase at a known merchant." }
            }
        });
        let mapped = map_composite(&doc, &ctx());
        assert_eq!(mapped.len(), 1);
        let rec = &mapped[0];
        assert_eq!(rec.summary, "Low-risk purchase at a known merchant.");
        assert_eq!(rec.decision, Decision::Allow);
        assert_eq!(rec.score, Some(0.2));
        assert_eq!(rec.extra["explanation_source"], json!("llm"));
    }

    #[test]
    fn test_orca_templated_summary_records_source() {
        let doc = json!({
            "orca": {
                "decision": { "decision": "review", "reasons": ["velocity", "new device"] }
            }
        });
        let mapped = map_composite(&doc, &ctx());
        let rec = &mapped[0];
        assert_eq!(rec.decision, Decision::Review);
        assert_eq!(
            rec.summary,
            "Checkout decision: review. velocity, new device"
        );
        assert_eq!(rec.extra["explanation_source"], json!("template"));
        // The source tag never leaks into the visible summary.
        assert!(!rec.summary.contains("template"));
    }

    #[test]
    fn test_okra_decline_maps_to_decline() {
        let doc = json!({
            "okra": { "bnpl_quote": { "approved": false, "apr": 19.9, "limit": 500 } }
        });
        let mapped = map_composite(&doc, &ctx());
        assert_eq!(mapped[0].decision, Decision::Decline);
    }

    #[test]
    fn test_negotiation_strips_structured_analysis() {
        let doc = json!({
            "phase3": { "negotiation": { "orca": {
                "explanation": "Card rail is cheapest here.\n\nStructured Analysis: fee table ...",
                "optimal_rail": "Card"
            } } }
        });
        let mapped = map_composite(&doc, &ctx());
        assert_eq!(mapped[0].summary, "Card rail is cheapest here.");
    }

    #[test]
    fn test_full_composite_orders_by_rule_table() {
        let doc = json!({
            "orca": { "decision": { "decision": "allow" } },
            "opal": { "methods": [] },
            "onyx": { "kyb_verification": { "status": "verified" } },
            "phase4": { "instruction_signing": { "status": "forwarded" } }
        });
        let c = ctx();
        let mapped = map_composite(&doc, &c);
        let ids: Vec<_> = mapped.iter().map(|r| r.step_id.as_str()).collect();
        assert_eq!(
            ids,
            vec![
                "orca_checkout_001",
                "opal_wallet_002",
                "onyx_kyb_005",
                "instruction_signing_015"
            ]
        );
        assert!(mapped.iter().all(|r| r.trace_id == c.trace_id));
        let times: Vec<_> = mapped
            .iter()
            .map(|r| r.timestamp_parsed().unwrap())
            .collect();
        assert!(times.windows(2).all(|w| w[0] <= w[1]));
    }
}
