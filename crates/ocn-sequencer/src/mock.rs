//! Deterministic mock sequencer
//!
//! Produces the full 11-step explanation list for one run, synchronously or
//! with artificial per-step pacing. Content is fully determined by the
//! payment choice; only the generated trace id and wall-clock base vary
//! between runs. This sequencer cannot fail.

use std::collections::BTreeMap;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde_json::{json, Value};

use ocn_types::{
    generate_trace_id, round_cents, Agent, Cart, Decision, Explanation, KeySignal, PaymentChoice,
    ScoreType,
};

/// Fixed per-step timestamp offset within a run, in seconds
pub const STEP_INTERVAL_SECS: i64 = 1;

/// Minimum artificial delay per paced step; the paced variant never
/// resolves instantaneously.
pub const MIN_STEP_DELAY: Duration = Duration::from_millis(10);

/// Cash-back rate advertised for the credit choice
pub const CASHBACK_RATE: f64 = 0.05;
/// Number of BNPL installments quoted by Okra
pub const BNPL_INSTALLMENTS: u32 = 4;
/// Winning auction bid: variable rate
pub const AUCTION_WINNING_RATE: f64 = 0.015;
/// Winning auction bid: fixed fee
pub const AUCTION_WINNING_FIXED: f64 = 2.50;
/// Number of processors bidding in the auction
pub const AUCTION_PARTICIPANTS: u32 = 3;
/// Settlement window in days
pub const SETTLEMENT_DAYS: u32 = 2;

/// Deterministic sequencer over the fixed 11-step catalog
pub struct MockSequencer {
    trace_id: String,
    base: DateTime<Utc>,
    cart: Cart,
}

impl Default for MockSequencer {
    fn default() -> Self {
        Self::new()
    }
}

impl MockSequencer {
    /// Fresh run identity: new trace id, wall-clock base timestamp.
    pub fn new() -> Self {
        Self::with_run(generate_trace_id(), Utc::now())
    }

    /// Fixed run identity, for deterministic tests.
    pub fn with_run(trace_id: String, base: DateTime<Utc>) -> Self {
        Self {
            trace_id,
            base,
            cart: Cart::oxford(),
        }
    }

    /// Trace id shared by every record this sequencer produces
    pub fn trace_id(&self) -> &str {
        &self.trace_id
    }

    /// The cart this run is deciding over
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Produce the full ordered explanation list for one run.
    ///
    /// Pure computation over fixed inputs; length and content are fully
    /// determined by `choice`.
    pub fn run(&self, choice: PaymentChoice) -> Vec<Explanation> {
        let credit = choice == PaymentChoice::Credit;
        let subtotal = self.cart.subtotal;

        let cashback_rate = if credit { CASHBACK_RATE } else { 0.0 };
        let rewards = round_cents(subtotal * cashback_rate);
        let installment = round_cents(subtotal / BNPL_INSTALLMENTS as f64);
        let processing_cost =
            round_cents(subtotal * AUCTION_WINNING_RATE + AUCTION_WINNING_FIXED);

        let mut steps = Vec::with_capacity(11);

        // 1. Orca - checkout decision
        steps.push(self.step(
            1,
            "orca_checkout_001",
            Agent::Orca,
            "orca_checkout_ml_v4.1.8",
            "checkout_v5.2.1",
            format!(
                "Checkout initiated for ${:.0} transaction. Analyzing payment options \
                 and risk factors. Ready to proceed with payment processing.",
                subtotal
            ),
            Decision::Allow,
            Some(0.12),
            Some(ScoreType::Risk),
            Some(0.15),
            vec![
                KeySignal::new("cart.total", json!(subtotal), 0.08),
                KeySignal::new("merchant.category", json!("clothing"), 0.04),
            ],
            vec!["checkout_policy_v5.2.1"],
            vec!["user.id", "merchant.id"],
            json!({
                "transaction_type": "ecommerce",
                "processing_mode": "real_time"
            }),
        ));

        // 2. Opal - wallet method selected
        steps.push(self.step(
            2,
            "opal_wallet_002",
            Agent::Opal,
            "opal_wallet_ml_v3.0.1",
            "wallet_v1.8.2",
            if credit {
                format!(
                    "Credit card selected as payment method. Card ending in ****1234 has \
                     sufficient credit limit. MCC 5651 (Clothing) eligible for {:.0}% cash back.",
                    CASHBACK_RATE * 100.0
                )
            } else {
                format!(
                    "BNPL payment method selected. No immediate card charge required. \
                     Payment will be split into {} installments of ${:.0} each.",
                    BNPL_INSTALLMENTS, installment
                )
            },
            Decision::Allow,
            Some(0.09),
            Some(ScoreType::Suitability),
            Some(0.15),
            vec![
                KeySignal::new("payment_method", json!(choice.as_str()), 0.4),
                KeySignal::new("mcc", json!(5651), 0.3),
                KeySignal::new("amount", json!(subtotal), 0.3),
            ],
            vec!["wallet_policy_v1.8.2"],
            vec!["card_number", "account_balance"],
            json!({
                "selected_method": if credit { "credit_card" } else { "bnpl" },
                "cashback_rate": cashback_rate,
                "mcc_eligible": true
            }),
        ));

        // 3. Olive - loyalty incentives applied
        steps.push(self.step(
            3,
            "olive_loyalty_003",
            Agent::Olive,
            "olive_loyalty_ml_v1.9.3",
            "loyalty_v2.4.1",
            if credit {
                format!(
                    "Excellent! Credit card selected. You'll earn {:.0}% cash back = ${:.2}. \
                     Gold tier benefits apply. Maximum rewards for clothing purchase.",
                    CASHBACK_RATE * 100.0,
                    rewards
                )
            } else {
                format!(
                    "Great choice! BNPL selected. 0% interest, ${:.0} every two weeks, no \
                     fees. Perfect for cash flow management on this purchase.",
                    installment
                )
            },
            Decision::Allow,
            Some(if credit { 0.90 } else { 0.50 }),
            Some(ScoreType::Suitability),
            Some(0.03),
            vec![
                KeySignal::new("loyalty_tier", json!("gold"), 0.4),
                KeySignal::new("cashback_rate", json!(cashback_rate), 0.3),
                KeySignal::new("merchant_category", json!("clothing"), 0.3),
            ],
            vec!["loyalty_policy_v2.4.1"],
            vec!["member_id", "points_balance"],
            json!({
                "loyalty_tier": "gold",
                "earned_rewards_usd": rewards,
                "earned_rewards_percent": cashback_rate
            }),
        ));

        // 4. Okra - BNPL quote generated
        steps.push(self.step(
            4,
            "okra_bnpl_004",
            Agent::Okra,
            "okra_bnpl_ml_v2.1.7",
            "bnpl_v3.2.1",
            format!(
                "BNPL quote generated: {} payments of ${:.0} each, 0% interest, no fees. \
                 First payment today, then every 2 weeks. Total cost remains ${:.0}.",
                BNPL_INSTALLMENTS, installment, subtotal
            ),
            Decision::Allow,
            Some(0.15),
            Some(ScoreType::Risk),
            Some(0.20),
            vec![
                KeySignal::new("payment_count", json!(BNPL_INSTALLMENTS), 0.3),
                KeySignal::new("payment_amount", json!(installment), 0.3),
                KeySignal::new("interest_rate", json!(0), 0.2),
                KeySignal::new("fees", json!(0), 0.2),
            ],
            vec!["bnpl_policy_v3.2.1"],
            vec!["credit_score", "income"],
            json!({
                "installments": BNPL_INSTALLMENTS,
                "amount_per_payment": installment,
                "total_amount": subtotal,
                "interest_rate": 0,
                "fees": 0
            }),
        ));

        // 5. Onyx - KYB verification
        steps.push(self.step(
            5,
            "onyx_kyb_005",
            Agent::Onyx,
            "onyx_kyb_ml_v1.4.2",
            "kyb_v2.1.3",
            "KYB verification completed. Customer identity verified through multiple data \
             sources. Risk assessment: Low. Compliance event emitted for audit trail."
                .to_string(),
            Decision::Allow,
            Some(0.08),
            Some(ScoreType::Risk),
            Some(0.12),
            vec![
                KeySignal::new("identity_verified", json!(true), 0.4),
                KeySignal::new("risk_score", json!(0.08), 0.3),
                KeySignal::new("compliance_status", json!("passed"), 0.3),
            ],
            vec!["kyb_policy_v2.1.3"],
            vec!["ssn", "dob", "address"],
            json!({
                "verification_method": "multi_source",
                "compliance_event": "kyb_verification_complete",
                "risk_tier": "low"
            }),
        ));

        // 6. Orca vs Opal - negotiation
        steps.push(self.step(
            6,
            "orca_opal_negotiation_006",
            Agent::Orca,
            "orca_negotiation_ml_v4.1.8",
            "negotiation_v5.2.1",
            format!(
                "Negotiation with Opal complete. Optimized payment terms agreed: Credit \
                 card with {:.0}% cashback for immediate rewards, or BNPL with 0% interest \
                 for flexibility. LLM analysis confirms both options are optimal for customer.",
                CASHBACK_RATE * 100.0
            ),
            Decision::Allow,
            Some(0.11),
            Some(ScoreType::Suitability),
            Some(0.10),
            vec![
                KeySignal::new("negotiation_complete", json!(true), 0.4),
                KeySignal::new("terms_optimized", json!(true), 0.3),
                KeySignal::new("llm_approval", json!(true), 0.3),
            ],
            vec!["negotiation_policy_v5.2.1", "llm_analysis_v1.0"],
            vec!["internal_negotiation_data"],
            json!({
                "negotiation_partner": "opal",
                "optimized_terms": if credit {
                    "credit_card_5pct_cashback"
                } else {
                    "bnpl_0pct_interest"
                },
                "llm_confidence": 0.95
            }),
        ));

        // 7. Weave - processor auction
        steps.push(self.step(
            7,
            "weave_auction_007",
            Agent::Weave,
            "weave_auction_ml_v2.3.4",
            "auction_v4.1.2",
            format!(
                "Processor auction complete! {} processors bid for transaction. Winning \
                 bid: {:.1}% + ${:.2} processing cost. Best rate secured through \
                 competitive bidding.",
                AUCTION_PARTICIPANTS,
                AUCTION_WINNING_RATE * 100.0,
                AUCTION_WINNING_FIXED
            ),
            Decision::Allow,
            Some(AUCTION_WINNING_RATE),
            Some(ScoreType::Cost),
            Some(0.09),
            vec![
                KeySignal::new("winning_bid_rate", json!(AUCTION_WINNING_RATE), 0.4),
                KeySignal::new("winning_bid_fixed", json!(AUCTION_WINNING_FIXED), 0.3),
                KeySignal::new("competitors", json!(AUCTION_PARTICIPANTS), 0.3),
            ],
            vec!["auction_policy_v4.1.2"],
            vec!["processor_ids"],
            json!({
                "winning_processor": "processor_alpha",
                "total_processing_cost": processing_cost,
                "auction_participants": AUCTION_PARTICIPANTS
            }),
        ));

        // 8. Orca - settlement path
        steps.push(self.step(
            8,
            "final_settlement_008",
            Agent::Orca,
            "orca_settlement_ml_v4.1.8",
            "settlement_v5.2.1",
            format!(
                "Settlement path determined: Standard {}-day settlement to merchant \
                 account. Funds will be available to merchant within {} hours. Settlement \
                 method optimized for lowest cost and fastest processing.",
                SETTLEMENT_DAYS,
                SETTLEMENT_DAYS * 24
            ),
            Decision::Allow,
            Some(0.05),
            Some(ScoreType::Cost),
            Some(0.08),
            vec![
                KeySignal::new("settlement_days", json!(SETTLEMENT_DAYS), 0.4),
                KeySignal::new("settlement_cost", json!(0.05), 0.3),
                KeySignal::new("path_optimized", json!(true), 0.3),
            ],
            vec!["settlement_policy_v5.2.1"],
            vec!["merchant_account"],
            json!({
                "settlement_method": "standard_ach",
                "settlement_days": SETTLEMENT_DAYS,
                "settlement_cost_percent": 0.05
            }),
        ));

        // 9. Orca - payment instruction compiled
        steps.push(self.step(
            9,
            "payment_instruction_009",
            Agent::Orca,
            "orca_instruction_ml_v4.1.8",
            "instruction_v5.2.1",
            "Payment instruction compiled successfully. All agent inputs integrated: \
             Orca's decision, Opal's wallet method, Olive's rewards calculation. \
             Instruction ready for execution with all compliance checks passed."
                .to_string(),
            Decision::Allow,
            Some(0.02),
            Some(ScoreType::Suitability),
            Some(0.05),
            vec![
                KeySignal::new("instruction_complete", json!(true), 0.4),
                KeySignal::new("compliance_checks", json!("passed"), 0.3),
                KeySignal::new("agent_integration", json!("complete"), 0.3),
            ],
            vec!["instruction_policy_v5.2.1"],
            vec!["instruction_details"],
            json!({
                "compiled_by": ["orca", "opal", "olive"],
                "instruction_size": "standard",
                "compliance_status": "passed"
            }),
        ));

        // 10. Weave - instruction signed & forwarded
        steps.push(self.step(
            10,
            "weave_signing_010",
            Agent::Weave,
            "weave_signing_ml_v2.3.4",
            "signing_v4.1.2",
            "Payment instruction signed with cryptographic signature and forwarded to \
             processor. Digital signature ensures integrity and authenticity. \
             Transaction now in processor queue for authorization."
                .to_string(),
            Decision::Allow,
            Some(0.01),
            Some(ScoreType::Security),
            Some(0.02),
            vec![
                KeySignal::new("signature_valid", json!(true), 0.4),
                KeySignal::new("integrity_check", json!(true), 0.3),
                KeySignal::new("forwarded_successfully", json!(true), 0.3),
            ],
            vec!["signing_policy_v4.1.2"],
            vec!["signature_data"],
            json!({
                "signature_method": "cryptographic",
                "processor_queue_position": 1,
                "estimated_processing_time": "30_seconds"
            }),
        ));

        // 11. Processor authorization result
        steps.push(self.step(
            11,
            "processor_auth_011",
            Agent::Orca,
            "processor_auth_ml_v4.1.8",
            "auth_v5.2.1",
            format!(
                "Authorization successful! Transaction approved by processor. ${:.0} \
                 charged to {}. Receipt generated and sent to customer email.",
                subtotal,
                if credit {
                    "credit card ending in ****1234"
                } else {
                    "BNPL account"
                }
            ),
            Decision::Allow,
            Some(0.00),
            Some(ScoreType::Success),
            Some(0.00),
            vec![
                KeySignal::new("authorization_code", json!("AUTH123456"), 0.4),
                KeySignal::new("approval_status", json!("approved"), 0.3),
                KeySignal::new("receipt_sent", json!(true), 0.3),
            ],
            vec!["auth_policy_v5.2.1"],
            vec!["card_number", "customer_email"],
            json!({
                "authorization_code": "AUTH123456",
                "transaction_id": format!("TXN_{}", self.trace_suffix()),
                "receipt_number": format!("RCP_{}", self.trace_suffix()),
                "payment_method_used": choice.as_str()
            }),
        ));

        steps
    }

    /// Paced variant: identical content, with an artificial per-step delay
    /// simulating real-time agent responses. The delay is floored at
    /// [`MIN_STEP_DELAY`] so the paced run never resolves instantaneously;
    /// correctness never depends on the pacing, only UI feel does.
    pub async fn run_paced(
        &self,
        choice: PaymentChoice,
        step_delay: Duration,
    ) -> Vec<Explanation> {
        let delay = step_delay.max(MIN_STEP_DELAY);
        let mut out = Vec::with_capacity(11);
        for step in self.run(choice) {
            tokio::time::sleep(delay).await;
            tracing::debug!(step_id = %step.step_id, agent = %step.agent, "paced step ready");
            out.push(step);
        }
        out
    }

    fn step(
        &self,
        index: i64,
        step_id: &str,
        agent: Agent,
        model_version: &str,
        policy_version: &str,
        summary: String,
        decision: Decision,
        score: Option<f64>,
        score_type: Option<ScoreType>,
        uncertainty: Option<f64>,
        key_signals: Vec<KeySignal>,
        ap2_refs: Vec<&str>,
        redactions: Vec<&str>,
        extra: Value,
    ) -> Explanation {
        Explanation {
            trace_id: self.trace_id.clone(),
            step_id: step_id.to_string(),
            agent,
            model_version: model_version.to_string(),
            policy_version: policy_version.to_string(),
            summary,
            decision,
            score,
            score_type,
            uncertainty,
            key_signals,
            ap2_refs: ap2_refs.into_iter().map(String::from).collect(),
            redactions: redactions.into_iter().map(String::from).collect(),
            timestamp: (self.base + chrono::Duration::seconds(STEP_INTERVAL_SECS * index))
                .to_rfc3339(),
            extra: extra_map(extra),
        }
    }

    /// Last 8 bytes of the trace id, nudged forward to a char boundary so
    /// arbitrary trace ids from [`MockSequencer::with_run`] cannot panic.
    fn trace_suffix(&self) -> &str {
        let mut start = self.trace_id.len().saturating_sub(8);
        while !self.trace_id.is_char_boundary(start) {
            start += 1;
        }
        &self.trace_id[start..]
    }
}

fn extra_map(value: Value) -> BTreeMap<String, Value> {
    match value {
        Value::Object(map) => map.into_iter().collect(),
        _ => BTreeMap::new(),
    }
}
