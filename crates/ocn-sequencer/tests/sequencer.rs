//! Run-level properties of the mock and real sequencers

use std::time::{Duration, Instant};

use ocn_sequencer::mock::{
    MockSequencer, AUCTION_WINNING_FIXED, AUCTION_WINNING_RATE, MIN_STEP_DELAY,
};
use ocn_sequencer::RealSequencer;
use ocn_types::{round_cents, Agent, PaymentChoice};

// Unroutable on any sane host: nothing listens on the discard port.
const DEAD_AGGREGATE_URL: &str = "http://127.0.0.1:9/run/demo1";

#[test]
fn agent_sequence_is_invariant_across_choices() {
    let seq = MockSequencer::new();
    let credit = seq.run(PaymentChoice::Credit);
    let bnpl = seq.run(PaymentChoice::Bnpl);

    let agents = |steps: &[ocn_types::Explanation]| -> Vec<Agent> {
        steps.iter().map(|s| s.agent).collect()
    };
    assert_eq!(agents(&credit), agents(&bnpl));

    let ids = |steps: &[ocn_types::Explanation]| -> Vec<String> {
        steps.iter().map(|s| s.step_id.clone()).collect()
    };
    assert_eq!(ids(&credit), ids(&bnpl));
}

#[test]
fn only_payment_tied_content_differs() {
    let seq = MockSequencer::new();
    let credit = seq.run(PaymentChoice::Credit);
    let bnpl = seq.run(PaymentChoice::Bnpl);

    let choice_dependent = [
        "opal_wallet_002",
        "olive_loyalty_003",
        "orca_opal_negotiation_006",
        "processor_auth_011",
    ];
    for (a, b) in credit.iter().zip(bnpl.iter()) {
        if choice_dependent.contains(&a.step_id.as_str()) {
            continue;
        }
        assert_eq!(a.summary, b.summary, "step {} must not depend on choice", a.step_id);
    }
    // And the dependent steps do actually differ.
    assert_ne!(credit[1].summary, bnpl[1].summary);
    assert_ne!(credit[2].summary, bnpl[2].summary);
}

#[test]
fn trace_id_shared_within_run_and_distinct_across_runs() {
    let first = MockSequencer::new();
    let second = MockSequencer::new();
    let steps = first.run(PaymentChoice::Credit);

    assert!(steps.iter().all(|s| s.trace_id == first.trace_id()));
    assert_ne!(first.trace_id(), second.trace_id());
}

#[test]
fn timestamps_parse_and_are_non_decreasing() {
    let steps = MockSequencer::new().run(PaymentChoice::Credit);
    let parsed: Vec<_> = steps
        .iter()
        .map(|s| s.timestamp_parsed().expect("timestamp must parse"))
        .collect();
    assert!(parsed.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn loyalty_reward_follows_cart_arithmetic() {
    let seq = MockSequencer::new();
    let subtotal = seq.cart().subtotal;
    assert_eq!(subtotal, 380.00);
    assert_eq!(seq.cart().total, 410.40);

    let credit = seq.run(PaymentChoice::Credit);
    let olive = credit.iter().find(|s| s.step_id == "olive_loyalty_003").unwrap();
    let rate = olive
        .key_signals
        .iter()
        .find(|k| k.path == "cashback_rate")
        .and_then(|k| k.value.as_f64())
        .unwrap();
    let reward = olive.extra["earned_rewards_usd"].as_f64().unwrap();
    assert_eq!(reward, round_cents(subtotal * rate));
    assert_eq!(reward, 19.00);

    let bnpl = seq.run(PaymentChoice::Bnpl);
    let olive = bnpl.iter().find(|s| s.step_id == "olive_loyalty_003").unwrap();
    assert_eq!(olive.extra["earned_rewards_usd"].as_f64().unwrap(), 0.0);
}

#[test]
fn auction_cost_recomputes_from_displayed_rate_and_fee() {
    let seq = MockSequencer::new();
    let steps = seq.run(PaymentChoice::Credit);
    let weave = steps.iter().find(|s| s.step_id == "weave_auction_007").unwrap();

    let rate = weave
        .key_signals
        .iter()
        .find(|k| k.path == "winning_bid_rate")
        .and_then(|k| k.value.as_f64())
        .unwrap();
    let fixed = weave
        .key_signals
        .iter()
        .find(|k| k.path == "winning_bid_fixed")
        .and_then(|k| k.value.as_f64())
        .unwrap();
    assert_eq!(rate, AUCTION_WINNING_RATE);
    assert_eq!(fixed, AUCTION_WINNING_FIXED);

    let cost = weave.extra["total_processing_cost"].as_f64().unwrap();
    assert_eq!(cost, round_cents(seq.cart().subtotal * rate + fixed));
    assert_eq!(cost, 8.20);
}

#[test]
fn instruction_step_reflects_loyalty_contribution() {
    let seq = MockSequencer::new();
    let steps = seq.run(PaymentChoice::Credit);

    let olive = steps.iter().find(|s| s.step_id == "olive_loyalty_003").unwrap();
    assert_eq!(olive.extra["earned_rewards_usd"].as_f64().unwrap(), 19.00);

    // The compiled instruction credits Olive's rewards calculation.
    let instruction = steps
        .iter()
        .find(|s| s.step_id == "payment_instruction_009")
        .unwrap();
    assert!(instruction.summary.contains("Olive's rewards"));
    let compiled_by: Vec<&str> = instruction.extra["compiled_by"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap())
        .collect();
    assert!(compiled_by.contains(&"olive"));
    assert!(compiled_by.contains(&"opal"));
}

#[tokio::test]
async fn paced_run_matches_sync_run_and_respects_floor() {
    let seq = MockSequencer::new();
    let sync = seq.run(PaymentChoice::Credit);

    let started = Instant::now();
    let paced = seq
        .run_paced(PaymentChoice::Credit, Duration::from_millis(1))
        .await;
    let elapsed = started.elapsed();

    assert_eq!(sync.len(), paced.len());
    for (a, b) in sync.iter().zip(paced.iter()) {
        assert_eq!(a.step_id, b.step_id);
        assert_eq!(a.summary, b.summary);
    }
    // 11 steps, each floored at MIN_STEP_DELAY.
    assert!(elapsed >= MIN_STEP_DELAY * sync.len() as u32);
}

#[tokio::test]
async fn real_sequencer_falls_back_to_mock_on_network_failure() {
    let real = RealSequencer::new(DEAD_AGGREGATE_URL);
    for choice in [PaymentChoice::Credit, PaymentChoice::Bnpl] {
        let fallback = real.run(choice).await;
        let mock = MockSequencer::new().run(choice);

        assert_eq!(fallback.len(), mock.len());
        for (a, b) in fallback.iter().zip(mock.iter()) {
            assert_eq!(a.step_id, b.step_id);
            assert_eq!(a.agent, b.agent);
            assert_eq!(a.decision, b.decision);
            assert_eq!(a.summary, b.summary);
        }
        // The fallback is still a fresh run with its own trace id.
        assert!(fallback.iter().all(|s| s.trace_id == fallback[0].trace_id));
    }
}
