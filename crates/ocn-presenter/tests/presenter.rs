//! Reveal lifecycle tests: ordering, cancellation, supersession.

use std::collections::BTreeMap;
use std::time::Duration;

use serde_json::json;

use ocn_presenter::{ChatPresenter, RevealTiming};
use ocn_types::{Agent, Decision, Explanation, KeySignal};

fn record(trace_id: &str, index: usize) -> Explanation {
    Explanation {
        trace_id: trace_id.to_string(),
        step_id: format!("step_{:03}", index + 1),
        agent: Agent::Orca,
        model_version: "m_v1".to_string(),
        policy_version: "p_v1".to_string(),
        summary: format!("Step {} of the run.", index + 1),
        decision: Decision::Allow,
        score: None,
        score_type: None,
        uncertainty: None,
        key_signals: vec![KeySignal::new("cart.total", json!(410.40), 0.1)],
        ap2_refs: Vec::new(),
        redactions: Vec::new(),
        timestamp: "2025-01-01T00:00:00+00:00".to_string(),
        extra: BTreeMap::new(),
    }
}

fn run(trace_id: &str, len: usize) -> Vec<Explanation> {
    (0..len).map(|i| record(trace_id, i)).collect()
}

async fn wait_for_complete(presenter: &ChatPresenter, expected: usize) {
    for _ in 0..200 {
        if presenter.revealed().await.len() == expected {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("reveal did not complete");
}

#[tokio::test]
async fn test_first_record_appears_immediately() {
    let timing = RevealTiming {
        per_char: Duration::ZERO,
        base_latency: Duration::ZERO,
        min_delay: Duration::from_millis(200),
    };
    let presenter = ChatPresenter::new(timing);

    presenter.present(run("trace_1_a", 5)).await;

    let revealed = presenter.revealed().await;
    assert_eq!(revealed.len(), 1);
    assert_eq!(revealed[0].step_id, "step_001");
}

#[tokio::test]
async fn test_reveals_all_records_in_order() {
    let presenter = ChatPresenter::new(RevealTiming::fast());
    let records = run("trace_1_a", 6);

    presenter.present(records.clone()).await;
    wait_for_complete(&presenter, records.len()).await;

    let revealed = presenter.revealed().await;
    let ids: Vec<&str> = revealed.iter().map(|r| r.step_id.as_str()).collect();
    let expected: Vec<&str> = records.iter().map(|r| r.step_id.as_str()).collect();
    assert_eq!(ids, expected);
    assert!(!presenter.is_revealing().await);
}

#[tokio::test]
async fn test_reset_stops_pending_reveals() {
    let timing = RevealTiming {
        per_char: Duration::ZERO,
        base_latency: Duration::ZERO,
        min_delay: Duration::from_millis(100),
    };
    let presenter = ChatPresenter::new(timing);

    presenter.present(run("trace_1_a", 8)).await;
    presenter.reset().await;

    assert!(presenter.revealed().await.is_empty());

    // No timer from the canceled run may land after the reset.
    tokio::time::sleep(Duration::from_millis(400)).await;
    assert!(presenter.revealed().await.is_empty());
    assert!(!presenter.is_revealing().await);
}

#[tokio::test]
async fn test_new_present_supersedes_in_flight_run() {
    let timing = RevealTiming {
        per_char: Duration::ZERO,
        base_latency: Duration::ZERO,
        min_delay: Duration::from_millis(50),
    };
    let presenter = ChatPresenter::new(timing);

    let first = presenter.present(run("trace_1_old", 8)).await;
    tokio::time::sleep(Duration::from_millis(20)).await;
    let second = presenter.present(run("trace_2_new", 4)).await;
    assert!(second > first);

    wait_for_complete(&presenter, 4).await;
    tokio::time::sleep(Duration::from_millis(200)).await;

    let revealed = presenter.revealed().await;
    assert_eq!(revealed.len(), 4);
    assert!(revealed.iter().all(|r| r.trace_id == "trace_2_new"));
}

#[tokio::test]
async fn test_events_carry_generation_and_index() {
    let presenter = ChatPresenter::new(RevealTiming::fast());
    let mut events = presenter.subscribe();

    let generation = presenter.present(run("trace_1_a", 3)).await;
    wait_for_complete(&presenter, 3).await;

    for expected_index in 0..3 {
        let event = events.try_recv().expect("missing reveal event");
        assert_eq!(event.generation, generation);
        assert_eq!(event.index, expected_index);
        assert_eq!(event.record.step_id, format!("step_{:03}", expected_index + 1));
    }
}

#[test]
fn test_delay_scales_with_summary_length() {
    let timing = RevealTiming::default();

    // Short summaries sit at the floor.
    assert_eq!(timing.delay_after("ok"), timing.min_delay);

    // Long summaries scale past it.
    let long = "x".repeat(120);
    let delay = timing.delay_after(&long);
    assert_eq!(delay, timing.per_char * 120 + timing.base_latency);
    assert!(delay > timing.min_delay);
}

#[tokio::test]
async fn test_empty_run_reveals_nothing() {
    let presenter = ChatPresenter::new(RevealTiming::fast());
    presenter.present(Vec::new()).await;
    assert!(presenter.revealed().await.is_empty());
    assert!(!presenter.is_revealing().await);
}
