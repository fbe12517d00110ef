//! `ocn-demo run` - play one checkout run as a chat transcript

use std::time::Instant;

use colored::*;
use tokio::sync::broadcast::error::RecvError;

use ocn_presenter::{render, ChatPresenter, RenderedMessage, RevealTiming};
use ocn_sequencer::{MockSequencer, RealSequencer, Sequencer};
use ocn_types::{AgentMode, PaymentChoice, Verbosity};

use crate::display;

pub async fn run(
    choice: PaymentChoice,
    verbosity: Verbosity,
    mode: AgentMode,
    gateway: &str,
    fast: bool,
) -> anyhow::Result<()> {
    display::section(&format!("OCN checkout run · {} · {} mode", choice, mode));
    if mode == AgentMode::Real {
        display::info(&format!("aggregation endpoint: {}", gateway));
    }

    let explanations = match mode {
        AgentMode::Mock => MockSequencer::new().explanations(choice).await,
        AgentMode::Real => RealSequencer::new(gateway).explanations(choice).await,
    };
    anyhow::ensure!(!explanations.is_empty(), "sequencer produced no records");

    let trace_id = explanations[0].trace_id.clone();
    let total = explanations.len();

    let timing = if fast {
        RevealTiming::fast()
    } else {
        RevealTiming::default()
    };
    let presenter = ChatPresenter::new(timing);

    // Subscribe before presenting so the immediate first reveal is caught.
    let mut events = presenter.subscribe();
    let started = Instant::now();
    let generation = presenter.present(explanations).await;

    let mut last_decision = String::new();
    let mut shown = 0usize;
    while shown < total {
        let event = match events.recv().await {
            Ok(event) => event,
            Err(RecvError::Lagged(skipped)) => {
                tracing::warn!(skipped, "reveal events lagged");
                continue;
            }
            Err(RecvError::Closed) => break,
        };
        if event.generation != generation {
            continue;
        }

        let message = render(&event.record, verbosity);
        last_decision = message.decision.clone();
        print_message(&message);
        shown += 1;
    }

    println!();
    display::success(&format!(
        "{} steps in {:.1}s · trace {} · final decision: {}",
        shown,
        started.elapsed().as_secs_f64(),
        trace_id,
        display::decision_tag(&last_decision),
    ));

    Ok(())
}

fn print_message(message: &RenderedMessage) {
    println!();
    println!("  {}", display::agent_tag(message.agent).bold());
    println!("  {}", message.summary);
    println!(
        "  {} {}",
        "decision:".bright_black(),
        display::decision_tag(&message.decision)
    );

    let detail = match &message.detail {
        Some(detail) => detail,
        None => return,
    };

    if !detail.key_signals.is_empty() {
        println!("  {}", "signals:".bright_black());
        for signal in &detail.key_signals {
            let weight = signal
                .weight
                .map(|w| format!("  (w {:.2})", w).bright_black().to_string())
                .unwrap_or_default();
            println!("    {} = {}{}", signal.path.bright_cyan(), signal.value, weight);
        }
    }

    if !detail.ap2_refs.is_empty() {
        println!(
            "  {} {}",
            "refs:".bright_black(),
            detail.ap2_refs.join(", ")
        );
    }

    if detail
        .extra
        .as_object()
        .map(|map| !map.is_empty())
        .unwrap_or(false)
    {
        if let Ok(pretty) = serde_json::to_string_pretty(&detail.extra) {
            println!("  {}", "data:".bright_black());
            for line in pretty.lines() {
                println!("    {}", line.bright_black());
            }
        }
    }

    if let Some(fields) = &detail.redacted_fields {
        if !fields.is_empty() {
            println!(
                "  {} {}",
                "redacted:".bright_black(),
                fields.join(", ").yellow()
            );
        }
    }
}
