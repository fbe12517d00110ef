//! Display utilities for the chat transcript

use colored::*;

use ocn_types::Agent;

/// Print a section header
pub fn section(title: &str) {
    println!();
    println!("{}", "━".repeat(60).bright_black());
    println!(" {}", title.bright_white().bold());
    println!("{}", "━".repeat(60).bright_black());
}

/// Print a success message
pub fn success(message: &str) {
    println!("  {} {}", "✓".bright_green(), message);
}

/// Print an info message
pub fn info(message: &str) {
    println!("  {} {}", "→".bright_blue(), message);
}

/// Print a labeled value
pub fn labeled(label: &str, value: &str) {
    println!("  {}: {}", label.bright_white(), value.bright_cyan());
}

/// Colored chat tag for an agent, e.g. `Olive (Loyalty)`
pub fn agent_tag(agent: Agent) -> ColoredString {
    colorize(agent, agent.label())
}

/// Colored short name, padded for column alignment
pub fn agent_name_padded(agent: Agent, width: usize) -> ColoredString {
    colorize(agent, &format!("{:<width$}", agent.display_name()))
}

fn colorize(agent: Agent, text: &str) -> ColoredString {
    match agent {
        Agent::Orca => text.bright_cyan(),
        Agent::Opal => text.bright_magenta(),
        Agent::Okra => text.bright_yellow(),
        Agent::Onyx => text.bright_blue(),
        Agent::Olive => text.bright_green(),
        Agent::Weave => text.bright_white(),
        Agent::System => text.bright_black(),
    }
}

/// Color a decision string by its severity
pub fn decision_tag(decision: &str) -> ColoredString {
    match decision {
        "allow" => decision.bright_green(),
        "decline" => decision.bright_red(),
        "review" => decision.yellow(),
        "propose_alt" => decision.bright_cyan(),
        "error" => decision.bright_red(),
        _ => decision.normal(),
    }
}
