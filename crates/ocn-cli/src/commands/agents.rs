//! `ocn-demo agents` - list the roster with roles

use ocn_types::Agent;

use crate::display;

pub fn list() {
    display::section("Agent roster");
    for agent in Agent::ROSTER {
        println!(
            "  {} {}",
            display::agent_name_padded(agent, 8),
            role(agent)
        );
    }
}

fn role(agent: Agent) -> &'static str {
    match agent {
        Agent::Onyx => "Verifies merchant trust and KYB standing before money moves",
        Agent::Okra => "Quotes credit and BNPL terms against the cart total",
        Agent::Opal => "Selects the wallet payment method for the chosen instrument",
        Agent::Olive => "Applies loyalty incentives and computes earned rewards",
        Agent::Weave => "Runs the processor auction and routes the authorization",
        Agent::Orca => "Orchestrates checkout and issues the final decision",
        Agent::System => "Carries records not attributable to a single agent",
    }
}
