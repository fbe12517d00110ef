//! The six pseudo-agents of the checkout flow
//!
//! Each agent contributes one or more stages of a simulated checkout
//! decision. `System` is reserved for records not attributable to a
//! specific agent.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::OcnError;

/// One of the named pseudo-services participating in a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Agent {
    /// Checkout decisioning and finalization
    Orca,
    /// Wallet method selection
    Opal,
    /// Credit / BNPL quoting
    Okra,
    /// KYB / trust verification
    Onyx,
    /// Loyalty incentives
    Olive,
    /// Processor auction and routing
    Weave,
    /// Non-agent records
    System,
}

impl Agent {
    /// All six checkout agents, in their trust-first role ordering
    pub const ROSTER: [Agent; 6] = [
        Agent::Onyx,
        Agent::Okra,
        Agent::Opal,
        Agent::Olive,
        Agent::Weave,
        Agent::Orca,
    ];

    /// Wire name, matching the serde representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Agent::Orca => "orca",
            Agent::Opal => "opal",
            Agent::Okra => "okra",
            Agent::Onyx => "onyx",
            Agent::Olive => "olive",
            Agent::Weave => "weave",
            Agent::System => "system",
        }
    }

    /// Human display label with the agent's role
    pub fn label(&self) -> &'static str {
        match self {
            Agent::Orca => "Orca (Checkout)",
            Agent::Opal => "Opal (Wallet)",
            Agent::Okra => "Okra (Credit)",
            Agent::Onyx => "Onyx (Trust)",
            Agent::Olive => "Olive (Loyalty)",
            Agent::Weave => "Weave (Routing)",
            Agent::System => "System",
        }
    }

    /// Capitalized short name for chat output
    pub fn display_name(&self) -> &'static str {
        match self {
            Agent::Orca => "Orca",
            Agent::Opal => "Opal",
            Agent::Okra => "Okra",
            Agent::Onyx => "Onyx",
            Agent::Olive => "Olive",
            Agent::Weave => "Weave",
            Agent::System => "System",
        }
    }
}

impl fmt::Display for Agent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Agent {
    type Err = OcnError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "orca" => Ok(Agent::Orca),
            "opal" => Ok(Agent::Opal),
            "okra" => Ok(Agent::Okra),
            "onyx" => Ok(Agent::Onyx),
            "olive" => Ok(Agent::Olive),
            "weave" => Ok(Agent::Weave),
            "system" => Ok(Agent::System),
            other => Err(OcnError::UnknownAgent {
                name: other.to_string(),
            }),
        }
    }
}
