//! Display and run toggles
//!
//! Pure client-side state, owned by the surface that drives a run and
//! passed down as parameters. Nothing here is persisted.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::OcnError;

/// How much of each revealed record is shown.
///
/// Purely a display-time projection; never affects which records are
/// revealed or their order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verbosity {
    /// Summary only
    Brief,
    /// Evidence shown when key signals exist
    #[default]
    Standard,
    /// Full evidence plus the redacted-fields list
    Forensics,
}

impl FromStr for Verbosity {
    type Err = OcnError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "brief" => Ok(Verbosity::Brief),
            "standard" => Ok(Verbosity::Standard),
            "forensics" => Ok(Verbosity::Forensics),
            other => Err(OcnError::UnknownVerbosity {
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for Verbosity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Verbosity::Brief => "brief",
            Verbosity::Standard => "standard",
            Verbosity::Forensics => "forensics",
        };
        f.write_str(s)
    }
}

/// Payment method driving the choice-dependent step content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentChoice {
    #[default]
    Credit,
    Bnpl,
}

impl PaymentChoice {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentChoice::Credit => "credit",
            PaymentChoice::Bnpl => "bnpl",
        }
    }
}

impl FromStr for PaymentChoice {
    type Err = OcnError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "credit" => Ok(PaymentChoice::Credit),
            "bnpl" => Ok(PaymentChoice::Bnpl),
            other => Err(OcnError::UnknownPaymentChoice {
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for PaymentChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a run uses the mock sequencer or attempts live services
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentMode {
    #[default]
    Mock,
    Real,
}

impl FromStr for AgentMode {
    type Err = OcnError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mock" => Ok(AgentMode::Mock),
            "real" => Ok(AgentMode::Real),
            other => Err(OcnError::UnknownAgentMode {
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for AgentMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AgentMode::Mock => "mock",
            AgentMode::Real => "real",
        };
        f.write_str(s)
    }
}
