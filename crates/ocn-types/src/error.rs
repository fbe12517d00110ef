//! Error types for the OCN demo
//!
//! Parse and validation failures only. Sequencer network failures are
//! recovered by falling back to mock output and never surface here.

use thiserror::Error;

/// Result type for OCN demo operations
pub type Result<T> = std::result::Result<T, OcnError>;

/// OCN demo error types
#[derive(Debug, Clone, Error)]
pub enum OcnError {
    /// Agent name not in the roster
    #[error("Unknown agent: {name}")]
    UnknownAgent { name: String },

    /// Verbosity flag outside brief/standard/forensics
    #[error("Unknown verbosity level: {value} (expected brief, standard, or forensics)")]
    UnknownVerbosity { value: String },

    /// Payment choice outside credit/bnpl
    #[error("Unknown payment choice: {value} (expected credit or bnpl)")]
    UnknownPaymentChoice { value: String },

    /// Agent mode outside mock/real
    #[error("Unknown agent mode: {value} (expected mock or real)")]
    UnknownAgentMode { value: String },

    /// Cart failed its arithmetic consistency check
    #[error("Inconsistent cart: {detail}")]
    InconsistentCart { detail: String },
}
