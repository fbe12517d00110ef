//! OCN Types - Canonical domain types for the agent checkout demo
//!
//! This crate contains all foundational types for the OCN demo with zero
//! dependencies on other ocn crates. It defines:
//!
//! - The `Explanation` record every sequencer step produces
//! - Agent, decision, and score-type enums
//! - The demo shopping cart with computed totals
//! - Display toggles (verbosity, payment choice, agent mode)
//!
//! # Run Invariants
//!
//! Types here support the core demo invariants:
//!
//! 1. Every record of one run shares the same trace id
//! 2. Step ids are unique within a run; array order is causal order
//! 3. Timestamps are non-decreasing across a run
//! 4. Redaction is a display-time contract, never a mutation

pub mod agent;
pub mod cart;
pub mod error;
pub mod explanation;
pub mod toggles;

pub use agent::*;
pub use cart::*;
pub use error::*;
pub use explanation::*;
pub use toggles::*;

/// Version of the OCN demo types schema
pub const TYPES_VERSION: &str = "0.1.0";

/// Generate a fresh run trace id: `trace_<unix_millis>_<uuid prefix>`.
///
/// Distinct across calls; every record of a run carries the same value.
pub fn generate_trace_id() -> String {
    let millis = chrono::Utc::now().timestamp_millis();
    let suffix = uuid::Uuid::new_v4().simple().to_string();
    format!("trace_{}_{}", millis, &suffix[..9])
}

/// Round a currency amount half-away-from-zero to 2 decimal places.
///
/// The single rounding authority for every derived dollar amount in the
/// demo (rewards, installments, processing costs, tax).
pub fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trace_ids_are_distinct() {
        let a = generate_trace_id();
        let b = generate_trace_id();
        assert!(a.starts_with("trace_"));
        assert_ne!(a, b);
    }

    #[test]
    fn test_round_cents() {
        assert_eq!(round_cents(380.0 * 0.08), 30.40);
        assert_eq!(round_cents(380.0 * 0.05), 19.00);
        assert_eq!(round_cents(380.0 * 0.015 + 2.50), 8.20);
        assert_eq!(round_cents(0.0), 0.0);
    }
}
