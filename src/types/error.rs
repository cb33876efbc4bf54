//! Error types for the assignment engine.
//!
//! There are exactly two failure kinds, both fatal: bad input discovered
//! during loading or preference completion, and a displacement chain that
//! runs off the end of a completed preference list. This is an offline
//! batch computation over validated, static input; there is no
//! recoverable or retriable class, and no partial-result mode. Every
//! error names the offending record so a failure can be diagnosed without
//! inspecting logs.

use thiserror::Error;

/// Fatal errors raised while loading entities or running the engine.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AssignError {
    /// A record violated an input contract: an out-of-range or duplicate
    /// preference id, a duplicate or non-dense entity id, a derived
    /// capacity of zero, or a score that overflows fixed-point range.
    ///
    /// Raised before matching starts (or, for overflow, on the offending
    /// proposal) and aborts the run.
    #[error("malformed input in {record}: {reason}")]
    MalformedInput {
        /// The offending record, e.g. "J17" or "C4"
        record: String,
        /// What was wrong with it
        reason: String,
    },

    /// A displacement chain consumed a juggler's entire completed
    /// preference list without finding capacity.
    ///
    /// Indicates the total seats are inconsistent with the population
    /// (e.g. a misconfigured capacity, or a population that does not
    /// divide evenly across circuits). Unreachable when the capacity was
    /// derived correctly from a divisible population.
    #[error("juggler J{juggler} exhausted all {attempts} preferences without finding a seat")]
    ExhaustedPreferences {
        /// Id of the juggler whose list ran out
        juggler: u64,
        /// Length of the completed list it worked through
        attempts: usize,
    },
}

impl AssignError {
    /// Shorthand for a [`AssignError::MalformedInput`] about a juggler
    pub fn malformed_juggler(id: u64, reason: impl Into<String>) -> Self {
        Self::MalformedInput {
            record: format!("J{}", id),
            reason: reason.into(),
        }
    }

    /// Shorthand for a [`AssignError::MalformedInput`] about a circuit
    pub fn malformed_circuit(id: u64, reason: impl Into<String>) -> Self {
        Self::MalformedInput {
            record: format!("C{}", id),
            reason: reason.into(),
        }
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
