//! Deterministic output records for result reporters.
//!
//! ## SSZ Serialization
//!
//! All records derive `SimpleSerialize` from ssz_rs for deterministic
//! fixed-size encoding. Two runs over the same input produce byte-identical
//! records, which is what makes the receipt's state root meaningful.
//!
//! ## Records
//!
//! - [`RosterEntry`]: one seated juggler on one circuit
//! - [`Displacement`]: one eviction inside a displacement chain
//! - [`AssignmentReceipt`]: run totals plus the assignment state root

use sha2::{Digest, Sha256};
use ssz_rs::prelude::*;

// ============================================================================
// RosterEntry
// ============================================================================

/// One row of the final assignment: a juggler seated on a circuit.
///
/// The pool emits these in deterministic order (circuits ascending, members
/// in seating order); their concatenated SSZ encoding is the preimage of
/// the receipt's state root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, SimpleSerialize)]
pub struct RosterEntry {
    /// Circuit the juggler ended up on
    pub circuit_id: u64,

    /// The seated juggler
    pub juggler_id: u64,

    /// Realized match score at that circuit (fixed-point)
    pub score: u64,

    /// Rank of the seat in the juggler's completed list (0 = top choice)
    pub preference_rank: u64,
}

impl RosterEntry {
    /// Create a new roster entry
    pub fn new(circuit_id: u64, juggler_id: u64, score: u64, preference_rank: u64) -> Self {
        Self {
            circuit_id,
            juggler_id,
            score,
            preference_rank,
        }
    }
}

// ============================================================================
// Displacement
// ============================================================================

/// One eviction inside a displacement chain.
///
/// Seating a juggler on a full circuit evicts that roster's weakest member
/// (or the newcomer itself on a score tie); each such eviction is recorded
/// so a reporter can reconstruct how a chain cascaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, SimpleSerialize)]
pub struct Displacement {
    /// The evicted juggler
    pub juggler_id: u64,

    /// Circuit it was evicted from
    pub circuit_id: u64,

    /// The evicted juggler's score at that circuit (fixed-point)
    pub score: u64,
}

impl Displacement {
    /// Create a new displacement record
    pub fn new(juggler_id: u64, circuit_id: u64, score: u64) -> Self {
        Self {
            juggler_id,
            circuit_id,
            score,
        }
    }
}

// ============================================================================
// AssignmentReceipt
// ============================================================================

/// Summary of a completed placement run.
///
/// ## State Root
///
/// The 32-byte state root is a SHA-256 hash over the SSZ encoding of every
/// [`RosterEntry`] in deterministic order. Two runs over the same input
/// must produce the same root; a reporter can verify an assignment against
/// a receipt without re-running the engine.
///
/// ## Example
///
/// ```
/// use jugglematch::types::AssignmentReceipt;
///
/// let receipt = AssignmentReceipt::new(
///     12,         // jugglers_placed
///     4,          // circuit_count
///     3,          // team_capacity
///     5,          // displacements
///     [0u8; 32],  // state_root (would be computed)
/// );
/// assert!(!receipt.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, SimpleSerialize)]
pub struct AssignmentReceipt {
    /// Number of jugglers seated by the run
    pub jugglers_placed: u64,

    /// Number of circuits in the pool
    pub circuit_count: u64,

    /// Uniform per-circuit capacity used for the run
    pub team_capacity: u64,

    /// Total evictions across all displacement chains
    pub displacements: u64,

    /// State root of the final assignment (SHA-256, 32 bytes)
    pub state_root: [u8; 32],
}

impl AssignmentReceipt {
    /// Create a new receipt
    pub fn new(
        jugglers_placed: u64,
        circuit_count: u64,
        team_capacity: u64,
        displacements: u64,
        state_root: [u8; 32],
    ) -> Self {
        Self {
            jugglers_placed,
            circuit_count,
            team_capacity,
            displacements,
            state_root,
        }
    }

    /// Compute SHA-256 over the given data
    ///
    /// Returns a 32-byte array suitable for use as a state root.
    pub fn compute_hash(data: &[u8]) -> [u8; 32] {
        let mut hasher = Sha256::new();
        hasher.update(data);
        let result = hasher.finalize();

        let mut hash = [0u8; 32];
        hash.copy_from_slice(&result);
        hash
    }

    /// Get the state root as a hex string
    pub fn state_root_hex(&self) -> String {
        hex::encode(self.state_root)
    }

    /// Check whether the run seated anyone at all
    pub fn is_empty(&self) -> bool {
        self.jugglers_placed == 0
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
