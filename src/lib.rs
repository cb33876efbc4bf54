//! # jugglematch
//!
//! Deterministic stable-assignment engine for capacity-limited team
//! formation: a capacitated many-to-one stable matching (a
//! Hospital/Residents variant) solved by deferred acceptance with
//! cascading displacement.
//!
//! ## Architecture
//!
//! The crate consists of:
//! - **Types**: entities and records (Juggler, Circuit, SkillVector,
//!   AssignmentReceipt)
//! - **Arena**: slab-backed entity storage with per-circuit rosters
//! - **Engine**: deferred-acceptance placement and the stability audit
//!
//! ## Design Principles
//!
//! 1. **Determinism**: identical input and input order produce identical
//!    assignments and an identical state root
//! 2. **No Floating Point**: all scores use fixed-point arithmetic
//!    (10^8 scaling)
//! 3. **Arena Storage**: entities live in a slab and are addressed by id,
//!    never by shared references
//! 4. **Typed Failures**: malformed records and exhausted preference
//!    lists abort the run with the offending record named
//!
//! ## Example
//!
//! ```
//! use jugglematch::{Circuit, Juggler, MatchPool, PlacementEngine, SkillVector};
//! use jugglematch::engine::verify_stability;
//! use jugglematch::types::score::to_fixed;
//!
//! let mut pool = MatchPool::new();
//! pool.add_circuit(Circuit::new(0, SkillVector::new(
//!     to_fixed("7").unwrap(), to_fixed("3").unwrap(), to_fixed("9").unwrap(),
//! ))).unwrap();
//! pool.add_juggler(Juggler::new(0, SkillVector::new(
//!     to_fixed("9").unwrap(), to_fixed("2").unwrap(), to_fixed("5").unwrap(),
//! ), vec![0])).unwrap();
//!
//! let receipt = PlacementEngine::new().place_all(&mut pool).unwrap();
//! assert_eq!(receipt.jugglers_placed, 1);
//! assert!(verify_stability(&pool).unwrap().is_stable());
//! ```

// ============================================================================
// Module declarations
// ============================================================================

/// Core data types: entities, scores, reporter records, errors
pub mod types;

/// Arena storage: the match pool and per-circuit rosters
pub mod arena;

/// Placement engine and stability audit
pub mod engine;

// ============================================================================
// Re-exports for convenience
// ============================================================================

pub use types::{AssignError, AssignmentReceipt, Circuit, Displacement, Juggler, RosterEntry, SkillVector};
pub use arena::{MatchPool, Roster};
pub use engine::{PlacementEngine, PlaceOutcome, StabilityReport};
